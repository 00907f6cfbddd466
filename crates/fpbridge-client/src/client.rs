//! Operation facade over the bridge transport.

use crate::{BridgeConfig, session};
use fpbridge_core::{BridgeResult, Member};
use fpbridge_protocol::{BridgeCommand, ResponseParser};
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the fingerprint bridge.
///
/// Each operation performs exactly one bridge round trip on its own
/// connection; the client holds no socket state, so it is cheap to clone
/// and safe to share. Concurrent calls are fully independent.
///
/// Operations never fail at the language level: transport faults come back
/// as a [`BridgeResult`] with status `error` and a descriptive message.
///
/// # Example
///
/// ```no_run
/// use fpbridge_client::{BridgeClient, BridgeConfig};
/// use fpbridge_core::{BridgeStatus, Member};
///
/// # async fn example() {
/// let client = BridgeClient::new(BridgeConfig::default());
///
/// let result = client.verify("P42", 2, Member::Prisoner).await;
/// if result.status == BridgeStatus::Match {
///     println!("verified: {}", result.message);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    config: BridgeConfig,
}

impl BridgeClient {
    /// Create a client for the configured bridge endpoint.
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Capture a fingerprint and store it under the given subject.
    ///
    /// `person_id` must contain no whitespace (caller contract, see
    /// [`BridgeCommand`]); `finger_index` has domain 1-10 and `member`
    /// selects the template store. Validation of these inputs belongs to
    /// the external boundary, not here.
    pub async fn capture(&self, person_id: &str, finger_index: u8, member: Member) -> BridgeResult {
        self.dispatch(
            BridgeCommand::capture(person_id, finger_index, member),
            self.config.capture_timeout,
        )
        .await
    }

    /// Verify a live fingerprint against the stored template for the given
    /// subject and finger.
    pub async fn verify(&self, person_id: &str, finger_index: u8, member: Member) -> BridgeResult {
        self.dispatch(
            BridgeCommand::verify(person_id, finger_index, member),
            self.config.capture_timeout,
        )
        .await
    }

    /// Match a live fingerprint against every stored template.
    ///
    /// Uses the longer match timeout: the bridge walks the whole template
    /// store before answering.
    pub async fn match_fingerprint(&self) -> BridgeResult {
        self.dispatch(BridgeCommand::Match, self.config.match_timeout)
            .await
    }

    async fn dispatch(&self, command: BridgeCommand, op_timeout: Duration) -> BridgeResult {
        let line = command.encode();
        debug!(verb = command.verb(), addr = %self.config.server_addr, "sending bridge command");

        match session::exchange(self.config.server_addr, &line, op_timeout).await {
            Ok(text) => ResponseParser::parse(&text),
            Err(err) => {
                warn!(verb = command.verb(), error = %err, "bridge exchange failed");
                BridgeResult::error(err.to_string())
            }
        }
    }
}
