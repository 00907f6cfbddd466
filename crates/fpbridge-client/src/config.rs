use fpbridge_core::constants::{
    DEFAULT_BRIDGE_HOST, DEFAULT_BRIDGE_PORT, DEFAULT_CAPTURE_TIMEOUT, DEFAULT_MATCH_TIMEOUT,
};
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the bridge client.
///
/// Two timeouts exist because the operations have different latency
/// profiles: capture and verify wait for one finger placement, while match
/// compares the live capture against every stored template.
///
/// # Example
///
/// ```
/// use fpbridge_client::BridgeConfig;
/// use std::time::Duration;
///
/// let config = BridgeConfig::new("10.0.0.5:8123".parse().unwrap())
///     .capture_timeout(Duration::from_secs(10));
/// assert_eq!(config.match_timeout.as_secs(), 60);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Address of the bridge process.
    pub server_addr: SocketAddr,

    /// Timeout for capture and verify calls.
    pub capture_timeout: Duration,

    /// Timeout for match calls.
    pub match_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            server_addr: format!("{DEFAULT_BRIDGE_HOST}:{DEFAULT_BRIDGE_PORT}")
                .parse()
                .unwrap(),
            capture_timeout: Duration::from_millis(DEFAULT_CAPTURE_TIMEOUT),
            match_timeout: Duration::from_millis(DEFAULT_MATCH_TIMEOUT),
        }
    }
}

impl BridgeConfig {
    /// Create a configuration for the given bridge address with default
    /// timeouts.
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            ..Default::default()
        }
    }

    /// Set the capture/verify timeout.
    pub fn capture_timeout(mut self, timeout: Duration) -> Self {
        self.capture_timeout = timeout;
        self
    }

    /// Set the match timeout.
    pub fn match_timeout(mut self, timeout: Duration) -> Self {
        self.match_timeout = timeout;
        self
    }
}
