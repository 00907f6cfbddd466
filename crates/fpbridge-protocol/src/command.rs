//! Bridge command encoding.
//!
//! A command is a single ASCII line with space-separated positional
//! arguments in a fixed, verb-specific order:
//!
//! ```text
//! CAPTURE <person_id> <finger_index> <member>\n
//! VERIFY <person_id> <finger_index> <member>\n
//! MATCH\n
//! ```
//!
//! One command per connection; the trailing newline is the only newline in
//! the encoded form.

use fpbridge_core::{Member, constants::*};

/// One operation to send to the bridge.
///
/// Constructed immediately before sending and discarded after encoding.
///
/// # Caller Contract
///
/// No escaping is performed. `person_id` must contain no whitespace or
/// newlines; the encoder does not enforce this, the external boundary that
/// accepts subject identifiers does. `finger_index` has domain 1-10 but is
/// passed through unvalidated.
///
/// # Example
///
/// ```
/// use fpbridge_protocol::BridgeCommand;
/// use fpbridge_core::Member;
///
/// let cmd = BridgeCommand::capture("P1", 3, Member::Suspect);
/// assert_eq!(cmd.encode(), "CAPTURE P1 3 suspect\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    Capture {
        person_id: String,
        finger_index: u8,
        member: Member,
    },
    Verify {
        person_id: String,
        finger_index: u8,
        member: Member,
    },
    Match,
}

impl BridgeCommand {
    /// Build a capture command.
    pub fn capture(person_id: impl Into<String>, finger_index: u8, member: Member) -> Self {
        BridgeCommand::Capture {
            person_id: person_id.into(),
            finger_index,
            member,
        }
    }

    /// Build a verify command.
    pub fn verify(person_id: impl Into<String>, finger_index: u8, member: Member) -> Self {
        BridgeCommand::Verify {
            person_id: person_id.into(),
            finger_index,
            member,
        }
    }

    /// The command verb as it appears on the wire.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            BridgeCommand::Capture { .. } => VERB_CAPTURE,
            BridgeCommand::Verify { .. } => VERB_VERIFY,
            BridgeCommand::Match => VERB_MATCH,
        }
    }

    /// Encode as the wire form: exactly one line with one trailing `\n`.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            BridgeCommand::Capture {
                person_id,
                finger_index,
                member,
            } => format!("{VERB_CAPTURE} {person_id} {finger_index} {member}\n"),
            BridgeCommand::Verify {
                person_id,
                finger_index,
                member,
            } => format!("{VERB_VERIFY} {person_id} {finger_index} {member}\n"),
            BridgeCommand::Match => format!("{VERB_MATCH}\n"),
        }
    }
}
