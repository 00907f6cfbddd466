use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tag scoping which stored template a capture or verify
/// operation targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    #[default]
    Prisoner,
    Suspect,
}

impl Member {
    /// Wire representation of the classification tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Member::Prisoner => "prisoner",
            Member::Suspect => "suspect",
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Member {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prisoner" => Ok(Member::Prisoner),
            "suspect" => Ok(Member::Suspect),
            other => Err(Error::InvalidMember(other.to_string())),
        }
    }
}

/// Outcome classification of one bridge round trip.
///
/// Derived from the textual content of the bridge's response message, not
/// from a dedicated status field on the wire. See the classifier in
/// `fpbridge-protocol` for the derivation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeStatus {
    /// Operation completed successfully (capture saved, verify passed).
    Success,
    /// Match operation identified a stored subject.
    Match,
    /// Operation completed but no matching template was found.
    NoMatch,
    /// Operation failed: transport fault, timeout, or unusable response.
    Error,
}

impl BridgeStatus {
    /// String form used in the serialized result.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeStatus::Success => "success",
            BridgeStatus::Match => "match",
            BridgeStatus::NoMatch => "no_match",
            BridgeStatus::Error => "error",
        }
    }

    /// Returns `true` if the status is `Error`.
    #[inline]
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, BridgeStatus::Error)
    }

    /// Returns `true` for any completed-without-fault status.
    #[inline]
    #[must_use]
    pub fn is_completed(self) -> bool {
        !self.is_error()
    }
}

impl fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured outcome of one bridge operation.
///
/// `message` is always present; it falls back to
/// [`MSG_NO_VALID_RESPONSE`](crate::constants::MSG_NO_VALID_RESPONSE) when
/// the response contained no recognizable line. The optional fields are set
/// only when the corresponding response line prefix was observed, and the
/// serialized JSON omits them otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResult {
    pub status: BridgeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmp_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finger_index: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl BridgeResult {
    /// Build an error result with no payload fields.
    ///
    /// Used for every transport-level failure: the fault is reported
    /// through the result value, never raised past the client boundary.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        BridgeResult {
            status: BridgeStatus::Error,
            message: message.into(),
            bmp_base64: None,
            person_id: None,
            finger_index: None,
            member: None,
            score: None,
        }
    }
}

/// Human-readable name of a finger index (1-10).
///
/// Indices outside the 1-10 domain map to `"Unknown"`; the protocol layer
/// does not reject them.
#[must_use]
pub fn finger_name(index: u8) -> &'static str {
    match index {
        1 => "Right Thumb",
        2 => "Right Index",
        3 => "Right Middle",
        4 => "Right Ring",
        5 => "Right Little",
        6 => "Left Thumb",
        7 => "Left Index",
        8 => "Left Middle",
        9 => "Left Ring",
        10 => "Left Little",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("prisoner", Member::Prisoner)]
    #[case("suspect", Member::Suspect)]
    #[case("  PRISONER ", Member::Prisoner)]
    fn test_member_parse_valid(#[case] input: &str, #[case] expected: Member) {
        let member: Member = input.parse().unwrap();
        assert_eq!(member, expected);
    }

    #[rstest]
    #[case("")]
    #[case("inmate")]
    #[case("prisoner suspect")]
    fn test_member_parse_invalid(#[case] input: &str) {
        let result: Result<Member> = input.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_member_default_is_prisoner() {
        assert_eq!(Member::default(), Member::Prisoner);
        assert_eq!(Member::default().as_str(), "prisoner");
    }

    #[rstest]
    #[case(BridgeStatus::Success, "success")]
    #[case(BridgeStatus::Match, "match")]
    #[case(BridgeStatus::NoMatch, "no_match")]
    #[case(BridgeStatus::Error, "error")]
    fn test_status_as_str(#[case] status: BridgeStatus, #[case] expected: &str) {
        assert_eq!(status.as_str(), expected);
        assert_eq!(status.to_string(), expected);
    }

    #[test]
    fn test_status_json_form_matches_as_str() {
        let json = serde_json::to_string(&BridgeStatus::NoMatch).unwrap();
        assert_eq!(json, "\"no_match\"");
    }

    #[test]
    fn test_result_error_constructor() {
        let result = BridgeResult::error("socket error");
        assert_eq!(result.status, BridgeStatus::Error);
        assert_eq!(result.message, "socket error");
        assert!(result.bmp_base64.is_none());
        assert!(result.person_id.is_none());
        assert!(result.finger_index.is_none());
        assert!(result.member.is_none());
        assert!(result.score.is_none());
    }

    #[test]
    fn test_result_json_omits_unset_fields() {
        let result = BridgeResult::error("boom");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"status":"error","message":"boom"}"#);
    }

    #[test]
    fn test_result_json_includes_observed_fields() {
        let result = BridgeResult {
            score: Some(87.5),
            ..BridgeResult::error("x")
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"score\":87.5"));
    }

    #[rstest]
    #[case(1, "Right Thumb")]
    #[case(6, "Left Thumb")]
    #[case(10, "Left Little")]
    #[case(0, "Unknown")]
    #[case(11, "Unknown")]
    fn test_finger_name(#[case] index: u8, #[case] expected: &str) {
        assert_eq!(finger_name(index), expected);
    }
}
