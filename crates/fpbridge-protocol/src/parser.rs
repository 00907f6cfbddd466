//! Bridge response parser.
//!
//! Converts the decoded text of one bridge round trip into a structured
//! [`BridgeResult`].
//!
//! # Response Grammar
//!
//! The response is a sequence of text lines. Each line is trimmed of
//! surrounding whitespace and any leading byte-order-mark artifact, then
//! checked against the recognized prefixes in priority order (a line
//! matches at most one):
//!
//! ```text
//! BMP:<base64>            image payload (last occurrence wins)
//! PERSON_ID: <id>         matched subject identifier
//! FINGER_INDEX: <1-10>    matched finger (unset on parse failure)
//! MEMBER: <tag>           matched classification tag
//! SCORE: <float>          match score (unset on parse failure)
//! ```
//!
//! Any other line carrying a status glyph, an `OK` prefix, or the keyword
//! `ERROR` becomes the candidate result message; the last such line wins.
//! The final message is classified through [`classify`](crate::classify).
//!
//! # Examples
//!
//! ```
//! use fpbridge_protocol::ResponseParser;
//! use fpbridge_core::BridgeStatus;
//!
//! let result = ResponseParser::parse("✅ Successfully captured\nBMP:Zm9v\n");
//! assert_eq!(result.status, BridgeStatus::Success);
//! assert_eq!(result.message, "✅ Successfully captured");
//! assert_eq!(result.bmp_base64.as_deref(), Some("Zm9v"));
//! ```
//!
//! A response with no recognizable line yields the fixed sentinel:
//!
//! ```
//! use fpbridge_protocol::ResponseParser;
//! use fpbridge_core::BridgeStatus;
//!
//! let result = ResponseParser::parse("");
//! assert_eq!(result.status, BridgeStatus::Error);
//! assert_eq!(result.message, "no valid response from bridge");
//! ```

use crate::classify::{classify, is_message_candidate};
use fpbridge_core::{BridgeResult, constants::*};

/// Parser for bridge responses.
///
/// A pure function of its input: no I/O, no retained state. Parsing the
/// same text twice yields identical results.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse one complete decoded response into a [`BridgeResult`].
    ///
    /// Never fails: unrecognized lines are skipped, malformed numeric
    /// payloads leave their field unset, and an unusable response falls
    /// back to the sentinel message with status `error`.
    #[must_use]
    pub fn parse(text: &str) -> BridgeResult {
        let mut message: Option<String> = None;
        let mut bmp_base64: Option<String> = None;
        let mut person_id: Option<String> = None;
        let mut finger_index: Option<u8> = None;
        let mut member: Option<String> = None;
        let mut score: Option<f64> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim().trim_start_matches(UTF8_BOM);

            if let Some(rest) = line.strip_prefix(PREFIX_BMP) {
                bmp_base64 = Some(rest.to_string());
            } else if let Some(rest) = line.strip_prefix(PREFIX_PERSON_ID) {
                person_id = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(PREFIX_FINGER_INDEX) {
                if let Ok(index) = rest.trim().parse::<u8>() {
                    finger_index = Some(index);
                }
            } else if let Some(rest) = line.strip_prefix(PREFIX_MEMBER) {
                member = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(PREFIX_SCORE) {
                if let Ok(value) = rest.trim().parse::<f64>() {
                    score = Some(value);
                }
            } else if is_message_candidate(line) {
                message = Some(line.to_string());
            }
        }

        let message = message.unwrap_or_else(|| MSG_NO_VALID_RESPONSE.to_string());
        let status = classify(&message);

        BridgeResult {
            status,
            message,
            bmp_base64,
            person_id,
            finger_index,
            member,
            score,
        }
    }
}
