//! Status derivation rules for bridge response messages.
//!
//! The bridge reports outcomes textually: a success or failure glyph, an
//! `OK` or `ERROR` keyword, and the word `match` when the operation was a
//! template comparison. Classification is therefore textual and
//! order-sensitive, so the rules live in one explicit, prioritized table
//! ([`STATUS_RULES`]) evaluated top to bottom, with later matches
//! overriding earlier ones. The table keeps the precedence auditable and
//! each predicate independently testable.
//!
//! Rule order:
//!
//! 1. default: [`BridgeStatus::Error`]
//! 2. success glyph or case-insensitive `OK` → `success`
//! 3. failure glyph → `no_match` (the glyph signals "operation completed,
//!    no match", not a hard error)
//! 4. case-insensitive `match` with success glyph → `match`
//! 5. case-insensitive `match` with failure glyph → `no_match`
//!
//! The `match` rules are last because they are the most specific signal
//! and must win over the plain glyph rules.

use fpbridge_core::{BridgeStatus, constants::*};

/// One predicate → status mapping in the classification table.
pub struct StatusRule {
    /// Short label for diagnostics and tests.
    pub name: &'static str,

    /// Whether this rule applies to the given message.
    pub applies: fn(&str) -> bool,

    /// Status assigned when the rule applies.
    pub status: BridgeStatus,
}

/// The prioritized classification table. Evaluated in order; the last
/// applicable rule decides the status.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        name: "positive-outcome",
        applies: indicates_success,
        status: BridgeStatus::Success,
    },
    StatusRule {
        name: "negative-outcome",
        applies: indicates_failure,
        status: BridgeStatus::NoMatch,
    },
    StatusRule {
        name: "match-identified",
        applies: indicates_match_identified,
        status: BridgeStatus::Match,
    },
    StatusRule {
        name: "match-missed",
        applies: indicates_match_missed,
        status: BridgeStatus::NoMatch,
    },
];

/// Derive the status of a response from its final message.
///
/// Starts from [`BridgeStatus::Error`] and lets every applicable rule in
/// [`STATUS_RULES`] override the running status in table order.
#[must_use]
pub fn classify(message: &str) -> BridgeStatus {
    STATUS_RULES.iter().fold(BridgeStatus::Error, |status, rule| {
        if (rule.applies)(message) {
            rule.status
        } else {
            status
        }
    })
}

/// Whether a response line is a candidate for the result message.
///
/// Candidate lines carry a status glyph, start case-insensitively with
/// `OK`, or contain the case-insensitive keyword `ERROR`. When several
/// lines qualify, the last one wins.
#[must_use]
pub fn is_message_candidate(line: &str) -> bool {
    if line.contains(GLYPH_SUCCESS) || line.contains(GLYPH_FAILURE) {
        return true;
    }
    let upper = line.to_uppercase();
    upper.starts_with(KEYWORD_OK) || upper.contains(KEYWORD_ERROR)
}

fn indicates_success(message: &str) -> bool {
    message.contains(GLYPH_SUCCESS) || message.to_uppercase().contains(KEYWORD_OK)
}

fn indicates_failure(message: &str) -> bool {
    message.contains(GLYPH_FAILURE)
}

fn mentions_match(message: &str) -> bool {
    message.to_lowercase().contains(KEYWORD_MATCH)
}

fn indicates_match_identified(message: &str) -> bool {
    mentions_match(message) && message.contains(GLYPH_SUCCESS)
}

fn indicates_match_missed(message: &str) -> bool {
    mentions_match(message) && message.contains(GLYPH_FAILURE)
}
