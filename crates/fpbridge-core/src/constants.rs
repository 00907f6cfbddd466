//! Core constants for the fingerprint bridge protocol.
//!
//! This module defines the wire-level constants of the bridge protocol:
//! command verbs, response line prefixes, the status glyphs and keywords
//! the classifier recognizes, and the default connection parameters.
//!
//! # Protocol Structure
//!
//! The request side is a single newline-terminated ASCII line:
//!
//! ```text
//! <VERB> <arg1> <arg2> ...\n
//! ```
//!
//! The response side is an arbitrary number of text lines. End of response
//! is signaled solely by the bridge closing the connection. Lines starting
//! with a recognized prefix carry structured payload; all other lines are
//! scanned for status glyphs and keywords.

// ============================================================================
// Command Verbs
// ============================================================================

/// Verb for the capture operation: `CAPTURE <person_id> <finger_index> <member>`.
pub const VERB_CAPTURE: &str = "CAPTURE";

/// Verb for the verify operation: `VERIFY <person_id> <finger_index> <member>`.
pub const VERB_VERIFY: &str = "VERIFY";

/// Verb for the match operation. Takes no arguments: `MATCH`.
pub const VERB_MATCH: &str = "MATCH";

// ============================================================================
// Response Line Prefixes
// ============================================================================

/// Prefix of the line carrying the base64-encoded BMP image payload.
///
/// The remainder of the line after this prefix is the payload. If the
/// bridge emits the line more than once, the last occurrence wins.
pub const PREFIX_BMP: &str = "BMP:";

/// Prefix of the line carrying the matched subject identifier.
pub const PREFIX_PERSON_ID: &str = "PERSON_ID:";

/// Prefix of the line carrying the matched finger index (1-10).
pub const PREFIX_FINGER_INDEX: &str = "FINGER_INDEX:";

/// Prefix of the line carrying the matched classification tag.
pub const PREFIX_MEMBER: &str = "MEMBER:";

/// Prefix of the line carrying the numeric match score.
pub const PREFIX_SCORE: &str = "SCORE:";

// ============================================================================
// Status Glyphs and Keywords
// ============================================================================

/// Glyph the bridge uses to mark a line as a definitive positive outcome.
pub const GLYPH_SUCCESS: &str = "✅";

/// Glyph the bridge uses to mark a line as a definitive negative outcome.
///
/// A failure glyph means "operation completed, no match" rather than a
/// hard error.
pub const GLYPH_FAILURE: &str = "❌";

/// Keyword treated as a positive outcome (matched case-insensitively).
pub const KEYWORD_OK: &str = "OK";

/// Keyword marking a line as an error report (matched case-insensitively).
pub const KEYWORD_ERROR: &str = "ERROR";

/// Keyword that switches classification to match/no-match semantics
/// (matched case-insensitively).
pub const KEYWORD_MATCH: &str = "match";

/// Message used when no line of the response matched any recognized
/// prefix or status heuristic.
pub const MSG_NO_VALID_RESPONSE: &str = "no valid response from bridge";

/// Byte-order-mark artifact stripped from the start of decoded lines.
pub const UTF8_BOM: char = '\u{feff}';

// ============================================================================
// Connection Defaults
// ============================================================================

/// Default bridge host. The bridge process listens on loopback only.
pub const DEFAULT_BRIDGE_HOST: &str = "127.0.0.1";

/// Default bridge TCP port.
pub const DEFAULT_BRIDGE_PORT: u16 = 8123;

/// Default timeout for capture and verify operations (milliseconds).
///
/// # Value: 30000ms (30 seconds)
///
/// Capture and verify wait for a live finger placement, which takes a few
/// seconds of scanner acquisition time plus user reaction time.
pub const DEFAULT_CAPTURE_TIMEOUT: u64 = 30_000;

/// Default timeout for the match operation (milliseconds).
///
/// # Value: 60000ms (60 seconds)
///
/// Matching compares the live capture against every stored template, so it
/// is expected to take longer than a single-template operation.
pub const DEFAULT_MATCH_TIMEOUT: u64 = 60_000;

/// Read chunk size for accumulating the response stream (bytes).
pub const READ_CHUNK_SIZE: usize = 4096;

// ============================================================================
// Finger Index Domain
// ============================================================================

/// Lowest finger index (right thumb). Informational; the client does not
/// validate the range.
pub const MIN_FINGER_INDEX: u8 = 1;

/// Highest finger index (left little finger). Informational; the client
/// does not validate the range.
pub const MAX_FINGER_INDEX: u8 = 10;
