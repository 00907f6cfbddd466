//! Wire protocol for the fingerprint bridge.
//!
//! This crate owns both halves of the bridge conversation:
//!
//! - [`BridgeCommand`]: encodes one operation as a single newline-terminated
//!   ASCII command line.
//! - [`ResponseParser`]: splits the decoded response into lines, extracts
//!   structured payload from recognized line prefixes, and classifies the
//!   outcome through the ordered [`STATUS_RULES`] table.
//!
//! The parser is a pure function of its input: no I/O, no state, identical
//! results for identical byte sequences. Transport concerns (connecting,
//! timeouts, permissive UTF-8 decoding) live in `fpbridge-client`.

pub mod classify;
pub mod command;
pub mod parser;

pub use classify::{STATUS_RULES, StatusRule, classify};
pub use command::BridgeCommand;
pub use parser::ResponseParser;
