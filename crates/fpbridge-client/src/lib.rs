//! Bridge client: transport session and operation facade.
//!
//! This crate connects the protocol layer to a live bridge process. It
//! owns the socket lifecycle of one call and the conversion of every
//! transport fault into a plain [`BridgeResult`](fpbridge_core::BridgeResult).
//!
//! # Architecture
//!
//! ```text
//! HTTP layer (external)
//!     │
//!     └─> BridgeClient ── capture / verify / match_fingerprint
//!            │
//!            ├─> BridgeCommand (encode, fpbridge-protocol)
//!            ├─> session::exchange ───(TCP)───> bridge process
//!            └─> ResponseParser (classify, fpbridge-protocol)
//! ```
//!
//! # Design Principles
//!
//! - **One connection per call**: no pooling, no reuse. The bridge answers
//!   one command per connection and closes it to mark end-of-response.
//! - **No retry**: each call attempts the bridge exactly once; retry
//!   policy belongs to the caller.
//! - **No faults past the boundary**: connection failures, timeouts, and
//!   I/O errors all come back as `BridgeResult { status: error }`.
//!
//! # Example
//!
//! ```no_run
//! use fpbridge_client::{BridgeClient, BridgeConfig};
//! use fpbridge_core::Member;
//!
//! # async fn example() {
//! let client = BridgeClient::new(BridgeConfig::default());
//! let result = client.capture("P42", 2, Member::Prisoner).await;
//! println!("{}: {}", result.status, result.message);
//! # }
//! ```

mod client;
mod config;
mod session;

pub use client::BridgeClient;
pub use config::BridgeConfig;
pub use session::SessionError;
