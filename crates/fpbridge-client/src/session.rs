//! One-shot transport session against the bridge.
//!
//! A session is a single socket lifecycle: connect, write the command
//! line, read until the peer closes the connection, decode. The bridge
//! frames its response solely by closing the connection, so the read loop
//! has no delimiter to look for; the configured timeout bounds the whole
//! call.
//!
//! The raw bytes are decoded as UTF-8 permissively: byte sequences that do
//! not decode cleanly are dropped rather than failing the call, preferring
//! partial data to total loss.

use bytes::BytesMut;
use fpbridge_core::constants::READ_CHUNK_SIZE;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, error, warn};

/// Errors that can occur during one bridge round trip.
///
/// The facade converts every variant into a
/// [`BridgeResult`](fpbridge_core::BridgeResult) with status `error`;
/// the `Display` form becomes the result message, so each message names
/// what the caller needs to act on (the peer address, the timeout
/// duration, the underlying fault).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The bridge was unreachable or refused the connection.
    #[error("connection to bridge at {addr} failed: {source}")]
    ConnectionFailed {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The connection attempt did not complete within the timeout.
    #[error("connection to bridge at {addr} timed out after {millis}ms")]
    ConnectionTimeout { addr: SocketAddr, millis: u64 },

    /// The peer did not close the connection within the timeout.
    #[error("no complete response from bridge within {millis}ms")]
    ReadTimeout { millis: u64 },

    /// Any other socket fault while writing or reading.
    #[error("bridge socket error: {0}")]
    Io(#[from] std::io::Error),
}

/// Perform one command/response round trip with the bridge.
///
/// Opens a fresh TCP connection, writes `command_line` in full, then reads
/// until the peer closes the connection (zero-length read) or `op_timeout`
/// elapses. The connection is dropped on every exit path.
///
/// # Errors
///
/// Returns a [`SessionError`] describing the first fault encountered; a
/// timeout during the read phase discards any partially received bytes.
pub(crate) async fn exchange(
    addr: SocketAddr,
    command_line: &str,
    op_timeout: Duration,
) -> Result<String, SessionError> {
    let timeout_millis = op_timeout.as_millis() as u64;

    debug!(%addr, timeout_ms = timeout_millis, "connecting to bridge");
    let mut stream = match timeout(op_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(source)) => {
            error!(%addr, error = %source, "bridge connection failed");
            return Err(SessionError::ConnectionFailed { addr, source });
        }
        Err(_) => {
            warn!(%addr, timeout_ms = timeout_millis, "bridge connection timed out");
            return Err(SessionError::ConnectionTimeout {
                addr,
                millis: timeout_millis,
            });
        }
    };

    // Commands are a few dozen bytes; waiting for more data to coalesce
    // only delays the scanner prompt on the bridge side.
    if let Err(e) = stream.set_nodelay(true) {
        warn!("failed to set TCP_NODELAY: {e} - latency may be impacted");
    }

    stream.write_all(command_line.as_bytes()).await?;

    let started = Instant::now();
    let mut data = BytesMut::with_capacity(READ_CHUNK_SIZE);
    match timeout(op_timeout, read_until_close(&mut stream, &mut data)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!(%addr, error = %e, "bridge read failed");
            return Err(SessionError::Io(e));
        }
        Err(_) => {
            warn!(%addr, timeout_ms = timeout_millis, "bridge response timed out");
            return Err(SessionError::ReadTimeout {
                millis: timeout_millis,
            });
        }
    }

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        bytes = data.len(),
        "bridge response received"
    );

    Ok(decode_dropping_invalid(&data))
}

/// Accumulate the full response stream until the peer closes the
/// connection.
async fn read_until_close(stream: &mut TcpStream, data: &mut BytesMut) -> std::io::Result<()> {
    loop {
        let n = stream.read_buf(data).await?;
        if n == 0 {
            return Ok(());
        }
    }
}

/// Decode bytes as UTF-8, dropping invalid sequences.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
