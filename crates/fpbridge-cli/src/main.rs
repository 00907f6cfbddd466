//! Fingerprint bridge CLI — entry point.
//!
//! Operator tool for driving the bridge directly: capture a fingerprint,
//! verify one against a stored template, or match against the whole
//! template store. Prints the structured result as JSON (the same shape
//! the HTTP layer serves) and can decode the returned image to a BMP file.
//!
//! # Usage
//!
//! ```text
//! fpbridge [OPTIONS] <COMMAND>
//!
//! Commands:
//!   capture  Capture a fingerprint and store it under a subject
//!   verify   Verify a live fingerprint against a stored template
//!   match    Match a live fingerprint against all stored templates
//!
//! Options:
//!   --host <HOST>                  Bridge host [default: 127.0.0.1]
//!   --port <PORT>                  Bridge port [default: 8123]
//!   --capture-timeout <SECONDS>    Capture/verify timeout [default: 30]
//!   --match-timeout <SECONDS>      Match timeout [default: 60]
//! ```
//!
//! The connection options can also be set through `FPBRIDGE_HOST` and
//! `FPBRIDGE_PORT`; CLI arguments take precedence.
//!
//! Exits nonzero when the bridge reports status `error`, so the tool can
//! gate scripts.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fpbridge_client::{BridgeClient, BridgeConfig};
use fpbridge_core::{BridgeResult, Member, constants::DEFAULT_BRIDGE_PORT};

/// Fingerprint bridge command-line client.
#[derive(Debug, Parser)]
#[command(
    name = "fpbridge",
    about = "Capture, verify, and match fingerprints through the bridge service",
    version
)]
struct Cli {
    /// Bridge host.
    #[arg(long, default_value = "127.0.0.1", env = "FPBRIDGE_HOST")]
    host: IpAddr,

    /// Bridge TCP port.
    #[arg(long, default_value_t = DEFAULT_BRIDGE_PORT, env = "FPBRIDGE_PORT")]
    port: u16,

    /// Timeout for capture and verify operations, in seconds.
    #[arg(long, default_value_t = 30)]
    capture_timeout: u64,

    /// Timeout for the match operation, in seconds.
    #[arg(long, default_value_t = 60)]
    match_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture a fingerprint and store it under a subject.
    Capture {
        /// Subject identifier (must contain no whitespace).
        person_id: String,

        /// Finger index, 1 (right thumb) through 10 (left little).
        finger_index: u8,

        /// Subject classification.
        #[arg(long, default_value_t = Member::Prisoner)]
        member: Member,

        /// Decode the returned image and write it to this BMP file.
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// Verify a live fingerprint against a stored template.
    Verify {
        /// Subject identifier (must contain no whitespace).
        person_id: String,

        /// Finger index, 1 (right thumb) through 10 (left little).
        finger_index: u8,

        /// Subject classification.
        #[arg(long, default_value_t = Member::Prisoner)]
        member: Member,

        /// Decode the returned image and write it to this BMP file.
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// Match a live fingerprint against all stored templates.
    Match {
        /// Decode the returned image and write it to this BMP file.
        #[arg(long)]
        save_image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = BridgeConfig::new(SocketAddr::new(cli.host, cli.port))
        .capture_timeout(Duration::from_secs(cli.capture_timeout))
        .match_timeout(Duration::from_secs(cli.match_timeout));
    let client = BridgeClient::new(config);

    let (result, save_image) = match cli.command {
        Command::Capture {
            person_id,
            finger_index,
            member,
            save_image,
        } => (
            client.capture(&person_id, finger_index, member).await,
            save_image,
        ),
        Command::Verify {
            person_id,
            finger_index,
            member,
            save_image,
        } => (
            client.verify(&person_id, finger_index, member).await,
            save_image,
        ),
        Command::Match { save_image } => (client.match_fingerprint().await, save_image),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(path) = save_image {
        save_bmp(&result, &path)?;
    }

    if result.status.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

/// Decode the base64 image payload and write it next to the JSON output.
fn save_bmp(result: &BridgeResult, path: &PathBuf) -> anyhow::Result<()> {
    let Some(payload) = result.bmp_base64.as_deref() else {
        anyhow::bail!("bridge response carried no image payload");
    };

    let bytes = BASE64
        .decode(payload.trim())
        .context("decoding BMP payload")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("writing image to {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved fingerprint image");
    Ok(())
}
