//! Scriptable bridge emulator.
//!
//! Emulates the fingerprint bridge process for tests and local
//! development: binds a loopback listener, reads one command line per
//! connection, answers with a scripted response in the real bridge's line
//! grammar, and closes the connection to mark end-of-response.
//!
//! The emulator reproduces the bridge's observable wire behavior only -
//! there is no scanner, no template store, and no timing fidelity. Each
//! verb is scripted up front with a [`ScriptedOutcome`]; unscripted verbs
//! answer as a bridge whose scanner is unplugged would.
//!
//! # Example
//!
//! ```no_run
//! use fpbridge_emulator::{BridgeEmulator, ScriptedOutcome};
//!
//! # async fn example() -> std::io::Result<()> {
//! let handle = BridgeEmulator::new()
//!     .on("CAPTURE", ScriptedOutcome::CaptureOk { bmp_base64: "Zm9v".into() })
//!     .spawn()
//!     .await?;
//!
//! // Point a client at handle.addr() ...
//! # Ok(())
//! # }
//! ```

use fpbridge_core::constants::{VERB_CAPTURE, VERB_MATCH, VERB_VERIFY};
use fpbridge_core::finger_name;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What the emulator answers for one scripted verb.
///
/// The rendered responses follow the real bridge's output line for line:
/// a human-readable status line first, then the structured payload lines.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Capture completed; the image was "saved".
    CaptureOk { bmp_base64: String },

    /// Verify compared the live finger against the stored template and
    /// they matched.
    VerifyMatch { score: f64, bmp_base64: String },

    /// Verify completed but the score was below the match threshold.
    VerifyNoMatch { score: f64, bmp_base64: String },

    /// Match walked the template store and identified a subject.
    Identified {
        person_id: String,
        finger_index: u8,
        member: String,
        score: f64,
        bmp_base64: String,
    },

    /// Match walked the template store without finding a good score.
    NotIdentified { best_score: f64 },

    /// The scanner is unplugged. Default for unscripted verbs.
    DeviceNotConnected,

    /// Arbitrary bytes, for exercising edge cases in response handling.
    Raw(Vec<u8>),

    /// Accept the command but never answer and never close. For timeout
    /// tests.
    Silent,
}

impl ScriptedOutcome {
    /// Render the response bytes for a request, or `None` for [`Silent`].
    ///
    /// [`Silent`]: ScriptedOutcome::Silent
    fn render(&self, request: &Request) -> Option<Vec<u8>> {
        let text = match self {
            ScriptedOutcome::CaptureOk { bmp_base64 } => {
                let finger = finger_name(request.finger_index().unwrap_or(0));
                format!("✅ Successfully captured and saved {finger}.\r\nBMP:{bmp_base64}\r\n")
            }
            ScriptedOutcome::VerifyMatch { score, bmp_base64 } => {
                format!("✅ Match! Score: {score:.2}\r\nBMP:{bmp_base64}\r\n")
            }
            ScriptedOutcome::VerifyNoMatch { score, bmp_base64 } => {
                format!("❌ No Match. Score: {score:.2}\r\nBMP:{bmp_base64}\r\n")
            }
            ScriptedOutcome::Identified {
                person_id,
                finger_index,
                member,
                score,
                bmp_base64,
            } => {
                let finger = finger_name(*finger_index);
                format!(
                    "✅ Match: {person_id}, Finger: {finger}, Score: {score:.2}\r\n\
                     PERSON_ID: {person_id}\r\n\
                     FINGER_INDEX: {finger_index}\r\n\
                     MEMBER: {member}\r\n\
                     SCORE: {score:.2}\r\n\
                     BMP:{bmp_base64}\r\n"
                )
            }
            ScriptedOutcome::NotIdentified { best_score } => {
                format!("❌ No good match found. Best score = {best_score:.2}\r\n")
            }
            ScriptedOutcome::DeviceNotConnected => {
                "❌ Fingerprint device not connected.\r\n".to_string()
            }
            ScriptedOutcome::Raw(bytes) => return Some(bytes.clone()),
            ScriptedOutcome::Silent => return None,
        };
        Some(text.into_bytes())
    }
}

/// One received command line, split into verb and arguments.
struct Request {
    verb: String,
    args: Vec<String>,
}

impl Request {
    fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let verb = tokens.next()?;
        Some(Request {
            verb,
            args: tokens.collect(),
        })
    }

    fn finger_index(&self) -> Option<u8> {
        self.args.get(1)?.parse().ok()
    }
}

/// Builder for a scripted bridge emulator.
#[derive(Debug, Default)]
pub struct BridgeEmulator {
    script: HashMap<String, ScriptedOutcome>,
}

impl BridgeEmulator {
    /// Create an emulator with an empty script. Every valid command will
    /// answer [`ScriptedOutcome::DeviceNotConnected`] until scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for a verb (`"CAPTURE"`, `"VERIFY"`, `"MATCH"`).
    pub fn on(mut self, verb: &str, outcome: ScriptedOutcome) -> Self {
        self.script.insert(verb.to_string(), outcome);
        self
    }

    /// Bind a loopback listener on an ephemeral port and start serving.
    ///
    /// The returned handle owns the accept loop; dropping it stops the
    /// emulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn spawn(self) -> std::io::Result<EmulatorHandle> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let script = Arc::new(self.script);
        let received = Arc::new(Mutex::new(Vec::new()));

        info!(%addr, "bridge emulator listening");

        let accept_script = Arc::clone(&script);
        let accept_received = Arc::clone(&received);
        let task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        debug!(%peer, "bridge emulator accepted connection");
                        let script = Arc::clone(&accept_script);
                        let received = Arc::clone(&accept_received);
                        tokio::spawn(handle_connection(stream, script, received));
                    }
                    Err(e) => {
                        warn!(error = %e, "bridge emulator accept failed");
                        break;
                    }
                }
            }
        });

        Ok(EmulatorHandle {
            addr,
            received,
            task,
        })
    }
}

/// Running emulator instance.
pub struct EmulatorHandle {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl EmulatorHandle {
    /// Address the emulator is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Every command line received so far, trimmed, in arrival order.
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .expect("received-commands mutex poisoned")
            .clone()
    }
}

impl Drop for EmulatorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle_connection(
    stream: TcpStream,
    script: Arc<HashMap<String, ScriptedOutcome>>,
    received: Arc<Mutex<Vec<String>>>,
) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let mut line = String::new();
    if reader.read_line(&mut line).await.is_err() {
        return;
    }
    let line = line.trim().to_string();
    debug!(command = %line, "bridge emulator received command");
    received
        .lock()
        .expect("received-commands mutex poisoned")
        .push(line.clone());

    let response = dispatch(&line, &script);
    let Some(bytes) = response else {
        // Scripted silence: hold the connection open so the client's
        // timeout path is exercised.
        std::future::pending::<()>().await;
        return;
    };

    if let Err(e) = write_half.write_all(&bytes).await {
        warn!(error = %e, "bridge emulator write failed");
    }
    let _ = write_half.shutdown().await;
}

/// Pick the response for one command line, mirroring the real bridge's
/// dispatch: arity errors and unknown verbs answer `ERROR` lines, valid
/// verbs answer their scripted outcome.
fn dispatch(line: &str, script: &HashMap<String, ScriptedOutcome>) -> Option<Vec<u8>> {
    let Some(request) = Request::parse(line) else {
        return Some(b"ERROR Empty command\r\n".to_vec());
    };

    match request.verb.as_str() {
        VERB_CAPTURE | VERB_VERIFY if request.args.len() != 3 => {
            let verb = &request.verb;
            Some(format!("ERROR Usage: {verb} <person_id> <finger_index> <member>\r\n").into_bytes())
        }
        VERB_CAPTURE | VERB_VERIFY | VERB_MATCH => script
            .get(&request.verb)
            .unwrap_or(&ScriptedOutcome::DeviceNotConnected)
            .render(&request),
        _ => Some(b"ERROR Unknown command\r\n".to_vec()),
    }
}
