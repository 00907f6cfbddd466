//! Integration tests for the bridge client.
//!
//! These tests drive the full encode-connect-read-parse cycle against the
//! bridge emulator (and, for the raw edge cases, against hand-rolled
//! listeners). They exercise real network I/O, the timeout paths, and the
//! wire-exact command encoding.

use std::time::Duration;
use fpbridge_client::{BridgeClient, BridgeConfig};
use fpbridge_core::{BridgeStatus, Member};
use fpbridge_emulator::{BridgeEmulator, ScriptedOutcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn client_for(addr: std::net::SocketAddr) -> BridgeClient {
    BridgeClient::new(BridgeConfig::new(addr))
}

#[tokio::test]
async fn test_capture_success_roundtrip() {
    let handle = BridgeEmulator::new()
        .on(
            "CAPTURE",
            ScriptedOutcome::CaptureOk {
                bmp_base64: "Zm9v".into(),
            },
        )
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr())
        .capture("P7", 2, Member::Prisoner)
        .await;

    assert_eq!(result.status, BridgeStatus::Success);
    assert!(result.message.contains("Successfully captured"));
    assert_eq!(result.bmp_base64.as_deref(), Some("Zm9v"));
    assert!(result.person_id.is_none());

    // Wire-exact command line, newline stripped by the emulator's reader.
    assert_eq!(handle.received(), vec!["CAPTURE P7 2 prisoner"]);
}

#[tokio::test]
async fn test_verify_sends_member_and_reports_no_match() {
    let handle = BridgeEmulator::new()
        .on(
            "VERIFY",
            ScriptedOutcome::VerifyNoMatch {
                score: 12.0,
                bmp_base64: "Zm9v".into(),
            },
        )
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr())
        .verify("S-001", 5, Member::Suspect)
        .await;

    assert_eq!(result.status, BridgeStatus::NoMatch);
    assert_eq!(result.bmp_base64.as_deref(), Some("Zm9v"));
    assert_eq!(handle.received(), vec!["VERIFY S-001 5 suspect"]);
}

#[tokio::test]
async fn test_match_identified_returns_structured_fields() {
    let handle = BridgeEmulator::new()
        .on(
            "MATCH",
            ScriptedOutcome::Identified {
                person_id: "P42".into(),
                finger_index: 2,
                member: "prisoner".into(),
                score: 87.5,
                bmp_base64: "Zm9v".into(),
            },
        )
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr()).match_fingerprint().await;

    assert_eq!(result.status, BridgeStatus::Match);
    assert_eq!(result.person_id.as_deref(), Some("P42"));
    assert_eq!(result.finger_index, Some(2));
    assert_eq!(result.member.as_deref(), Some("prisoner"));
    assert_eq!(result.score, Some(87.5));
    assert_eq!(handle.received(), vec!["MATCH"]);
}

#[tokio::test]
async fn test_match_not_identified_has_no_structured_fields() {
    let handle = BridgeEmulator::new()
        .on("MATCH", ScriptedOutcome::NotIdentified { best_score: 23.4 })
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr()).match_fingerprint().await;

    assert_eq!(result.status, BridgeStatus::NoMatch);
    assert!(result.person_id.is_none());
    assert!(result.score.is_none());
}

#[tokio::test]
async fn test_unscripted_bridge_reports_device_not_connected() {
    let handle = BridgeEmulator::new().spawn().await.unwrap();

    let result = client_for(handle.addr())
        .capture("P1", 1, Member::Prisoner)
        .await;

    // The failure glyph classifies as no_match even for device faults;
    // the message carries the real cause.
    assert_eq!(result.status, BridgeStatus::NoMatch);
    assert!(result.message.contains("device not connected"));
}

#[tokio::test]
async fn test_silent_bridge_times_out() {
    let handle = BridgeEmulator::new()
        .on("CAPTURE", ScriptedOutcome::Silent)
        .spawn()
        .await
        .unwrap();

    let config = BridgeConfig::new(handle.addr()).capture_timeout(Duration::from_millis(200));
    let result = BridgeClient::new(config)
        .capture("P1", 1, Member::Prisoner)
        .await;

    assert_eq!(result.status, BridgeStatus::Error);
    assert!(result.message.contains("200ms"), "{}", result.message);
}

#[tokio::test]
async fn test_empty_response_yields_sentinel_error() {
    let handle = BridgeEmulator::new()
        .on("CAPTURE", ScriptedOutcome::Raw(Vec::new()))
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr())
        .capture("P1", 1, Member::Prisoner)
        .await;

    assert_eq!(result.status, BridgeStatus::Error);
    assert_eq!(result.message, "no valid response from bridge");
    assert!(result.bmp_base64.is_none());
    assert!(result.person_id.is_none());
    assert!(result.finger_index.is_none());
    assert!(result.member.is_none());
    assert!(result.score.is_none());
}

#[tokio::test]
async fn test_garbled_bytes_are_dropped_not_fatal() {
    let mut payload = vec![0xff, 0xfe];
    payload.extend_from_slice("✅ OK capture stored\r\n".as_bytes());
    let handle = BridgeEmulator::new()
        .on("CAPTURE", ScriptedOutcome::Raw(payload))
        .spawn()
        .await
        .unwrap();

    let result = client_for(handle.addr())
        .capture("P1", 1, Member::Prisoner)
        .await;

    assert_eq!(result.status, BridgeStatus::Success);
    assert_eq!(result.message, "✅ OK capture stored");
}

#[tokio::test]
async fn test_connection_refused_reports_error() {
    // Reserve an ephemeral port, then close it before the client dials.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(addr).match_fingerprint().await;

    assert_eq!(result.status, BridgeStatus::Error);
    assert!(result.message.contains("failed"), "{}", result.message);
}

#[tokio::test]
async fn test_concurrent_calls_use_independent_connections() {
    let handle = BridgeEmulator::new()
        .on(
            "CAPTURE",
            ScriptedOutcome::CaptureOk {
                bmp_base64: "Zm9v".into(),
            },
        )
        .spawn()
        .await
        .unwrap();

    let client = client_for(handle.addr());
    let (a, b) = tokio::join!(
        client.capture("P1", 1, Member::Prisoner),
        client.capture("P2", 2, Member::Suspect),
    );

    assert_eq!(a.status, BridgeStatus::Success);
    assert_eq!(b.status, BridgeStatus::Success);

    let mut received = handle.received();
    received.sort();
    assert_eq!(
        received,
        vec!["CAPTURE P1 1 prisoner", "CAPTURE P2 2 suspect"]
    );
}

/// The client must read multi-chunk responses to completion: a large
/// payload split across many writes with a pause in the middle still
/// arrives whole.
#[tokio::test]
async fn test_response_split_across_writes_is_accumulated() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut line = [0u8; 64];
        let _ = stream.read(&mut line).await.unwrap();

        stream.write_all("✅ Successfully captured\n".as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        stream.write_all(b"BMP:").await.unwrap();
        let payload = "Zm9v".repeat(8192);
        stream.write_all(payload.as_bytes()).await.unwrap();
        stream.write_all(b"\n").await.unwrap();
    });

    let result = client_for(addr).capture("P1", 1, Member::Prisoner).await;

    assert_eq!(result.status, BridgeStatus::Success);
    assert_eq!(
        result.bmp_base64.as_deref().map(str::len),
        Some("Zm9v".len() * 8192)
    );
}
