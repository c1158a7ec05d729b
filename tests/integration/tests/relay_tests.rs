//! Relay integration tests
//!
//! Boots the gateway on an ephemeral port and drives it with real
//! WebSocket clients.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use integration_tests::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_chat_fans_out_to_everyone_including_sender() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice.send_json(&json!({"message": "hi"})).await.unwrap();

    let frame_a = alice.recv_json().await.unwrap();
    let frame_b = bob.recv_json().await.unwrap();
    let frame_c = carol.recv_json().await.unwrap();

    // Everyone, the sender included, sees the identical payload.
    assert_eq!(frame_a, frame_b);
    assert_eq!(frame_b, frame_c);
    assert_eq!(frame_a["message"], "hi");

    // Attribution: nickname defaults to the remote address, color is a
    // 3-digit hex color.
    let client = frame_a["client"].as_str().unwrap();
    assert!(client.starts_with("127.0.0.1:"));
    let color = frame_a["color"].as_str().unwrap();
    assert_eq!(color.len(), 4);
    assert!(color.starts_with('#'));
}

#[tokio::test]
async fn test_color_is_stable_across_messages() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect().await.unwrap();

    client.send_json(&json!({"message": "one"})).await.unwrap();
    let first = client.recv_json().await.unwrap();

    client.send_json(&json!({"message": "two"})).await.unwrap();
    let second = client.recv_json().await.unwrap();

    assert_eq!(first["color"], second["color"]);
}

#[tokio::test]
async fn test_nick_change_is_silent_then_used() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    // The nickname command itself is not broadcast.
    bob.send_json(&json!({"message": "/nick Bob"})).await.unwrap();
    alice.expect_silence().await;

    // But later chat carries the new name.
    bob.send_json(&json!({"message": "yo"})).await.unwrap();
    let frame = alice.recv_json().await.unwrap();
    assert_eq!(frame["client"], "Bob");
    assert_eq!(frame["message"], "yo");
}

#[tokio::test]
async fn test_drag_relays_as_drawline() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut artist = server.connect().await.unwrap();
    let mut viewer = server.connect().await.unwrap();

    artist
        .send_json(&json!({"action": "drag", "from": [10, 20], "to": [30, 40]}))
        .await
        .unwrap();

    let frame = viewer.recv_json().await.unwrap();
    assert_eq!(frame["action"], "drawline");
    assert_eq!(frame["from"], json!([10, 20]));
    assert_eq!(frame["to"], json!([30, 40]));
    assert!(frame["client"].is_string());
    assert!(frame["color"].is_string());
}

#[tokio::test]
async fn test_drag_missing_endpoint_is_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut artist = server.connect().await.unwrap();
    let mut viewer = server.connect().await.unwrap();

    artist
        .send_json(&json!({"action": "drag", "from": [10, 20]}))
        .await
        .unwrap();
    viewer.expect_silence().await;
}

#[tokio::test]
async fn test_malformed_payload_keeps_connection_open() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect().await.unwrap();

    client.send_raw("this is not json").await.unwrap();
    client.send_raw("[1, 2, 3]").await.unwrap();

    // The connection survived and still relays.
    client.send_json(&json!({"message": "still here"})).await.unwrap();
    let frame = client.recv_json().await.unwrap();
    assert_eq!(frame["message"], "still here");
}

#[tokio::test]
async fn test_nick_without_argument_is_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect().await.unwrap();

    client.send_json(&json!({"message": "/nick "})).await.unwrap();

    // No broadcast, no disconnect, nickname unchanged.
    client.send_json(&json!({"message": "ping"})).await.unwrap();
    let frame = client.recv_json().await.unwrap();
    assert_eq!(frame["message"], "ping");
    assert!(frame["client"].as_str().unwrap().starts_with("127.0.0.1:"));
}

#[tokio::test]
async fn test_unrecognized_event_is_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut sender = server.connect().await.unwrap();
    let mut other = server.connect().await.unwrap();

    sender.send_json(&json!({"something": "else"})).await.unwrap();
    other.expect_silence().await;
}

#[tokio::test]
async fn test_disconnected_client_stops_receiving() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let carol = server.connect().await.unwrap();

    carol.close().await.unwrap();

    // Give the server a moment to unregister the closed connection.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    alice.send_json(&json!({"message": "bye carol"})).await.unwrap();

    assert_eq!(alice.recv_json().await.unwrap()["message"], "bye carol");
    assert_eq!(bob.recv_json().await.unwrap()["message"], "bye carol");
}
