use crate::integration::{init_tracing, spawn_relay};
use crate::utils::{SETTLE_TIMEOUT_MS, TestClient, chat_json, join_json, room, wait_until};

#[tokio::test]
async fn test_binary_frames_are_ignored() {
    init_tracing();

    let (addr, registry) = spawn_relay().await;
    let mut a = TestClient::connect(addr, "a").await.expect("connect a");
    let mut b = TestClient::connect(addr, "b").await.expect("connect b");

    a.send_json(&join_json("r1", "a")).await.expect("send");
    b.send_json(&join_json("r1", "b")).await.expect("send");
    assert!(wait_until(SETTLE_TIMEOUT_MS, || registry.member_count(&room("r1")) == Some(2)).await);

    let binary = chat_json("r1", "a", "as bytes").to_string();
    a.send_binary(binary.as_bytes()).await.expect("send binary");
    b.expect_silence().await.expect("binary frames are not relayed");

    a.send_json(&chat_json("r1", "a", "as text")).await.expect("send");
    let frame = b.recv_json().await.expect("text frames still flow");
    assert_eq!(frame["message"], "as text");
}
