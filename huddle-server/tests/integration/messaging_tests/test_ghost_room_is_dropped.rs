use huddle_core::SignalMessage;
use serde_json::json;

use crate::integration::{create_dispatcher, init_tracing, spawn_relay};
use crate::utils::{TestClient, TestPeer, chat_json, offer_json, room};

#[test]
fn test_every_kind_to_ghost_room_is_dropped() {
    let dispatcher = create_dispatcher();
    let mut a = TestPeer::new();
    let mut b = TestPeer::new();
    b.join(&dispatcher, "r1");

    let messages = [
        SignalMessage::Offer { sdp: "x".into() },
        SignalMessage::Answer { sdp: "y".into() },
        SignalMessage::IceCandidate {
            candidate: json!("candidate:1"),
            sdp_mid: None,
            sdp_m_line_index: None,
        },
        SignalMessage::RaiseHand {
            username: "a".into(),
            hand_raised: true,
        },
        SignalMessage::MuteEveryone { muted: true },
        SignalMessage::MuteUser {
            username: "b".into(),
            muted: true,
        },
        SignalMessage::ChatMessage {
            username: "a".into(),
            message: "boo".into(),
        },
    ];

    for message in messages {
        assert_eq!(a.send(&dispatcher, "ghost", message), 0);
    }

    assert!(!dispatcher.registry().contains(&room("ghost")));
    assert_eq!(dispatcher.registry().len(), 1);
    a.assert_silent();
    b.assert_silent();
}

#[test]
fn test_message_without_room_is_dropped() {
    let dispatcher = create_dispatcher();
    let mut a = TestPeer::new();
    let mut b = TestPeer::new();
    a.join(&dispatcher, "r1");
    b.join(&dispatcher, "r1");

    assert_eq!(a.send(&dispatcher, "", SignalMessage::MuteEveryone { muted: true }), 0);
    b.assert_silent();
}

#[tokio::test]
async fn test_ghost_room_over_socket() {
    init_tracing();

    let (addr, registry) = spawn_relay().await;
    let mut a = TestClient::connect(addr, "a").await.expect("connect");

    a.send_json(&offer_json("ghost", "x")).await.expect("send");
    a.send_json(&chat_json("ghost", "a", "hello?")).await.expect("send");

    a.expect_silence().await.expect("no error frame is sent back");
    assert!(!registry.contains(&room("ghost")));
    assert!(registry.is_empty());
}
