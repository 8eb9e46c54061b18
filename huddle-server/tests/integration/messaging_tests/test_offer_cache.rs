use huddle_core::SignalMessage;
use serde_json::json;

use crate::integration::{create_dispatcher, init_tracing, spawn_relay};
use crate::utils::{
    SETTLE_TIMEOUT_MS, TestClient, TestPeer, join_json, offer_json, room, wait_until,
};

#[tokio::test]
async fn test_late_joiner_receives_cached_offer() {
    init_tracing();

    let (addr, registry) = spawn_relay().await;
    let mut a = TestClient::connect(addr, "a").await.expect("connect a");
    let mut b = TestClient::connect(addr, "b").await.expect("connect b");
    let mut c = TestClient::connect(addr, "c").await.expect("connect c");

    a.send_json(&join_json("r1", "a")).await.expect("send");
    b.send_json(&join_json("r1", "b")).await.expect("send");
    assert!(wait_until(SETTLE_TIMEOUT_MS, || registry.member_count(&room("r1")) == Some(2)).await);

    a.send_json(&offer_json("r1", "x")).await.expect("send");

    let frame = b.recv_json().await.expect("b should receive the offer");
    assert_eq!(frame, json!({"type": "offer", "sdp": "x", "roomId": "r1"}));
    a.expect_silence().await.expect("offer must not echo to its sender");

    c.send_json(&join_json("r1", "c")).await.expect("send");

    let frame = c.recv_json().await.expect("c should receive the cached offer");
    assert_eq!(frame, json!({"type": "offer", "sdp": "x", "roomId": "r1"}));

    a.expect_silence().await.expect("a gets nothing on c's join");
    b.expect_silence().await.expect("b gets nothing on c's join");
    c.expect_silence().await.expect("c gets the offer exactly once");
}

#[test]
fn test_new_offer_overwrites_cached_one() {
    let dispatcher = create_dispatcher();
    let mut a = TestPeer::new();
    let mut b = TestPeer::new();

    a.join(&dispatcher, "r1");
    a.send(&dispatcher, "r1", SignalMessage::Offer { sdp: "first".into() });
    b.join(&dispatcher, "r1");
    assert_eq!(
        b.expect_one().message,
        SignalMessage::Offer {
            sdp: "first".into()
        }
    );

    b.send(&dispatcher, "r1", SignalMessage::Offer { sdp: "second".into() });
    assert_eq!(
        a.expect_one().message,
        SignalMessage::Offer {
            sdp: "second".into()
        }
    );
    assert_eq!(
        dispatcher.registry().cached_offer(&room("r1")).as_deref(),
        Some("second")
    );

    let mut c = TestPeer::new();
    c.join(&dispatcher, "r1");
    let frame = c.expect_one();
    assert_eq!(
        frame.message,
        SignalMessage::Offer {
            sdp: "second".into()
        }
    );
    assert_eq!(frame.room_id, room("r1"));
    a.assert_silent();
    b.assert_silent();
}

#[test]
fn test_answer_is_relayed_but_not_cached() {
    let dispatcher = create_dispatcher();
    let mut a = TestPeer::new();
    let mut b = TestPeer::new();

    a.join(&dispatcher, "r1");
    b.join(&dispatcher, "r1");
    b.send(&dispatcher, "r1", SignalMessage::Answer { sdp: "y".into() });

    assert_eq!(a.expect_one().message, SignalMessage::Answer { sdp: "y".into() });
    assert_eq!(dispatcher.registry().cached_offer(&room("r1")), None);

    let mut c = TestPeer::new();
    c.join(&dispatcher, "r1");
    c.assert_silent();
}
