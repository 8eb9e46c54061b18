use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Every `type` tag the relay understands.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MessageKind {
    Join,
    Offer,
    Answer,
    IceCandidate,
    RaiseHand,
    MuteEveryone,
    MuteUser,
    ChatMessage,
}

impl MessageKind {
    pub const ALL: [MessageKind; 8] = [
        MessageKind::Join,
        MessageKind::Offer,
        MessageKind::Answer,
        MessageKind::IceCandidate,
        MessageKind::RaiseHand,
        MessageKind::MuteEveryone,
        MessageKind::MuteUser,
        MessageKind::ChatMessage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Join => "join",
            MessageKind::Offer => "offer",
            MessageKind::Answer => "answer",
            MessageKind::IceCandidate => "ice-candidate",
            MessageKind::RaiseHand => "raise-hand",
            MessageKind::MuteEveryone => "mute-everyone",
            MessageKind::MuteUser => "mute-user",
            MessageKind::ChatMessage => "chat-message",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific body of a signaling frame.
///
/// `sdp` and the ICE candidate fields are opaque to the relay and forwarded as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SignalMessage {
    Join {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    Offer {
        sdp: String,
    },
    Answer {
        sdp: String,
    },
    IceCandidate {
        candidate: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sdp_mid: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sdp_m_line_index: Option<Value>,
    },
    RaiseHand {
        username: String,
        hand_raised: bool,
    },
    MuteEveryone {
        muted: bool,
    },
    MuteUser {
        username: String,
        muted: bool,
    },
    ChatMessage {
        username: String,
        message: String,
    },
}

impl SignalMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            SignalMessage::Join { .. } => MessageKind::Join,
            SignalMessage::Offer { .. } => MessageKind::Offer,
            SignalMessage::Answer { .. } => MessageKind::Answer,
            SignalMessage::IceCandidate { .. } => MessageKind::IceCandidate,
            SignalMessage::RaiseHand { .. } => MessageKind::RaiseHand,
            SignalMessage::MuteEveryone { .. } => MessageKind::MuteEveryone,
            SignalMessage::MuteUser { .. } => MessageKind::MuteUser,
            SignalMessage::ChatMessage { .. } => MessageKind::ChatMessage,
        }
    }
}

/// A frame received from a browser client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFrame {
    #[serde(rename = "roomId", default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(flatten)]
    pub message: SignalMessage,
}

impl ClientFrame {
    pub fn new(room_id: impl Into<RoomId>, message: SignalMessage) -> Self {
        Self {
            room_id: Some(room_id.into()),
            message,
        }
    }

    /// The target room, treating an empty `roomId` the same as a missing one.
    pub fn room(&self) -> Option<&RoomId> {
        self.room_id.as_ref().filter(|id| !id.is_empty())
    }
}

/// A frame relayed to a browser client, stamped with the room it came through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerFrame {
    #[serde(flatten)]
    pub message: SignalMessage,
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
}

impl ServerFrame {
    pub fn new(room_id: RoomId, message: SignalMessage) -> Self {
        Self { message, room_id }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
