use crate::model::{ClientFrame, MessageKind};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no string `type` field")]
    MissingType,

    #[error("unknown message kind `{0}`")]
    UnknownKind(String),

    #[error("invalid `{kind}` payload: {source}")]
    InvalidPayload {
        kind: MessageKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one text frame into a typed [`ClientFrame`].
///
/// The `type` tag is checked before the body so that unknown kinds and
/// malformed known kinds are reported separately.
pub fn decode_client_frame(text: &str) -> Result<ClientFrame, DecodeError> {
    let value: Value = serde_json::from_str(text)?;

    let Value::Object(fields) = &value else {
        return Err(DecodeError::NotAnObject);
    };

    let tag = fields
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingType)?;

    let kind = MessageKind::parse(tag).ok_or_else(|| DecodeError::UnknownKind(tag.to_owned()))?;

    serde_json::from_value(value).map_err(|source| DecodeError::InvalidPayload { kind, source })
}
