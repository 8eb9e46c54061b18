use crate::room::RoomRegistry;
use crate::signaling::Dispatcher;
use std::sync::Arc;

/// Largest inbound text message relayed by default (1 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 1 << 20;

/// Messages up to this multiple of the relay limit are read and dropped;
/// anything larger is refused by the WebSocket layer and ends the connection.
pub const TRANSPORT_HEADROOM: usize = 16;

struct SignalingInner {
    dispatcher: Dispatcher,
    max_message_size: usize,
}

/// Shared state handed to the WebSocket handler.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(registry: RoomRegistry, max_message_size: usize) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                dispatcher: Dispatcher::new(registry),
                max_message_size,
            }),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Largest text message that is decoded and relayed.
    pub fn max_message_size(&self) -> usize {
        self.inner.max_message_size
    }

    /// Hard ceiling handed to the WebSocket upgrade.
    pub fn transport_limit(&self) -> usize {
        self.inner.max_message_size.saturating_mul(TRANSPORT_HEADROOM)
    }
}
