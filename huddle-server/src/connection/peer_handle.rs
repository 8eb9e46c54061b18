use crate::error::DeliveryError;
use huddle_core::{ConnectionId, ServerFrame};
use tokio::sync::mpsc;

/// Cheap, cloneable sending half of one connection's outbound queue.
///
/// Rooms hold these instead of the socket itself. The queue is unbounded so a
/// broadcast never waits on a slow reader.
#[derive(Debug, Clone)]
pub struct PeerHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerFrame>,
}

impl PeerHandle {
    pub fn new(id: ConnectionId, tx: mpsc::UnboundedSender<ServerFrame>) -> Self {
        Self { id, tx }
    }

    /// Creates a handle with a fresh id and the receiver that drains it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(ConnectionId::new(), tx), rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn send(&self, frame: ServerFrame) -> Result<(), DeliveryError> {
        self.tx
            .send(frame)
            .map_err(|_| DeliveryError::Closed(self.id))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
