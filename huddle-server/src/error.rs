use huddle_core::ConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("connection {0} is closed")]
    Closed(ConnectionId),
}
