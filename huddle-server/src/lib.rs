//! WebSocket signaling relay: rooms, offer caching for late joiners, and
//! fan-out of negotiation and in-call control messages.

mod config;
mod connection;
mod error;
mod room;
mod signaling;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use room::*;
pub use signaling::*;
