//! Wire model shared by the huddle signaling relay and its clients.

mod codec;
mod model;

pub use codec::*;
pub use model::*;
