mod peer_handle;
mod session;

pub use peer_handle::*;
pub use session::*;
