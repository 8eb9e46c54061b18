use crate::connection::PeerHandle;
use huddle_core::{ConnectionId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Accepted, no successful `join` yet.
    Connected,
    Joined(RoomId),
    /// Terminal.
    Closed,
}

/// Per-connection state owned by the connection's receive loop.
#[derive(Debug)]
pub struct Session {
    peer: PeerHandle,
    state: ConnectionState,
}

impl Session {
    pub fn new(peer: PeerHandle) -> Self {
        Self {
            peer,
            state: ConnectionState::Connected,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.peer.id()
    }

    pub fn peer(&self) -> &PeerHandle {
        &self.peer
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn current_room(&self) -> Option<&RoomId> {
        match &self.state {
            ConnectionState::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    /// Records the new room, returning the one it replaces. No-op once closed.
    pub(crate) fn enter_room(&mut self, room_id: RoomId) -> Option<RoomId> {
        if self.is_closed() {
            return None;
        }

        match std::mem::replace(&mut self.state, ConnectionState::Joined(room_id)) {
            ConnectionState::Joined(previous) => Some(previous),
            _ => None,
        }
    }

    /// Moves to `Closed`, returning the room the connection was in.
    pub(crate) fn close(&mut self) -> Option<RoomId> {
        match std::mem::replace(&mut self.state, ConnectionState::Closed) {
            ConnectionState::Joined(room_id) => Some(room_id),
            _ => None,
        }
    }
}
