use crate::connection::PeerHandle;
use huddle_core::ConnectionId;
use std::collections::HashMap;

/// Members of one room plus the most recent offer seen in it.
#[derive(Debug, Default)]
pub struct Room {
    members: HashMap<ConnectionId, PeerHandle>,
    cached_offer: Option<String>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already a member.
    pub fn add_member(&mut self, peer: PeerHandle) -> bool {
        self.members.insert(peer.id(), peer).is_none()
    }

    pub fn remove_member(&mut self, id: &ConnectionId) -> Option<PeerHandle> {
        self.members.remove(id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn cached_offer(&self) -> Option<&str> {
        self.cached_offer.as_deref()
    }

    /// Replaces the cached offer, returning the one it overwrote.
    pub fn cache_offer(&mut self, sdp: String) -> Option<String> {
        self.cached_offer.replace(sdp)
    }

    /// Handles of every member except `id`, cloned so no lock is held while sending.
    pub fn peers_except(&self, id: &ConnectionId) -> Vec<PeerHandle> {
        self.members
            .iter()
            .filter(|(member, _)| *member != id)
            .map(|(_, peer)| peer.clone())
            .collect()
    }
}
