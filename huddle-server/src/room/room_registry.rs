use crate::connection::PeerHandle;
use crate::room::Room;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::RefMut;
use huddle_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tracing::info;

/// All live rooms, keyed by [`RoomId`].
///
/// A room is present exactly while it has at least one member. Every mutation
/// runs under the shard lock of the room's entry, so a join racing a leave on
/// the same room cannot lose a member or leave an empty room behind.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the room for mutation, creating it if absent.
    ///
    /// Callers must add a member before dropping the guard, otherwise an empty
    /// room stays registered until the next [`remove_if_empty`](Self::remove_if_empty).
    pub fn get_or_create(&self, room_id: &RoomId) -> RefMut<'_, RoomId, Room> {
        match self.rooms.entry(room_id.clone()) {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => {
                info!("Creating new room: {}", room_id);
                entry.insert(Room::new())
            }
        }
    }

    /// Adds `peer` to the room and returns the offer cached there, if any.
    pub fn join(&self, room_id: &RoomId, peer: PeerHandle) -> Option<String> {
        let mut room = self.get_or_create(room_id);
        room.add_member(peer);
        room.cached_offer().map(str::to_owned)
    }

    /// Removes the connection from the room, deleting the room if it became empty.
    ///
    /// Returns whether the connection was a member.
    pub fn leave(&self, room_id: &RoomId, id: ConnectionId) -> bool {
        let mut removed = false;

        let deleted = self.rooms.remove_if_mut(room_id, |_, room| {
            removed = room.remove_member(&id).is_some();
            room.is_empty()
        });

        if deleted.is_some() {
            info!("Room {} was deleted as it's empty", room_id);
        }

        removed
    }

    /// Deletes the room only if it has no members. Absent rooms are ignored.
    pub fn remove_if_empty(&self, room_id: &RoomId) -> bool {
        let deleted = self
            .rooms
            .remove_if(room_id, |_, room| room.is_empty())
            .is_some();

        if deleted {
            info!("Room {} was deleted as it's empty", room_id);
        }

        deleted
    }

    /// Runs `f` against an existing room. Never creates one.
    pub fn with_room<R>(&self, room_id: &RoomId, f: impl FnOnce(&mut Room) -> R) -> Option<R> {
        self.rooms.get_mut(room_id).map(|mut room| f(&mut room))
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn member_count(&self, room_id: &RoomId) -> Option<usize> {
        self.rooms.get(room_id).map(|room| room.len())
    }

    pub fn cached_offer(&self, room_id: &RoomId) -> Option<String> {
        self.rooms
            .get(room_id)
            .and_then(|room| room.cached_offer().map(str::to_owned))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }
}
