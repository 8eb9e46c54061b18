use crate::connection::{PeerHandle, Session};
use crate::room::RoomRegistry;
use huddle_core::{ClientFrame, MessageKind, RoomId, ServerFrame, SignalMessage};
use tracing::{debug, info, warn};

/// One outbound frame addressed to one member of `room_id`.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub room_id: RoomId,
    pub target: PeerHandle,
    pub frame: ServerFrame,
}

/// Applies the relay protocol to frames read from a connection.
///
/// [`dispatch`](Self::dispatch) performs the room mutation and plans the
/// outbound frames; [`deliver`](Self::deliver) pushes them to the recipients.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: RoomRegistry,
}

impl Dispatcher {
    pub fn new(registry: RoomRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Dispatches and delivers one frame. Returns how many peers it reached.
    pub fn handle(&self, session: &mut Session, frame: ClientFrame) -> usize {
        let deliveries = self.dispatch(session, frame);
        self.deliver(deliveries)
    }

    pub fn dispatch(&self, session: &mut Session, frame: ClientFrame) -> Vec<Delivery> {
        if session.is_closed() {
            debug!(
                "Ignoring {} from closed connection {}",
                frame.message.kind(),
                session.id()
            );
            return Vec::new();
        }

        let room_id = frame.room().cloned();

        match frame.message {
            SignalMessage::Join { username } => self.join(session, room_id, username),
            message => self.relay(session, room_id, message),
        }
    }

    /// Sends each frame, pruning recipients whose connection is gone.
    pub fn deliver(&self, deliveries: Vec<Delivery>) -> usize {
        let mut delivered = 0;

        for Delivery {
            room_id,
            target,
            frame,
        } in deliveries
        {
            match target.send(frame) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!("{}; removing it from room {}", e, room_id);
                    self.registry.leave(&room_id, target.id());
                }
            }
        }

        delivered
    }

    /// Removes the connection from its room and marks the session closed.
    pub fn disconnect(&self, session: &mut Session) {
        let Some(room_id) = session.close() else {
            return;
        };

        if self.registry.leave(&room_id, session.id()) {
            info!("Connection {} left room {}", session.id(), room_id);
        }
    }

    fn join(
        &self,
        session: &mut Session,
        room_id: Option<RoomId>,
        username: Option<String>,
    ) -> Vec<Delivery> {
        let Some(room_id) = room_id else {
            warn!("Rejected join without roomId from {}", session.id());
            return Vec::new();
        };

        if let Some(previous) = session.current_room().filter(|prev| **prev != room_id) {
            self.registry.leave(previous, session.id());
        }

        let cached_offer = self.registry.join(&room_id, session.peer().clone());
        session.enter_room(room_id.clone());

        info!(
            "User {} joined room {} (connection {})",
            username.as_deref().unwrap_or("<anonymous>"),
            room_id,
            session.id()
        );

        let Some(sdp) = cached_offer else {
            return Vec::new();
        };

        debug!("Sending cached offer for room {} to {}", room_id, session.id());

        vec![Delivery {
            target: session.peer().clone(),
            frame: ServerFrame::new(room_id.clone(), SignalMessage::Offer { sdp }),
            room_id,
        }]
    }

    fn relay(
        &self,
        session: &Session,
        room_id: Option<RoomId>,
        message: SignalMessage,
    ) -> Vec<Delivery> {
        let kind = message.kind();

        let Some(room_id) = room_id else {
            debug!("Dropped {} without roomId from {}", kind, session.id());
            return Vec::new();
        };

        let sender = session.id();
        let targets = self.registry.with_room(&room_id, |room| {
            if let SignalMessage::Offer { sdp } = &message {
                room.cache_offer(sdp.clone());
            }
            room.peers_except(&sender)
        });

        let Some(targets) = targets else {
            debug!("Dropped {} for unknown room {}", kind, room_id);
            return Vec::new();
        };

        if kind == MessageKind::Offer {
            info!("Offer stored for room {}", room_id);
        }

        debug!(
            "Relaying {} from {} to {} peer(s) in room {}",
            kind,
            sender,
            targets.len(),
            room_id
        );

        targets
            .into_iter()
            .map(|target| Delivery {
                room_id: room_id.clone(),
                target,
                frame: ServerFrame::new(room_id.clone(), message.clone()),
            })
            .collect()
    }
}
