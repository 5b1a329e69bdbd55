use crate::application::{Envelope, PairingStats};
use crate::domain::{ConnectionRegistry, PairingError, SessionDirectory, WaitingQueue};
use crate::model::{ClientEvent, ClientId, ConnectionState, Payload, RelayEvent, ServerEvent};
use tracing::{debug, error, info, warn};

/// Owns the registry, the waiting queue and the session directory, and applies
/// one inbound event at a time to all three.
///
/// Every operation returns the notifications it decided on instead of sending
/// them, so callers can deliver them after releasing whatever lock guards the
/// loop.
#[derive(Debug)]
pub struct PairingEventLoop<H> {
    registry: ConnectionRegistry<H>,
    queue: WaitingQueue,
    directory: SessionDirectory,
}

impl<H> Default for PairingEventLoop<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PairingEventLoop<H> {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            queue: WaitingQueue::new(),
            directory: SessionDirectory::new(),
        }
    }

    /// Register a new connection. It starts out `Idle`.
    pub fn connect(&mut self, handle: H) -> ClientId {
        let client_id = self.registry.register(handle);
        info!(?client_id, "User connected");
        client_id
    }

    /// Reap `client_id`: withdraw any pending search, dissolve any pairing and
    /// forget the identity. Safe to call more than once.
    pub fn disconnect(&mut self, client_id: ClientId) -> Vec<Envelope> {
        if self.registry.unregister(client_id).is_none() {
            debug!(?client_id, "Disconnect for unknown client ignored");
            return Vec::new();
        }
        info!(?client_id, "User disconnected");

        if self.queue.remove(client_id) {
            debug!(?client_id, "Removed from waiting queue");
        }

        match self.end_pairing(client_id) {
            Some(partner) => {
                info!(?client_id, ?partner, "Notifying partner about disconnection");
                vec![Envelope::new(partner, ServerEvent::PartnerDisconnected)]
            }
            None => Vec::new(),
        }
    }

    pub fn handle_event(&mut self, from: ClientId, event: ClientEvent) -> Vec<Envelope> {
        match event {
            ClientEvent::FindPartner { offer } => self.request_partner(from, offer),
            ClientEvent::CancelSearch => {
                self.cancel_search(from);
                Vec::new()
            }
            ClientEvent::Relay(relay) => self.relay(from, relay),
        }
    }

    /// Look for a partner for `client_id`, abandoning its current one first.
    ///
    /// The oldest waiting identity is matched and receives `partner-found`
    /// carrying `offer`, which makes it the answering side. With nobody
    /// waiting, `client_id` joins the back of the queue silently.
    pub fn request_partner(&mut self, client_id: ClientId, offer: Option<Payload>) -> Vec<Envelope> {
        if !self.registry.contains(client_id) {
            debug!(?client_id, "Partner request from unknown client ignored");
            return Vec::new();
        }
        info!(?client_id, "User looking for partner");

        let mut envelopes = Vec::new();

        if let Some(former) = self.end_pairing(client_id) {
            info!(?client_id, partner = ?former, "Leaving current partner");
            envelopes.push(Envelope::new(former, ServerEvent::PartnerDisconnected));
        }

        if self.queue.remove(client_id) {
            debug!(?client_id, "Dropped earlier waiting entry");
        }

        while let Some(waiter) = self.queue.pop_oldest() {
            match self.start_pairing(waiter, client_id) {
                Ok(()) => {
                    info!(?client_id, partner = ?waiter, "Matching users");
                    envelopes.push(Envelope::new(waiter, ServerEvent::PartnerFound { offer }));
                    return envelopes;
                }
                Err(e) if e.client() == client_id => {
                    error!(?client_id, partner = ?waiter, error = %e, "Match failed");
                    self.return_to_queue_front(waiter);
                    return envelopes;
                }
                Err(e) => {
                    warn!(?client_id, partner = ?waiter, error = %e, "Skipping stale waiter");
                }
            }
        }

        match self.queue.enqueue(client_id) {
            Ok(()) => info!(?client_id, "User added to waiting list"),
            Err(e) => error!(?client_id, error = %e, "Failed to enqueue"),
        }
        envelopes
    }

    /// Withdraw a pending search. Never touches an active pairing.
    pub fn cancel_search(&mut self, client_id: ClientId) -> bool {
        let removed = self.queue.remove(client_id);
        if removed {
            info!(?client_id, "User cancelled search");
        } else {
            debug!(?client_id, "Cancel without pending search ignored");
        }
        removed
    }

    /// Forward `event` to the sender's current partner, or drop it.
    pub fn relay(&self, from: ClientId, event: RelayEvent) -> Vec<Envelope> {
        match self.directory.partner_of(from) {
            Some(partner) => {
                debug!(?from, to = ?partner, kind = ?event.kind, "Relaying event");
                vec![Envelope::new(partner, ServerEvent::Relay(event))]
            }
            None => {
                debug!(?from, kind = ?event.kind, "No partner found, dropping event");
                Vec::new()
            }
        }
    }

    /// Pair `a` with `b`. Both must be connected, distinct, and neither waiting
    /// nor paired.
    fn start_pairing(&mut self, a: ClientId, b: ClientId) -> Result<(), PairingError> {
        for client_id in [a, b] {
            if !self.registry.contains(client_id) {
                return Err(PairingError::UnknownClient(client_id));
            }
            if self.queue.contains(client_id) {
                return Err(PairingError::AlreadyWaiting(client_id));
            }
        }
        self.directory.start_pairing(a, b)
    }

    fn end_pairing(&mut self, client_id: ClientId) -> Option<ClientId> {
        self.directory.end_pairing(client_id)
    }

    fn return_to_queue_front(&mut self, client_id: ClientId) {
        if !self.registry.contains(client_id) || self.directory.is_paired(client_id) {
            return;
        }
        if let Err(e) = self.queue.enqueue_front(client_id) {
            warn!(?client_id, error = %e, "Could not return client to waiting list");
        }
    }

    pub fn partner_of(&self, client_id: ClientId) -> Option<ClientId> {
        self.directory.partner_of(client_id)
    }

    /// Derived lifecycle state, or `None` for an identity that is not
    /// connected.
    pub fn state_of(&self, client_id: ClientId) -> Option<ConnectionState> {
        if !self.registry.contains(client_id) {
            return None;
        }
        if let Some(partner) = self.directory.partner_of(client_id) {
            return Some(ConnectionState::Paired(partner));
        }
        if self.queue.contains(client_id) {
            return Some(ConnectionState::Waiting);
        }
        Some(ConnectionState::Idle)
    }

    pub fn handle(&self, client_id: ClientId) -> Option<&H> {
        self.registry.handle(client_id)
    }

    pub fn registry(&self) -> &ConnectionRegistry<H> {
        &self.registry
    }

    pub fn queue(&self) -> &WaitingQueue {
        &self.queue
    }

    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn stats(&self) -> PairingStats {
        PairingStats {
            connected: self.registry.len(),
            waiting: self.queue.len(),
            paired: self.directory.paired_clients(),
        }
    }
}
