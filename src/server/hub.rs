use crate::application::{Envelope, PairingEventLoop, PairingStats};
use crate::model::{ClientEvent, ClientId, ConnectionState, NetworkError};
use crate::server::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_OUTBOUND_CAPACITY: usize = 64;
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

type Delivery = (Connection, Envelope);

/// Process-wide pairing state shared by every connection handler.
///
/// Each inbound event is decided and applied under a single lock; the
/// resulting notifications are sent only after the lock is released. A
/// recipient whose outbound queue stays full for longer than the send
/// timeout is reaped, so nobody stays connected after missing a
/// notification.
#[derive(Clone, Debug)]
pub struct Hub {
    state: Arc<Mutex<PairingEventLoop<Connection>>>,
    outbound_capacity: usize,
    send_timeout: Duration,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_OUTBOUND_CAPACITY, DEFAULT_SEND_TIMEOUT)
    }
}

impl Hub {
    pub fn new(outbound_capacity: usize, send_timeout: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PairingEventLoop::new())),
            outbound_capacity: outbound_capacity.max(1),
            send_timeout,
        }
    }

    pub fn outbound_capacity(&self) -> usize {
        self.outbound_capacity
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// A panic while the lock is held leaves it poisoned. The state is taken
    /// over anyway so the remaining connections keep working.
    fn lock(&self) -> MutexGuard<'_, PairingEventLoop<Connection>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Pairing state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run `decide` under the lock and pair each resulting envelope with the
    /// recipient's connection.
    fn apply<F>(&self, decide: F) -> Vec<Delivery>
    where
        F: FnOnce(&mut PairingEventLoop<Connection>) -> Vec<Envelope>,
    {
        let mut state = self.lock();
        let envelopes = decide(&mut state);
        resolve(&state, envelopes)
    }

    /// Disconnect each client in turn. Notifications are resolved after every
    /// single disconnect, so a partner reaped later in the same batch still
    /// hears about the earlier one.
    fn reap(&self, client_ids: &[ClientId]) -> Vec<Delivery> {
        let mut state = self.lock();
        let mut deliveries = Vec::new();
        for client_id in client_ids {
            let envelopes = state.disconnect(*client_id);
            deliveries.extend(resolve(&state, envelopes));
        }
        deliveries
    }

    /// Deliver until nothing is left. Stalled recipients are reaped, which
    /// may in turn notify their partners.
    async fn dispatch(&self, mut deliveries: Vec<Delivery>) {
        while !deliveries.is_empty() {
            let stalled = deliver(deliveries, self.send_timeout).await;
            deliveries = self.reap(&stalled);
        }
    }

    #[instrument(skip(self, connection))]
    pub fn connect(&self, connection: Connection) -> ClientId {
        self.lock().connect(connection)
    }

    #[instrument(skip(self, event), fields(event = %event.name()))]
    pub async fn handle_event(&self, client_id: ClientId, event: ClientEvent) {
        let deliveries = self.apply(|state| state.handle_event(client_id, event));
        self.dispatch(deliveries).await;
    }

    #[instrument(skip(self))]
    pub async fn disconnect(&self, client_id: ClientId) {
        let deliveries = self.apply(|state| state.disconnect(client_id));
        self.dispatch(deliveries).await;
    }

    /// Reap every connected client. Dropping their outbound senders closes
    /// the sockets. Returns how many clients were reaped.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> usize {
        let client_ids: Vec<ClientId> = self.lock().registry().ids().collect();
        let deliveries = self.reap(&client_ids);
        self.dispatch(deliveries).await;
        info!(count = client_ids.len(), "Reaped all clients");
        client_ids.len()
    }

    pub fn stats(&self) -> PairingStats {
        self.lock().stats()
    }

    pub fn state_of(&self, client_id: ClientId) -> Option<ConnectionState> {
        self.lock().state_of(client_id)
    }
}

/// Attach each envelope to its recipient's connection while the state is
/// still locked. Recipients that already left are skipped.
fn resolve(state: &PairingEventLoop<Connection>, envelopes: Vec<Envelope>) -> Vec<Delivery> {
    envelopes
        .into_iter()
        .filter_map(|envelope| match state.handle(envelope.to) {
            Some(connection) => Some((connection.clone(), envelope)),
            None => {
                debug!(to = ?envelope.to, "Recipient gone, dropping notification");
                None
            }
        })
        .collect()
}

/// Send in order and return the recipients whose queues stayed full.
async fn deliver(deliveries: Vec<Delivery>, send_timeout: Duration) -> Vec<ClientId> {
    let mut stalled: Vec<ClientId> = Vec::new();
    for (connection, envelope) in deliveries {
        if stalled.contains(&envelope.to) {
            continue;
        }
        let event = envelope.event.name();
        match connection.send(envelope.event, send_timeout).await {
            Ok(()) => debug!(to = ?envelope.to, %event, "Notification queued"),
            Err(NetworkError::QueueFull) => {
                warn!(to = ?envelope.to, %event, "Outbound queue stalled, dropping client");
                stalled.push(envelope.to);
            }
            Err(e) => debug!(to = ?envelope.to, %event, error = %e, "Recipient socket closed"),
        }
    }
    stalled
}
