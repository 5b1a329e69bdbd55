use crate::model::ClientId;
use std::collections::HashMap;
use tracing::debug;

/// Every identity that currently holds an open connection, together with the
/// transport handle used to reach it.
#[derive(Debug)]
pub struct ConnectionRegistry<H> {
    connections: HashMap<ClientId, H>,
}

impl<H> Default for ConnectionRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ConnectionRegistry<H> {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Create a fresh identity for `handle`.
    pub fn register(&mut self, handle: H) -> ClientId {
        let mut client_id = ClientId::new_v4();
        while self.connections.contains_key(&client_id) {
            client_id = ClientId::new_v4();
        }
        self.connections.insert(client_id, handle);
        debug!(?client_id, "Client registered");
        client_id
    }

    /// Remove `client_id`, returning its handle. Removing an unknown identity
    /// is a no-op.
    pub fn unregister(&mut self, client_id: ClientId) -> Option<H> {
        let removed = self.connections.remove(&client_id);
        if removed.is_some() {
            debug!(?client_id, "Client unregistered");
        }
        removed
    }

    pub fn contains(&self, client_id: ClientId) -> bool {
        self.connections.contains_key(&client_id)
    }

    pub fn handle(&self, client_id: ClientId) -> Option<&H> {
        self.connections.get(&client_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.connections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
