use crate::model::{ClientEvent, ClientId, Frame, NetworkError};
use crate::server::{Connection, Hub};
use axum::extract::ws::Message;
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, instrument};

/// Per-socket glue between the transport and the shared [`Hub`].
///
/// Parsing and validation of inbound frames happens here, so nothing
/// malformed ever reaches the pairing state.
#[derive(Clone, Debug)]
pub struct ConnectionHandler {
    client_id: Option<ClientId>,
    hub: Hub,
}

impl ConnectionHandler {
    pub fn new(hub: Hub) -> Self {
        ConnectionHandler {
            client_id: None,
            hub,
        }
    }

    pub fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    pub fn outbound_capacity(&self) -> usize {
        self.hub.outbound_capacity()
    }

    /// Register a new identity whose notifications go to `sender`.
    #[instrument(skip(self, sender))]
    pub fn with_sender(&self, sender: Sender<Message>) -> Self {
        let client_id = self.hub.connect(Connection::new(sender));
        info!(?client_id, "Connection registered");
        ConnectionHandler {
            client_id: Some(client_id),
            hub: self.hub.clone(),
        }
    }

    /// Parse one text frame and apply it.
    pub async fn handle_text(&self, text: &str) -> Result<(), NetworkError> {
        let client_id = self.client_id.ok_or(NetworkError::NotConnected)?;
        let frame: Frame = serde_json::from_str(text)?;
        let event = ClientEvent::try_from(frame)?;
        debug!(?client_id, event = %event.name(), "Handling event");
        self.hub.handle_event(client_id, event).await;
        Ok(())
    }

    #[instrument(skip(self), fields(client_id = ?self.client_id))]
    pub async fn disconnect(&self) {
        if let Some(client_id) = self.client_id {
            self.hub.disconnect(client_id).await;
        }
    }
}
