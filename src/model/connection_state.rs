use crate::model::ClientId;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a connected identity.
///
/// Never stored on its own: it is derived from waiting queue and session
/// directory membership.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Idle,
    Waiting,
    Paired(ClientId),
}

impl ConnectionState {
    pub fn is_waiting(&self) -> bool {
        matches!(self, ConnectionState::Waiting)
    }

    pub fn partner(&self) -> Option<ClientId> {
        match self {
            ConnectionState::Paired(partner) => Some(*partner),
            _ => None,
        }
    }
}
