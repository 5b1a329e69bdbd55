use crate::model::ClientId;

/// Rejections raised by the pairing domain structures.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum PairingError {
    #[error("Client cannot be paired with itself: {0}")]
    SelfPairing(ClientId),

    #[error("Client is already paired: {0}")]
    AlreadyPaired(ClientId),

    #[error("Client is already waiting: {0}")]
    AlreadyWaiting(ClientId),

    #[error("Client not found: {0}")]
    UnknownClient(ClientId),
}

impl PairingError {
    /// The identity the rejection is about.
    pub fn client(&self) -> ClientId {
        match self {
            PairingError::SelfPairing(id)
            | PairingError::AlreadyPaired(id)
            | PairingError::AlreadyWaiting(id)
            | PairingError::UnknownClient(id) => *id,
        }
    }
}
