use crate::model::{ClientId, ServerEvent};
use serde::Serialize;

/// One outbound notification decided by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub to: ClientId,
    pub event: ServerEvent,
}

impl Envelope {
    pub fn new(to: ClientId, event: ServerEvent) -> Self {
        Envelope { to, event }
    }
}

/// Point-in-time counts of the pairing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairingStats {
    pub connected: usize,
    pub waiting: usize,
    pub paired: usize,
}
