use uuid::Uuid;

/// Server-assigned handle for one connected participant.
pub type ClientId = Uuid;
