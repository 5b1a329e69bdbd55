mod client;
mod command;
mod error;
mod payload;
mod signaling;

pub use client::ClientId;
pub use command::{ClientEvent, RelayEvent, RelayKind, ServerEvent};
pub use error::NetworkError;
pub use payload::Payload;
pub use signaling::{EventName, Frame};
