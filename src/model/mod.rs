mod connection_state;
pub mod network;

pub use connection_state::ConnectionState;
pub use network::{
    ClientEvent, ClientId, EventName, Frame, NetworkError, Payload, RelayEvent, RelayKind,
    ServerEvent,
};
