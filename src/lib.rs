//! Anonymous one-on-one matchmaking and signaling relay.
//!
//! Connected clients ask for a partner, get paired with whoever has been
//! waiting longest, and then exchange opaque signaling and chat payloads that
//! the server forwards without looking inside.

pub mod application;
pub mod domain;
pub mod model;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod server;

pub mod prelude {
    pub use crate::application::{Envelope, PairingEventLoop, PairingStats};
    #[cfg(feature = "server")]
    pub use crate::config::Config;
    pub use crate::domain::{ConnectionRegistry, PairingError, SessionDirectory, WaitingQueue};
    pub use crate::model::ClientEvent;
    pub use crate::model::ClientId;
    pub use crate::model::ConnectionState;
    pub use crate::model::EventName;
    pub use crate::model::Frame;
    pub use crate::model::NetworkError;
    pub use crate::model::Payload;
    pub use crate::model::RelayEvent;
    pub use crate::model::RelayKind;
    pub use crate::model::ServerEvent;
    #[cfg(feature = "server")]
    pub use crate::server::Hub;
}
