mod connection;
mod connection_handler;
mod hub;
mod route;
mod server;
pub mod telemetry;
pub mod websocket_listener;

pub use connection::Connection;
pub use connection_handler::ConnectionHandler;
pub use hub::{Hub, DEFAULT_OUTBOUND_CAPACITY, DEFAULT_SEND_TIMEOUT};
pub use route::create_router;
pub use server::RelayServer;
