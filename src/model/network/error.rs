use super::EventName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid data received: {0}")]
    InvalidData(#[from] serde_json::Error),
    #[error("Unexpected event from client: {0}")]
    UnexpectedEvent(EventName),
    #[error("Client is not connected")]
    NotConnected,
    #[error("Outbound queue stayed full")]
    QueueFull,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
