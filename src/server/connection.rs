use crate::model::{Frame, NetworkError, ServerEvent};
use axum::extract::ws::Message;
use std::time::Duration;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::mpsc::Sender;

/// Outbound half of one client's socket.
#[derive(Debug, Clone)]
pub struct Connection {
    sender: Sender<Message>,
}

impl Connection {
    pub fn new(sender: Sender<Message>) -> Self {
        Connection { sender }
    }

    /// Queue `event` for the socket writer, waiting up to `timeout` for room.
    pub async fn send(&self, event: ServerEvent, timeout: Duration) -> Result<(), NetworkError> {
        let text = serde_json::to_string(&Frame::from(event))?;
        self.sender
            .send_timeout(Message::Text(text), timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => NetworkError::QueueFull,
                SendTimeoutError::Closed(_) => NetworkError::NotConnected,
            })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.sender.same_channel(&other.sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::channel;

    #[test]
    fn test_partial_eq() {
        let (sender, _rx) = channel(1);
        let connection = Connection::new(sender.clone());
        let connection2 = Connection::new(sender);
        let (other, _other_rx) = channel(1);
        assert_eq!(connection, connection2);
        assert_ne!(connection, Connection::new(other));
    }

    #[tokio::test]
    async fn test_send_serializes_frame() {
        let (sender, mut rx) = channel(1);
        let connection = Connection::new(sender);

        connection
            .send(ServerEvent::PartnerDisconnected, Duration::from_millis(10))
            .await
            .unwrap();

        let message = rx.recv().await.unwrap();
        assert_eq!(
            message,
            Message::Text(r#"{"event":"partner-disconnected"}"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_send_waits_for_room() {
        let (sender, mut rx) = channel(1);
        let connection = Connection::new(sender);
        connection
            .send(ServerEvent::PartnerDisconnected, Duration::from_millis(10))
            .await
            .unwrap();

        let reader = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let mut received = 0;
            while rx.recv().await.is_some() {
                received += 1;
            }
            received
        });
        connection
            .send(ServerEvent::PartnerDisconnected, Duration::from_secs(5))
            .await
            .unwrap();
        drop(connection);

        assert_eq!(reader.await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_send_reports_stalled_and_closed_queues() {
        let (sender, rx) = channel(1);
        let connection = Connection::new(sender);
        let timeout = Duration::from_millis(10);

        connection
            .send(ServerEvent::PartnerDisconnected, timeout)
            .await
            .unwrap();
        assert!(matches!(
            connection.send(ServerEvent::PartnerDisconnected, timeout).await,
            Err(NetworkError::QueueFull)
        ));

        drop(rx);
        assert!(connection.is_closed());
        assert!(matches!(
            connection.send(ServerEvent::PartnerDisconnected, timeout).await,
            Err(NetworkError::NotConnected)
        ));
    }
}
