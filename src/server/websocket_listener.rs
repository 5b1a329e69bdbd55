use crate::server::{ConnectionHandler, Hub};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info, instrument, warn};

#[instrument(skip_all)]
pub async fn handle_websocket(ws: WebSocketUpgrade, State(hub): State<Hub>) -> impl IntoResponse {
    debug!("New WebSocket upgrade request");
    ws.on_upgrade(move |socket| listen(socket, ConnectionHandler::new(hub)))
}

#[instrument(skip(socket, connection_handler))]
async fn listen(socket: WebSocket, connection_handler: ConnectionHandler) {
    debug!("WebSocket connection established");
    let (ws_sender, ws_receiver) = socket.split();
    let (tx, rx) = tokio::sync::mpsc::channel(connection_handler.outbound_capacity());
    let connection_handler = connection_handler.with_sender(tx);

    let sender_task = handle_outgoing_messages(rx, ws_sender);
    let receiver_task = handle_incoming_messages(ws_receiver, &connection_handler);

    tokio::select! {
        _ = sender_task => {
            info!(client_id = ?connection_handler.client_id(), "Sender task completed");
        }
        _ = receiver_task => {
            info!(client_id = ?connection_handler.client_id(), "Receiver task completed");
        }
    }
    connection_handler.disconnect().await;
}

#[instrument(skip(rx, ws_sender))]
pub async fn handle_outgoing_messages(
    mut rx: Receiver<Message>,
    mut ws_sender: SplitSink<WebSocket, Message>,
) {
    debug!("Started handling outgoing messages");
    while let Some(msg) = rx.recv().await {
        if let Err(e) = ws_sender.send(msg).await {
            error!(error = %e, "Failed to send message");
            break;
        }
    }
    let _ = ws_sender.close().await;
}

#[instrument(skip(receiver, connection_handler))]
pub async fn handle_incoming_messages(
    mut receiver: SplitStream<WebSocket>,
    connection_handler: &ConnectionHandler,
) {
    debug!("Started handling incoming messages");
    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Close(_)) => {
                info!(client_id = ?connection_handler.client_id(), "Client disconnected");
                break;
            }
            Ok(message) => handle_message(message, connection_handler).await,
            Err(e) => {
                error!(error = %e, "Failed to receive message");
                break;
            }
        }
    }
}

pub async fn handle_message(message: Message, connection_handler: &ConnectionHandler) {
    match message {
        Message::Text(text) => {
            if let Err(e) = connection_handler.handle_text(&text).await {
                warn!(
                    client_id = ?connection_handler.client_id(),
                    error = %e,
                    "Rejected inbound frame"
                );
            }
        }
        Message::Ping(_) | Message::Pong(_) => {}
        _ => {
            warn!(
                client_id = ?connection_handler.client_id(),
                "Unsupported message type"
            );
        }
    }
}
