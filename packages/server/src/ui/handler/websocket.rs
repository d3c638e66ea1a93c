//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;

use crate::{
    domain::{ConnectionHandle, EnvelopeError, ParticipantId, PusherReceiver, RoomId},
    infrastructure::message_pusher::outbound_channel,
    ui::state::AppState,
    usecase::{RelayError, RouteOutcome},
};

use super::error::ApiError;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub participant_id: String,
}

/// `GET /ws/room/{room_id}?participant_id=...`
///
/// The connection is bound before the upgrade so that an unknown room
/// is rejected with a plain HTTP status instead of an opened socket.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Convert String -> Domain Models
    let room_id = RoomId::try_from(room_id)?;
    let participant_id = ParticipantId::try_from(query.participant_id)?;

    // Create a bounded outbound queue for this connection
    let (tx, rx) = outbound_channel(state.outbound_queue_capacity);

    // register_client is called inside the UseCase
    let connected = state
        .connect_participant_usecase
        .execute(room_id, participant_id, tx)
        .await?;
    let handle = connected.handle;

    let state_for_failure = state.clone();
    Ok(ws
        .on_failed_upgrade(move |e| {
            tracing::warn!("WebSocket upgrade failed for '{}': {}", handle, e);
            tokio::spawn(async move {
                state_for_failure
                    .disconnect_participant_usecase
                    .execute(&handle)
                    .await;
            });
        })
        .on_upgrade(move |socket| handle_socket(socket, state, handle, rx)))
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// When the queue is closed (the connection was released or evicted for
/// overflowing) the socket is closed.
fn pusher_loop(
    mut rx: PusherReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn relay_frame(state: &AppState, handle: &ConnectionHandle, text: &str) {
    match state.relay_signal_usecase.route(handle, text).await {
        Ok(RouteOutcome::Delivered(report)) => {
            for failure in &report.failed {
                tracing::warn!(
                    "Failed to deliver '{}' to '{}': {}",
                    report.envelope.type_tag(),
                    failure.handle,
                    failure.error
                );
            }
        }
        Ok(RouteOutcome::Ignored { type_tag }) => {
            tracing::debug!("Ignored '{}' frame from '{}'", type_tag, handle);
        }
        Err(e) => {
            tracing::warn!("Dropped frame from '{}': {}", handle, e);
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    handle: ConnectionHandle,
    rx: PusherReceiver,
) {
    let (sender, mut receiver) = socket.split();

    // Spawn a task to push queued envelopes to this connection
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to relay frames received from this connection
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", handle, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    relay_frame(&state_clone, &handle, text.as_str()).await;
                }
                Message::Binary(_) => {
                    let e = RelayError::MalformedEnvelope(EnvelopeError::BinaryFrame);
                    tracing::warn!("Dropped frame from '{}': {}", handle, e);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", handle);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Release the connection from the registry, the room and the pusher
    if state
        .disconnect_participant_usecase
        .execute(&handle)
        .await
        .is_none()
    {
        tracing::debug!("Connection '{}' was already released", handle);
    }
}
