//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ClientId, PusherChannel, RoomId},
    infrastructure::dto::ws::{
        ClientEvent, CodeUpdateMessage, ErrorMessage, LanguageUpdateMessage, MessageType,
        RoomStateMessage, UserJoinedMessage, UserLeftMessage,
    },
    ui::state::AppState,
    usecase::{ChangeLanguageError, EditCodeError, JoinRoomError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // One server-assigned id per connection; rooms are picked via the join
    // event, not the URL.
    let client_id = ClientId::generate();
    tracing::info!("Client '{}' connected", client_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, client_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, client_id: ClientId) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // The room this connection has joined, if any. Written by the receive
    // task, read by the disconnect path below.
    let joined_room: Arc<Mutex<Option<RoomId>>> = Arc::new(Mutex::new(None));

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_client_id = client_id.clone();
    let recv_joined_room = joined_room.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Ignoring unparseable event: {}", e);
                            continue;
                        }
                    };
                    handle_event(&recv_state, &recv_client_id, &recv_joined_room, &tx, event)
                        .await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_client_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let joined = joined_room.lock().await.clone();
    if let Some(room_id) = joined {
        let notify_targets = state.disconnect_usecase.execute(&room_id, &client_id).await;
        tracing::info!("Client '{}' disconnected from room {}", client_id, room_id);

        if !notify_targets.is_empty() {
            let left_msg = UserLeftMessage {
                r#type: MessageType::UserLeft,
                user_count: notify_targets.len(),
            };
            let left_json = serde_json::to_string(&left_msg).unwrap();
            if let Err(e) = state
                .disconnect_usecase
                .broadcast_user_left(notify_targets, &left_json)
                .await
            {
                tracing::warn!("Failed to broadcast user-left: {}", e);
            }
        }
    } else {
        tracing::info!("Client '{}' disconnected before joining", client_id);
    }
}

async fn handle_event(
    state: &Arc<AppState>,
    client_id: &ClientId,
    joined_room: &Arc<Mutex<Option<RoomId>>>,
    tx: &PusherChannel,
    event: ClientEvent,
) {
    match event {
        ClientEvent::Join { room_id, user_name } => {
            let room_id = RoomId::new(room_id);

            if joined_room.lock().await.is_some() {
                send_error(tx, "Already joined a room");
                return;
            }

            match state
                .join_room_usecase
                .execute(&room_id, client_id.clone(), tx.clone())
                .await
            {
                Ok(outcome) => {
                    *joined_room.lock().await = Some(room_id.clone());
                    tracing::info!("Client '{}' joined room {}", client_id, room_id);

                    let state_msg = RoomStateMessage {
                        r#type: MessageType::RoomState,
                        language: outcome.snapshot.language,
                        code: outcome.snapshot.code,
                        user_count: outcome.snapshot.user_count,
                    };
                    let _ = tx.send(serde_json::to_string(&state_msg).unwrap());

                    let joined_msg = UserJoinedMessage {
                        r#type: MessageType::UserJoined,
                        user_name,
                        user_count: outcome.snapshot.user_count,
                    };
                    let joined_json = serde_json::to_string(&joined_msg).unwrap();
                    if let Err(e) = state
                        .join_room_usecase
                        .broadcast_user_joined(outcome.notify_targets, &joined_json)
                        .await
                    {
                        tracing::warn!("Failed to broadcast user-joined: {}", e);
                    }
                }
                Err(JoinRoomError::RoomNotFound(_)) => {
                    send_error(tx, "Room not found");
                }
            }
        }
        ClientEvent::CodeChange { room_id, code } => {
            let room_id = RoomId::new(room_id);
            if !is_joined(joined_room, &room_id).await {
                tracing::debug!("code-change for room {} the client never joined", room_id);
                return;
            }
            let update = CodeUpdateMessage {
                r#type: MessageType::CodeUpdate,
                code: code.clone(),
            };
            let update_json = serde_json::to_string(&update).unwrap();
            match state
                .edit_code_usecase
                .execute(&room_id, client_id, code, &update_json)
                .await
            {
                Ok(()) => {}
                Err(EditCodeError::RoomNotFound(id)) => {
                    tracing::debug!("code-change for unknown room {}", id);
                }
            }
        }
        ClientEvent::LanguageChange { room_id, language } => {
            let room_id = RoomId::new(room_id);
            if !is_joined(joined_room, &room_id).await {
                tracing::debug!(
                    "language-change for room {} the client never joined",
                    room_id
                );
                return;
            }
            let update = LanguageUpdateMessage {
                r#type: MessageType::LanguageUpdate,
                language: language.clone(),
            };
            let update_json = serde_json::to_string(&update).unwrap();
            match state
                .change_language_usecase
                .execute(&room_id, language, &update_json)
                .await
            {
                Ok(()) => {}
                Err(ChangeLanguageError::RoomNotFound(id)) => {
                    tracing::debug!("language-change for unknown room {}", id);
                }
            }
        }
    }
}

async fn is_joined(joined_room: &Arc<Mutex<Option<RoomId>>>, room_id: &RoomId) -> bool {
    joined_room.lock().await.as_ref() == Some(room_id)
}

fn send_error(tx: &PusherChannel, message: &str) {
    let error_msg = ErrorMessage {
        r#type: MessageType::Error,
        message: message.to_string(),
    };
    let _ = tx.send(serde_json::to_string(&error_msg).unwrap());
}
