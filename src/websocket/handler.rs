use crate::{
    config::PuzzleConfig,
    game::PuzzleSession,
    models::{ParamsError, PuzzleParams},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState, SessionInfo,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    state.sessions.insert(session_id, SessionInfo::new());
    tracing::info!("WebSocket connection established for session {}", session_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client. The puzzle session lives here.
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut session: Option<PuzzleSession> = None;

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let reply = handle_text(&text, &state_for_recv, session_id, &mut session);
                    if tx.send(reply).await.is_err() {
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client disconnected: session {}", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    if let Some((_, info)) = state.sessions.remove(&session_id) {
        tracing::info!(
            "WebSocket connection closed for session {} after {:?}",
            session_id,
            info.connected_at.elapsed()
        );
    }
}

/// Parse one text frame, apply it and record the accepted params in the
/// session registry. Failures become an `error` reply.
fn handle_text(
    text: &str,
    state: &AppState,
    session_id: Uuid,
    session: &mut Option<PuzzleSession>,
) -> ServerMessage {
    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_msg) => client_msg,
        Err(e) => {
            tracing::error!("Failed to parse message: {}", e);
            return ServerMessage::Error {
                message: format!("Invalid message format: {}", e),
            };
        }
    };

    match apply_client_message(client_msg, &state.config.puzzle, session) {
        Ok(reply) => {
            record_params(state, session_id, session.as_ref());
            reply
        }
        Err(e) => {
            tracing::warn!("Rejected params from session {}: {}", session_id, e);
            ServerMessage::Error {
                message: e.to_string(),
            }
        }
    }
}

/// Apply one client message to the connection's session and build the reply.
///
/// `set_params` creates the session or regenerates it when the params
/// changed; `refresh` regenerates, starting from the configured defaults when
/// no params were set yet.
fn apply_client_message(
    msg: ClientMessage,
    puzzle_config: &PuzzleConfig,
    session: &mut Option<PuzzleSession>,
) -> Result<ServerMessage, ParamsError> {
    match msg {
        ClientMessage::SetParams {
            height,
            width,
            words,
        } => {
            let params = PuzzleParams {
                height,
                width,
                words,
            };
            params.validate(puzzle_config.max_dimension, puzzle_config.max_words)?;

            match session.as_mut() {
                Some(current) => {
                    if !current.update_params(params) {
                        tracing::debug!("Params unchanged, keeping current grid");
                    }
                }
                None => *session = Some(PuzzleSession::new(params)),
            }
        }
        ClientMessage::Refresh => match session.as_mut() {
            Some(current) => current.refresh(),
            None => *session = Some(PuzzleSession::new(puzzle_config.default_params())),
        },
    }

    let current =
        session.get_or_insert_with(|| PuzzleSession::new(puzzle_config.default_params()));
    Ok(ServerMessage::puzzle(current))
}

fn record_params(state: &AppState, session_id: Uuid, session: Option<&PuzzleSession>) {
    if let (Some(current), Some(mut info)) = (session, state.sessions.get_mut(&session_id)) {
        info.params = Some(current.params().clone());
    }
}
