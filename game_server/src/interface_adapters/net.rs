use crate::domain::GameEngine;
use crate::domain::ports::{LookupError, PlayerDirectory};
use crate::interface_adapters::protocol::{ClientMessage, ServerMessage};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    GameSession, InputController, PlayerCommand, SessionPlayer, SessionSummary, SessionUpdate,
};

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures::SinkExt;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{Instrument, debug, error, info, info_span, warn};

// Categorizes connection lifecycle failures so callers can decide policy.
#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    JoinRequired,
    JoinTimeout,
    AuthVerify,
    ClosedBeforeJoin,
    SessionClosed,
}

enum LoopControl {
    Continue,
    Disconnect,
}

const MAX_INVALID_JSON: u32 = 10;
const MAX_TOKEN_LEN: usize = 4096;
const JOIN_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
const COMMAND_CHANNEL_CAPACITY: usize = 64;
const UPDATE_CHANNEL_CAPACITY: usize = 256;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let conn_id = state.next_conn_id();
    let span = info_span!("conn", conn_id, username = tracing::field::Empty);
    ws.on_upgrade(move |socket| handle_socket(socket, state).instrument(span))
}

#[derive(Debug, Default)]
struct ConnStats {
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    invalid_json: u32,
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let player = match timeout(
        JOIN_HANDSHAKE_TIMEOUT,
        read_join_handshake(&mut socket, state.directory.as_ref()),
    )
    .await
    {
        Ok(Ok(player)) => player,
        Ok(Err(NetError::ClosedBeforeJoin)) => {
            info!("client disconnected before join handshake");
            return;
        }
        Ok(Err(e)) => {
            warn!(error = ?e, "join handshake failed");
            return;
        }
        Err(_) => {
            let _ = send_close_with_reason(&mut socket, close_code::POLICY, "join timeout").await;
            warn!(error = ?NetError::JoinTimeout, "join handshake timed out");
            return;
        }
    };

    tracing::Span::current().record("username", player.username.as_str());

    let mut stats = ConnStats {
        msgs_in: 1,
        ..ConnStats::default()
    };
    let identity = ServerMessage::Identity {
        username: player.username.clone(),
        best_score: player.best_score,
    };
    match send_message(&mut socket, &identity).await {
        Ok(bytes) => {
            stats.msgs_out += 1;
            stats.bytes_out += bytes as u64;
        }
        Err(e) => {
            error!(error = ?e, "failed to send identity");
            return;
        }
    }
    info!(best_score = player.best_score, "client connected");

    // Each connection gets its own engine, seeded independently.
    let rng = StdRng::seed_from_u64(rand::rng().random());
    let engine = GameEngine::new(state.tuning.clone(), rng, Vec::new());
    let session = GameSession::new(player, engine, Arc::clone(&state.reporter));

    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (update_tx, update_rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
    let session_task = tokio::spawn(session.run(command_rx, update_tx).in_current_span());

    if let Err(e) = run_client_loop(&mut socket, command_tx, update_rx, &mut stats).await {
        warn!(error = ?e, "client loop exited with error");
    }

    // The command sender is gone by now, so the session winds down on its own.
    let summary = session_task.await.unwrap_or_else(|e| {
        error!(error = %e, "session task failed");
        SessionSummary::default()
    });
    info!(
        rounds = summary.rounds_started,
        last_score = ?summary.last_score,
        best_score = summary.best_score,
        msgs_in = stats.msgs_in,
        msgs_out = stats.msgs_out,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        invalid_json = stats.invalid_json,
        "client disconnected"
    );
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<usize, NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(NetError::Ws)?;
    Ok(bytes)
}

async fn send_close_with_reason(
    socket: &mut WebSocket,
    code: u16,
    reason: &'static str,
) -> Result<(), NetError> {
    socket
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: reason.into(),
        })))
        .await
        .map_err(NetError::Ws)?;
    socket.close().await.map_err(NetError::Ws)
}

// Waits for the first meaningful client message, which must be a Join carrying a valid token.
async fn read_join_handshake(
    socket: &mut WebSocket,
    directory: &dyn PlayerDirectory,
) -> Result<SessionPlayer, NetError> {
    loop {
        let Some(incoming) = socket.recv().await else {
            return Err(NetError::ClosedBeforeJoin);
        };

        match incoming.map_err(NetError::Ws)? {
            Message::Text(text) => {
                let token = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Join(payload)) => payload.token.trim().to_string(),
                    Ok(_) => {
                        let _ = send_close_with_reason(socket, close_code::POLICY, "join required")
                            .await;
                        return Err(NetError::JoinRequired);
                    }
                    Err(_) => {
                        let _ = send_close_with_reason(
                            socket,
                            close_code::POLICY,
                            "invalid join payload",
                        )
                        .await;
                        return Err(NetError::JoinRequired);
                    }
                };

                if token.is_empty() || token.len() > MAX_TOKEN_LEN {
                    let _ = send_close_with_reason(socket, close_code::POLICY, "invalid token")
                        .await;
                    return Err(NetError::AuthVerify);
                }

                let profile = match directory.profile(&token).await {
                    Ok(profile) => profile,
                    Err(LookupError::Unauthorized) => {
                        let _ = send_close_with_reason(socket, close_code::POLICY, "unauthorized")
                            .await;
                        return Err(NetError::AuthVerify);
                    }
                    Err(LookupError::Unavailable) => {
                        let _ =
                            send_close_with_reason(socket, close_code::ERROR, "api unavailable")
                                .await;
                        return Err(NetError::AuthVerify);
                    }
                };

                return Ok(SessionPlayer {
                    token,
                    username: profile.username,
                    best_score: profile.best_score,
                });
            }
            Message::Binary(_) => {
                let _ = send_close_with_reason(
                    socket,
                    close_code::UNSUPPORTED,
                    "binary messages not supported",
                )
                .await;
                return Err(NetError::JoinRequired);
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => return Err(NetError::ClosedBeforeJoin),
        }
    }
}

async fn run_client_loop(
    socket: &mut WebSocket,
    command_tx: mpsc::Sender<PlayerCommand>,
    mut updates: mpsc::Receiver<SessionUpdate>,
    stats: &mut ConnStats,
) -> Result<(), NetError> {
    let mut close_frame: Option<CloseFrame> = None;
    let mut fatal: Option<NetError> = None;

    loop {
        let disconnect = tokio::select! {
            incoming = socket.recv() => {
                match handle_incoming(incoming, &command_tx, stats, &mut close_frame) {
                    Ok(LoopControl::Continue) => false,
                    Ok(LoopControl::Disconnect) => true,
                    Err(e) => {
                        fatal = Some(e);
                        true
                    }
                }
            }

            update = updates.recv() => {
                match update {
                    Some(update) => {
                        match send_message(socket, &ServerMessage::from(update)).await {
                            Ok(bytes) => {
                                stats.msgs_out += 1;
                                stats.bytes_out += bytes as u64;
                                false
                            }
                            Err(e) => {
                                fatal = Some(e);
                                true
                            }
                        }
                    }
                    None => {
                        fatal = Some(NetError::SessionClosed);
                        true
                    }
                }
            }
        };

        if disconnect {
            if let Some(frame) = close_frame.take() {
                let _ = socket.send(Message::Close(Some(frame))).await;
            }
            if let Err(err) = socket.close().await.map_err(NetError::Ws) {
                debug!(error = ?err, "socket close error");
            }
            break;
        }
    }

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_incoming(
    incoming: Option<Result<Message, axum::Error>>,
    command_tx: &mpsc::Sender<PlayerCommand>,
    stats: &mut ConnStats,
    close_frame: &mut Option<CloseFrame>,
) -> Result<LoopControl, NetError> {
    let message = match incoming {
        Some(Ok(message)) => message,
        Some(Err(e)) => return Err(NetError::Ws(e)),
        None => return Ok(LoopControl::Disconnect),
    };

    match message {
        Message::Text(text) => {
            stats.msgs_in += 1;
            stats.bytes_in += text.len() as u64;

            let command = match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Join(_)) => {
                    debug!("duplicate join ignored");
                    None
                }
                Ok(ClientMessage::Start) => Some(PlayerCommand::Start),
                Ok(ClientMessage::TogglePause) => Some(PlayerCommand::TogglePause),
                Ok(ClientMessage::Key(payload)) => InputController::command_for_key(&payload.key),
                Ok(ClientMessage::Turn(payload)) => {
                    Some(PlayerCommand::Turn(payload.direction.into()))
                }
                Err(_) => {
                    stats.invalid_json += 1;
                    if stats.invalid_json >= MAX_INVALID_JSON {
                        warn!(count = stats.invalid_json, "too many invalid messages");
                        *close_frame = Some(CloseFrame {
                            code: close_code::POLICY,
                            reason: "too many invalid messages".into(),
                        });
                        return Ok(LoopControl::Disconnect);
                    }
                    None
                }
            };

            let Some(command) = command else {
                return Ok(LoopControl::Continue);
            };

            match command_tx.try_send(command) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("command channel full; dropping input");
                    Ok(LoopControl::Continue)
                }
                Err(mpsc::error::TrySendError::Closed(_)) => Err(NetError::SessionClosed),
            }
        }
        Message::Binary(_) => {
            *close_frame = Some(CloseFrame {
                code: close_code::UNSUPPORTED,
                reason: "binary messages not supported".into(),
            });
            Ok(LoopControl::Disconnect)
        }
        Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
        Message::Close(_) => Ok(LoopControl::Disconnect),
    }
}
