//! WebSocket connection handlers.
//!
//! 1 接続につき受信タスクと送信タスク（pusher_loop）を 1 つずつ起動し、
//! どちらかが終了したらもう一方を abort して切断処理へ進む。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnId, PeerId, PusherChannel, RoomName, Timestamp},
    infrastructure::dto::websocket::{ClientEnvelope, ServerEnvelope, SignalData},
    ui::state::AppState,
    usecase::{RelayError, RelayOutcome},
};
use kakehashi_shared::time::get_jst_timestamp;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // ルームへの参加は接続後の join メッセージで行うため、
    // アップグレード自体は無条件で受け入れる
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: messages relayed from other peers
/// (via rx channel) are sent to this connection's WebSocket.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages relayed from other peers
/// * `sender` - WebSocket sink to send messages to this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this connection
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // リレー内部の接続 ID（peerId は自己申告で重複し得るため、キーには使わない）
    let conn_id = ConnId::generate();
    tracing::info!("Connection {} established", conn_id);

    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive relayed messages.
    // The channel is handed to the MessagePusher when the peer joins a room.
    let (tx, rx) = mpsc::unbounded_channel();

    // Spawn a task to push relayed messages to this connection
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();

    // Spawn a task to receive messages from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on connection {}: {}", conn_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_text(&state_clone, conn_id, &tx, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from connection {}", conn_id);
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", conn_id);
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

    // Use DisconnectPeerUseCase to handle disconnection.
    // No notification is sent to remaining members; peers detect departures
    // through their own WebRTC connection state.
    match state.disconnect_peer_usecase.execute(conn_id).await {
        Some(room) => {
            tracing::info!(
                "Connection {} disconnected and removed from room '{}'",
                conn_id,
                room.as_str()
            );
        }
        None => {
            tracing::info!("Connection {} disconnected before joining a room", conn_id);
        }
    }
}

/// 1 つのテキストフレームを処理
///
/// JSON としてパースできないフレーム・バリデーションに失敗した join・
/// 転送できない signal はすべてログに残して破棄する。接続は閉じない。
async fn handle_text(state: &Arc<AppState>, conn_id: ConnId, tx: &PusherChannel, text: &str) {
    // Parse the incoming message
    let envelope = match serde_json::from_str::<ClientEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(
                "Connection {}: failed to parse message as JSON, dropping: {}",
                conn_id,
                e
            );
            return;
        }
    };

    match envelope {
        ClientEnvelope::Join { room, peer_id } => {
            handle_join(state, conn_id, tx, room, peer_id).await;
        }
        ClientEnvelope::Signal { data } => {
            handle_signal(state, conn_id, data).await;
        }
        ClientEnvelope::Unknown(value) => {
            // 未知のメッセージタイプは黙って無視する
            tracing::debug!(
                "Connection {}: ignoring message with unknown type: {}",
                conn_id,
                value
            );
        }
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    conn_id: ConnId,
    tx: &PusherChannel,
    room: String,
    peer_id: String,
) {
    // Convert String -> Domain Models
    let room = match RoomName::try_from(room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Connection {}: invalid room name in join, dropping: {}", conn_id, e);
            return;
        }
    };
    let peer_id = match PeerId::try_from(peer_id) {
        Ok(peer_id) => peer_id,
        Err(e) => {
            tracing::warn!("Connection {}: invalid peerId in join, dropping: {}", conn_id, e);
            return;
        }
    };

    let joined_at = Timestamp::new(get_jst_timestamp());

    // Use JoinRoomUseCase to handle the join
    // (channel registration is done inside the UseCase)
    let targets = state
        .join_room_usecase
        .execute(conn_id, room.clone(), peer_id.clone(), tx.clone(), joined_at)
        .await;
    tracing::info!(
        "Peer '{}' (connection {}) joined room '{}' with {} existing member(s)",
        peer_id.as_str(),
        conn_id,
        room.as_str(),
        targets.len()
    );

    // Announce the new peer to members who were already in the room
    if targets.is_empty() {
        return;
    }

    let announce = ServerEnvelope::Signal {
        data: SignalData::PeerJoined {
            peer_id: peer_id.as_str().to_string(),
        },
    };
    let announce_json = serde_json::to_string(&announce).unwrap();

    if let Err(e) = state
        .join_room_usecase
        .broadcast_peer_joined(targets, &announce_json)
        .await
    {
        tracing::warn!("Failed to broadcast peer-joined: {}", e);
    } else {
        tracing::info!("Broadcasted peer-joined for '{}'", peer_id.as_str());
    }
}

async fn handle_signal(state: &Arc<AppState>, conn_id: ConnId, data: SignalData) {
    let kind = data.kind().to_string();

    // `to` があれば directed、なければルーム内ブロードキャスト
    let to = match data.target() {
        Some(raw) => match PeerId::new(raw.to_string()) {
            Ok(peer_id) => Some(peer_id),
            Err(e) => {
                tracing::warn!(
                    "Connection {}: invalid 'to' in {} signal, dropping: {}",
                    conn_id,
                    kind,
                    e
                );
                return;
            }
        },
        None => None,
    };

    // Re-wrap the payload in a relay envelope; all payload fields are preserved
    let forwarded = ServerEnvelope::Signal { data };
    let forwarded_json = serde_json::to_string(&forwarded).unwrap();

    // Use RelaySignalUseCase to route the message
    match state
        .relay_signal_usecase
        .execute(conn_id, to, forwarded_json)
        .await
    {
        Ok(RelayOutcome::Direct(target)) => {
            tracing::info!(
                "Relayed {} signal from connection {} to connection {}",
                kind,
                conn_id,
                target
            );
        }
        Ok(RelayOutcome::Broadcast(delivered)) => {
            tracing::info!(
                "Broadcasted {} signal from connection {} to {} member(s)",
                kind,
                conn_id,
                delivered
            );
        }
        // 転送失敗は送信者へ通知せず、ログに残して破棄する
        Err(RelayError::NotJoined) => {
            tracing::warn!(
                "Connection {}: dropped {} signal sent before join",
                conn_id,
                kind
            );
        }
        Err(RelayError::TargetNotFound(peer)) => {
            tracing::warn!(
                "Connection {}: dropped {} signal to unknown peer '{}'",
                conn_id,
                kind,
                peer
            );
        }
        Err(RelayError::DeliveryFailed(e)) => {
            tracing::warn!(
                "Connection {}: failed to deliver {} signal: {}",
                conn_id,
                kind,
                e
            );
        }
    }
}
