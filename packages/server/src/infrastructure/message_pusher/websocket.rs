//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続 ID → `UnboundedSender` の対応表を管理
//! - 接続へのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成・分割は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は join 時に登録された送信チャンネルを保持し、
//! ルーティング結果（接続 ID のリスト）に従って送信するだけです。
//! 「どの接続へ送るか」の判断はユースケース層とレジストリが担います。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    ///
    /// Key: ConnId（リレー内部の接続 ID）
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, conn_id: ConnId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(conn_id, sender);
        tracing::debug!("Connection {} registered to MessagePusher", conn_id);
    }

    async fn unregister(&self, conn_id: ConnId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&conn_id);
        tracing::debug!("Connection {} unregistered from MessagePusher", conn_id);
    }

    async fn push_to(&self, conn_id: ConnId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(&conn_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection {}", conn_id);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(conn_id))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection {}: {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to connection {}", target);
                }
            } else {
                tracing::warn!("Connection {} not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
