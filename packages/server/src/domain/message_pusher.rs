//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信を抽象化します。
//! WebSocket の生成は UI 層が行い、生成された送信チャンネルを
//! Infrastructure 層の実装がこの trait 経由で管理します。

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnId;

/// クライアントへの送信チャンネル
///
/// UI 層の pusher ループがこのチャンネルの受信側を持ち、
/// 受け取った文字列をそのまま WebSocket テキストフレームとして送信する。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 接続が登録されていない
    #[error("connection '{0}' not found")]
    ConnectionNotFound(ConnId),

    /// チャンネルが閉じているなど、送信自体の失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
///
/// directed 転送（push_to）とルーム内ブロードキャスト（broadcast）を提供する。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録（再 join 時は上書き）
    async fn register(&self, conn_id: ConnId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister(&self, conn_id: ConnId);

    /// 特定の接続へメッセージを送信
    async fn push_to(&self, conn_id: ConnId, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続へメッセージを送信
    ///
    /// 一部の宛先への送信失敗は許容する（ログのみ、エラーにしない）。
    async fn broadcast(&self, targets: Vec<ConnId>, content: &str)
    -> Result<(), MessagePushError>;
}
