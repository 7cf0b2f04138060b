//! ユースケース層のエラー定義
//!
//! いずれのエラーもクライアントへは返さない（log-and-continue）。
//! UI 層がログ出力の分岐にのみ使用する。

use thiserror::Error;

/// signal 転送時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// join 前に signal が送られた（所属ルームがないため no-op）
    #[error("sender has not joined a room")]
    NotJoined,

    /// 宛先 peerId がルーム内に見つからない（ルーティングミス）
    #[error("target peer '{0}' not found in room")]
    TargetNotFound(String),

    /// 宛先は見つかったが送信に失敗した（切断直後など）
    #[error("failed to deliver to target: {0}")]
    DeliveryFailed(String),
}

/// ルーム詳細取得時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}
