//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room name too long: {0} bytes")]
    RoomNameTooLong(usize),

    #[error("peer id must not be empty")]
    EmptyPeerId,

    #[error("peer id too long: {0} bytes")]
    PeerIdTooLong(usize),
}
