//! 値オブジェクト（Value Object）
//!
//! ルーム名・ピア ID などのプリミティブ値を型で区別し、
//! 生成時に最小限のバリデーションを行います。

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::DomainError;

/// ルーム名・ピア ID の最大バイト長
pub const MAX_IDENTIFIER_LEN: usize = 256;

/// ルーム名
///
/// 最初に join したクライアントが指定した文字列がそのままルームの識別子になる。
/// ルームは最初の join で暗黙に作られ、最後のメンバーが離脱すると破棄される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoomName(String);

impl RoomName {
    /// 新しい RoomName を作成
    ///
    /// 空文字列および 256 バイト超は不正とする。
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        if value.len() > MAX_IDENTIFIER_LEN {
            return Err(DomainError::RoomNameTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ピア ID
///
/// クライアントが自己申告する識別子。リレーは一意性を保証しない
/// （重複した場合の directed ルーティングは挿入順で最初の一致が勝つ）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PeerId(String);

impl PeerId {
    /// 新しい PeerId を作成
    ///
    /// 空文字列および 256 バイト超は不正とする。
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyPeerId);
        }
        if value.len() > MAX_IDENTIFIER_LEN {
            return Err(DomainError::PeerIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PeerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 接続 ID
///
/// リレー内部でソケット 1 本を一意に識別する ID。
/// peerId はクライアントの自己申告で重複し得るため、
/// 帳簿管理（メンバー登録・送信チャンネルの対応付け）にはこの ID を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnId(Uuid);

impl ConnId {
    /// 新しい接続 ID を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// タイムスタンプ（Unix ミリ秒、JST 基準）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
