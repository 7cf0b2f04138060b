//! HTTP API の DTO 定義

use serde::{Deserialize, Serialize};

/// ルーム一覧のサマリー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub peers: Vec<String>,
    pub created_at: String,
}

/// ルーム詳細
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub peers: Vec<PeerDetailDto>,
    pub created_at: String,
}

/// ルーム詳細内のメンバー情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerDetailDto {
    pub peer_id: String,
    pub joined_at: String,
}
