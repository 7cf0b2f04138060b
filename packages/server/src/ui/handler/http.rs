//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{PeerDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};
use kakehashi_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            name: room.name.as_str().to_string(),
            peers: room
                .members
                .iter()
                .map(|m| m.peer_id.as_str().to_string())
                .collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_name).await {
        Ok(room) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                name: room.name.as_str().to_string(),
                peers: room
                    .members
                    .iter()
                    .map(|m| PeerDetailDto {
                        peer_id: m.peer_id.as_str().to_string(),
                        joined_at: timestamp_to_jst_rfc3339(m.joined_at.value()),
                    })
                    .collect(),
                created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
            };
            Ok(Json(room_detail))
        }
        Err(crate::usecase::GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}
