//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    DisconnectPeerUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
    RelaySignalUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelaySignalUseCase（signal 転送のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// DisconnectPeerUseCase（切断のユースケース）
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
