//! UseCase: ルーム詳細取得処理

use std::sync::Arc;

use crate::domain::{RegistryRepository, Room};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（レジストリ操作の抽象化）
    repository: Arc<dyn RegistryRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(repository: Arc<dyn RegistryRepository>) -> Self {
        Self { repository }
    }

    /// ルーム名でスナップショットを取得
    pub async fn execute(&self, name: String) -> Result<Room, GetRoomDetailError> {
        self.repository
            .find_room(&name)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
