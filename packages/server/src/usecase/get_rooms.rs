//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{RegistryRepository, Room};

/// ルーム一覧取得のユースケース
///
/// HTTP のデバッグ用エンドポイントからのみ使われる読み取り専用の操作。
pub struct GetRoomsUseCase {
    /// Repository（レジストリ操作の抽象化）
    repository: Arc<dyn RegistryRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(repository: Arc<dyn RegistryRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームのスナップショットを取得
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.rooms().await
    }
}
