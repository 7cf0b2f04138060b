//! InMemory Registry Repository 実装
//!
//! ドメイン層が定義する RegistryRepository trait の具体的な実装。
//! `RoomRegistry` を `tokio::sync::Mutex` で保護し、各操作の間だけ
//! ロックを保持することで、ルーティング中のメンバー集合の
//! スナップショットが一貫していることを保証します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnId, PeerId, RegistryRepository, Room, RoomMember, RoomName, RoomRegistry,
};

/// インメモリ Registry Repository 実装
///
/// レジストリ本体はドメイン層の `RoomRegistry`（純粋なデータ構造）が持ち、
/// この実装は排他制御と trait の橋渡しのみを担う。
pub struct InMemoryRegistryRepository {
    /// ルームレジストリ（プロセス全体で 1 つ）
    registry: Arc<Mutex<RoomRegistry>>,
}

impl InMemoryRegistryRepository {
    /// 新しい InMemoryRegistryRepository を作成
    pub fn new(registry: Arc<Mutex<RoomRegistry>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RegistryRepository for InMemoryRegistryRepository {
    async fn join(&self, room: RoomName, member: RoomMember) -> Vec<ConnId> {
        let mut registry = self.registry.lock().await;
        registry.join(room, member)
    }

    async fn remove(&self, conn_id: ConnId) -> Option<RoomName> {
        let mut registry = self.registry.lock().await;
        registry.remove(conn_id)
    }

    async fn room_of(&self, conn_id: ConnId) -> Option<RoomName> {
        let registry = self.registry.lock().await;
        registry.room_of(conn_id).cloned()
    }

    async fn resolve_target(&self, room: &RoomName, peer_id: &PeerId) -> Option<ConnId> {
        let registry = self.registry.lock().await;
        registry.resolve_target(room, peer_id)
    }

    async fn broadcast_targets(&self, room: &RoomName, exclude: ConnId) -> Vec<ConnId> {
        let registry = self.registry.lock().await;
        registry.broadcast_targets(room, exclude)
    }

    async fn rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        registry.rooms().cloned().collect()
    }

    async fn find_room(&self, name: &str) -> Option<Room> {
        let registry = self.registry.lock().await;
        registry.find_room(name).cloned()
    }
}
