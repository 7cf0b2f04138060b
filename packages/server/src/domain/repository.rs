//! Repository trait 定義
//!
//! ドメイン層が必要とするレジストリ操作のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Room, RoomMember},
    value_object::{ConnId, PeerId, RoomName},
};

/// Registry Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装
/// （インメモリ実装など）には依存しない。
///
/// ## 一貫性の保証
///
/// 各メソッドはレジストリのロックを 1 操作の間だけ保持し、
/// ルーティング中のメンバー集合のスナップショットが一貫していることを保証する。
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// メンバーをルームへ参加させ、アナウンス対象（既存メンバーの接続 ID）を返す
    async fn join(&self, room: RoomName, member: RoomMember) -> Vec<ConnId>;

    /// 接続をレジストリから削除し、所属していたルーム名を返す
    async fn remove(&self, conn_id: ConnId) -> Option<RoomName>;

    /// 接続が現在所属しているルーム名を取得
    async fn room_of(&self, conn_id: ConnId) -> Option<RoomName>;

    /// ルーム内で宛先 peerId に一致する接続を検索（挿入順で最初の一致）
    async fn resolve_target(&self, room: &RoomName, peer_id: &PeerId) -> Option<ConnId>;

    /// ブロードキャスト対象（送信者以外の全メンバー）を取得
    async fn broadcast_targets(&self, room: &RoomName, exclude: ConnId) -> Vec<ConnId>;

    /// 全ルームのスナップショットを取得
    async fn rooms(&self) -> Vec<Room>;

    /// ルーム名でスナップショットを取得
    async fn find_room(&self, name: &str) -> Option<Room>;
}
