//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームへの参加処理（レジストリへの登録、アナウンス対象の選定）
//!
//! ### なぜこのテストが必要か
//! - 既存メンバーだけが peer-joined の宛先になることを保証
//! - 再 join 時に旧ルームの stale エントリが残らないことを確認
//! - 重複 peerId を拒否しない（リレーは一意性を保証しない）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空ルームへの参加、既存メンバーがいるルームへの参加
//! - エッジケース：同一接続の再 join、重複 peerId での参加

use std::sync::Arc;

use crate::domain::{
    ConnId, MessagePusher, PeerId, PusherChannel, RegistryRepository, RoomMember, RoomName,
    Timestamp,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（レジストリ操作の抽象化）
    repository: Arc<dyn RegistryRepository>,
    /// MessagePusher（メッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RegistryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// join は拒否されない。重複 peerId もそのまま受け入れる。
    /// 接続が別ルームに所属していた場合は Repository 側で移動する。
    ///
    /// # Arguments
    ///
    /// * `conn_id` - 参加する接続の ID
    /// * `room` - 参加先ルーム名（Domain Model）
    /// * `peer_id` - クライアント自己申告のピア ID（Domain Model）
    /// * `sender` - この接続への送信チャンネル
    /// * `joined_at` - 参加時刻
    ///
    /// # Returns
    ///
    /// アナウンス対象（参加前からルームにいたメンバー）の接続 ID リスト
    pub async fn execute(
        &self,
        conn_id: ConnId,
        room: RoomName,
        peer_id: PeerId,
        sender: PusherChannel,
        joined_at: Timestamp,
    ) -> Vec<ConnId> {
        // 1. MessagePusher に送信チャンネルを登録（再 join 時は上書き）
        self.message_pusher.register(conn_id, sender).await;

        // 2. Repository 経由でルームへ参加
        let member = RoomMember {
            conn_id,
            peer_id,
            joined_at,
        };
        self.repository.join(room, member).await
    }

    /// peer-joined アナウンスを既存メンバーへブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `targets` - アナウンス対象の接続 ID リスト
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast_peer_joined(
        &self,
        targets: Vec<ConnId>,
        message: &str,
    ) -> Result<(), String> {
        self.message_pusher
            .broadcast(targets, message)
            .await
            .map_err(|e| e.to_string())
    }
}
