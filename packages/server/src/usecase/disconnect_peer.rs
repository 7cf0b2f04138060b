//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - 切断時のメンバー削除と空ルームのガベージコレクション
//!
//! ### なぜこのテストが必要か
//! - 最後のメンバー離脱時にルームがレジストリから消えることを保証
//!   （ルーム名の再利用でメモリが際限なく増えない）
//! - join 前の切断が安全に no-op になることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの切断、最後のメンバーの切断
//! - エッジケース：join せずに切断した接続

use std::sync::Arc;

use crate::domain::{ConnId, MessagePusher, RegistryRepository, RoomName};

/// 切断のユースケース
///
/// 残メンバーへの通知は行わない。現行のクライアントは peer-left を
/// 想定しておらず、切断検知は各ピアの WebRTC 接続状態監視に委ねられる。
pub struct DisconnectPeerUseCase {
    /// Repository（レジストリ操作の抽象化）
    repository: Arc<dyn RegistryRepository>,
    /// MessagePusher（メッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPeerUseCase {
    /// 新しい DisconnectPeerUseCase を作成
    pub fn new(
        repository: Arc<dyn RegistryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Arguments
    ///
    /// * `conn_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// 所属していたルーム名（join 前の切断なら None）
    pub async fn execute(&self, conn_id: ConnId) -> Option<RoomName> {
        // 1. レジストリから削除（空になったルームは Repository 側で削除される）
        let removed_from = self.repository.remove(conn_id).await;

        // 2. MessagePusher から登録解除
        self.message_pusher.unregister(conn_id).await;

        removed_from
    }
}
