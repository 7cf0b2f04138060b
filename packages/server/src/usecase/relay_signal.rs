//! UseCase: signal 転送処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase::execute() メソッド
//! - directed 転送（宛先指定あり）とルーム内ブロードキャストの振り分け
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：ルーム分離（別ルームへ漏れない）を保証
//! - 宛先解決が挿入順で最初の一致になることを確認
//! - join 前の signal・ルーティングミスが送信者へのエラーなしに
//!   破棄されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：directed 転送、ブロードキャスト
//! - 異常系：join 前の signal、存在しない宛先
//! - エッジケース：重複 peerId、送信者のみのルーム

use std::sync::Arc;

use crate::domain::{ConnId, MessagePusher, PeerId, RegistryRepository};

use super::error::RelayError;

/// 転送結果
///
/// UI 層がログ出力に使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// 宛先指定あり。1 接続にのみ転送した
    Direct(ConnId),
    /// 宛先指定なし。送信者以外の全メンバー（n 件）に転送した
    Broadcast(usize),
}

/// signal 転送のユースケース
pub struct RelaySignalUseCase {
    /// Repository（レジストリ操作の抽象化）
    repository: Arc<dyn RegistryRepository>,
    /// MessagePusher（メッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(
        repository: Arc<dyn RegistryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// signal 転送を実行
    ///
    /// # Arguments
    ///
    /// * `conn_id` - 送信者の接続 ID
    /// * `to` - 宛先 peerId（None ならルーム内ブロードキャスト）
    /// * `json_message` - 転送する JSON メッセージ（DTO 層で生成済み）
    ///
    /// # Returns
    ///
    /// * `Ok(RelayOutcome)` - 転送先の情報
    /// * `Err(RelayError)` - 転送失敗（送信者へは通知しない）
    pub async fn execute(
        &self,
        conn_id: ConnId,
        to: Option<PeerId>,
        json_message: String,
    ) -> Result<RelayOutcome, RelayError> {
        // 1. 送信者の所属ルームを特定（join 前なら破棄）
        let room = self
            .repository
            .room_of(conn_id)
            .await
            .ok_or(RelayError::NotJoined)?;

        match to {
            // 2a. directed: 宛先 peerId を挿入順で検索し、最初の一致へ転送
            Some(peer_id) => {
                let target = self
                    .repository
                    .resolve_target(&room, &peer_id)
                    .await
                    .ok_or_else(|| RelayError::TargetNotFound(peer_id.as_str().to_string()))?;

                self.message_pusher
                    .push_to(target, &json_message)
                    .await
                    .map_err(|e| RelayError::DeliveryFailed(e.to_string()))?;

                Ok(RelayOutcome::Direct(target))
            }
            // 2b. broadcast: 送信者以外の全メンバーへ転送
            None => {
                let targets = self.repository.broadcast_targets(&room, conn_id).await;
                let delivered = targets.len();

                self.message_pusher
                    .broadcast(targets, &json_message)
                    .await
                    .map_err(|e| RelayError::DeliveryFailed(e.to_string()))?;

                Ok(RelayOutcome::Broadcast(delivered))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            RoomMember, RoomName, RoomRegistry, Timestamp,
            message_pusher::MockMessagePusher,
        },
        infrastructure::repository::InMemoryRegistryRepository,
    };
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryRegistryRepository> {
        let registry = Arc::new(Mutex::new(RoomRegistry::new()));
        Arc::new(InMemoryRegistryRepository::new(registry))
    }

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn peer(id: &str) -> PeerId {
        PeerId::new(id.to_string()).unwrap()
    }

    fn member(conn_id: ConnId, peer_id: &str) -> RoomMember {
        RoomMember {
            conn_id,
            peer_id: peer(peer_id),
            joined_at: Timestamp::new(1000),
        }
    }

    #[tokio::test]
    async fn test_signal_before_join_is_rejected() {
        // テスト項目: join 前の signal は NotJoined で破棄される
        // given (前提条件):
        let repository = create_test_repository();
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_push_to().times(0);
        message_pusher.expect_broadcast().times(0);
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作):
        let result = usecase
            .execute(ConnId::generate(), None, "{}".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::NotJoined));
    }

    #[tokio::test]
    async fn test_directed_signal_reaches_only_target() {
        // テスト項目: 宛先指定ありの signal は対象 1 接続にのみ転送される
        // given (前提条件):
        let repository = create_test_repository();
        let alice_conn = ConnId::generate();
        let bob_conn = ConnId::generate();
        repository.join(room("room-1"), member(alice_conn, "alice")).await;
        repository.join(room("room-1"), member(bob_conn, "bob")).await;

        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .withf(move |conn_id, content| {
                *conn_id == bob_conn && content.contains("offer")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        message_pusher.expect_broadcast().times(0);
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作): alice が bob 宛てに offer を送る
        let result = usecase
            .execute(
                alice_conn,
                Some(peer("bob")),
                r#"{"type":"signal","data":{"type":"offer","to":"bob"}}"#.to_string(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(RelayOutcome::Direct(bob_conn)));
    }

    #[tokio::test]
    async fn test_directed_signal_with_unknown_target_is_dropped() {
        // テスト項目: 存在しない宛先への signal は TargetNotFound で破棄される
        // given (前提条件):
        let repository = create_test_repository();
        let alice_conn = ConnId::generate();
        repository.join(room("room-1"), member(alice_conn, "alice")).await;

        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_push_to().times(0);
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作):
        let result = usecase
            .execute(alice_conn, Some(peer("ghost")), "{}".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RelayError::TargetNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_excludes_sender() {
        // テスト項目: 宛先指定なしの signal は送信者以外の全メンバーへ転送される
        // given (前提条件):
        let repository = create_test_repository();
        let alice_conn = ConnId::generate();
        let bob_conn = ConnId::generate();
        let charlie_conn = ConnId::generate();
        repository.join(room("room-1"), member(alice_conn, "alice")).await;
        repository.join(room("room-1"), member(bob_conn, "bob")).await;
        repository.join(room("room-1"), member(charlie_conn, "charlie")).await;

        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_broadcast()
            .withf(move |targets, _| targets == &vec![bob_conn, charlie_conn])
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作): alice がブロードキャスト
        let result = usecase.execute(alice_conn, None, "{}".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(RelayOutcome::Broadcast(2)));
    }

    #[tokio::test]
    async fn test_broadcast_does_not_cross_rooms() {
        // テスト項目: ブロードキャストが別ルームのメンバーへ漏れない（ルーム分離）
        // given (前提条件):
        let repository = create_test_repository();
        let alice_conn = ConnId::generate();
        let bob_conn = ConnId::generate();
        repository.join(room("room-a"), member(alice_conn, "alice")).await;
        repository.join(room("room-b"), member(bob_conn, "bob")).await;

        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_broadcast()
            .withf(|targets, _| targets.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作): room-a の alice がブロードキャスト
        let result = usecase.execute(alice_conn, None, "{}".to_string()).await;

        // then (期待する結果): 転送先は 0 件
        assert_eq!(result, Ok(RelayOutcome::Broadcast(0)));
    }

    #[tokio::test]
    async fn test_duplicate_peer_id_routes_to_first_match() {
        // テスト項目: 重複 peerId への directed 転送は挿入順で最初の一致へ届く
        // given (前提条件):
        let repository = create_test_repository();
        let sender_conn = ConnId::generate();
        let bob1_conn = ConnId::generate();
        let bob2_conn = ConnId::generate();
        repository.join(room("room-1"), member(sender_conn, "alice")).await;
        repository.join(room("room-1"), member(bob1_conn, "bob")).await;
        repository.join(room("room-1"), member(bob2_conn, "bob")).await;

        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .withf(move |conn_id, _| *conn_id == bob1_conn)
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = RelaySignalUseCase::new(repository, Arc::new(message_pusher));

        // when (操作):
        let result = usecase
            .execute(sender_conn, Some(peer("bob")), "{}".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(RelayOutcome::Direct(bob1_conn)));
    }
}
