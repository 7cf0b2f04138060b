//! エンティティ定義
//!
//! ルームとメンバーのモデル、およびプロセス全体の帳簿である
//! `RoomRegistry` を定義します。レジストリは純粋なデータ構造であり、
//! 排他制御は Infrastructure 層（`InMemoryRegistryRepository`）が担います。

use std::collections::HashMap;

use super::value_object::{ConnId, PeerId, RoomName, Timestamp};

/// ルームに所属する 1 接続分のメンバー情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    /// リレー内部の接続 ID（一意）
    pub conn_id: ConnId,
    /// クライアント自己申告のピア ID（一意性は保証されない）
    pub peer_id: PeerId,
    /// 参加時刻
    pub joined_at: Timestamp,
}

/// ルーム
///
/// メンバーは挿入順で保持する。peer-joined のアナウンス順序と
/// directed ルーティングの「最初の一致」はこの順序に従う。
#[derive(Debug, Clone)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
    pub members: Vec<RoomMember>,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            created_at,
            members: Vec::new(),
        }
    }

    fn add_member(&mut self, member: RoomMember) {
        self.members.push(member);
    }

    fn remove_conn(&mut self, conn_id: ConnId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.conn_id != conn_id);
        self.members.len() != before
    }

    /// peerId に一致する最初のメンバーの接続 ID を返す（挿入順）
    pub fn find_peer(&self, peer_id: &PeerId) -> Option<ConnId> {
        self.members
            .iter()
            .find(|m| &m.peer_id == peer_id)
            .map(|m| m.conn_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// ルームレジストリ
///
/// ルーム名 → メンバー集合の対応と、接続 ID → 所属ルームの逆引きを保持する。
///
/// ## 不変条件
///
/// - 1 つの接続は高々 1 つのルームにのみ所属する
///   （再 join 時は先に旧ルームから離脱させる）
/// - 空のルームはレジストリに残さない（最後のメンバー離脱時に即削除）
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// ルーム名 → ルーム
    rooms: HashMap<String, Room>,
    /// 接続 ID → 所属ルーム名（逆引き）
    memberships: HashMap<ConnId, RoomName>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// メンバーをルームへ参加させる
    ///
    /// ルームが存在しなければ暗黙に作成する。接続が既に別のルームに
    /// 所属していた場合は先にそこから離脱させる（stale エントリを残さない）。
    ///
    /// # Returns
    ///
    /// 参加前からルームにいたメンバーの接続 ID リスト（挿入順）。
    /// peer-joined アナウンスの宛先になる。
    pub fn join(&mut self, room_name: RoomName, member: RoomMember) -> Vec<ConnId> {
        self.detach(member.conn_id);

        let conn_id = member.conn_id;
        let room = self
            .rooms
            .entry(room_name.as_str().to_string())
            .or_insert_with(|| Room::new(room_name.clone(), member.joined_at));

        let announce_targets: Vec<ConnId> = room.members.iter().map(|m| m.conn_id).collect();
        room.add_member(member);
        self.memberships.insert(conn_id, room_name);

        announce_targets
    }

    /// 接続をレジストリから削除する
    ///
    /// 所属していたルーム名を返す。ルームが空になった場合は
    /// ルーム自体も削除する。未所属の接続に対しては何もしない（冪等）。
    pub fn remove(&mut self, conn_id: ConnId) -> Option<RoomName> {
        self.detach(conn_id)
    }

    fn detach(&mut self, conn_id: ConnId) -> Option<RoomName> {
        let room_name = self.memberships.remove(&conn_id)?;
        if let Some(room) = self.rooms.get_mut(room_name.as_str()) {
            room.remove_conn(conn_id);
            if room.is_empty() {
                self.rooms.remove(room_name.as_str());
            }
        }
        Some(room_name)
    }

    /// 接続が現在所属しているルーム名を返す
    pub fn room_of(&self, conn_id: ConnId) -> Option<&RoomName> {
        self.memberships.get(&conn_id)
    }

    /// ルーム内で peerId に一致する最初の接続を返す
    pub fn resolve_target(&self, room: &RoomName, peer_id: &PeerId) -> Option<ConnId> {
        self.rooms.get(room.as_str())?.find_peer(peer_id)
    }

    /// ルーム内の送信者以外の全接続を返す（挿入順）
    pub fn broadcast_targets(&self, room: &RoomName, exclude: ConnId) -> Vec<ConnId> {
        match self.rooms.get(room.as_str()) {
            Some(room) => room
                .members
                .iter()
                .filter(|m| m.conn_id != exclude)
                .map(|m| m.conn_id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// ルーム名でルームを取得
    pub fn find_room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// 全ルームを列挙
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// 現在のルーム数
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
