//! ドメイン層
//!
//! シグナリングリレーの中核となるモデル（ルーム・メンバー・レジストリ）と、
//! 下位層が実装すべきインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Room, RoomMember, RoomRegistry};
pub use error::DomainError;
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use repository::RegistryRepository;
pub use value_object::{ConnId, PeerId, RoomName, Timestamp};
