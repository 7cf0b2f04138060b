//! ユースケース層
//!
//! リレーの各操作（join・signal 転送・切断・ルーム参照）を
//! Repository / MessagePusher の trait に対して実装します。

pub mod disconnect_peer;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod relay_signal;

pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::{GetRoomDetailError, RelayError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_signal::{RelayOutcome, RelaySignalUseCase};
