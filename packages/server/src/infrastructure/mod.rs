//! インフラストラクチャ層
//!
//! ドメイン層が定義する trait の具体的な実装（インメモリレジストリ、
//! WebSocket 送信）と、外部との境界で使う DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod repository;
