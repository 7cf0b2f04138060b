//! MessagePusher 実装
//!
//! ドメイン層が定義する MessagePusher trait の WebSocket 実装を提供します。

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
