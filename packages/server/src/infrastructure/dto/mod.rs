//! DTO（Data Transfer Object）定義
//!
//! - `websocket`: シグナリングプロトコルのエンベロープ
//! - `http`: デバッグ用 REST API のレスポンス

pub mod http;
pub mod websocket;
