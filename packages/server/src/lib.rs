//! WebRTC signaling relay library.
//!
//! Tracks room membership over WebSocket connections and forwards
//! SDP/ICE signaling envelopes between peers in the same room. The
//! relay never touches media bytes; once signaling completes, peers
//! talk to each other directly.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
