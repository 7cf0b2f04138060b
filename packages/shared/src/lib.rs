//! Shared utilities for the Kakehashi signaling relay.
//!
//! Cross-cutting concerns used by both the server and any future
//! tooling: logging setup and time helpers.

pub mod logger;
pub mod time;
