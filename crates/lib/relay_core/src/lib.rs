//! # relay_core
//!
//! Core domain logic for the web chat relay: the outbound envelope, response
//! normalization, and the chat client model shared by every front-end.

pub mod chat;
pub mod dispatch;
pub mod envelope;
pub mod models;
pub mod normalize;
pub mod reply;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
