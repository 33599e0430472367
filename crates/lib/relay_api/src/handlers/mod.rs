//! Request handlers.

pub mod config;
pub mod health;
pub mod send_message;
