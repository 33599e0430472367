//! Business logic behind the request handlers.

pub mod relay;
