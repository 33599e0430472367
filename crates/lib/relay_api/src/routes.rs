//! Route paths.

pub const GET_HEALTH: &str = "/health";
pub const GET_API_CONFIG: &str = "/api/config";
pub const POST_API_SEND_MESSAGE: &str = "/api/sendMessage";
