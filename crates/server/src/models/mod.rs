mod channel;
mod message;
mod user;

pub use channel::*;
pub use message::*;
pub use user::*;

use crate::store::UserId;

/// Resolved session identity. Extracted from the bearer token before any
/// core operation runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub session_id: String,
}
