//! Request context carrying the trusted caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seatguard_core::types::id::UserId;

/// Context for the current request.
///
/// The user ID comes from the upstream authentication layer and is taken
/// as given; nothing in this crate re-verifies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// IP address of the request origin, when known.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, ip_address: Option<String>) -> Self {
        Self {
            user_id,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Whether the caller is the given user.
    pub fn is_user(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}
