//! `TrustedUser` extractor: reads the caller identity forwarded by the
//! upstream authentication layer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use seatguard_core::error::AppError;
use seatguard_core::types::id::UserId;
use seatguard_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct TrustedUser(pub RequestContext);

impl TrustedUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for TrustedUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for TrustedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing X-User-Id header"))?;

        let user_id: UserId = raw
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid X-User-Id header"))?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(TrustedUser(RequestContext::new(user_id, ip_address)))
    }
}
