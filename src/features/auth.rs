use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::AppState;
use crate::error::CmsError;

/// Marker extracted when the request carries `Authorization: Bearer <ADMIN_SECRET>`.
/// Add it as a handler parameter to require the admin secret.
pub struct AdminUser;

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = CmsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_secret.as_str();
        if expected.is_empty() {
            tracing::warn!("Admin request rejected: ADMIN_SECRET is not configured");
            return Err(CmsError::Unauthorized);
        }

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(CmsError::Unauthorized)?;

        if !secrets_match(presented.trim(), expected) {
            return Err(CmsError::Unauthorized);
        }

        Ok(AdminUser)
    }
}

// compares every byte so the time taken does not reveal the matching prefix length
fn secrets_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
