//! Identity extractors for Axum handlers.
//!
//! Requests arrive with an `X-User-Id` header set by the auth proxy in front
//! of this service; the proxy has already verified the session. The
//! extractors resolve that id against the profiles table to build the
//! [`AuthContext`] the lifecycle rules work with. A user without a profile
//! row is a participant until a profile says otherwise.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use storage::Database;
use storage::models::Role;
use storage::repository::profile::ProfileRepository;
use storage::services::lifecycle::AuthContext;
use uuid::Uuid;

use crate::error::WebError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller. Use as an extractor parameter in any handler that
/// requires a signed-in user:
///
/// ```ignore
/// async fn my_handler(CurrentUser(auth): CurrentUser) -> Result<Json<()>, WebError> {
///     tracing::debug!(user_id = %auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct CurrentUser(pub AuthContext);

#[async_trait]
impl FromRequestParts<Database> for CurrentUser {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Database,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parse_user_id(&parts.headers)?;

        let repo = ProfileRepository::new(state.pool());
        let role = match repo.find_optional(user_id).await? {
            Some(profile) => Role::parse(&profile.role),
            None => Role::Participant,
        };

        Ok(CurrentUser(AuthContext::new(user_id, role)))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(auth): RequireAdmin) -> Result<Json<()>, WebError> {
///     // auth is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthContext);

#[async_trait]
impl FromRequestParts<Database> for RequireAdmin {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Database,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(auth) = CurrentUser::from_request_parts(parts, state).await?;

        if !auth.is_admin() {
            tracing::warn!(user_id = %auth.user_id, "non-admin request to admin endpoint");
            return Err(WebError::Forbidden);
        }

        Ok(RequireAdmin(auth))
    }
}

fn parse_user_id(headers: &HeaderMap) -> Result<Uuid, WebError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| WebError::Unauthorized("Missing X-User-Id header".to_string()))?;

    Uuid::parse_str(raw)
        .map_err(|_| WebError::Unauthorized("Invalid X-User-Id header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_user_id_accepts_valid_uuid() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_ID_HEADER,
            HeaderValue::from_str(&id.to_string()).unwrap(),
        );

        assert_eq!(parse_user_id(&headers).unwrap(), id);
    }

    #[test]
    fn test_parse_user_id_rejects_missing_header() {
        let headers = HeaderMap::new();
        let err = parse_user_id(&headers).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized(_)));
    }

    #[test]
    fn test_parse_user_id_rejects_malformed_value() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));

        let err = parse_user_id(&headers).unwrap_err();
        assert!(matches!(err, WebError::Unauthorized(_)));
    }
}
