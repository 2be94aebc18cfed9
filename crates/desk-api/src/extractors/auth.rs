//! Session extractors
//!
//! Resolve the signed session cookie to the user it belongs to.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::SignedCookieJar;
use desk_core::entities::User;
use desk_core::value_objects::{require_role, Role};
use desk_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "desk_session";

/// The user behind the current request's session
///
/// Rejects with a redirect to the login page when the cookie is missing,
/// tampered with, or points at an expired session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// Session token, needed to end the session
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let app_state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, app_state.key().clone());

        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthenticated)?;

        let user = AuthService::new(app_state.service_context())
            .resolve_session(&token)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Session cookie without a live session");
                ApiError::Unauthenticated
            })?;

        let current = CurrentUser { user, token };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

/// A signed-in user holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;

        require_role(&user, Role::Admin).map_err(|e| {
            tracing::warn!(user_id = %user.id, "Admin route refused");
            ApiError::Domain(e)
        })?;

        Ok(AdminUser(user))
    }
}
