//! Registration, login and logout handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use desk_common::AppError;
use desk_service::{AuthService, FormPage, LoginRequest, RegisterRequest, ServiceError};
use tracing::info;

use super::paths;
use crate::extractors::{CurrentUser, FormData, SESSION_COOKIE};
use crate::flash;
use crate::response::ApiResult;
use crate::state::AppState;

const ACCOUNT_CREATED: &str = "Account created! Please login.";
const INVALID_LOGIN: &str = "Invalid email or password";

/// Registration page
///
/// GET /register
pub async fn register_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<FormPage>) {
    let (jar, messages) = flash::take(jar);
    (jar, Json(FormPage::register(messages)))
}

/// Create an account
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    FormData(request): FormData<RegisterRequest>,
) -> ApiResult<(SignedCookieJar, Redirect)> {
    match AuthService::new(state.service_context()).register(request).await {
        Ok(_) => Ok((flash::push(jar, ACCOUNT_CREATED), Redirect::to(paths::LOGIN))),
        Err(e) if e.is_form_error() => Ok((
            flash::push(jar, e.user_message()),
            Redirect::to(paths::REGISTER),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Login page
///
/// GET /login
pub async fn login_page(jar: SignedCookieJar) -> (SignedCookieJar, Json<FormPage>) {
    let (jar, messages) = flash::take(jar);
    (jar, Json(FormPage::login(messages)))
}

/// Open a session
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    FormData(request): FormData<LoginRequest>,
) -> ApiResult<Response> {
    match AuthService::new(state.service_context()).login(request).await {
        Ok(outcome) => {
            let cookie = Cookie::build((SESSION_COOKIE, outcome.session.id))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.secure_cookies());

            Ok((jar.add(cookie), Redirect::to(paths::DASHBOARD)).into_response())
        }
        Err(ServiceError::App(AppError::InvalidCredentials)) => {
            let (jar, messages) = flash::take(jar);
            let page = FormPage::login(messages).with_error(INVALID_LOGIN);
            Ok((StatusCode::UNAUTHORIZED, jar, Json(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// End the session
///
/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Redirect)> {
    AuthService::new(state.service_context())
        .logout(&current.token)
        .await?;

    info!(user_id = %current.user.id, "User logged out");
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to(paths::LOGIN)))
}
