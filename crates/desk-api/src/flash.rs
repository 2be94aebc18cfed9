//! One-shot flash messages
//!
//! Messages queued by one request are shown by the next page that renders.
//! They travel in a signed cookie holding a base64url-encoded JSON list.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;

/// Cookie carrying pending messages
pub const FLASH_COOKIE: &str = "desk_flash";

/// Queue a message for the next rendered page
pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = jar
        .get(FLASH_COOKIE)
        .map(|c| decode(c.value()))
        .unwrap_or_default();
    messages.push(message.into());

    let cookie = Cookie::build((FLASH_COOKIE, encode(&messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Remove and return every pending message
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let messages = decode(cookie.value());
            (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
        }
        None => (jar, Vec::new()),
    }
}

fn encode(messages: &[String]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Vec<String> {
    let decoded = URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    if decoded.is_none() {
        debug!("Discarding unreadable flash cookie");
    }
    decoded.unwrap_or_default()
}
