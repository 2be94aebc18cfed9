//! Test fixtures
//!
//! Accounts and form values shared by the integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Bootstrap administrator configured on every test server
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pw";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration form values
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self::new(
            &format!("user{suffix}"),
            &format!("user{suffix}@example.com"),
            "TestPass123!",
        )
    }

    pub fn alice() -> Self {
        Self::new("alice", "alice@example.com", "pw1")
    }
}
