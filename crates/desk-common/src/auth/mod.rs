//! Authentication utilities

mod password;
mod session_token;

pub use password::{hash_password, verify_dummy, verify_password};
pub use session_token::{generate_session_token, SESSION_TOKEN_BYTES};
