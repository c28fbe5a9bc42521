//! Auth Module
//!
//! Verifies the session tokens handed out after identity-provider sign-in.
//! Sign-in itself happens at the provider; this service only checks the
//! signed token carried in the session cookie.

mod session;

pub use session::{
    create_session_token, create_session_token_at, read_cookie, verify_session_token,
    SessionUser, SESSION_TTL_SECS,
};
