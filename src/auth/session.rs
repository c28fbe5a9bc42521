// Session tokens: stateless HMAC-SHA256 signed cookies.
//
// Token format: {base64url(user_id)}.{issued_at_secs}.{hmac_hex}
//
// The HMAC covers "{base64url(user_id)}.{issued_at_secs}" and is keyed with
// SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// The signed-in user a session token identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Identity-provider user id
    pub id: String,
    /// Unix time the token was issued
    pub issued_at: i64,
}

/// Build a session token for `user_id`, issued now.
pub fn create_session_token(secret: &str, user_id: &str) -> String {
    create_session_token_at(secret, user_id, Utc::now().timestamp())
}

/// Build a session token for `user_id` with an explicit issue time.
pub fn create_session_token_at(secret: &str, user_id: &str, issued_at: i64) -> String {
    let payload = format!("{}.{}", URL_SAFE_NO_PAD.encode(user_id), issued_at);
    let sig = hex::encode(mac_for(secret, &payload).finalize().into_bytes());
    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the user if the signature matches and
/// the token is younger than `SESSION_TTL_SECS`.
pub fn verify_session_token(secret: &str, token: &str) -> Option<SessionUser> {
    let (payload, sig_hex) = token.rsplit_once('.')?;
    let (encoded_id, issued_str) = payload.split_once('.')?;

    let sig = hex::decode(sig_hex).ok()?;
    mac_for(secret, payload).verify_slice(&sig).ok()?;

    let issued_at: i64 = issued_str.parse().ok()?;
    let age = Utc::now().timestamp() - issued_at;
    if !(0..SESSION_TTL_SECS).contains(&age) {
        return None;
    }

    let id = String::from_utf8(URL_SAFE_NO_PAD.decode(encoded_id).ok()?).ok()?;
    if id.is_empty() {
        return None;
    }
    Some(SessionUser { id, issued_at })
}

/// Extract a cookie value by name from a `Cookie` header value.
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

fn mac_for(secret: &str, payload: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    mac
}
