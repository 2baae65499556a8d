// SPDX-License-Identifier: MIT

//! Client-side session cookie: user identity plus service tokens, carried
//! as signed claims.
//!
//! The cookie is the whole session store. It holds the service user id and
//! the access/refresh tokens issued at sign-in, signed (not encrypted) with
//! the server's session key. An unreadable or expired cookie is treated as
//! "not logged in", never as an error.

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::Identity;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "reelroom_session";

/// Session lifetime in seconds. Also the cookie Max-Age.
const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by the session cookie.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject (service user id)
    sub: String,
    /// Service access token, forwarded on scoped requests
    atk: String,
    /// Service refresh token (carried for completeness, no refresh flow)
    rtk: String,
    /// Expiration time (Unix timestamp)
    exp: usize,
    /// Issued at (Unix timestamp)
    iat: usize,
}

/// Encode an identity into a signed session token.
pub fn encode_session(identity: &Identity, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: identity.user_id.clone(),
        atk: identity.access_token.clone(),
        rtk: identity.refresh_token.clone(),
        iat: now,
        exp: now + SESSION_TTL_SECS as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Decode and verify a session token.
///
/// Returns `None` for malformed, tampered or expired tokens.
pub fn decode_session(token: &str, signing_key: &[u8]) -> Option<Identity> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<Claims>(token, &key, &validation).ok()?;

    Some(Identity {
        user_id: data.claims.sub,
        access_token: data.claims.atk,
        refresh_token: data.claims.rtk,
    })
}

/// Build the session cookie set at login.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Build the removal cookie set at logout. Attributes must match the ones
/// used at creation for browsers to drop the cookie.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}
