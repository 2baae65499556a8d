// SPDX-License-Identifier: MIT

//! Session-gate middleware for logged-in-only routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::error::AppError;
use crate::session;
use crate::AppState;

/// Require a valid session cookie.
///
/// Anonymous browsers are redirected to the login form; a missing or
/// unreadable cookie is a normal "not logged in" outcome, never an error
/// page. The decoded [`crate::models::Identity`] is inserted as a request
/// extension for the handlers behind the gate.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = jar.get(session::SESSION_COOKIE).and_then(|cookie| {
        session::decode_session(cookie.value(), &state.config.session_signing_key)
    });

    match identity {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => AppError::Unauthenticated.into_response(),
    }
}
