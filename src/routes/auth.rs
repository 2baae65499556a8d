// SPDX-License-Identifier: MIT

//! Login, registration and logout.
//!
//! Credential checks are delegated to the configured auth backend; these
//! handlers own form validation, the session cookie, and what failure looks
//! like to the browser. Sign-in failures get one generic message — the
//! response never reveals whether the email exists.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{AuthSession, Profile, SignUpOutcome};
use crate::session;
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}

// ─── Login ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginQuery {
    /// Flash message, e.g. after registration with confirmation pending.
    #[serde(default)]
    m: Option<String>,
}

async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(views::login_page(None, query.m.as_deref()))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Ok(login_error("Please enter your email and password."));
    }

    match state.auth.sign_in(form.email.trim(), &form.password).await {
        Ok(auth) => Ok(start_session(&state, jar, &auth)?.into_response()),
        Err(AppError::InvalidCredentials) => {
            tracing::info!("Failed sign-in attempt");
            Ok(login_error("Invalid email or password."))
        }
        Err(other) => Err(other),
    }
}

fn login_error(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Html(views::login_page(Some(message), None)),
    )
        .into_response()
}

/// Persist tokens in the session cookie and send the browser to the main
/// view.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    auth: &AuthSession,
) -> Result<(CookieJar, Redirect)> {
    let identity = auth.identity();
    let token = session::encode_session(&identity, &state.config.session_signing_key)?;
    let jar = jar.add(session::session_cookie(token, state.config.cookie_secure));

    tracing::info!(user_id = %auth.user_id, "Session opened");
    Ok((jar, Redirect::to("/pages/main")))
}

// ─── Registration ────────────────────────────────────────────────

async fn register_form() -> Html<String> {
    Html(views::register_page(None))
}

#[derive(Debug, Deserialize, Validate)]
struct RegisterForm {
    #[serde(rename = "displayName", default)]
    display_name: String,
    #[validate(email)]
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    // Local validation first; no backend call on failure.
    if let Some(message) = validate_registration(&form) {
        return Ok(register_error(message));
    }

    let outcome = match state
        .auth
        .sign_up(form.email.trim(), &form.password, form.display_name.trim())
        .await
    {
        Ok(outcome) => outcome,
        Err(AppError::EmailTaken) => {
            return Ok(register_error(
                "An account with this email already exists.",
            ))
        }
        Err(other) => return Err(other),
    };

    match outcome {
        SignUpOutcome::SignedIn(auth) => {
            seed_profile(&state, &auth, form.display_name.trim(), form.email.trim()).await;
            Ok(start_session(&state, jar, &auth)?.into_response())
        }
        SignUpOutcome::ConfirmationRequired => {
            let message = "Check your inbox to confirm your email, then sign in.";
            Ok(Redirect::to(&format!("/login?m={}", urlencoding::encode(message))).into_response())
        }
    }
}

fn validate_registration(form: &RegisterForm) -> Option<&'static str> {
    if form.display_name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
    {
        return Some("Please fill in all required fields.");
    }
    if form.validate().is_err() {
        return Some("Please enter a valid email address.");
    }
    if form.password != form.confirm {
        return Some("Passwords do not match.");
    }
    None
}

fn register_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(views::register_page(Some(message))),
    )
        .into_response()
}

/// Create the profile row at registration when an administrative credential
/// is configured. Best effort: sign-up already succeeded, so a failure here
/// only means the row gets created lazily on first profile save.
async fn seed_profile(state: &AppState, auth: &AuthSession, display_name: &str, email: &str) {
    let profile = Profile {
        id: auth.user_id.clone(),
        display_name: Some(display_name.to_string()),
        email: Some(email.to_string()),
        ..Default::default()
    };

    match state.profiles.create_privileged(&profile).await {
        Ok(true) => {
            tracing::info!(user_id = %auth.user_id, "Profile row created at registration")
        }
        Ok(false) => tracing::debug!(
            "No privileged credential configured; profile row will be created on first save"
        ),
        Err(e) => tracing::warn!(error = %e, "Profile auto-creation failed"),
    }
}

// ─── Logout ──────────────────────────────────────────────────────

/// Clear the session unconditionally. Idempotent: logging out while logged
/// out is fine. Token revocation at the backend is best effort.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let identity = jar.get(session::SESSION_COOKIE).and_then(|cookie| {
        session::decode_session(cookie.value(), &state.config.session_signing_key)
    });

    if let Some(identity) = identity {
        if let Err(e) = state.auth.sign_out(&identity).await {
            tracing::warn!(error = %e, "Token revocation failed during logout");
        }
    }

    (
        jar.add(session::clear_session_cookie()),
        Redirect::to("/pages/index"),
    )
}
