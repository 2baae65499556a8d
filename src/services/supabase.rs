// SPDX-License-Identifier: MIT

//! HTTP client for the hosted backend service.
//!
//! Three surfaces of the same deployment:
//! - Auth (`/auth/v1`): password sign-in, sign-up, sign-out
//! - Table store (`/rest/v1`): the `profiles` table
//! - Object storage (`/storage/v1`): avatar images
//!
//! `SupabaseClient` is the unscoped handle carrying only the anonymous key.
//! `scoped()` returns a fresh per-request [`ScopedClient`] carrying one end
//! user's bearer token, so the service's row-level security applies to every
//! call made through it. Auth context is never attached to a shared handle;
//! two concurrent requests can never observe each other's tokens.

use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::{AuthSession, Profile, ProfileChanges, SignUpOutcome};
use crate::store::tables;

/// Unscoped client: anonymous key only. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: Option<String>,
}

impl SupabaseClient {
    /// Create a new client for the hosted service.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_role_key: Option<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_role_key,
        }
    }

    /// Build a client scoped to one end user. A fresh value per call; the
    /// returned handle owns its auth context.
    pub fn scoped(&self, access_token: &str) -> ScopedClient {
        ScopedClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            api_key: self.anon_key.clone(),
            access_token: access_token.to_string(),
        }
    }

    /// Privileged client using the service-role key, when configured.
    ///
    /// Bypasses row-level security. Only used for profile auto-creation at
    /// registration.
    pub fn privileged(&self) -> Option<ScopedClient> {
        self.service_role_key.as_ref().map(|key| ScopedClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            api_key: key.clone(),
            access_token: key.clone(),
        })
    }

    // ─── Auth ────────────────────────────────────────────────────

    /// Password sign-in.
    ///
    /// The service reports bad credentials as 400 `invalid_grant` without
    /// distinguishing unknown email from wrong password; neither do we.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.anon_key.as_str())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(AppError::InvalidCredentials);
        }

        let token: TokenResponse = read_json(response).await?;
        token.into_auth_session()
    }

    /// Create an account.
    ///
    /// Depending on the service's email-confirmation setting, the response
    /// carries either a full session or just the new user record.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        let url = format!("{}/auth/v1/signup", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.anon_key.as_str())
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "display_name": display_name },
            }))
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
            || status == reqwest::StatusCode::BAD_REQUEST
        {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            if message.to_lowercase().contains("already registered") {
                return Err(AppError::EmailTaken);
            }
            return Err(AppError::BadRequest(message));
        }

        let body: SignUpResponse = read_json(response).await?;
        match (body.access_token, body.refresh_token) {
            (Some(access_token), Some(refresh_token)) => {
                let user = body
                    .user
                    .ok_or_else(|| AppError::ServiceApi("sign-up response missing user".to_string()))?;
                Ok(SignUpOutcome::SignedIn(AuthSession {
                    user_id: user.id,
                    email: user.email,
                    access_token,
                    refresh_token,
                }))
            }
            _ => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    /// Revoke a session's tokens server-side. The cookie is cleared by the
    /// caller regardless of the outcome.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }
}

/// Per-request client carrying one end user's bearer token.
///
/// Every table and storage call made through this handle is evaluated under
/// that user's access policy.
pub struct ScopedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl ScopedClient {
    // ─── Table store ─────────────────────────────────────────────

    /// Fetch the caller's profile row, if any. No row is a valid state.
    pub async fn select_profile(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let url = self.table_url(tables::PROFILES);

        let response = self
            .http
            .get(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.access_token)
            .query(&[
                ("id", format!("eq.{user_id}")),
                ("select", "*".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        let rows: Vec<Profile> = read_json(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Patch the caller's profile row. `None` fields are dropped from the
    /// payload so stored values survive partial updates.
    pub async fn update_profile(
        &self,
        user_id: &str,
        changes: &ProfileChanges,
    ) -> Result<(), AppError> {
        let url = self.table_url(tables::PROFILES);

        let response = self
            .http
            .patch(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=minimal")
            .query(&[("id", format!("eq.{user_id}"))])
            .json(changes)
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    /// Insert a profile row carrying the identity as primary key.
    pub async fn insert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let url = self.table_url(tables::PROFILES);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=minimal")
            .json(profile)
            .send()
            .await
            .map_err(|e| AppError::ServiceApi(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    // ─── Object storage ──────────────────────────────────────────

    /// Upload an object and return its public URL. Overwrites an existing
    /// object at the same path.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);

        let response = self
            .http
            .post(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "HTTP {}: {}",
                status,
                error_message(&body)
            )));
        }

        Ok(self.public_object_url(bucket, path))
    }

    /// Public URL for an object in a public bucket.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

// ─── Response plumbing ───────────────────────────────────────────

/// Check response status, surfacing the service's error message.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::ServiceApi(format!(
        "HTTP {}: {}",
        status,
        error_message(&body)
    )))
}

/// Check response and parse JSON body.
async fn read_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let response = check_response(response).await?;
    response
        .json()
        .await
        .map_err(|e| AppError::ServiceApi(format!("JSON parse error: {}", e)))
}

/// Pull a human-readable message out of the service's error body. The auth
/// and table surfaces use different field names.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Session response from the auth surface.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: AuthUser,
}

impl TokenResponse {
    fn into_auth_session(self) -> Result<AuthSession, AppError> {
        Ok(AuthSession {
            user_id: self.user.id,
            email: self.user.email,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        })
    }
}

/// Sign-up response: a session when confirmation is disabled, otherwise
/// just the user record.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<AuthUser>,
}

/// User record embedded in auth responses.
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}
