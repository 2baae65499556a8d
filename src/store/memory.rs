// SPDX-License-Identifier: MIT

//! In-memory backend for tests and local development.
//!
//! Matches the hosted backend's observable behavior: generic credential
//! errors, duplicate-email rejection, patch-is-noop-on-missing-row. All
//! data is lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::{AuthService, ProfileStore};
use crate::error::AppError;
use crate::models::{AuthSession, Identity, Profile, ProfileChanges, SignUpOutcome};

struct MemoryUser {
    id: String,
    password: String,
}

/// In-memory credential store. Sign-up always opens a session (no email
/// confirmation step).
#[derive(Default)]
pub struct MemoryAuth {
    /// Keyed by email.
    users: DashMap<String, MemoryUser>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_for(user_id: &str, email: &str) -> AuthSession {
        AuthSession {
            user_id: user_id.to_string(),
            email: Some(email.to_string()),
            access_token: format!("mem-access-{}", Uuid::new_v4()),
            refresh_token: format!("mem-refresh-{}", Uuid::new_v4()),
        }
    }
}

#[async_trait]
impl AuthService for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        // One error for unknown email and wrong password alike.
        let user = self.users.get(email).ok_or(AppError::InvalidCredentials)?;
        if user.password != password {
            return Err(AppError::InvalidCredentials);
        }
        Ok(Self::session_for(&user.id, email))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _display_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        if self.users.contains_key(email) {
            return Err(AppError::EmailTaken);
        }

        let id = Uuid::new_v4().to_string();
        self.users.insert(
            email.to_string(),
            MemoryUser {
                id: id.clone(),
                password: password.to_string(),
            },
        );
        Ok(SignUpOutcome::SignedIn(Self::session_for(&id, email)))
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<(), AppError> {
        // Nothing to revoke; sessions are cookie-only in this backend.
        Ok(())
    }
}

/// In-memory profile rows and avatar objects.
#[derive(Default)]
pub struct MemoryProfileStore {
    /// Keyed by user id.
    rows: DashMap<String, Profile>,
    /// Keyed by `{user_id}/{filename}`; value is (content type, bytes).
    avatars: DashMap<String, (String, Vec<u8>)>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch(&self, identity: &Identity) -> Result<Option<Profile>, AppError> {
        Ok(self
            .rows
            .get(&identity.user_id)
            .map(|row| row.value().clone()))
    }

    async fn update(&self, identity: &Identity, changes: &ProfileChanges) -> Result<(), AppError> {
        // Patch on a missing row is a no-op, like the hosted table store.
        if let Some(mut row) = self.rows.get_mut(&identity.user_id) {
            let changes = changes.clone().stamped(Utc::now().to_rfc3339());
            let merged = row.merged(&changes);
            *row = merged;
        }
        Ok(())
    }

    async fn insert(&self, identity: &Identity, profile: &Profile) -> Result<(), AppError> {
        let mut profile = profile.clone();
        profile.id = identity.user_id.clone();
        profile.updated_at = Some(Utc::now().to_rfc3339());
        self.rows.insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn create_privileged(&self, profile: &Profile) -> Result<bool, AppError> {
        // No access policy to bypass here; the privileged credential is
        // always "configured" for the in-memory backend.
        let mut profile = profile.clone();
        profile.updated_at = Some(Utc::now().to_rfc3339());
        self.rows.insert(profile.id.clone(), profile);
        Ok(true)
    }

    async fn store_avatar(
        &self,
        identity: &Identity,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let path = format!("{}/{}", identity.user_id, filename);
        self.avatars
            .insert(path.clone(), (content_type.to_string(), bytes));
        Ok(format!("memory://avatars/{path}"))
    }
}
