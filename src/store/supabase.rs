// SPDX-License-Identifier: MIT

//! Hosted-service backend: every call goes through a scoped client built
//! fresh for the calling identity, so the service's row-level security is
//! what actually enforces row ownership.

use async_trait::async_trait;
use chrono::Utc;

use super::{AuthService, ProfileStore};
use crate::error::AppError;
use crate::models::{AuthSession, Identity, Profile, ProfileChanges, SignUpOutcome};
use crate::services::SupabaseClient;

/// Auth backed by the hosted service.
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        self.client.sign_in_with_password(email, password).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        self.client.sign_up(email, password, display_name).await
    }

    async fn sign_out(&self, identity: &Identity) -> Result<(), AppError> {
        self.client.sign_out(&identity.access_token).await
    }
}

/// Profile storage backed by the hosted service's table store and object
/// storage.
pub struct SupabaseProfileStore {
    client: SupabaseClient,
}

impl SupabaseProfileStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    async fn fetch(&self, identity: &Identity) -> Result<Option<Profile>, AppError> {
        self.client
            .scoped(&identity.access_token)
            .select_profile(&identity.user_id)
            .await
    }

    async fn update(&self, identity: &Identity, changes: &ProfileChanges) -> Result<(), AppError> {
        let changes = changes.clone().stamped(Utc::now().to_rfc3339());
        self.client
            .scoped(&identity.access_token)
            .update_profile(&identity.user_id, &changes)
            .await
    }

    async fn insert(&self, identity: &Identity, profile: &Profile) -> Result<(), AppError> {
        let mut profile = profile.clone();
        profile.id = identity.user_id.clone();
        profile.updated_at = Some(Utc::now().to_rfc3339());
        self.client
            .scoped(&identity.access_token)
            .insert_profile(&profile)
            .await
    }

    async fn create_privileged(&self, profile: &Profile) -> Result<bool, AppError> {
        let Some(admin) = self.client.privileged() else {
            return Ok(false);
        };

        let mut profile = profile.clone();
        profile.updated_at = Some(Utc::now().to_rfc3339());
        admin.insert_profile(&profile).await?;
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
        self.client
            .scoped(&identity.access_token)
            .upload_object(super::buckets::AVATARS, &path, content_type, bytes)
            .await
    }
}
