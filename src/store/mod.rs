// SPDX-License-Identifier: MIT

//! Storage abstraction over the hosted backend.
//!
//! One interface, two implementations selected by configuration: an
//! in-memory store for tests and local development, and the hosted-service
//! store used in production. Route handlers only ever see the traits.

pub mod memory;
pub mod supabase;

pub use memory::{MemoryAuth, MemoryProfileStore};
pub use supabase::{SupabaseAuth, SupabaseProfileStore};

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{AuthSession, Identity, Profile, ProfileChanges, SignUpOutcome};

/// Table names on the hosted service.
pub mod tables {
    pub const PROFILES: &str = "profiles";
}

/// Storage buckets on the hosted service.
pub mod buckets {
    pub const AVATARS: &str = "avatars";
}

/// Credential checks and account lifecycle.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and open a session.
    ///
    /// Fails with [`AppError::InvalidCredentials`] for both unknown email
    /// and wrong password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError>;

    /// Create an account. May or may not open a session immediately,
    /// depending on the backend's confirmation policy.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AppError>;

    /// Revoke a session's tokens. Best effort; callers clear the session
    /// regardless.
    async fn sign_out(&self, identity: &Identity) -> Result<(), AppError>;
}

/// Profile rows and avatar objects, always accessed as one end user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the identity's profile row. `None` means not created yet.
    async fn fetch(&self, identity: &Identity) -> Result<Option<Profile>, AppError>;

    /// Partial update restricted to the identity's row.
    async fn update(&self, identity: &Identity, changes: &ProfileChanges) -> Result<(), AppError>;

    /// Insert the identity's first profile row.
    async fn insert(&self, identity: &Identity, profile: &Profile) -> Result<(), AppError>;

    /// Create a profile row with administrative credentials, bypassing the
    /// per-user access policy. Returns `false` when no privileged
    /// credential is configured.
    async fn create_privileged(&self, profile: &Profile) -> Result<bool, AppError>;

    /// Store avatar bytes for the identity and return the public URL.
    async fn store_avatar(
        &self,
        identity: &Identity,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError>;
}
