// SPDX-License-Identifier: MIT

//! Profile viewing and editing.
//!
//! The write path is read-modify-write: merge the submitted fields over the
//! stored row, write through the caller's scoped access, then re-read for
//! the authoritative state.

use axum::{
    extract::{Multipart, State},
    response::Html,
    routing::{get, post},
    Extension, Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Identity, Profile, ProfileChanges};
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/account", get(view_account).post(update_account))
        .route("/account/avatar", post(upload_avatar))
}

async fn view_account(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Html<String>> {
    // No row yet is a valid state; render the form empty.
    let profile = state
        .profiles
        .fetch(&identity)
        .await?
        .unwrap_or_else(|| Profile::empty(&identity.user_id));

    Ok(Html(views::account_page(&profile, false)))
}

/// Account form. A field absent from the submission keeps the stored value;
/// a field present but empty overwrites with the empty string.
#[derive(Debug, Default, Deserialize)]
struct AccountForm {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    top5: Option<String>,
    handle: Option<String>,
    #[serde(rename = "avatarUrl")]
    avatar_url: Option<String>,
}

impl AccountForm {
    fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            display_name: self.display_name,
            email: self.email,
            bio: self.bio,
            top5: self.top5,
            handle: self.handle,
            avatar_url: self.avatar_url,
            updated_at: None,
        }
    }
}

async fn update_account(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Form(form): Form<AccountForm>,
) -> Result<Html<String>> {
    let profile = save_changes(&state, &identity, form.into_changes()).await?;
    Ok(Html(views::account_page(&profile, true)))
}

/// Merge the submitted fields over the stored row and write. Existing row →
/// update restricted to the caller's row; no row → insert carrying the
/// identity as primary key. The re-read afterwards returns authoritative
/// state; if it comes back empty, fall back to the merged in-memory values
/// rather than failing the request.
async fn save_changes(
    state: &AppState,
    identity: &Identity,
    changes: ProfileChanges,
) -> Result<Profile> {
    let existing = state.profiles.fetch(identity).await?;

    let merged = match &existing {
        Some(row) => row.merged(&changes),
        None => Profile::from_changes(&identity.user_id, &changes),
    };

    match existing {
        Some(_) => state.profiles.update(identity, &changes).await?,
        None => state.profiles.insert(identity, &merged).await?,
    }

    tracing::info!(user_id = %identity.user_id, "Profile saved");

    let profile = state.profiles.fetch(identity).await?.unwrap_or(merged);
    Ok(profile)
}

/// Upload an avatar image and merge its public URL into the profile.
async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<Html<String>> {
    let mut uploaded: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or("avatar"));
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("The avatar upload was empty.".to_string()));
        }

        uploaded = Some(
            state
                .profiles
                .store_avatar(&identity, &filename, &content_type, bytes.to_vec())
                .await?,
        );
        break;
    }

    let url = uploaded
        .ok_or_else(|| AppError::BadRequest("No avatar file in the upload.".to_string()))?;

    let changes = ProfileChanges {
        avatar_url: Some(url),
        ..Default::default()
    };
    let profile = save_changes(&state, &identity, changes).await?;
    Ok(Html(views::account_page(&profile, true)))
}

/// Keep object paths flat and predictable regardless of what the browser
/// claims the filename is.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '_' || c == '.') {
        "avatar".to_string()
    } else {
        cleaned
    }
}
