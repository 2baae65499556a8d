// SPDX-License-Identifier: MIT

//! Landing and main pages, plus the placeholder room actions.

use axum::{
    extract::Query,
    response::{Html, Redirect},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::Identity;
use crate::views;
use crate::AppState;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/home", get(root))
        .route("/index", get(root))
        .route("/pages/index", get(landing))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/pages/main", get(main_view))
        .route("/create-room", post(create_room))
        .route("/quick-match", post(quick_match))
}

async fn root() -> Redirect {
    Redirect::to("/pages/index")
}

async fn landing() -> Html<String> {
    Html(views::landing_page())
}

#[derive(Deserialize)]
struct MainParams {
    /// Flash message carried across the redirect from the room actions.
    #[serde(default)]
    m: Option<String>,
}

async fn main_view(
    Query(params): Query<MainParams>,
    Extension(identity): Extension<Identity>,
) -> Html<String> {
    tracing::debug!(user_id = %identity.user_id, "Rendering main view");
    Html(views::main_page(params.m.as_deref()))
}

/// Placeholder: no room is created yet.
async fn create_room(Extension(identity): Extension<Identity>) -> Redirect {
    tracing::info!(user_id = %identity.user_id, "Room creation requested (placeholder)");
    flash_redirect("Room created (demo).")
}

/// Placeholder: no matching happens yet.
async fn quick_match(Extension(identity): Extension<Identity>) -> Redirect {
    tracing::info!(user_id = %identity.user_id, "Quick match requested (placeholder)");
    flash_redirect("We'd match you with 3 people (demo).")
}

fn flash_redirect(message: &str) -> Redirect {
    Redirect::to(&format!("/pages/main?m={}", urlencoding::encode(message)))
}
