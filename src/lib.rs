// SPDX-License-Identifier: MIT

//! Reelroom: watch-party rooms with session login over a hosted backend.
//!
//! This crate provides the web server: session-based authentication bridged
//! to the hosted service's per-user access policies, profile editing, and
//! the placeholder room/match actions.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod store;
pub mod views;

use std::sync::Arc;

use config::Config;
use store::{AuthService, ProfileStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn ProfileStore>,
}
