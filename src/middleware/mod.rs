// SPDX-License-Identifier: MIT

//! Middleware modules (session gate, security headers).

pub mod auth;
pub mod security;

pub use auth::require_session;
