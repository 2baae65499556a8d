// SPDX-License-Identifier: MIT

//! Application error types with consistent HTML responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::views;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No usable session. The browser is sent to the login form rather
    /// than shown an error page.
    #[error("Authentication required")]
    Unauthenticated,

    /// Bad email/password. One variant for both unknown email and wrong
    /// password, so responses cannot be used for account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Backend service error: {0}")]
    ServiceApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Html(views::error_page("Invalid email or password.")),
            )
                .into_response(),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                Html(views::error_page(
                    "An account with this email already exists.",
                )),
            )
                .into_response(),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Html(views::error_page(msg))).into_response()
            }
            AppError::ServiceApi(msg) => {
                tracing::error!(error = %msg, "Backend service error");
                (
                    StatusCode::BAD_GATEWAY,
                    Html(views::error_page(
                        "The backend service is unavailable. Please try again later.",
                    )),
                )
                    .into_response()
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Something went wrong on our side.")),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Something went wrong on our side.")),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
