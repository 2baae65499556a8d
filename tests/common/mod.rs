// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use reelroom::config::Config;
use reelroom::routes::create_router;
use reelroom::store::{MemoryAuth, MemoryProfileStore};
use reelroom::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let state = Arc::new(AppState {
        config,
        auth: Arc::new(MemoryAuth::new()),
        profiles: Arc::new(MemoryProfileStore::new()),
    });

    (create_router(state.clone()), state)
}

/// GET a path, optionally with a Cookie header.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST a urlencoded form, optionally with a Cookie header.
#[allow(dead_code)]
pub async fn post_form(app: &axum::Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Extract the freshly-set session cookie (as a `name=value` pair) from a
/// response, ignoring removal cookies.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("reelroom_session=") && !value.contains("Max-Age=0"))
        .map(|value| value.split(';').next().unwrap().to_string())
}

/// Register a user through the real route and return the session cookie.
#[allow(dead_code)]
pub async fn register_user(app: &axum::Router, display_name: &str, email: &str, password: &str) -> String {
    let body = format!(
        "displayName={}&email={}&password={}&confirm={}",
        display_name, email, password, password
    );
    let response = post_form(app, "/register", &body, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("registration should set a session cookie")
}

/// Read a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Location header of a redirect response.
#[allow(dead_code)]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
