// SPDX-License-Identifier: MIT

//! Session-gate tests.
//!
//! Every session-gated route must answer anonymous requests with a redirect
//! to the login form, never a 200 with protected content.

use axum::http::StatusCode;

mod common;

const GATED_GETS: &[&str] = &["/pages/main", "/account"];
const GATED_POSTS: &[&str] = &["/create-room", "/quick-match", "/account"];

#[tokio::test]
async fn test_gated_routes_redirect_anonymous_requests() {
    let (app, _) = common::create_test_app();

    for uri in GATED_GETS {
        let response = common::get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(common::location(&response), "/login", "GET {uri}");
    }

    for uri in GATED_POSTS {
        let response = common::post_form(&app, uri, "", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {uri}");
        assert_eq!(common::location(&response), "/login", "POST {uri}");
    }
}

#[tokio::test]
async fn test_gated_routes_reject_garbage_cookie() {
    let (app, _) = common::create_test_app();

    let response = common::get(
        &app,
        "/pages/main",
        Some("reelroom_session=not.a.real.token"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
}

#[tokio::test]
async fn test_gated_routes_reject_token_signed_with_other_key() {
    let (app, _) = common::create_test_app();

    // Forge a structurally valid session signed with the wrong key.
    let identity = reelroom::models::Identity {
        user_id: "u1".to_string(),
        access_token: "t1".to_string(),
        refresh_token: "r1".to_string(),
    };
    let forged = reelroom::session::encode_session(&identity, b"attacker_key").unwrap();

    let response = common::get(
        &app,
        "/account",
        Some(&format!("reelroom_session={forged}")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/login");
}

#[tokio::test]
async fn test_valid_session_reaches_main_view() {
    let (app, _) = common::create_test_app();
    let cookie = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;

    let response = common::get(&app, "/pages/main", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_string(response).await;
    assert!(body.contains("Your rooms"));
}

#[tokio::test]
async fn test_room_actions_redirect_with_flash_message() {
    let (app, _) = common::create_test_app();
    let cookie = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;

    let response = common::post_form(&app, "/create-room", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = common::location(&response).to_string();
    assert!(target.starts_with("/pages/main?m="), "got {target}");

    // The flash message round-trips onto the rendered page.
    let response = common::get(&app, &target, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Room created (demo)."));

    let response = common::post_form(&app, "/quick-match", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(common::location(&response).starts_with("/pages/main?m="));
}

#[tokio::test]
async fn test_public_routes_do_not_require_session() {
    let (app, _) = common::create_test_app();

    for uri in ["/", "/home", "/index"] {
        let response = common::get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(common::location(&response), "/pages/index");
    }

    let response = common::get(&app, "/pages/index", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
