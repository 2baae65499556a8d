// SPDX-License-Identifier: MIT

//! Profile read-modify-write tests.
//!
//! The contract under test: read → partial write → read leaves untouched
//! fields identical to their pre-write values.

use axum::http::StatusCode;
use reelroom::models::Identity;
use reelroom::store::ProfileStore as _;

mod common;

/// Decode the session cookie with the test signing key to get the identity
/// the store sees.
fn identity_from_cookie(cookie: &str) -> Identity {
    let token = cookie
        .strip_prefix("reelroom_session=")
        .expect("session cookie pair");
    reelroom::session::decode_session(token, &reelroom::config::Config::test_default().session_signing_key)
        .expect("session cookie should decode")
}

#[tokio::test]
async fn test_partial_update_keeps_untouched_fields() {
    let (app, state) = common::create_test_app();
    let cookie = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;
    let identity = identity_from_cookie(&cookie);

    // Fill several fields.
    let response = common::post_form(
        &app,
        "/account",
        "displayName=Alice&email=alice@example.com&bio=&top5=Heat%2C%20Ronin",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let before = state
        .profiles
        .fetch(&identity)
        .await
        .unwrap()
        .expect("profile row should exist");

    // Partial write: only bio submitted.
    let response = common::post_form(&app, "/account", "bio=Movie%20nights", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = state
        .profiles
        .fetch(&identity)
        .await
        .unwrap()
        .expect("profile row should exist");

    assert_eq!(after.bio.as_deref(), Some("Movie nights"));
    assert_eq!(after.display_name, before.display_name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.top5, before.top5);
    assert_eq!(after.handle, before.handle);
}

#[tokio::test]
async fn test_display_name_update_scenario() {
    // Stored {display_name: "Alice", bio: ""} + {displayName: "Alice B"}
    // must yield {display_name: "Alice B", bio: ""} and render the new name.
    let (app, state) = common::create_test_app();
    let cookie = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;
    let identity = identity_from_cookie(&cookie);

    let response = common::post_form(&app, "/account", "displayName=Alice&bio=", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::post_form(&app, "/account", "displayName=Alice%20B", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("value=\"Alice B\""));

    let row = state.profiles.fetch(&identity).await.unwrap().unwrap();
    assert_eq!(row.display_name.as_deref(), Some("Alice B"));
    assert_eq!(row.bio.as_deref(), Some(""));
}

#[tokio::test]
async fn test_present_but_empty_overwrites() {
    let (app, state) = common::create_test_app();
    let cookie = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;
    let identity = identity_from_cookie(&cookie);

    common::post_form(&app, "/account", "top5=Heat", Some(&cookie)).await;
    common::post_form(&app, "/account", "top5=", Some(&cookie)).await;

    let row = state.profiles.fetch(&identity).await.unwrap().unwrap();
    assert_eq!(row.top5.as_deref(), Some(""));
}

#[tokio::test]
async fn test_account_view_with_no_profile_row() {
    // An identity without a row is a valid state and renders an empty form.
    let (app, _) = common::create_test_app();

    let identity = Identity {
        user_id: "ghost".to_string(),
        access_token: "t".to_string(),
        refresh_token: "r".to_string(),
    };
    let token = reelroom::session::encode_session(
        &identity,
        &reelroom::config::Config::test_default().session_signing_key,
    )
    .unwrap();
    let cookie = format!("reelroom_session={token}");

    let response = common::get(&app, "/account", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("value=\"\""));
}

#[tokio::test]
async fn test_first_save_inserts_row_for_identity_without_one() {
    let (app, state) = common::create_test_app();
    let _ = common::register_user(&app, "Alice", "alice@example.com", "secret123").await;

    // A session whose identity has no profile row yet.
    let identity = Identity {
        user_id: "u-no-row".to_string(),
        access_token: "t".to_string(),
        refresh_token: "r".to_string(),
    };
    let token = reelroom::session::encode_session(
        &identity,
        &reelroom::config::Config::test_default().session_signing_key,
    )
    .unwrap();
    let cookie = format!("reelroom_session={token}");

    let response = common::post_form(&app, "/account", "handle=%40alice", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let row = state
        .profiles
        .fetch(&identity)
        .await
        .unwrap()
        .expect("first save should insert the row");
    assert_eq!(row.id, "u-no-row");
    assert_eq!(row.handle.as_deref(), Some("@alice"));
}
