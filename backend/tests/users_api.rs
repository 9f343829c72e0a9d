//! End-to-end user registration behaviour over the in-memory store.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::{get_json, initial_blogs, memory_app, post_json, register, seed_blogs};

#[actix_web::test]
async fn fresh_username_is_registered() {
    let app = memory_app().await;
    register(&app, "root").await;

    let response = post_json(
        &app,
        "/api/users",
        &json!({"username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created["username"], "mluukkai");
    assert_eq!(created["name"], "Matti Luukkainen");
    assert_eq!(created["blogs"], json!([]));
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());

    let users = get_json(&app, "/api/users").await;
    let usernames: Vec<_> = users
        .as_array()
        .expect("array")
        .iter()
        .map(|user| user["username"].clone())
        .collect();
    assert_eq!(usernames, vec![json!("root"), json!("mluukkai")]);
}

#[rstest]
#[case::missing_username(json!({"name": "Nameless", "password": "salainen"}))]
#[case::empty_username(json!({"username": "", "password": "salainen"}))]
#[case::short_username(json!({"username": "ml", "password": "salainen"}))]
#[case::missing_password(json!({"username": "mluukkai"}))]
#[case::short_password(json!({"username": "mluukkai", "password": "sa"}))]
#[actix_web::test]
async fn short_credentials_are_malformed(#[case] body: Value) {
    let app = memory_app().await;

    let response = post_json(&app, "/api/users", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error, json!({"error": "malformed user"}));
    assert_eq!(get_json(&app, "/api/users").await, json!([]));
}

#[rstest]
#[case::three_characters("abc")]
#[case::longer("mluukkai")]
#[actix_web::test]
async fn usernames_of_three_or_more_characters_are_accepted(#[case] username: &str) {
    let app = memory_app().await;

    let response = post_json(
        &app,
        "/api/users",
        &json!({"username": username, "password": "pwd"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn duplicate_username_is_rejected() {
    let app = memory_app().await;
    register(&app, "root").await;

    let response = post_json(
        &app,
        "/api/users",
        &json!({"username": "root", "name": "Superuser", "password": "salainen"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error, json!({"error": "duplicate username"}));
    let users = get_json(&app, "/api/users").await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn ownerless_blogs_stay_off_user_listings() {
    let app = memory_app().await;
    register(&app, "root").await;

    let seeded = seed_blogs(&app).await;
    assert_eq!(seeded.len(), initial_blogs().len());

    let users = get_json(&app, "/api/users").await;
    assert_eq!(users[0]["username"], "root");
    assert_eq!(users[0]["blogs"], json!([]));
}
