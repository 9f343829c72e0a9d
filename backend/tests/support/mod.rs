//! Shared helpers for the HTTP integration suites.
//!
//! The app is assembled the way the server does it, over a fresh in-memory
//! store, so each test starts from an empty bloglist. Both suites use every
//! helper here.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use serde_json::Value;

use bloglist::Trace;
use bloglist::domain::{BlogService, UserService};
use bloglist::inbound::http::blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
use bloglist::inbound::http::state::HttpState;
use bloglist::inbound::http::users::{create_user, list_users};
use bloglist::inbound::http::validation::json_config;
use bloglist::outbound::memory::InMemoryStore;
use bloglist::outbound::security::Argon2PasswordHasher;

/// Two blogs with distinct likes, posted before each blog suite test.
pub fn initial_blogs() -> Vec<Value> {
    vec![
        serde_json::json!({
            "title": "Ipsum Lorem",
            "author": "Examplifly",
            "url": "http://example.com",
            "likes": 7
        }),
        serde_json::json!({
            "title": "Canonical string reduction",
            "author": "Edsger W. Dijkstra",
            "url": "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
            "likes": 5
        }),
    ]
}

fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let hasher = Argon2PasswordHasher::with_params(
        Params::new(1024, 1, 1, None).expect("valid argon2 params"),
    );
    let blogs = Arc::new(BlogService::new(store.clone(), store.clone()));
    let users = Arc::new(UserService::new(store, Arc::new(hasher)));
    HttpState::new(blogs.clone(), blogs, users.clone(), users)
}

/// Initialise the full API over an empty in-memory store.
pub async fn memory_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .service(list_blogs)
                    .service(get_blog)
                    .service(create_blog)
                    .service(update_blog)
                    .service(delete_blog)
                    .service(list_users)
                    .service(create_user),
            ),
    )
    .await
}

/// GET a path and decode the JSON body.
pub async fn get_json<S>(app: &S, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response =
        actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert!(response.status().is_success(), "GET {uri} failed");
    actix_test::read_body_json(response).await
}

/// POST a JSON body and return the response.
pub async fn post_json<S>(app: &S, uri: &str, body: &Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request(),
    )
    .await
}

/// Register a user and return its id.
pub async fn register<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post_json(
        app,
        "/api/users",
        &serde_json::json!({"username": username, "name": "Superuser", "password": "salainen"}),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["id"].as_str().expect("id is a string").to_owned()
}

/// POST the initial blogs and return their ids.
pub async fn seed_blogs<S>(app: &S) -> Vec<String>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut ids = Vec::new();
    for blog in initial_blogs() {
        let response = post_json(app, "/api/blogs", &blog).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        ids.push(body["id"].as_str().expect("id is a string").to_owned());
    }
    ids
}
