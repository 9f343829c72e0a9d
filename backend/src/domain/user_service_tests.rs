//! Tests for the user service.

use std::sync::Arc;

use rstest::rstest;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::domain::{BlogId, BlogSummary, ErrorCode, PasswordHash, Username};

const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

fn draft(username: Option<&str>, password: Option<&str>) -> UserDraft {
    UserDraft {
        username: username.map(str::to_owned),
        name: Some("Matti Luukkainen".to_owned()),
        password: password.map(|secret| Zeroizing::new(secret.to_owned())),
    }
}

fn hasher_returning(hash: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password.expose() == "salainen")
        .times(1)
        .return_once(move |_| Ok(PasswordHash::new(hash)));
    hasher
}

#[tokio::test]
async fn create_user_stores_hash_not_plaintext() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|user| user.password_hash().as_str() == HASH && user.blogs().is_empty())
        .times(1)
        .return_once(|_| Ok(()));

    let service = UserService::new(Arc::new(repo), Arc::new(hasher_returning(HASH)));
    let user = service
        .create_user(draft(Some("mluukkai"), Some("salainen")))
        .await
        .expect("create succeeds");

    assert_eq!(user.username().to_string(), "mluukkai");
    assert_eq!(user.name(), Some("Matti Luukkainen"));
    assert_ne!(user.password_hash().as_str(), "salainen");
}

#[rstest]
#[case(Some("ro"), Some("salainen"))]
#[case(None, Some("salainen"))]
#[case(Some("root"), Some("sa"))]
#[case(Some("root"), None)]
#[tokio::test]
async fn create_user_rejects_short_credentials(
    #[case] username: Option<&'static str>,
    #[case] password: Option<&'static str>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().times(0);
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let service = UserService::new(Arc::new(repo), Arc::new(hasher));
    let error = service
        .create_user(draft(username, password))
        .await
        .expect_err("malformed user");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), MALFORMED_USER_MESSAGE);
}

#[tokio::test]
async fn create_user_rejects_taken_username_before_hashing() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().times(1).return_once(|name| {
        Ok(Some(User::register(
            UserId::random(),
            name.clone(),
            None,
            PasswordHash::new(HASH),
        )))
    });
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let service = UserService::new(Arc::new(repo), Arc::new(hasher));
    let error = service
        .create_user(draft(Some("root"), Some("salainen")))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn create_user_maps_insert_race_to_duplicate_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|user| Err(UserRepositoryError::duplicate_username(user.username().to_string())));

    let service = UserService::new(Arc::new(repo), Arc::new(hasher_returning(HASH)));
    let error = service
        .create_user(draft(Some("root"), Some("salainen")))
        .await
        .expect_err("duplicate");

    assert_eq!(error.message(), DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn create_user_maps_hashing_failure_to_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hashing("invalid params")));

    let service = UserService::new(Arc::new(repo), Arc::new(hasher));
    let error = service
        .create_user(draft(Some("root"), Some("salainen")))
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn list_users_returns_projected_blogs() {
    let blog_id = BlogId::random();
    let mut repo = MockUserRepository::new();
    repo.expect_list_with_blogs().times(1).return_once(move || {
        let mut user = User::register(
            UserId::random(),
            Username::new("hellas").expect("valid username"),
            Some("Arto Hellas".to_owned()),
            PasswordHash::new(HASH),
        );
        user.push_blog(blog_id);
        Ok(vec![UserWithBlogs {
            user,
            blogs: vec![BlogSummary {
                id: blog_id,
                title: "React patterns".to_owned(),
                author: "Michael Chan".to_owned(),
                url: None,
            }],
        }])
    });

    let service = UserService::new(Arc::new(repo), Arc::new(MockPasswordHasher::new()));
    let users = service.list_users().await.expect("list succeeds");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].blogs[0].id, blog_id);
}

#[tokio::test]
async fn list_users_maps_connection_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_list_with_blogs()
        .return_once(|| Err(UserRepositoryError::connection("refused")));

    let service = UserService::new(Arc::new(repo), Arc::new(MockPasswordHasher::new()));
    let error = service.list_users().await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
