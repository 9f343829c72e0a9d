//! User domain service.
//!
//! Registration validates username and password length, rejects taken
//! usernames, and stores only the derived password hash.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError, UsersCommand,
    UsersQuery,
};
use crate::domain::{Error, User, UserDraft, UserId, UserRegistration, UserWithBlogs};

/// Message returned when username or password is too short.
pub const MALFORMED_USER_MESSAGE: &str = "malformed user";
/// Message returned when the username is already taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "duplicate username";

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => {
            Error::invalid_request(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

fn map_password_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password hashing failed")
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<U, H> {
    user_repo: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserService<U, H> {
    /// Create a new service over the user repository and password hasher.
    pub fn new(user_repo: Arc<U>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<U, H> UsersCommand for UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let UserRegistration {
            username,
            name,
            password,
        } = UserRegistration::try_from_draft(draft).map_err(|err| {
            debug!(error = %err, "rejected user registration");
            Error::invalid_request(MALFORMED_USER_MESSAGE)
        })?;

        let taken = self
            .user_repo
            .find_by_username(&username)
            .await
            .map_err(map_user_repository_error)?;
        if taken.is_some() {
            debug!(%username, "username already taken");
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(password)
            .await
            .map_err(map_password_hash_error)?;

        let user = User::register(UserId::random(), username, name, password_hash);
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user created");
        Ok(user)
    }
}

#[async_trait]
impl<U, H> UsersQuery for UserService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, Error> {
        self.user_repo
            .list_with_blogs()
            .await
            .map_err(map_user_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
