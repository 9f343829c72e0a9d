//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft};

/// Domain use-case port for creating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate the draft, hash the password and store the user.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;
}
