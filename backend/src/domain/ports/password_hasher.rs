//! Port for deriving the stored password secret.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Derives a one-way secret from a plaintext password.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash the password, consuming (and wiping) the plaintext.
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHashError>;
}
