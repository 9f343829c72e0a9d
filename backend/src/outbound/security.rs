//! Argon2id implementation of the password hashing port.

use argon2::password_hash::{PasswordHasher as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tracing::Span;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash, TraceId};

/// Hashes passwords with Argon2id into PHC strings.
///
/// Hashing is CPU-bound and runs on the blocking pool; the caller's span
/// and trace identifier are carried across.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Use explicit Argon2 cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn hash_blocking(params: Params, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let phc = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .to_string();
        Ok(PasswordHash::new(phc))
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHashError> {
        let params = self.params.clone();
        let span = Span::current();
        let trace_id = TraceId::current();

        tokio::task::spawn_blocking(move || {
            span.in_scope(|| match trace_id {
                Some(id) => TraceId::sync_scope(id, || Self::hash_blocking(params, &password)),
                None => Self::hash_blocking(params, &password),
            })
        })
        .await
        .map_err(|err| PasswordHashError::hashing(format!("hashing task failed: {err}")))?
    }
}
