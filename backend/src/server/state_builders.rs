//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use bloglist::domain::ports::{BlogRepository, UserRepository};
use bloglist::domain::{BlogService, UserService};
use bloglist::inbound::http::state::HttpState;
use bloglist::outbound::memory::InMemoryStore;
use bloglist::outbound::persistence::{DbPool, DieselBlogRepository, DieselUserRepository};
use bloglist::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Build the services over a repository pair and expose them as ports.
fn wire_services<B, U>(blog_repo: Arc<B>, user_repo: Arc<U>) -> HttpState
where
    B: BlogRepository + 'static,
    U: UserRepository + 'static,
{
    let blogs = Arc::new(BlogService::new(blog_repo, user_repo.clone()));
    let users = Arc::new(UserService::new(
        user_repo,
        Arc::new(Argon2PasswordHasher::default()),
    ));
    HttpState::new(blogs.clone(), blogs, users.clone(), users)
}

fn postgres_state(pool: &DbPool) -> HttpState {
    wire_services(
        Arc::new(DieselBlogRepository::new(pool.clone())),
        Arc::new(DieselUserRepository::new(pool.clone())),
    )
}

fn memory_state(store: InMemoryStore) -> HttpState {
    let store = Arc::new(store);
    wire_services(store.clone(), store)
}

/// Build the HTTP state, using PostgreSQL when a pool is configured and a
/// fresh in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => postgres_state(pool),
        None => memory_state(InMemoryStore::new()),
    }
}
