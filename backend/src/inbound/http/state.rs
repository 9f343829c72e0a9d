//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BlogsCommand, BlogsQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Blog mutations.
    pub blogs: Arc<dyn BlogsCommand>,
    /// Blog reads.
    pub blogs_query: Arc<dyn BlogsQuery>,
    /// User registration.
    pub users: Arc<dyn UsersCommand>,
    /// User listing.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        blogs: Arc<dyn BlogsCommand>,
        blogs_query: Arc<dyn BlogsQuery>,
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
    ) -> Self {
        Self {
            blogs,
            blogs_query,
            users,
            users_query,
        }
    }
}
