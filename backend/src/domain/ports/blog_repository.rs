//! Port for blog persistence, including the owner back-reference.

use async_trait::async_trait;

use crate::domain::{Blog, BlogContent, BlogId, BlogWithOwner};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blog repository adapters.
    pub enum BlogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
        /// The owning user disappeared between validation and insert.
        MissingOwner { user_id: String } => "blog owner {user_id} does not exist",
    }
}

/// Port for reading and writing blog documents.
///
/// Adapters must keep the owner's `blogs` list consistent with the blog
/// rows: `insert` appends the new id to the owner and `delete` removes it,
/// each as a single atomic unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs, oldest first, with owners projected.
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogRepositoryError>;

    /// Fetch one blog with its owner projected.
    async fn find_with_owner(
        &self,
        id: &BlogId,
    ) -> Result<Option<BlogWithOwner>, BlogRepositoryError>;

    /// Insert a blog and append it to its owner's blog list.
    ///
    /// Fails with [`BlogRepositoryError::MissingOwner`] and writes nothing
    /// when the owner row does not exist.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError>;

    /// Replace the content of a blog, returning the updated document or
    /// `None` when no blog has the identifier.
    async fn replace_content(
        &self,
        id: &BlogId,
        content: &BlogContent,
    ) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Remove a blog and its owner back-reference. Absent ids are not an error.
    async fn delete(&self, id: &BlogId) -> Result<(), BlogRepositoryError>;
}
