//! Driving port for blog mutations.

use async_trait::async_trait;

use crate::domain::{Blog, BlogDraft, BlogId, Error};

/// Request to create a blog, optionally under an existing user.
///
/// `owner` is the user id exactly as the client sent it; the service parses
/// it after the content checks so content errors are reported first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBlogRequest {
    /// Client-supplied fields.
    pub draft: BlogDraft,
    /// Raw `userId`, parsed and checked by the service.
    pub owner: Option<String>,
}

/// Request to replace the content of an existing blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBlogRequest {
    /// Blog to replace.
    pub id: BlogId,
    /// Replacement fields.
    pub draft: BlogDraft,
}

/// Domain use-case port for creating, replacing and deleting blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsCommand: Send + Sync {
    /// Validate and store a new blog; returns the stored document.
    async fn create_blog(&self, request: CreateBlogRequest) -> Result<Blog, Error>;

    /// Validate and replace a blog's content; the owner is never changed.
    async fn update_blog(&self, request: UpdateBlogRequest) -> Result<Blog, Error>;

    /// Remove a blog; succeeds whether or not it existed.
    async fn delete_blog(&self, id: BlogId) -> Result<(), Error>;
}
