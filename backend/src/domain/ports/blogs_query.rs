//! Driving port for blog reads.

use async_trait::async_trait;

use crate::domain::{BlogId, BlogWithOwner, Error};

/// Domain use-case port for listing and fetching blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsQuery: Send + Sync {
    /// Every blog with its owner projected.
    async fn list_blogs(&self) -> Result<Vec<BlogWithOwner>, Error>;

    /// One blog with its owner projected; `NotFound` when absent.
    async fn get_blog(&self, id: BlogId) -> Result<BlogWithOwner, Error>;
}
