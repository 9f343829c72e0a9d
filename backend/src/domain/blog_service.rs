//! Blog domain service.
//!
//! Implements the blog driving ports: required-field validation, the
//! default likes policy, owner validation on create, and the mapping from
//! repository failures to domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, BlogsCommand, BlogsQuery, CreateBlogRequest,
    UpdateBlogRequest, UserRepository,
};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{Blog, BlogContent, BlogDraft, BlogId, BlogWithOwner, Error, UserId};

/// Message returned when `title` or `author` is missing.
pub const CONTENT_MISSING_MESSAGE: &str = "content missing";
/// Message returned when the referenced owner does not exist.
pub const UNKNOWN_OWNER_MESSAGE: &str = "no user created the blog";

fn map_blog_repository_error(error: BlogRepositoryError) -> Error {
    match error {
        BlogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogRepositoryError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
        BlogRepositoryError::MissingOwner { user_id } => {
            warn!(%user_id, "owner vanished before blog insert");
            Error::invalid_request(UNKNOWN_OWNER_MESSAGE)
        }
    }
}

/// An id that does not parse cannot name an existing user, so it is
/// reported the same way as an unknown one.
fn parse_owner_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|err| {
        debug!(value = err.value(), "malformed owner id");
        Error::invalid_request(UNKNOWN_OWNER_MESSAGE)
    })
}

fn validate_content(draft: BlogDraft) -> Result<BlogContent, Error> {
    BlogContent::try_from_draft(draft).map_err(|err| {
        debug!(error = %err, "rejected blog content");
        Error::invalid_request(CONTENT_MISSING_MESSAGE)
    })
}

/// Blog service implementing [`BlogsCommand`] and [`BlogsQuery`].
#[derive(Clone)]
pub struct BlogService<B, U> {
    blog_repo: Arc<B>,
    user_repo: Arc<U>,
}

impl<B, U> BlogService<B, U> {
    /// Create a new service over the blog and user repositories.
    pub fn new(blog_repo: Arc<B>, user_repo: Arc<U>) -> Self {
        Self {
            blog_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<B, U> BlogsCommand for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn create_blog(&self, request: CreateBlogRequest) -> Result<Blog, Error> {
        let CreateBlogRequest { draft, owner } = request;
        let content = validate_content(draft)?;
        let owner = owner.as_deref().map(parse_owner_id).transpose()?;

        if let Some(user_id) = owner {
            let found = self
                .user_repo
                .find_by_id(&user_id)
                .await
                .map_err(map_user_repository_error)?;
            if found.is_none() {
                debug!(%user_id, "blog owner not found");
                return Err(Error::invalid_request(UNKNOWN_OWNER_MESSAGE));
            }
        }

        let blog = Blog::new(BlogId::random(), content, owner);
        self.blog_repo
            .insert(&blog)
            .await
            .map_err(map_blog_repository_error)?;

        info!(blog_id = %blog.id(), owned = owner.is_some(), "blog created");
        Ok(blog)
    }

    async fn update_blog(&self, request: UpdateBlogRequest) -> Result<Blog, Error> {
        let UpdateBlogRequest { id, draft } = request;
        let content = validate_content(draft)?;

        let updated = self
            .blog_repo
            .replace_content(&id, &content)
            .await
            .map_err(map_blog_repository_error)?
            .ok_or_else(|| Error::not_found(format!("blog {id} not found")))?;

        info!(blog_id = %id, "blog updated");
        Ok(updated)
    }

    async fn delete_blog(&self, id: BlogId) -> Result<(), Error> {
        self.blog_repo
            .delete(&id)
            .await
            .map_err(map_blog_repository_error)?;
        info!(blog_id = %id, "blog deleted");
        Ok(())
    }
}

#[async_trait]
impl<B, U> BlogsQuery for BlogService<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    async fn list_blogs(&self) -> Result<Vec<BlogWithOwner>, Error> {
        self.blog_repo
            .list_with_owners()
            .await
            .map_err(map_blog_repository_error)
    }

    async fn get_blog(&self, id: BlogId) -> Result<BlogWithOwner, Error> {
        self.blog_repo
            .find_with_owner(&id)
            .await
            .map_err(map_blog_repository_error)?
            .ok_or_else(|| Error::not_found(format!("blog {id} not found")))
    }
}

#[cfg(test)]
#[path = "blog_service_tests.rs"]
mod tests;
