//! In-memory blog and user store.
//!
//! Both repository ports are implemented on one [`InMemoryStore`] guarding
//! a single state behind one lock, so a blog insert and the matching owner
//! append are observed together. Intended for local development without a
//! database and for HTTP-level tests; nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Blog, BlogContent, BlogId, BlogSummary, BlogWithOwner, OwnerSummary, User, UserId,
    UserWithBlogs, Username,
};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

impl StoreState {
    fn owner_summary(&self, id: UserId) -> Option<OwnerSummary> {
        self.users
            .iter()
            .find(|user| user.id() == id)
            .map(|user| OwnerSummary {
                id: user.id(),
                username: user.username().to_string(),
                name: user.name().map(str::to_owned),
            })
    }

    fn with_owner(&self, blog: &Blog) -> BlogWithOwner {
        BlogWithOwner {
            blog: blog.clone(),
            owner: blog.user().and_then(|id| self.owner_summary(id)),
        }
    }

    fn blog_summary(&self, id: BlogId) -> Option<BlogSummary> {
        self.blogs
            .iter()
            .find(|blog| blog.id() == id)
            .map(|blog| BlogSummary {
                id: blog.id(),
                title: blog.content().title().to_owned(),
                author: blog.content().author().to_owned(),
                url: blog.content().url().map(str::to_owned),
            })
    }
}

/// Process-local store implementing [`BlogRepository`] and [`UserRepository`].
///
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.blogs.iter().map(|blog| state.with_owner(blog)).collect())
    }

    async fn find_with_owner(
        &self,
        id: &BlogId,
    ) -> Result<Option<BlogWithOwner>, BlogRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .blogs
            .iter()
            .find(|blog| blog.id() == *id)
            .map(|blog| state.with_owner(blog)))
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut state = self.state.lock().await;
        if let Some(owner) = blog.user() {
            let Some(user) = state.users.iter_mut().find(|user| user.id() == owner) else {
                return Err(BlogRepositoryError::missing_owner(owner.to_string()));
            };
            user.push_blog(blog.id());
        }
        state.blogs.push(blog.clone());
        Ok(())
    }

    async fn replace_content(
        &self,
        id: &BlogId,
        content: &BlogContent,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(slot) = state.blogs.iter_mut().find(|blog| blog.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_content(content.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &BlogId) -> Result<(), BlogRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(position) = state.blogs.iter().position(|blog| blog.id() == *id) else {
            return Ok(());
        };
        let removed = state.blogs.remove(position);
        if let Some(owner) = removed.user() {
            if let Some(user) = state.users.iter_mut().find(|user| user.id() == owner) {
                user.remove_blog(removed.id());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .map(|user| UserWithBlogs {
                user: user.clone(),
                blogs: user
                    .blogs()
                    .iter()
                    .filter_map(|id| state.blog_summary(*id))
                    .collect(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|user| user.id() == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.state.lock().await;
        if state
            .users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserRepositoryError::duplicate_username(
                user.username().to_string(),
            ));
        }
        state.users.push(user.clone());
        Ok(())
    }
}
