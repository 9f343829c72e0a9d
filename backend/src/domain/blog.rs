//! Blog data model.
//!
//! A [`Blog`] pairs store-assigned identity with validated [`BlogContent`]
//! and an optional owning user. The owner is fixed at creation; replacing
//! the content never touches it.

use crate::domain::{BlogId, UserId};

/// Validation errors returned by [`BlogContent::try_from_draft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogValidationError {
    /// `title` was absent or empty.
    #[error("blog title must not be empty")]
    MissingTitle,
    /// `author` was absent or empty.
    #[error("blog author must not be empty")]
    MissingAuthor,
}

/// Unvalidated blog fields as supplied by a client.
///
/// Every field is optional so presence can be checked in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogDraft {
    /// Headline; required.
    pub title: Option<String>,
    /// Who wrote the post; required.
    pub author: Option<String>,
    /// Link to the post.
    pub url: Option<String>,
    /// Like count; defaults to zero.
    pub likes: Option<i64>,
}

/// Replaceable blog fields.
///
/// ## Invariants
/// - `title` and `author` are non-empty.
/// - `likes` defaults to zero when not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogContent {
    title: String,
    author: String,
    url: Option<String>,
    likes: i64,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl BlogContent {
    /// Validate a draft, applying the default likes count.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::{BlogContent, BlogDraft};
    ///
    /// let content = BlogContent::try_from_draft(BlogDraft {
    ///     title: Some("React patterns".into()),
    ///     author: Some("Michael Chan".into()),
    ///     ..BlogDraft::default()
    /// })
    /// .expect("valid draft");
    /// assert_eq!(content.likes(), 0);
    /// ```
    pub fn try_from_draft(draft: BlogDraft) -> Result<Self, BlogValidationError> {
        let BlogDraft {
            title,
            author,
            url,
            likes,
        } = draft;
        let title = present(title).ok_or(BlogValidationError::MissingTitle)?;
        let author = present(author).ok_or(BlogValidationError::MissingAuthor)?;
        Ok(Self {
            title,
            author,
            url,
            likes: likes.unwrap_or(0),
        })
    }

    /// Non-empty headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Non-empty author name.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Link to the post, if one was given.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Like count.
    pub fn likes(&self) -> i64 {
        self.likes
    }
}

/// A stored blog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    content: BlogContent,
    user: Option<UserId>,
}

impl Blog {
    /// Assemble a blog from validated parts.
    pub fn new(id: BlogId, content: BlogContent, user: Option<UserId>) -> Self {
        Self { id, content, user }
    }

    /// Replace the content while keeping identity and owner.
    #[must_use]
    pub fn with_content(self, content: BlogContent) -> Self {
        Self { content, ..self }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> BlogId {
        self.id
    }

    /// Validated title, author, url and likes.
    pub fn content(&self) -> &BlogContent {
        &self.content
    }

    /// Owning user, if the blog was created under one.
    pub fn user(&self) -> Option<UserId> {
        self.user
    }
}

/// The `{id, username, name}` projection of a blog's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    /// Owner identifier.
    pub id: UserId,
    /// Owner login name.
    pub username: String,
    /// Owner display name.
    pub name: Option<String>,
}

/// A blog with its owner expanded to an [`OwnerSummary`].
///
/// `owner` is `None` both for unowned blogs and for blogs whose owner no
/// longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogWithOwner {
    /// The blog itself.
    pub blog: Blog,
    /// Populated owner, absent for ownerless blogs.
    pub owner: Option<OwnerSummary>,
}
