//! User data model.
//!
//! Users own zero or more blogs through the `blogs` back-reference list,
//! which is appended to whenever a blog is created under the user. The
//! plaintext password only exists inside [`Password`] long enough to be
//! hashed; the stored form is a [`PasswordHash`].

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{BlogId, UserId};

/// Minimum number of characters in a username.
pub const USERNAME_MIN: usize = 3;
/// Minimum number of characters in a password.
pub const PASSWORD_MIN: usize = 3;

/// Validation errors returned by [`UserRegistration::try_from_draft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username missing or shorter than `min` characters.
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    /// Password missing or shorter than `min` characters.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.chars().count() < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        Ok(Self(username))
    }

    /// Borrow the login name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plaintext password, wiped from memory on drop.
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(password))
    }

    /// Borrow the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Derived password secret in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC string produced by a hasher or read from the store.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Unvalidated registration fields as supplied by a client.
#[derive(Default)]
pub struct UserDraft {
    /// Requested login name.
    pub username: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Plaintext password, wiped on drop.
    pub password: Option<Zeroizing<String>>,
}

/// Validated registration request.
#[derive(Debug)]
pub struct UserRegistration {
    /// Validated login name.
    pub username: Username,
    /// Display name.
    pub name: Option<String>,
    /// Validated plaintext password.
    pub password: Password,
}

impl UserRegistration {
    /// Validate a draft; absent fields count as empty.
    ///
    /// # Examples
    /// ```
    /// use bloglist::domain::{UserDraft, UserRegistration};
    ///
    /// let draft = UserDraft {
    ///     username: Some("as".into()),
    ///     password: Some("shalalala".to_owned().into()),
    ///     ..UserDraft::default()
    /// };
    /// assert!(UserRegistration::try_from_draft(draft).is_err());
    /// ```
    pub fn try_from_draft(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            username,
            name,
            password,
        } = draft;
        let username = Username::new(username.unwrap_or_default())?;
        let password = Password::new(
            password
                .as_deref()
                .map(String::as_str)
                .unwrap_or_default(),
        )?;
        Ok(Self {
            username,
            name,
            password,
        })
    }
}

/// A stored user document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    name: Option<String>,
    password_hash: PasswordHash,
    blogs: Vec<BlogId>,
}

impl User {
    /// Build a newly registered user with no blogs.
    pub fn register(
        id: UserId,
        username: Username,
        name: Option<String>,
        password_hash: PasswordHash,
    ) -> Self {
        Self::from_parts(id, username, name, password_hash, Vec::new())
    }

    /// Rebuild a user read back from the store.
    pub fn from_parts(
        id: UserId,
        username: Username,
        name: Option<String>,
        password_hash: PasswordHash,
        blogs: Vec<BlogId>,
    ) -> Self {
        Self {
            id,
            username,
            name,
            password_hash,
            blogs,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name, if given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Stored Argon2 hash; never serialised.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Blog identifiers in creation order.
    pub fn blogs(&self) -> &[BlogId] {
        &self.blogs
    }

    /// Append a blog to the back-reference list, ignoring duplicates.
    pub fn push_blog(&mut self, blog: BlogId) {
        if !self.blogs.contains(&blog) {
            self.blogs.push(blog);
        }
    }

    /// Remove a blog from the back-reference list.
    pub fn remove_blog(&mut self, blog: BlogId) {
        self.blogs.retain(|existing| *existing != blog);
    }
}

/// The `{id, title, author, url}` projection of a user's blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSummary {
    /// Blog identifier.
    pub id: BlogId,
    /// Blog headline.
    pub title: String,
    /// Blog author.
    pub author: String,
    /// Blog link.
    pub url: Option<String>,
}

/// A user with its blogs expanded to [`BlogSummary`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithBlogs {
    /// The user itself.
    pub user: User,
    /// Owned blogs in creation order.
    pub blogs: Vec<BlogSummary>,
}
