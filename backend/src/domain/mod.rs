//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed blog and user entities, the ports the
//! inbound and outbound adapters meet at, and the services enforcing the
//! bloglist rules between them.
//!
//! Public surface:
//! - Error / ErrorCode: transport-neutral failure payload.
//! - BlogId / UserId: store-assigned identifiers with explicit parsing.
//! - Blog / BlogContent / BlogDraft: blog documents and their validation.
//! - User / UserRegistration / UserDraft: users and registration rules.
//! - BlogService / UserService: implementations of the driving ports.

pub mod blog;
pub mod blog_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::blog::{
    Blog, BlogContent, BlogDraft, BlogValidationError, BlogWithOwner, OwnerSummary,
};
pub use self::blog_service::{BlogService, CONTENT_MISSING_MESSAGE, UNKNOWN_OWNER_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{BlogId, MalformedIdError, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    BlogSummary, PASSWORD_MIN, Password, PasswordHash, USERNAME_MIN, User, UserDraft,
    UserRegistration, UserValidationError, UserWithBlogs, Username,
};
pub use self::user_service::{DUPLICATE_USERNAME_MESSAGE, MALFORMED_USER_MESSAGE, UserService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bloglist::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such blog"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
