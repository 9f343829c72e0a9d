//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`BlogsCommand`, `BlogsQuery`, `UsersCommand`,
//! `UsersQuery`) are called by inbound adapters. Driven ports
//! (`BlogRepository`, `UserRepository`, `PasswordHasher`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod blog_repository;
mod blogs_command;
mod blogs_query;
mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use blog_repository::MockBlogRepository;
pub use blog_repository::{BlogRepository, BlogRepositoryError};
#[cfg(test)]
pub use blogs_command::MockBlogsCommand;
pub use blogs_command::{BlogsCommand, CreateBlogRequest, UpdateBlogRequest};
#[cfg(test)]
pub use blogs_query::MockBlogsQuery;
pub use blogs_query::BlogsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
