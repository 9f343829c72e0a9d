//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the blog and user repository ports backed by
//! PostgreSQL through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation and owner checks live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic back-references**: blog inserts and deletes update the owner's
//!   `blog_ids` array inside the same transaction.
//!
//! # Example
//!
//! ```no_run
//! use bloglist::outbound::persistence::{DbPool, DieselBlogRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bloglist")).await?;
//! let blogs = DieselBlogRepository::new(pool);
//! # let _ = blogs;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_blog_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blog_repository::DieselBlogRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
