//! HTTP inbound adapter exposing the blog list REST endpoints.

pub mod blogs;
pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
