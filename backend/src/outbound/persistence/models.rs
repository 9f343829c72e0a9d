//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blogs, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub blog_ids: Vec<Uuid>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: Option<&'a str>,
    pub password_hash: &'a str,
    pub blog_ids: &'a [Uuid],
}

/// Owner columns projected alongside a blog through the left join.
pub(crate) type OwnerColumns = (Uuid, String, Option<String>);

// ---------------------------------------------------------------------------
// Blog models
// ---------------------------------------------------------------------------

/// Row struct for reading from the blogs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    pub likes: i64,
    pub user_id: Option<Uuid>,
}

/// Insertable struct for creating new blog records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blogs)]
pub(crate) struct NewBlogRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub url: Option<&'a str>,
    pub likes: i64,
    pub user_id: Option<Uuid>,
}

/// Full replacement of the mutable blog columns.
///
/// `url: None` must clear the column, so `None` is written as `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = blogs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BlogContentUpdate<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub url: Option<&'a str>,
    pub likes: i64,
    pub updated_at: DateTime<Utc>,
}

/// Summary columns for the blogs listed under a user.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blogs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlogSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
}
