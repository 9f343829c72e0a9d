//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users carry their blog back-references in the `blog_ids` array column;
//! listing expands those ids into blog summaries with a second query.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{BlogId, BlogSummary, PasswordHash, User, UserId, UserWithBlogs, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{BlogSummaryRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{blogs, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow {
        id,
        username,
        name,
        password_hash,
        blog_ids,
    } = row;
    let username = Username::new(username)
        .map_err(|err| UserRepositoryError::query(format!("stored username invalid: {err}")))?;
    Ok(User::from_parts(
        UserId::from_uuid(id),
        username,
        name,
        PasswordHash::new(password_hash),
        blog_ids.into_iter().map(BlogId::from_uuid).collect(),
    ))
}

fn summary_from_row(row: BlogSummaryRow) -> BlogSummary {
    BlogSummary {
        id: BlogId::from_uuid(row.id),
        title: row.title,
        author: row.author,
        url: row.url,
    }
}

/// Expand each user's `blog_ids` into summaries, keeping array order and
/// skipping ids whose blog row is gone.
fn attach_blogs(
    users: Vec<User>,
    summaries: Vec<BlogSummaryRow>,
) -> Vec<UserWithBlogs> {
    let by_id: HashMap<Uuid, BlogSummary> = summaries
        .into_iter()
        .map(|row| (row.id, summary_from_row(row)))
        .collect();

    users
        .into_iter()
        .map(|user| {
            let blogs = user
                .blogs()
                .iter()
                .filter_map(|id| by_id.get(id.as_uuid()).cloned())
                .collect();
            UserWithBlogs { user, blogs }
        })
        .collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_with_blogs(&self) -> Result<Vec<UserWithBlogs>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let users = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        let referenced: Vec<Uuid> = users
            .iter()
            .flat_map(|user| user.blogs().iter().map(|id| *id.as_uuid()))
            .collect();
        let summaries: Vec<BlogSummaryRow> = if referenced.is_empty() {
            Vec::new()
        } else {
            blogs::table
                .filter(blogs::id.eq_any(referenced))
                .select(BlogSummaryRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
        };

        Ok(attach_blogs(users, summaries))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let blog_ids: Vec<Uuid> = user.blogs().iter().map(|id| *id.as_uuid()).collect();

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_str(),
            name: user.name(),
            password_hash: user.password_hash().as_str(),
            blog_ids: &blog_ids,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    debug!(username = %user.username(), "username unique constraint hit");
                    UserRepositoryError::duplicate_username(user.username().to_string())
                } else {
                    map_diesel_error(err)
                }
            })
    }
}
