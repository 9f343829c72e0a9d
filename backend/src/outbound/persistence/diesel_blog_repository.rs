//! PostgreSQL-backed `BlogRepository` implementation using Diesel ORM.
//!
//! Creating or deleting an owned blog touches two tables: the `blogs` row
//! and the owner's `blog_ids` array. Both writes share one transaction so a
//! failure leaves neither behind.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{BlogRepository, BlogRepositoryError};
use crate::domain::{
    Blog, BlogContent, BlogDraft, BlogId, BlogWithOwner, OwnerSummary, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BlogContentUpdate, BlogRow, NewBlogRow, OwnerColumns};
use super::pool::{DbPool, PoolError};
use super::schema::{blogs, users};

diesel::define_sql_function! {
    /// PostgreSQL `array_append`.
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

diesel::define_sql_function! {
    /// PostgreSQL `array_remove`.
    fn array_remove(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

/// Diesel-backed implementation of the blog repository port.
#[derive(Clone)]
pub struct DieselBlogRepository {
    pool: DbPool,
}

impl DieselBlogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the insert transaction.
enum InsertFailure {
    MissingOwner(Uuid),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for InsertFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> BlogRepositoryError {
    map_basic_pool_error(error, BlogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BlogRepositoryError {
    map_basic_diesel_error(
        error,
        BlogRepositoryError::query,
        BlogRepositoryError::connection,
    )
}

fn row_to_blog(row: BlogRow) -> Result<Blog, BlogRepositoryError> {
    let BlogRow {
        id,
        title,
        author,
        url,
        likes,
        user_id,
    } = row;
    let content = BlogContent::try_from_draft(BlogDraft {
        title: Some(title),
        author: Some(author),
        url,
        likes: Some(likes),
    })
    .map_err(|err| BlogRepositoryError::query(format!("stored blog invalid: {err}")))?;

    Ok(Blog::new(
        BlogId::from_uuid(id),
        content,
        user_id.map(UserId::from_uuid),
    ))
}

fn row_to_blog_with_owner(
    (row, owner): (BlogRow, Option<OwnerColumns>),
) -> Result<BlogWithOwner, BlogRepositoryError> {
    let blog = row_to_blog(row)?;
    let owner = owner.map(|(id, username, name)| OwnerSummary {
        id: UserId::from_uuid(id),
        username,
        name,
    });
    Ok(BlogWithOwner { blog, owner })
}

#[async_trait]
impl BlogRepository for DieselBlogRepository {
    async fn list_with_owners(&self) -> Result<Vec<BlogWithOwner>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(BlogRow, Option<OwnerColumns>)> = blogs::table
            .left_join(users::table)
            .order((blogs::created_at.asc(), blogs::id.asc()))
            .select((
                BlogRow::as_select(),
                (users::id, users::username, users::name).nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_blog_with_owner).collect()
    }

    async fn find_with_owner(
        &self,
        id: &BlogId,
    ) -> Result<Option<BlogWithOwner>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(BlogRow, Option<OwnerColumns>)> = blogs::table
            .left_join(users::table)
            .filter(blogs::id.eq(id.as_uuid()))
            .select((
                BlogRow::as_select(),
                (users::id, users::username, users::name).nullable(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_blog_with_owner).transpose()
    }

    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let content = blog.content();
        let blog_uuid = *blog.id().as_uuid();
        let owner = blog.user().map(|id| *id.as_uuid());
        let new_row = NewBlogRow {
            id: blog_uuid,
            title: content.title(),
            author: content.author(),
            url: content.url(),
            likes: content.likes(),
            user_id: owner,
        };

        conn.transaction(|conn| {
            async move {
                // Append first: an absent owner aborts before the blog row exists.
                if let Some(owner) = owner {
                    let updated = diesel::update(users::table.find(owner))
                        .set((
                            users::blog_ids.eq(array_append(users::blog_ids, blog_uuid)),
                            users::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(InsertFailure::MissingOwner(owner));
                    }
                }

                diesel::insert_into(blogs::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|failure| match failure {
            InsertFailure::MissingOwner(owner) => {
                debug!(%owner, "owner missing during blog insert");
                BlogRepositoryError::missing_owner(owner.to_string())
            }
            InsertFailure::Diesel(err) => map_diesel_error(err),
        })
    }

    async fn replace_content(
        &self,
        id: &BlogId,
        content: &BlogContent,
    ) -> Result<Option<Blog>, BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = BlogContentUpdate {
            title: content.title(),
            author: content.author(),
            url: content.url(),
            likes: content.likes(),
            updated_at: Utc::now(),
        };

        let row = diesel::update(blogs::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(BlogRow::as_returning())
            .get_result::<BlogRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_blog).transpose()
    }

    async fn delete(&self, id: &BlogId) -> Result<(), BlogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let blog_uuid = *id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let removed: Option<Option<Uuid>> = diesel::delete(blogs::table.find(blog_uuid))
                    .returning(blogs::user_id)
                    .get_result(conn)
                    .await
                    .optional()?;

                if let Some(Some(owner)) = removed {
                    diesel::update(users::table.find(owner))
                        .set((
                            users::blog_ids.eq(array_remove(users::blog_ids, blog_uuid)),
                            users::updated_at.eq(Utc::now()),
                        ))
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; SQL behaviour lives in the integration suite.
    use super::*;
    use rstest::rstest;

    fn blog_row(title: &str, user_id: Option<Uuid>) -> BlogRow {
        BlogRow {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            author: "Robert C. Martin".to_owned(),
            url: None,
            likes: 2,
            user_id,
        }
    }

    #[rstest]
    fn owner_columns_become_summary() {
        let owner = Uuid::new_v4();
        let converted = row_to_blog_with_owner((
            blog_row("TDD harms architecture", Some(owner)),
            Some((owner, "root".to_owned(), None)),
        ))
        .expect("valid row");

        let summary = converted.owner.expect("owner projected");
        assert_eq!(*summary.id.as_uuid(), owner);
        assert_eq!(summary.username, "root");
        assert_eq!(converted.blog.user().map(|id| *id.as_uuid()), Some(owner));
    }

    #[rstest]
    fn dangling_owner_keeps_reference_without_summary() {
        let owner = Uuid::new_v4();
        let converted =
            row_to_blog_with_owner((blog_row("Type wars", Some(owner)), None)).expect("valid row");

        assert!(converted.owner.is_none());
        assert!(converted.blog.user().is_some());
    }

    #[rstest]
    fn empty_title_in_store_is_a_query_error() {
        let err = row_to_blog(blog_row("", None)).expect_err("invalid row");
        assert!(matches!(err, BlogRepositoryError::Query { .. }));
    }
}
