//! Blog HTTP handlers.
//!
//! ```text
//! GET    /api/blogs
//! GET    /api/blogs/{id}
//! POST   /api/blogs {"title":"React patterns","author":"Michael Chan","likes":7}
//! PUT    /api/blogs/{id}
//! DELETE /api/blogs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateBlogRequest, UpdateBlogRequest};
use crate::domain::{Blog, BlogDraft, BlogWithOwner, OwnerSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_blog_id;

/// Request payload for creating or replacing a blog.
///
/// `userId` is only honoured on creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequestBody {
    #[schema(example = "React patterns")]
    pub title: Option<String>,
    #[schema(example = "Michael Chan")]
    pub author: Option<String>,
    #[schema(example = "https://reactpatterns.com/")]
    pub url: Option<String>,
    pub likes: Option<i64>,
    #[schema(format = "uuid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl BlogRequestBody {
    fn into_parts(self) -> (BlogDraft, Option<String>) {
        let Self {
            title,
            author,
            url,
            likes,
            user_id,
        } = self;
        (
            BlogDraft {
                title,
                author,
                url,
                likes,
            },
            user_id,
        )
    }
}

/// Blog as returned by create and update: `user` is the owner's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    pub likes: i64,
    #[schema(format = "uuid")]
    pub user: Option<String>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        let content = blog.content();
        Self {
            id: blog.id().to_string(),
            title: content.title().to_owned(),
            author: content.author().to_owned(),
            url: content.url().map(str::to_owned),
            likes: content.likes(),
            user: blog.user().map(|id| id.to_string()),
        }
    }
}

/// The `{id, username, name}` projection of a blog's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnerResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<OwnerSummary> for OwnerResponse {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: owner.id.to_string(),
            username: owner.username,
            name: owner.name,
        }
    }
}

/// Blog as returned by list and get: `user` is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogWithOwnerResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    pub likes: i64,
    pub user: Option<OwnerResponse>,
}

impl From<BlogWithOwner> for BlogWithOwnerResponse {
    fn from(value: BlogWithOwner) -> Self {
        let BlogResponse {
            id,
            title,
            author,
            url,
            likes,
            user: _,
        } = BlogResponse::from(value.blog);
        Self {
            id,
            title,
            author,
            url,
            likes,
            user: value.owner.map(OwnerResponse::from),
        }
    }
}

/// List every blog with its owner expanded.
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "All blogs", body = [BlogWithOwnerResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "listBlogs"
)]
#[get("/blogs")]
pub async fn list_blogs(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<BlogWithOwnerResponse>>> {
    let blogs = state.blogs_query.list_blogs().await?;
    Ok(web::Json(
        blogs.into_iter().map(BlogWithOwnerResponse::from).collect(),
    ))
}

/// Fetch one blog with its owner expanded.
#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    responses(
        (status = 200, description = "Blog", body = BlogWithOwnerResponse),
        (status = 400, description = "Malformed identifier; empty body"),
        (status = 404, description = "No blog with this identifier; empty body"),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "getBlog"
)]
#[get("/blogs/{id}")]
pub async fn get_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BlogWithOwnerResponse>> {
    let id = parse_blog_id(&path.into_inner())?;
    let blog = state.blogs_query.get_blog(id).await?;
    Ok(web::Json(BlogWithOwnerResponse::from(blog)))
}

/// Create a blog, optionally under an existing user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bloglist::inbound::http::blogs::create_blog;
///
/// let app = App::new().service(create_blog);
/// ```
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogRequestBody,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Content missing or unknown user", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "createBlog"
)]
#[post("/blogs")]
pub async fn create_blog(
    state: web::Data<HttpState>,
    payload: web::Json<BlogRequestBody>,
) -> ApiResult<HttpResponse> {
    let (draft, owner) = payload.into_inner().into_parts();
    let blog = state
        .blogs
        .create_blog(CreateBlogRequest { draft, owner })
        .await?;
    Ok(HttpResponse::Created().json(BlogResponse::from(blog)))
}

/// Replace a blog's title, author, url and likes.
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    request_body = BlogRequestBody,
    responses(
        (status = 200, description = "Blog replaced", body = BlogResponse),
        (status = 400, description = "Content missing, or malformed identifier with empty body", body = ErrorBody),
        (status = 404, description = "No blog with this identifier; empty body"),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "updateBlog"
)]
#[put("/blogs/{id}")]
pub async fn update_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BlogRequestBody>,
) -> ApiResult<web::Json<BlogResponse>> {
    let id = parse_blog_id(&path.into_inner())?;
    let (draft, _) = payload.into_inner().into_parts();
    let blog = state
        .blogs
        .update_blog(UpdateBlogRequest { id, draft })
        .await?;
    Ok(web::Json(BlogResponse::from(blog)))
}

/// Remove a blog; succeeds whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog identifier (UUID)")),
    responses(
        (status = 204, description = "Blog removed or already absent"),
        (status = 400, description = "Malformed identifier; empty body"),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["blogs"],
    operation_id = "deleteBlog"
)]
#[delete("/blogs/{id}")]
pub async fn delete_blog(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_blog_id(&path.into_inner())?;
    state.blogs.delete_blog(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "blogs_tests.rs"]
mod tests;
