//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"mluukkai","name":"Matti Luukkainen","password":"salainen"}
//! GET  /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{BlogSummary, User, UserDraft, UserWithBlogs};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/users`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "mluukkai")]
    pub username: Option<String>,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    #[schema(example = "salainen")]
    pub password: Option<String>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            username: value.username,
            name: value.name,
            password: value.password.map(Zeroizing::new),
        }
    }
}

/// User as returned by registration: `blogs` holds blog ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub blogs: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().map(str::to_owned),
            blogs: user.blogs().iter().map(ToString::to_string).collect(),
        }
    }
}

/// The `{id, title, author, url}` projection of a user's blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogSummaryResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
}

impl From<BlogSummary> for BlogSummaryResponse {
    fn from(value: BlogSummary) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            author: value.author,
            url: value.url,
        }
    }
}

/// User as returned by the listing: `blogs` is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserWithBlogsResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummaryResponse>,
}

impl From<UserWithBlogs> for UserWithBlogsResponse {
    fn from(value: UserWithBlogs) -> Self {
        let UserWithBlogs { user, blogs } = value;
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            name: user.name().map(str::to_owned),
            blogs: blogs.into_iter().map(BlogSummaryResponse::from).collect(),
        }
    }
}

/// Register a user.
///
/// The password is hashed before storage and never echoed back.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed user or duplicate username", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .create_user(UserDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// List users with their blogs expanded.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bloglist::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserWithBlogsResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserWithBlogsResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(
        users.into_iter().map(UserWithBlogsResponse::from).collect(),
    ))
}
