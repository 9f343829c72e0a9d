//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every blog, user and health endpoint together with
//! the request and response schemas. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::blogs::{
    BlogRequestBody, BlogResponse, BlogWithOwnerResponse, OwnerResponse,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::{
    BlogSummaryResponse, CreateUserRequest, UserResponse, UserWithBlogsResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bloglist API",
        description = "Blog bookmarks with likes, owned by registered users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::blogs::list_blogs,
        crate::inbound::http::blogs::get_blog,
        crate::inbound::http::blogs::create_blog,
        crate::inbound::http::blogs::update_blog,
        crate::inbound::http::blogs::delete_blog,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BlogRequestBody,
        BlogResponse,
        BlogWithOwnerResponse,
        OwnerResponse,
        CreateUserRequest,
        UserResponse,
        UserWithBlogsResponse,
        BlogSummaryResponse,
        ErrorBody
    )),
    tags(
        (name = "blogs", description = "Blog bookmarks"),
        (name = "users", description = "User registration and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
