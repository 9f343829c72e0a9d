//! Tests for the blog service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockBlogRepository, MockUserRepository, UserRepositoryError};
use crate::domain::{ErrorCode, OwnerSummary, PasswordHash, User, UserId, Username};

fn draft(title: Option<&str>, author: Option<&str>, likes: Option<i64>) -> BlogDraft {
    BlogDraft {
        title: title.map(str::to_owned),
        author: author.map(str::to_owned),
        url: Some("https://reactpatterns.com/".to_owned()),
        likes,
    }
}

fn valid_draft() -> BlogDraft {
    draft(Some("React patterns"), Some("Michael Chan"), Some(7))
}

fn stored_user(id: UserId) -> User {
    User::register(
        id,
        Username::new("mluukkai").expect("valid username"),
        Some("Matti Luukkainen".to_owned()),
        PasswordHash::new("$argon2id$v=19$stub"),
    )
}

fn service(
    blogs: MockBlogRepository,
    users: MockUserRepository,
) -> BlogService<MockBlogRepository, MockUserRepository> {
    BlogService::new(Arc::new(blogs), Arc::new(users))
}

#[tokio::test]
async fn create_blog_without_owner_skips_user_lookup() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_insert()
        .withf(|blog| blog.user().is_none() && blog.content().likes() == 7)
        .times(1)
        .return_once(|_| Ok(()));
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);

    let blog = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(blog.content().title(), "React patterns");
    assert!(blog.user().is_none());
}

#[tokio::test]
async fn create_blog_defaults_likes_to_zero() {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(1).return_once(|_| Ok(()));

    let blog = service(blogs, MockUserRepository::new())
        .create_blog(CreateBlogRequest {
            draft: draft(Some("Type wars"), Some("Robert C. Martin"), None),
            owner: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(blog.content().likes(), 0);
}

#[tokio::test]
async fn create_blog_with_known_owner_records_owner() {
    let owner = UserId::random();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |id| Ok(Some(stored_user(*id))));
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_insert()
        .withf(move |blog| blog.user() == Some(owner))
        .times(1)
        .return_once(|_| Ok(()));

    let blog = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: Some(owner.to_string()),
        })
        .await
        .expect("create succeeds");

    assert_eq!(blog.user(), Some(owner));
}

#[tokio::test]
async fn create_blog_with_unknown_owner_is_rejected() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);

    let error = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: Some(UserId::random().to_string()),
        })
        .await
        .expect_err("unknown owner");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), UNKNOWN_OWNER_MESSAGE);
}

#[rstest]
#[case("panko")]
#[case("")]
#[tokio::test]
async fn create_blog_treats_malformed_owner_as_unknown(#[case] raw: &'static str) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);

    let error = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: Some(raw.to_owned()),
        })
        .await
        .expect_err("malformed owner");

    assert_eq!(error.message(), UNKNOWN_OWNER_MESSAGE);
}

#[tokio::test]
async fn create_blog_maps_vanished_owner_to_invalid_request() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(stored_user(*id))));
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_insert()
        .return_once(|blog| Err(BlogRepositoryError::missing_owner(format!("{:?}", blog.user()))));

    let error = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: Some(UserId::random().to_string()),
        })
        .await
        .expect_err("owner vanished");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), UNKNOWN_OWNER_MESSAGE);
}

#[rstest]
#[case(None, Some("Examplifly"))]
#[case(Some("Ipsum Lorem"), None)]
#[case(Some(""), Some("Examplifly"))]
#[tokio::test]
async fn create_blog_rejects_missing_content_before_any_lookup(
    #[case] title: Option<&'static str>,
    #[case] author: Option<&'static str>,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);

    let error = service(blogs, users)
        .create_blog(CreateBlogRequest {
            draft: draft(title, author, Some(30)),
            owner: Some(UserId::random().to_string()),
        })
        .await
        .expect_err("content missing");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), CONTENT_MISSING_MESSAGE);
}

#[tokio::test]
async fn create_blog_maps_user_connection_error_to_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserRepositoryError::connection("pool exhausted")));

    let error = service(MockBlogRepository::new(), users)
        .create_blog(CreateBlogRequest {
            draft: valid_draft(),
            owner: Some(UserId::random().to_string()),
        })
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn update_blog_returns_replaced_document() {
    let id = BlogId::random();
    let owner = UserId::random();
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_replace_content()
        .withf(move |candidate, content| *candidate == id && content.likes() == 0)
        .times(1)
        .return_once(move |id, content| Ok(Some(Blog::new(*id, content.clone(), Some(owner)))));

    let updated = service(blogs, MockUserRepository::new())
        .update_blog(UpdateBlogRequest {
            id,
            draft: draft(Some("Go To Statement"), Some("Edsger W. Dijkstra"), None),
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.id(), id);
    assert_eq!(updated.user(), Some(owner));
    assert_eq!(updated.content().likes(), 0);
}

#[tokio::test]
async fn update_blog_reports_missing_blog_as_not_found() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_replace_content()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(blogs, MockUserRepository::new())
        .update_blog(UpdateBlogRequest {
            id: BlogId::random(),
            draft: valid_draft(),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_blog_validates_before_lookup() {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_replace_content().times(0);

    let error = service(blogs, MockUserRepository::new())
        .update_blog(UpdateBlogRequest {
            id: BlogId::random(),
            draft: draft(Some("t"), None, None),
        })
        .await
        .expect_err("content missing");

    assert_eq!(error.message(), CONTENT_MISSING_MESSAGE);
}

#[tokio::test]
async fn delete_blog_maps_query_error_to_internal() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_delete()
        .times(1)
        .return_once(|_| Err(BlogRepositoryError::query("deadlock detected")));

    let error = service(blogs, MockUserRepository::new())
        .delete_blog(BlogId::random())
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn delete_blog_succeeds_for_absent_id() {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_delete().times(1).return_once(|_| Ok(()));

    service(blogs, MockUserRepository::new())
        .delete_blog(BlogId::random())
        .await
        .expect("delete is idempotent");
}

#[tokio::test]
async fn get_blog_returns_projected_owner() {
    let id = BlogId::random();
    let owner = UserId::random();
    let mut blogs = MockBlogRepository::new();
    blogs.expect_find_with_owner().times(1).return_once(move |id| {
        let content = BlogContent::try_from_draft(valid_draft()).expect("valid");
        Ok(Some(BlogWithOwner {
            blog: Blog::new(*id, content, Some(owner)),
            owner: Some(OwnerSummary {
                id: owner,
                username: "mluukkai".to_owned(),
                name: None,
            }),
        }))
    });

    let found = service(blogs, MockUserRepository::new())
        .get_blog(id)
        .await
        .expect("blog found");

    assert_eq!(found.blog.id(), id);
    assert_eq!(found.owner.map(|o| o.username).as_deref(), Some("mluukkai"));
}

#[tokio::test]
async fn get_blog_reports_absent_blog_as_not_found() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_find_with_owner()
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(blogs, MockUserRepository::new())
        .get_blog(BlogId::random())
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_blogs_passes_through_repository_order() {
    let first = BlogId::random();
    let second = BlogId::random();
    let mut blogs = MockBlogRepository::new();
    blogs.expect_list_with_owners().times(1).return_once(move || {
        let content = BlogContent::try_from_draft(valid_draft()).expect("valid");
        Ok(vec![
            BlogWithOwner {
                blog: Blog::new(first, content.clone(), None),
                owner: None,
            },
            BlogWithOwner {
                blog: Blog::new(second, content, None),
                owner: None,
            },
        ])
    });

    let listed = service(blogs, MockUserRepository::new())
        .list_blogs()
        .await
        .expect("list succeeds");

    let ids: Vec<_> = listed.iter().map(|entry| entry.blog.id()).collect();
    assert_eq!(ids, vec![first, second]);
}
