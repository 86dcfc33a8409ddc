mod common;

use common::helpers::TestSetup;
use verses::error::ServiceError;
use verses::model::{ContentType, Visibility};
use verses::repository::blog::BlogPostUpdate;

#[tokio::test]
async fn test_private_posts_only_reach_their_owner() {
    let setup = TestSetup::new();
    let owner = setup.register("emily").await;

    let public = setup
        .repository
        .create_blog_post("Open", "for all", &owner.user_id, "emily", Visibility::Public)
        .await
        .unwrap();
    let private = setup
        .repository
        .create_blog_post("Closed", "for me", &owner.user_id, "emily", Visibility::Private)
        .await
        .unwrap();

    let visitor_view = setup
        .repository
        .list_blog_posts_by_user(&owner.user_id, false)
        .await;
    assert_eq!(visitor_view.len(), 1);
    assert_eq!(visitor_view[0].id, public.id);
    assert!(visitor_view
        .iter()
        .all(|post| post.visibility == Some(Visibility::Public)));

    let owner_view = setup
        .repository
        .list_blog_posts_by_user(&owner.user_id, true)
        .await;
    assert_eq!(owner_view.len(), 2);

    assert!(setup
        .repository
        .get_blog_post_for_viewer(&private.id, None)
        .await
        .is_none());
    assert!(setup
        .repository
        .get_blog_post_for_viewer(&private.id, Some("someone-else"))
        .await
        .is_none());
    assert!(setup
        .repository
        .get_blog_post_for_viewer(&private.id, Some(owner.user_id.as_str()))
        .await
        .is_some());

    // the single-post lookup ignores visibility
    assert!(setup.repository.get_blog_post(&private.id).await.is_some());

    assert!(setup
        .repository
        .get_by_slug(ContentType::Blog, &private.id)
        .await
        .is_none());
    assert!(setup
        .repository
        .get_by_slug(ContentType::Blog, &public.id)
        .await
        .is_some());

    let listed = setup.repository.list_by_type(ContentType::Blog).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, public.id);
}

#[tokio::test]
async fn test_owner_can_edit_post() {
    let setup = TestSetup::new();
    let owner = setup.register("emily").await;

    let post = setup
        .repository
        .create_blog_post("Draft", "words", &owner.user_id, "emily", Visibility::Private)
        .await
        .unwrap();

    let updated = setup
        .repository
        .update_blog_post(
            &post.id,
            &owner.user_id,
            BlogPostUpdate {
                title: Some("Final".to_string()),
                body: None,
                visibility: Some(Visibility::Public),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.body, "words");
    assert_eq!(updated.visibility, Some(Visibility::Public));
    assert!(setup
        .repository
        .get_blog_post_for_viewer(&post.id, None)
        .await
        .is_some());
}

#[tokio::test]
async fn test_only_owner_can_edit() {
    let setup = TestSetup::new();
    let owner = setup.register("emily").await;

    let post = setup
        .repository
        .create_blog_post("Mine", "words", &owner.user_id, "emily", Visibility::Public)
        .await
        .unwrap();

    let result = setup
        .repository
        .update_blog_post(
            &post.id,
            "intruder",
            BlogPostUpdate {
                title: Some("Theirs".to_string()),
                ..BlogPostUpdate::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let result = setup
        .repository
        .update_blog_post("missing", &owner.user_id, BlogPostUpdate::default())
        .await;
    assert!(matches!(result, Err(ServiceError::NotFound)));

    let unchanged = setup.repository.get_blog_post(&post.id).await.unwrap();
    assert_eq!(unchanged.title, "Mine");
}

#[tokio::test]
async fn test_blank_blog_post_is_rejected() {
    let setup = TestSetup::new();

    let result = setup
        .repository
        .create_blog_post("", "words", "u1", "emily", Visibility::Public)
        .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
}
