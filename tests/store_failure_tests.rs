mod common;

use ::serde_json::json;

use common::helpers::TestSetup;
use verses::error::ServiceError;
use verses::model::ContentType;

#[tokio::test]
async fn test_failed_reads_come_back_empty() {
    let (setup, failing) = TestSetup::with_failing_store();
    let author = setup.register("emily").await;
    let poem = setup.publish(&author, "Hope", "h", ContentType::Poetry).await;
    setup.repository.toggle_save(&poem.id, &author.user_id).await.unwrap();

    failing.fail_lists(true);
    failing.fail_gets(true);

    assert!(setup.repository.list_by_type(ContentType::Poetry).await.is_empty());
    assert!(setup.repository.list_latest(10).await.is_empty());
    assert!(setup.repository.list_related(&poem.id, ContentType::Poetry, 3).await.is_empty());
    assert!(setup.repository.list_comments(&poem.id).await.is_empty());
    assert!(setup.repository.list_saved(&author.user_id).await.is_empty());
    assert!(!setup.repository.is_saved(&poem.id, &author.user_id).await);
    assert!(setup
        .repository
        .get_by_slug(ContentType::Poetry, &poem.id)
        .await
        .is_none());
    assert!(setup.repository.like_state(&poem.id, None).await.is_none());
    assert!(setup.repository.get_profile_by_username("emily").await.is_none());

    failing.fail_lists(false);
    failing.fail_gets(false);

    assert_eq!(setup.repository.list_by_type(ContentType::Poetry).await.len(), 1);
    assert!(setup
        .repository
        .get_by_slug(ContentType::Poetry, &poem.id)
        .await
        .is_some());
}

#[tokio::test]
async fn test_failed_mutation_is_an_error() {
    let (setup, failing) = TestSetup::with_failing_store();
    let author = setup.register("emily").await;
    let poem = setup.publish(&author, "Hope", "h", ContentType::Poetry).await;

    failing.fail_updates(true);

    let result = setup.repository.like(&poem.id, "u1").await;
    assert!(matches!(result, Err(ServiceError::Store(_))));
    assert_eq!(setup.content_document(&poem.id).await["likes"], json!(0));
}

#[tokio::test]
async fn test_comment_survives_failed_count_refresh() {
    let (setup, failing) = TestSetup::with_failing_store();
    let author = setup.register("emily").await;
    let poem = setup.publish(&author, "Hope", "h", ContentType::Poetry).await;

    failing.fail_updates(true);

    let comment = setup
        .repository
        .create_comment(&poem.id, &author.user_id, &author.username, "Lovely")
        .await
        .unwrap();
    assert_eq!(comment.body, "Lovely");
    assert_eq!(setup.content_document(&poem.id).await["commentCount"], json!(0));
    assert_eq!(setup.repository.list_comments(&poem.id).await.len(), 1);

    failing.fail_updates(false);

    setup
        .repository
        .create_comment(&poem.id, &author.user_id, &author.username, "Again")
        .await
        .unwrap();
    assert_eq!(setup.content_document(&poem.id).await["commentCount"], json!(2));
}
