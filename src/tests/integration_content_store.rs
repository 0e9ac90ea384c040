use crate::domain::PageFilter;
use crate::error::CmsError;
use crate::services::ContentRecordStore;
use crate::tests::mocks::{MockPageRepository, content};

fn store() -> (ContentRecordStore, MockPageRepository) {
    let repo = MockPageRepository::new();
    (ContentRecordStore::new(Box::new(repo.clone())), repo)
}

// what goes in through create comes back out through get_by_path
#[tokio::test]
async fn test_create_then_get_by_path_round_trip() {
    let (store, _) = store();
    let page_content = content(&[("title", "A"), ("body", "B")]);

    let id = store
        .create("blog/post-1", "article", page_content.clone())
        .await
        .unwrap();

    let page = store.get_by_path("blog/post-1").await.unwrap();
    assert_eq!(page.id, id);
    assert_eq!(page.template, "article");
    assert_eq!(page.content, page_content);
    assert_eq!(page.created_at, page.modified_at);
}

#[tokio::test]
async fn test_paths_are_normalized() {
    let (store, _) = store();
    store
        .create("/about/", "article", content(&[]))
        .await
        .unwrap();

    assert_eq!(store.get_by_path("about").await.unwrap().path, "about");
    assert!(store.get_by_path("/about").await.is_ok());
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (store, _) = store();

    assert!(matches!(
        store.get_by_path("nowhere").await,
        Err(CmsError::NotFound(_))
    ));
    assert!(matches!(store.get("ghost").await, Err(CmsError::NotFound(_))));
}

// update swaps the whole mapping, it does not merge
#[tokio::test]
async fn test_update_replaces_content() {
    let (store, _) = store();
    let id = store
        .create("about", "article", content(&[("title", "A"), ("body", "B")]))
        .await
        .unwrap();
    let before = store.get(&id).await.unwrap();

    store
        .update(&id, content(&[("body", "C")]))
        .await
        .unwrap();

    let after = store.get(&id).await.unwrap();
    assert_eq!(after.content, content(&[("body", "C")]));
    assert!(after.modified_at >= before.modified_at);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (store, _) = store();
    let result = store.update("ghost", content(&[("body", "C")])).await;
    assert!(matches!(result, Err(CmsError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_then_missing() {
    let (store, _) = store();
    let id = store.create("about", "article", content(&[])).await.unwrap();

    store.delete(&id).await.unwrap();
    assert!(matches!(store.get(&id).await, Err(CmsError::NotFound(_))));
    assert!(matches!(store.delete(&id).await, Err(CmsError::NotFound(_))));
}

// a second page on the same path is accepted; lookups keep returning the oldest
#[tokio::test]
async fn test_duplicate_paths_allowed_oldest_wins() {
    let (store, repo) = store();
    repo.seed("old", "dup", "article", content(&[("v", "1")]), "2023-01-01 00:00:00");

    let new_id = store
        .create("dup", "article", content(&[("v", "2")]))
        .await
        .unwrap();

    assert_eq!(repo.pages.lock().unwrap().len(), 2);
    let found = store.get_by_path("dup").await.unwrap();
    assert_eq!(found.id, "old");
    assert!(store.get(&new_id).await.is_ok());
}

#[tokio::test]
async fn test_create_requires_template() {
    let (store, _) = store();
    let result = store.create("about", "  ", content(&[])).await;
    assert!(matches!(result, Err(CmsError::BadRequest(_))));
}

#[tokio::test]
async fn test_list_filters_newest_first() {
    let (store, repo) = store();
    repo.seed("a", "blog/one", "post", content(&[]), "2023-01-01 00:00:00");
    repo.seed("b", "blog/two", "post", content(&[]), "2023-02-01 00:00:00");
    repo.seed("c", "about", "article", content(&[]), "2023-03-01 00:00:00");

    let blog = store
        .list(&PageFilter {
            template: Some("post".into()),
            prefix: Some("/blog/".into()),
        })
        .await
        .unwrap();
    let ids: Vec<&str> = blog.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    // blank filters are ignored
    let all = store
        .list(&PageFilter {
            template: Some("".into()),
            prefix: Some("".into()),
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}
