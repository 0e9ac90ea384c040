use crate::domain::{MediaBlob, Page};
use crate::features::media::model::{DbMedia, UploadResponse};
use crate::features::pages::model::{DbPage, JsonPage};
use crate::services::media::media_ref;
use crate::tests::mocks::{content, timestamp};
use serde_json::json;

// create a page for the purposes of testing
fn create_test_page() -> Page {
    let mut page_content = content(&[("title", "Hello")]);
    page_content.insert("tags".into(), json!(["rust", "api"]));

    Page {
        id: "page-1".to_string(),
        path: "blog/hello".to_string(),
        template: "article".to_string(),
        content: page_content,
        created_at: timestamp("2023-01-01 10:00:00"),
        modified_at: timestamp("2023-01-01 12:00:00"),
    }
}

// Page -> DbPage keeps nested values by storing content as a JSON string
#[test]
fn test_page_to_db_page_serialization() {
    let page = create_test_page();
    let db_page = DbPage::try_from(&page).unwrap();

    assert_eq!(db_page.id, "page-1");
    let stored: serde_json::Value = serde_json::from_str(&db_page.content).unwrap();
    assert_eq!(stored, json!({ "title": "Hello", "tags": ["rust", "api"] }));
}

#[test]
fn test_db_page_round_trip() {
    let page = create_test_page();
    let restored = Page::try_from(DbPage::try_from(&page).unwrap()).unwrap();
    assert_eq!(restored, page);
}

#[test]
fn test_db_page_empty_content_column() {
    let db_page = DbPage {
        id: "p".into(),
        path: "x".into(),
        template: "t".into(),
        content: "".into(),
        created_at: timestamp("2023-01-01 10:00:00"),
        modified_at: timestamp("2023-01-01 10:00:00"),
    };
    let page = Page::try_from(db_page).unwrap();
    assert!(page.content.is_empty());
}

// content that is not a JSON object cannot become a page
#[test]
fn test_db_page_malformed_content() {
    let db_page = DbPage {
        id: "p".into(),
        path: "x".into(),
        template: "t".into(),
        content: "[1, 2]".into(),
        created_at: timestamp("2023-01-01 10:00:00"),
        modified_at: timestamp("2023-01-01 10:00:00"),
    };
    assert!(Page::try_from(db_page).is_err());
}

#[test]
fn test_json_page_formats_datetimes() {
    let json_page = JsonPage::from(&create_test_page());
    assert_eq!(json_page.created_at, "2023-01-01 10:00:00");
    assert_eq!(json_page.modified_at, "2023-01-01 12:00:00");
}

#[test]
fn test_media_blob_db_conversion() {
    let blob = MediaBlob {
        filename: "a.png".into(),
        bytes: vec![1, 2, 3],
        content_hash: "abc".into(),
        created_at: timestamp("2023-01-01 10:00:00"),
    };
    let db_media = DbMedia::from(&blob);
    assert_eq!(db_media.size, 3);
    assert_eq!(MediaBlob::from(db_media), blob);
}

#[test]
fn test_upload_response_shapes() {
    let stored = serde_json::to_value(UploadResponse::Stored(media_ref("x.webp"))).unwrap();
    assert_eq!(
        stored,
        json!({
            "status": "stored",
            "filename": "x.webp",
            "url": "/media/x.webp",
            "content_type": "image/webp",
        })
    );

    let pending = serde_json::to_value(UploadResponse::ConflictPending {
        filename: "x.webp".into(),
    })
    .unwrap();
    assert_eq!(pending, json!({ "status": "conflict_pending", "filename": "x.webp" }));
}
