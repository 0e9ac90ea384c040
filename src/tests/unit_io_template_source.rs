use crate::io::local::LocalTemplateSource;
use crate::io::{TemplateSource, verify_template_name};
use std::fs;

#[test]
fn test_template_name_jailbreak_prevention() {
    assert!(verify_template_name("article").is_ok());
    assert!(verify_template_name("blog/post").is_ok());

    assert!(verify_template_name("").is_err());
    assert!(verify_template_name("../secrets").is_err());
    assert!(verify_template_name("blog/../../secrets").is_err());
    assert!(verify_template_name("/etc/passwd").is_err());
    assert!(verify_template_name("..\\windows").is_err());
}

#[tokio::test]
async fn test_local_source_load_and_list() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("article.html"), "<h1>{{ title }}</h1>").unwrap();
    fs::create_dir(dir.path().join("blog")).unwrap();
    fs::write(dir.path().join("blog/post.html"), "{{ body }}").unwrap();
    // not a template
    fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

    let source = LocalTemplateSource::new(dir.path().to_path_buf());

    let article = source.load("article").await.unwrap();
    assert_eq!(article.as_deref(), Some("<h1>{{ title }}</h1>"));

    let nested = source.load("blog/post").await.unwrap();
    assert_eq!(nested.as_deref(), Some("{{ body }}"));

    assert_eq!(source.list().await.unwrap(), vec!["article", "blog/post"]);
}

#[tokio::test]
async fn test_local_source_missing_and_escaping_names() {
    let dir = tempfile::tempdir().unwrap();
    let source = LocalTemplateSource::new(dir.path().join("templates"));
    fs::create_dir(dir.path().join("templates")).unwrap();
    fs::write(dir.path().join("outside.html"), "secret").unwrap();

    assert_eq!(source.load("missing").await.unwrap(), None);
    assert_eq!(source.load("../outside").await.unwrap(), None);
}
