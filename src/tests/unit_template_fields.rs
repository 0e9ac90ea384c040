use crate::error::CmsError;
use crate::parser::fields::{extract_fields, fields_for_template};
use crate::tests::mocks::MockTemplateSource;
use std::collections::BTreeSet;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

// repeated fields collapse, filters are stripped
#[test]
fn test_extract_fields_dedup_and_filters() {
    let fields = extract_fields("{{ title }} {{ body | markdown }} {{ title }}");
    assert_eq!(fields, set(&["title", "body"]));
}

#[test]
fn test_extract_fields_whitespace_variants() {
    let source = "{{title}}<p>{{   summary|truncate(20)  }}</p>{{- footer -}}";
    assert_eq!(extract_fields(source), set(&["title", "summary", "footer"]));
}

#[test]
fn test_extract_fields_ignores_blocks_and_plain_text() {
    let source = "{% if title %}<h1>{{ title }}</h1>{% endif %} plain { braces } and {{ }}";
    assert_eq!(extract_fields(source), set(&["title"]));
}

#[test]
fn test_extract_fields_empty_template() {
    assert!(extract_fields("<html></html>").is_empty());
}

// calling twice gives the same answer
#[test]
fn test_extract_fields_is_idempotent() {
    let source = "{{ a }}{{ b | upper }}";
    assert_eq!(extract_fields(source), extract_fields(source));
}

#[tokio::test]
async fn test_fields_for_template_found() {
    let templates = MockTemplateSource::new();
    templates.add_template("article", "<h1>{{ title }}</h1>{{ body | markdown }}");

    let fields = fields_for_template(&templates, "article").await.unwrap();
    assert_eq!(fields, set(&["title", "body"]));
}

#[tokio::test]
async fn test_fields_for_template_missing_is_not_found() {
    let templates = MockTemplateSource::new();

    let result = fields_for_template(&templates, "nope").await;
    assert!(matches!(result, Err(CmsError::NotFound(_))));
}

// attribute access keeps the root name; literals are not fields
#[test]
fn test_extract_fields_leading_identifier_only() {
    let source = r#"{{ page.title }} {{ "x" }} {{ 42 }} {{ none }} {{ author.name | upper }}"#;
    assert_eq!(extract_fields(source), set(&["page", "author"]));
}
