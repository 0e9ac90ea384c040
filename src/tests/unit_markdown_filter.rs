use crate::parser::markdown::{compile_markdown_to_html, markdown_filter, resolve_page_link};

// test the actual markdown -> html compilation
#[test]
fn test_compile_markdown_basic() {
    let input = "# Title\nThis is a [link](https://example.org)";

    let result = compile_markdown_to_html(input, |link| link.to_string());

    assert!(result.contains("<h1>Title</h1>"));
    assert!(result.contains(r#"<a href="https://example.org">link</a>"#));
}

// relative links are pointed at the page route, everything else is left alone
#[test]
fn test_resolve_page_link() {
    assert_eq!(resolve_page_link("blog/post-1"), "/page/blog/post-1");
    assert_eq!(resolve_page_link("./about"), "/page/about");
    assert_eq!(resolve_page_link("/media/x.webp"), "/media/x.webp");
    assert_eq!(resolve_page_link("https://example.org"), "https://example.org");
    assert_eq!(resolve_page_link("mailto:me@example.org"), "mailto:me@example.org");
    assert_eq!(resolve_page_link("#section"), "#section");
}

#[test]
fn test_markdown_filter_resolves_links() {
    let html = markdown_filter(Some("See [about](about)".into())).to_string();
    assert!(html.contains(r#"href="/page/about""#));
}

#[test]
fn test_markdown_filter_none_is_empty() {
    assert_eq!(markdown_filter(None).to_string(), "");
}

#[test]
fn test_compile_markdown_tables() {
    let input = "| a | b |\n|---|---|\n| 1 | 2 |";
    let result = compile_markdown_to_html(input, |link| link.to_string());
    assert!(result.contains("<table>"));
}
