use pulldown_cmark::{Event, Options as CmarkOptions, Parser, Tag, html};

// compiles markdown content into HTML, and resolves links on-the-fly using the provided resolver
pub fn compile_markdown_to_html<F>(markdown_content: &str, mut resolver: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut options = CmarkOptions::empty();
    options.insert(CmarkOptions::ENABLE_STRIKETHROUGH);
    options.insert(CmarkOptions::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown_content, options);

    let mut html_content = String::new();

    let event_iterator = parser.map(|event| {
        if let Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) = event
        {
            let new_url = resolver(&dest_url);
            Event::Start(Tag::Link {
                link_type,
                dest_url: new_url.into(),
                title,
                id,
            })
        } else {
            event
        }
    });

    html::push_html(&mut html_content, event_iterator);

    html_content
}

// bare relative links ("blog/post-1") point at other pages, so they get the page route prefix.
// external links, mailtos, anchors, and absolute paths pass through untouched
pub fn resolve_page_link(link: &str) -> String {
    if link.is_empty()
        || link.contains("://")
        || link.starts_with("mailto:")
        || link.starts_with('#')
        || link.starts_with('/')
    {
        return link.to_string();
    }

    format!("/page/{}", link.trim_start_matches("./"))
}

/// Template filter: `{{ body | markdown }}`. Undefined or none renders as empty.
pub fn markdown_filter(value: Option<String>) -> minijinja::Value {
    let html = value
        .map(|md| compile_markdown_to_html(&md, resolve_page_link))
        .unwrap_or_default();
    minijinja::Value::from_safe_string(html)
}
