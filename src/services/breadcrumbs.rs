use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub link: String,
}

impl Breadcrumb {
    fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// Navigation trail for a slash-delimited page path, always starting at Home.
/// Empty segments (leading, trailing or doubled slashes) are skipped.
pub fn build(path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb::new("Home", "/")];
    let mut accumulated = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !accumulated.is_empty() {
            accumulated.push('/');
        }
        accumulated.push_str(segment);

        crumbs.push(Breadcrumb::new(
            titlecase(&segment.replace('-', " ")),
            format!("/page/{}", accumulated),
        ));
    }

    crumbs
}

// a letter is uppercased when it opens a word (start or after a non-letter), lowercased otherwise
fn titlecase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}
