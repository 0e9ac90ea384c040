use crate::services::breadcrumbs::{Breadcrumb, build};

fn crumb(name: &str, link: &str) -> Breadcrumb {
    Breadcrumb {
        name: name.to_string(),
        link: link.to_string(),
    }
}

#[test]
fn test_breadcrumbs_nested_path() {
    assert_eq!(
        build("blog/2024/post-1"),
        vec![
            crumb("Home", "/"),
            crumb("Blog", "/page/blog"),
            crumb("2024", "/page/blog/2024"),
            crumb("Post 1", "/page/blog/2024/post-1"),
        ]
    );
}

#[test]
fn test_breadcrumbs_empty_path_is_home_only() {
    assert_eq!(build(""), vec![crumb("Home", "/")]);
}

// stray slashes do not produce empty crumbs
#[test]
fn test_breadcrumbs_skip_empty_segments() {
    assert_eq!(
        build("/about//our-team/"),
        vec![
            crumb("Home", "/"),
            crumb("About", "/page/about"),
            crumb("Our Team", "/page/about/our-team"),
        ]
    );
}

#[test]
fn test_breadcrumbs_lowercase_rest_of_word() {
    assert_eq!(build("FAQ")[1], crumb("Faq", "/page/FAQ"));
}
