use crate::error::{CmsError, CmsResult};
use crate::io::TemplateSource;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// `{{ name }}`, `{{ name.attr }}` or `{{ name | filter(args) }}`; group 1 is the leading
// identifier. Expressions that open with a literal do not match.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)[^{}]*?-?\}\}").unwrap()
});

// identifiers the template language reads as constants or operators
const RESERVED_WORDS: &[&str] = &["true", "false", "none", "True", "False", "None", "not"];

/// Returns the field names a template expects, one entry per distinct placeholder.
pub fn extract_fields(template_source: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(template_source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !RESERVED_WORDS.contains(name))
        .map(str::to_string)
        .collect()
}

/// Looks the template up by name and extracts its fields. A missing template is
/// reported by the lookup, never by the parser.
pub async fn fields_for_template(
    source: &dyn TemplateSource,
    name: &str,
) -> CmsResult<BTreeSet<String>> {
    let text = source
        .load(name)
        .await?
        .ok_or_else(|| CmsError::NotFound(format!("template '{}'", name)))?;

    Ok(extract_fields(&text))
}
