//! Slug derivation for catalog names.

/// Turn a display name into a URL slug.
///
/// Letters and digits are lowercased and kept. Non-ASCII characters are kept
/// as-is so scripts with combining vowel signs survive. Runs of whitespace,
/// hyphens and underscores collapse into a single `-`; other ASCII symbols are
/// dropped.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() || !(c.is_ascii() || c.is_whitespace() || c.is_control()) {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }

            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }

    slug
}

/// Use the explicit slug when one was given, otherwise derive it from `name`.
pub(crate) fn resolve_slug(explicit: Option<String>, name: &str) -> String {
    explicit
        .map(|slug| slug.trim().to_string())
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| slugify(name))
}
