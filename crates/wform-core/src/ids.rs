//! DOM id generation for elements and options.

fn sanitize(raw: String) -> String {
    raw.chars()
        .map(|c| if c == '_' || c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Id of a form element: `form-{name}` with `_` and whitespace as `-`.
#[must_use]
pub fn element_id(name: &str) -> String {
    sanitize(format!("form-{name}"))
}

/// Id of one option of a grouped element: `form-{name}-{value}`, value lowercased.
#[must_use]
pub fn option_id(name: &str, value: &str) -> String {
    sanitize(format!("form-{name}-{}", value.to_lowercase()))
}
