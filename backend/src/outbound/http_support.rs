//! Helpers shared by the reqwest-backed adapters.

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Whitespace-collapsed, length-capped rendering of a response body for
/// error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = compact.chars();
    let preview: String = chars.by_ref().take(PREVIEW_CHAR_LIMIT).collect();
    if chars.next().is_some() {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(body_preview(b"{\n  \"message\":  \"bad\"\n}"), "{ \"message\": \"bad\" }");
    }

    #[test]
    fn preview_is_truncated() {
        let body = "x".repeat(PREVIEW_CHAR_LIMIT + 5);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
        assert!(preview.ends_with("..."));
    }
}
