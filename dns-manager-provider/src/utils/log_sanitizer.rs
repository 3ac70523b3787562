//! Log sanitization
//!
//! Cloudflare responses can echo TXT/DKIM content and large record lists;
//! bodies are truncated before they reach debug/error logs.

/// Maximum number of bytes of a body kept in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncates `s` to [`TRUNCATE_LIMIT`] bytes, noting the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"success":true}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn body_at_limit_unchanged() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn long_body_truncated_with_length() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_content_not_split() {
        // mixed 2- and 3-byte chars; byte 256 falls inside one
        let s = "é中".repeat(120);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }
}
