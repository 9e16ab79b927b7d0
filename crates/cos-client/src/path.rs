//! Path escaping for URLs and signed resource paths

use url::form_urlencoded;

/// Characters left literal by form encoding that the service expects escaped
const ESCAPE: [(&str, &str); 1] = [("*", "%2A")];

/// Escaped forms restored to their literal character, in either hex case
const UNESCAPE: [(&str, &str); 4] = [("%2F", "/"), ("%2f", "/"), ("%7E", "~"), ("%7e", "~")];

/// Escape a directory or file path
///
/// Leading and trailing `/` are removed, the rest is query-escaped, and `/`
/// and `~` are put back literally so multi-segment paths stay readable.
pub fn escape_path(name: &str) -> String {
    let trimmed = name.trim_matches('/');
    let mut escaped: String = form_urlencoded::byte_serialize(trimmed.as_bytes()).collect();
    // Every '%' in the encoded form starts an escape, so these never overlap.
    for (from, to) in ESCAPE.into_iter().chain(UNESCAPE) {
        if escaped.contains(from) {
            escaped = escaped.replace(from, to);
        }
    }
    escaped
}

/// Escape a directory name: empty for the root, otherwise exactly one trailing `/`
pub fn escape_dir(name: &str) -> String {
    let escaped = escape_path(name);
    if escaped.is_empty() {
        escaped
    } else {
        escaped + "/"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_separators() {
        assert_eq!(escape_path("/a/b/"), "a/b");
        assert_eq!(escape_path("///"), "");
        assert_eq!(escape_path(""), "");
    }

    #[test]
    fn test_keeps_slash_and_tilde() {
        assert_eq!(escape_path("~user/dir~1/file"), "~user/dir~1/file");
    }

    #[test]
    fn test_escapes_reserved_characters() {
        assert_eq!(escape_path("a b"), "a+b");
        assert_eq!(escape_path("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(escape_path("100%"), "100%25");
        assert_eq!(escape_path("文件"), "%E6%96%87%E4%BB%B6");
    }

    #[test]
    fn test_escapes_asterisk() {
        assert_eq!(escape_path("*.log"), "%2A.log");
        assert_eq!(escape_path("a/*/b*"), "a/%2A/b%2A");
        assert_eq!(escape_dir("**"), "%2A%2A/");
    }

    #[test]
    fn test_literal_escape_sequences_survive() {
        // A name that literally contains "%2F" must not become a separator.
        assert_eq!(escape_path("a%2Fb"), "a%252Fb");
        assert_eq!(escape_path("a%7eb"), "a%257eb");
    }

    #[test]
    fn test_never_emits_encoded_separator_or_tilde() {
        for name in ["/x/~/y/", "~~/~", "a /b~c/ d", "%/%~", "/漢字/~/"] {
            let escaped = escape_path(name);
            for pattern in ["%2F", "%2f", "%7E", "%7e"] {
                assert!(!escaped.contains(pattern), "{name:?} -> {escaped:?}");
            }
            assert_eq!(escaped.trim_matches('/'), escaped);
        }
    }

    #[test]
    fn test_dir_names() {
        assert_eq!(escape_dir(""), "");
        assert_eq!(escape_dir("/"), "");
        assert_eq!(escape_dir("photos"), "photos/");
        assert_eq!(escape_dir("/photos/2024//"), "photos/2024/");
    }
}
