use once_cell::sync::Lazy;
use regex::Regex;

// CSI sequences (colors, cursor movement, screen clears) and OSC sequences
// (window titles, hyperlinks), terminated by BEL or ST.
static ESCAPE_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .expect("escape sequence pattern is valid")
});

/// Strips terminal escape sequences and control characters from untrusted
/// text. Newlines and tabs survive; tabs become four spaces.
pub fn sanitize(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    ESCAPE_SEQUENCE
        .replace_all(&normalized, "")
        .chars()
        .filter_map(|c| match c {
            '\n' => Some("\n".to_string()),
            '\t' => Some("    ".to_string()),
            c if c.is_control() => None,
            c => Some(c.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_escape_sequences() {
        let hostile = "fine\x1b[2J\x1b[31mred\x1b[0m \x1b]0;pwned\x07title";
        assert_eq!(sanitize(hostile), "finered title");
    }

    #[test]
    fn test_keeps_newlines_and_expands_tabs() {
        assert_eq!(sanitize("a\r\n\tb\rc\x07"), "a\n    bc");
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(sanitize("O(n²) → ✓"), "O(n²) → ✓");
    }
}
