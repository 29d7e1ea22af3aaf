use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::sanitize::sanitize;
use crate::language::Language;
use crate::theme::Theme;

static TOKENS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    ["#", "//", "--"]
        .into_iter()
        .map(|marker| {
            let pattern = format!(
                r#"(?P<string>"(?:[^"\\]|\\.)*"?|'(?:[^'\\]|\\.)*'?)|(?P<comment>{}.*$)|(?P<word>[A-Za-z_][A-Za-z0-9_]*)"#,
                regex::escape(marker)
            );
            (marker, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Colors one line of code. The text itself is never altered.
pub fn highlight_line(line: &str, language: Language, theme: &Theme) -> String {
    let Some(tokens) = TOKENS.get(language.line_comment()) else {
        return line.to_string();
    };
    let keywords = language.keywords();
    let case_insensitive = language == Language::Sql;

    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in tokens.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&line[last..whole.start()]);
        last = whole.end();

        let text = whole.as_str();
        let styled = if caps.name("string").is_some() {
            theme.string.apply(text).to_string()
        } else if caps.name("comment").is_some() {
            theme.comment.apply(text).to_string()
        } else if is_keyword(text, keywords, case_insensitive) {
            theme.keyword.apply(text).to_string()
        } else {
            text.to_string()
        };
        out.push_str(&styled);
    }
    out.push_str(&line[last..]);
    out
}

fn is_keyword(word: &str, keywords: &[&str], case_insensitive: bool) -> bool {
    if case_insensitive {
        keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
    } else {
        keywords.contains(&word)
    }
}

/// Renders untrusted code as highlighted plain text, optionally with a
/// line-number gutter.
pub fn highlight_code(
    code: &str,
    language: Language,
    theme: &Theme,
    line_numbers: bool,
    indent: &str,
) -> String {
    let clean = sanitize(code);
    let lines: Vec<&str> = clean.split('\n').collect();
    let width = lines.len().to_string().len().max(2);

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let body = highlight_line(line, language, theme);
            if line_numbers {
                let number = format!("{:>width$}", i + 1, width = width);
                format!("{}{} {} {}", indent, theme.muted.apply(&number), theme.muted.apply("│"), body)
            } else {
                format!("{}{}", indent, body)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
