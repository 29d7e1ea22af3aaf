//! Terminal rendering for the markdown the model writes in its narrative
//! fields. Only a small, inert subset is understood: headings, lists,
//! quotes, fenced code, inline code, bold, italic and links. Everything
//! passes through [`sanitize`] first, so no escape sequence from the
//! model ever reaches the terminal.

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

use super::highlight::highlight_line;
use super::sanitize::sanitize;
use crate::language::Language;
use crate::theme::Theme;

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"`(?P<code>[^`]+)`|\*\*(?P<bold>[^*]+)\*\*|\*(?P<em>[^*\s][^*]*)\*|\[(?P<text>[^\]]+)\]\((?P<url>[^)\s]+)\)",
    )
    .unwrap()
});

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").unwrap());

pub fn render_markdown(text: &str, theme: &Theme, indent: &str) -> String {
    let clean = sanitize(text);
    let mut out = Vec::new();
    let mut fence: Option<Option<Language>> = None;

    for raw in clean.lines() {
        let trimmed = raw.trim_start();

        if let Some(tag) = trimmed.strip_prefix("```") {
            fence = match fence {
                Some(_) => None,
                None => Some(tag.trim().parse::<Language>().ok()),
            };
            continue;
        }

        if let Some(language) = fence {
            let body = match language {
                Some(lang) => highlight_line(raw, lang, theme),
                None => theme.muted.apply(raw).to_string(),
            };
            out.push(format!("{}    {}", indent, body));
            continue;
        }

        out.push(format!("{}{}", indent, render_block_line(raw, trimmed, theme)));
    }

    out.join("\n")
}

fn render_block_line(raw: &str, trimmed: &str, theme: &Theme) -> String {
    let depth = (raw.len() - trimmed.len()) / 2;
    let pad = "  ".repeat(depth);

    if trimmed.starts_with('#') {
        let heading = trimmed.trim_start_matches('#').trim();
        return theme.header.apply(heading).to_string();
    }
    if let Some(quote) = trimmed.strip_prefix('>') {
        return format!(
            "{} {}",
            theme.muted.apply("│"),
            render_inline(quote.trim_start(), theme)
        );
    }
    for bullet in ["- ", "* ", "+ "] {
        if let Some(item) = trimmed.strip_prefix(bullet) {
            return format!("{}  • {}", pad, render_inline(item, theme));
        }
    }
    if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
        return format!("{}  {}. {}", pad, &caps[1], render_inline(&caps[2], theme));
    }

    render_inline(trimmed, theme)
}

fn render_inline(text: &str, theme: &Theme) -> String {
    let mut out = String::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        out.push_str(&text[last..whole.start]);
        last = whole.end;

        if let Some(code) = caps.name("code") {
            out.push_str(&theme.inline_code.apply(code.as_str()).to_string());
        } else if let Some(bold) = caps.name("bold") {
            out.push_str(&bold.as_str().bold().to_string());
        } else if let Some(em) = caps.name("em") {
            out.push_str(&em.as_str().italic().to_string());
        } else if let (Some(label), Some(url)) = (caps.name("text"), caps.name("url")) {
            out.push_str(&format!(
                "{} ({})",
                label.as_str().underline(),
                theme.muted.apply(url.as_str())
            ));
        }
    }

    out.push_str(&text[last..]);
    out
}
