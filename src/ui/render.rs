use colored::Colorize;

use super::highlight::highlight_code;
use super::markdown::render_markdown;
use super::sanitize::sanitize;
use crate::ai::AnalysisResult;
use crate::app::{AppState, Phase};
use crate::language::Language;
use crate::theme::Theme;

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub line_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            line_numbers: true,
        }
    }
}

fn section(title: &str, style: &crate::theme::ColorScheme) -> String {
    format!("\n{} {}", style.apply("▍"), style.apply(&title.to_uppercase()))
}

pub fn render_banner(options: &RenderOptions) -> String {
    format!(
        "{}\n{}",
        options.theme.header.apply("code-doctor - explain, analyze and fix your code"),
        options
            .theme
            .muted
            .apply("Type :help for commands, :analyze to run, :quit to exit")
    )
}

pub fn render_toolbar(state: &AppState, options: &RenderOptions) -> String {
    format!(
        "{} {}  {}  {}",
        options.theme.muted.apply("LANG"),
        state.language.label().bold(),
        options.theme.muted.apply("│"),
        options.theme.muted.apply(state.language.hint())
    )
}

pub fn render_editor(state: &AppState, options: &RenderOptions) -> String {
    let theme = &options.theme;
    let header = format!(
        "{} {}",
        theme.muted.apply("●●●"),
        theme.muted.apply(&format!("input.{}", state.language.extension()))
    );
    let body = if state.code.is_empty() {
        format!(
            "{}{}",
            INDENT,
            theme
                .muted
                .apply(&format!("Paste your {} code here... (:edit)", state.language.id()))
        )
    } else {
        highlight_code(&state.code, state.language, theme, options.line_numbers, INDENT)
    };
    let footer = theme.muted.apply(&format!(
        "{} chars · Lines: {}",
        state.char_count(),
        state.line_count()
    ));

    format!("{}\n{}\n{}", header, body, footer)
}

pub fn render_language_list(current: Language, options: &RenderOptions) -> String {
    Language::ALL
        .iter()
        .map(|lang| {
            let marker = if *lang == current { "▸" } else { " " };
            format!(
                "{} {:<11} {}",
                marker,
                lang.id(),
                options.theme.muted.apply(lang.label())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_idle(options: &RenderOptions) -> String {
    format!(
        "{}\n{}",
        options.theme.header.apply("Ready to Explain"),
        options
            .theme
            .muted
            .apply("Paste your code with :edit and run :analyze to get started.")
    )
}

pub fn render_error(message: &str, options: &RenderOptions) -> String {
    options
        .theme
        .warning
        .apply(&format!("✖ {}", sanitize(message)))
        .to_string()
}

pub fn render_result(result: &AnalysisResult, language: Language, options: &RenderOptions) -> String {
    let theme = &options.theme;
    let mut out = Vec::new();

    out.push(format!(
        "{} {}",
        theme.error_type.apply("⚠"),
        theme.error_type.apply(&sanitize(&result.error_type))
    ));
    out.push(format!("{}{}", INDENT, theme.summary.apply(&sanitize(&result.summary))));

    if let Some(complexity) = &result.complexity {
        out.push(section("Complexity", &theme.complexity));
        out.push(format!(
            "{}{} {}",
            INDENT,
            theme.complexity.apply("Time Complexity: "),
            sanitize(&complexity.time)
        ));
        out.push(format!(
            "{}{} {}",
            INDENT,
            theme.complexity.apply("Space Complexity:"),
            sanitize(&complexity.space)
        ));
    }

    if !result.technical_details.trim().is_empty() {
        out.push(section("Technical Deep Dive", &theme.deep_dive));
        out.push(render_markdown(&result.technical_details, theme, INDENT));
    }

    out.push(section("Beginner Explanation", &theme.explanation));
    out.push(render_markdown(&result.detailed_explanation, theme, INDENT));

    out.push(format!(
        "{}  {}",
        section("Corrected Solution", &theme.solution),
        theme.muted.apply("(:copy to clipboard, :save <path> to write)")
    ));
    out.push(highlight_code(
        &result.corrected_code,
        language,
        theme,
        options.line_numbers,
        INDENT,
    ));

    let tips = result.tips();
    if !tips.is_empty() {
        out.push(section("Best Practices & Tips", &theme.tip));
        for tip in tips {
            out.push(format!("{}{} {}", INDENT, theme.tip.apply("•"), sanitize(tip)));
        }
    }

    out.join("\n")
}

/// The result panel: error banner on top of whatever the panel shows.
pub fn render_panel(state: &AppState, options: &RenderOptions) -> String {
    let mut out = Vec::new();
    if let Some(error) = &state.error {
        out.push(render_error(error, options));
    }

    match (state.phase(), &state.result) {
        (Phase::Loading, _) => out.push(options.theme.scan.apply("Analyzing...").to_string()),
        (_, Some(result)) => {
            out.push(render_result(result, state.language, options));
            if let Some(at) = state.completed_at {
                out.push(
                    options
                        .theme
                        .muted
                        .apply(&format!("\nAnalyzed at {}", at.format("%H:%M:%S UTC")))
                        .to_string(),
                );
            }
        }
        (_, None) if state.error.is_none() => out.push(render_idle(options)),
        _ => {}
    }

    out.join("\n")
}
