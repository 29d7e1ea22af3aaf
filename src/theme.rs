pub use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorScheme {
    pub foreground: Option<ColorWrapper>,
    pub background: Option<ColorWrapper>,
    pub bold: bool,
    pub underline: bool,
}

// Wrapper type for Color that implements Serialize/Deserialize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ColorWrapper(Color);

impl From<ColorWrapper> for String {
    fn from(wrapper: ColorWrapper) -> Self {
        format!("{:?}", wrapper.0)
    }
}

impl From<String> for ColorWrapper {
    fn from(s: String) -> Self {
        ColorWrapper(Color::from_str(&s).unwrap_or(Color::White))
    }
}

impl From<Color> for ColorWrapper {
    fn from(color: Color) -> Self {
        ColorWrapper(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    Light,
    Monochrome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub header: ColorScheme,
    pub muted: ColorScheme,
    pub error_type: ColorScheme,
    pub summary: ColorScheme,
    pub complexity: ColorScheme,
    pub deep_dive: ColorScheme,
    pub explanation: ColorScheme,
    pub solution: ColorScheme,
    pub tip: ColorScheme,
    pub warning: ColorScheme,
    pub scan: ColorScheme,
    pub keyword: ColorScheme,
    pub string: ColorScheme,
    pub comment: ColorScheme,
    pub inline_code: ColorScheme,
}

fn fg(color: Color) -> ColorScheme {
    ColorScheme {
        foreground: Some(ColorWrapper(color)),
        ..Default::default()
    }
}

fn fg_bold(color: Color) -> ColorScheme {
    ColorScheme {
        bold: true,
        ..fg(color)
    }
}

fn plain(bold: bool, underline: bool) -> ColorScheme {
    ColorScheme {
        foreground: None,
        background: None,
        bold,
        underline,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: fg_bold(Color::Blue),
            muted: fg(Color::BrightBlack),
            error_type: fg_bold(Color::Red),
            summary: fg(Color::White),
            complexity: fg(Color::Magenta),
            deep_dive: fg_bold(Color::Cyan),
            explanation: fg_bold(Color::Yellow),
            solution: fg_bold(Color::Green),
            tip: fg(Color::Blue),
            warning: ColorScheme {
                foreground: Some(ColorWrapper(Color::Red)),
                background: None,
                bold: true,
                underline: false,
            },
            scan: fg(Color::Green),
            keyword: fg(Color::Magenta),
            string: fg(Color::Yellow),
            comment: fg(Color::BrightBlack),
            inline_code: fg(Color::Cyan),
        }
    }
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::Monochrome => Self::monochrome(),
        }
    }

    pub fn dark() -> Self {
        Self::default()
    }

    pub fn light() -> Self {
        Self {
            header: fg_bold(Color::BrightBlue),
            muted: fg(Color::Black),
            error_type: fg_bold(Color::BrightRed),
            summary: fg(Color::Black),
            complexity: fg(Color::BrightMagenta),
            deep_dive: fg_bold(Color::BrightCyan),
            explanation: fg_bold(Color::BrightYellow),
            solution: fg_bold(Color::BrightGreen),
            tip: fg(Color::BrightBlue),
            warning: fg_bold(Color::BrightRed),
            scan: fg(Color::BrightGreen),
            keyword: fg(Color::BrightMagenta),
            string: fg(Color::BrightYellow),
            comment: fg(Color::BrightBlack),
            inline_code: fg(Color::BrightCyan),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            header: plain(true, true),
            muted: plain(false, false),
            error_type: plain(true, false),
            summary: plain(false, false),
            complexity: plain(false, false),
            deep_dive: plain(true, true),
            explanation: plain(true, true),
            solution: plain(true, true),
            tip: plain(false, false),
            warning: plain(true, true),
            scan: plain(false, false),
            keyword: plain(true, false),
            string: plain(false, false),
            comment: plain(false, false),
            inline_code: plain(false, true),
        }
    }
}

impl ColorScheme {
    pub fn apply(&self, text: &str) -> colored::ColoredString {
        let mut colored_text: colored::ColoredString = text.into();

        if let Some(fg) = &self.foreground {
            colored_text = colored_text.color(fg.0);
        }
        if let Some(bg) = &self.background {
            colored_text = colored_text.on_color(bg.0);
        }
        if self.bold {
            colored_text = colored_text.bold();
        }
        if self.underline {
            colored_text = colored_text.underline();
        }

        colored_text
    }
}
