use clap::Parser;
use std::path::PathBuf;

use crate::language::Language;
use crate::theme::ThemeName;

#[derive(Parser, Debug)]
#[command(
    name = "code-doctor",
    version,
    about = "Explain, analyze and fix code snippets with an LLM"
)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Language to start with
    #[arg(short, long, value_parser = parse_language)]
    pub language: Option<Language>,

    /// Load the editor from a file (language inferred from the extension)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Analyze once, print the result and exit
    #[arg(long)]
    pub analyze: bool,

    /// Override the model from the config file
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeName>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse::<Language>().map_err(|e| e.to_string())
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_one_shot_invocation() {
        let cli = Cli::parse_from([
            "code-doctor",
            "--language",
            "c++",
            "--file",
            "main.cpp",
            "--analyze",
            "-vv",
        ]);
        assert_eq!(cli.language, Some(Language::Cpp));
        assert_eq!(cli.file, Some(PathBuf::from("main.cpp")));
        assert!(cli.analyze);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["code-doctor", "-l", "cobol"]).is_err());
    }
}
