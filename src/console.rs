use anyhow::{anyhow, Context, Result};
use colored::*;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::ai::AnalysisClient;
use crate::app::{AppController, BeginOutcome, Phase};
use crate::language::Language;
use crate::ui::{self, RenderOptions, Scanner};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze,
    Reset,
    SelectLanguage(Language),
    ListLanguages,
    Edit,
    Load(PathBuf),
    Show,
    Copy,
    Save(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Parses one console line. A leading `:` is optional; blank lines
    /// yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let line = line.strip_prefix(':').unwrap_or(line);
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match (name.to_ascii_lowercase().as_str(), arg) {
            ("analyze" | "run" | "a", "") => Command::Analyze,
            ("reset" | "r", "") => Command::Reset,
            ("lang" | "language" | "l", "") | ("langs" | "languages", "") => Command::ListLanguages,
            ("lang" | "language" | "l", lang) => {
                Command::SelectLanguage(lang.parse().map_err(|e| anyhow!("{}", e))?)
            }
            ("edit" | "e", "") => Command::Edit,
            ("load", "") | ("save", "") => return Err(anyhow!("Usage: :{} <path>", name)),
            ("load", path) => Command::Load(PathBuf::from(path)),
            ("save", path) => Command::Save(PathBuf::from(path)),
            ("show" | "s", "") => Command::Show,
            ("copy" | "c", "") => Command::Copy,
            ("help" | "h" | "?", "") => Command::Help,
            ("quit" | "exit" | "q", "") => Command::Quit,
            _ => return Err(anyhow!("Unknown command '{}'. Type :help for a list.", line)),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  :lang <id>     switch language (resets the editor to its example)
  :langs         list supported languages
  :edit          replace the editor contents; finish with a line containing only '.'
  :load <path>   load a file into the editor
  :show          show the editor and the result panel
  :analyze       analyze and fix the editor contents (Ctrl-C abandons)
  :reset         restore the example snippet and clear results
  :copy          copy the corrected solution to the clipboard
  :save <path>   write the corrected solution to a file
  :help          show this help
  :quit          exit";

/// Reads lines until a lone `.` or end of input.
pub fn read_block<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line.trim_end_matches(['\n', '\r']);
        if content == "." {
            break;
        }
        lines.push(content.to_string());
    }
    Ok(lines.join("\n"))
}

pub struct Console {
    controller: AppController,
    client: AnalysisClient,
    options: RenderOptions,
    scan_interval: Duration,
}

impl Console {
    pub fn new(
        controller: AppController,
        client: AnalysisClient,
        options: RenderOptions,
        scan_interval: Duration,
    ) -> Self {
        Self {
            controller,
            client,
            options,
            scan_interval,
        }
    }

    pub fn controller(&self) -> &AppController {
        &self.controller
    }

    pub fn client_ready(&self) -> bool {
        self.client.has_credential()
    }

    /// Loads `path` into the editor, switching language when the
    /// extension is recognized.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let code = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        if let Some(language) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
        {
            self.controller.select_language(language);
        }
        self.controller.set_code(code);
        info!(path = %path.display(), "Loaded file into editor");
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", ui::render_banner(&self.options));
        self.show();

        let stdin = io::stdin();
        let mut input = stdin.lock();
        loop {
            print!("{} ", format!("code-doctor[{}]>", self.controller.state().language.id()).green());
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line) {
                Ok(Some(command)) => {
                    if !self.dispatch(command, &mut input).await? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => eprintln!("{}: {}", "Error".red().bold(), e),
            }
        }
        Ok(())
    }

    /// Executes one command. Returns false when the console should exit.
    pub async fn dispatch<R: BufRead>(&mut self, command: Command, input: &mut R) -> Result<bool> {
        match command {
            Command::Analyze => {
                self.analyze().await;
                println!("{}", ui::render_panel(self.controller.state(), &self.options));
            }
            Command::Reset => {
                self.controller.reset();
                self.show();
            }
            Command::SelectLanguage(language) => {
                self.controller.select_language(language);
                self.show();
            }
            Command::ListLanguages => {
                println!(
                    "{}",
                    ui::render_language_list(self.controller.state().language, &self.options)
                );
            }
            Command::Edit => {
                println!(
                    "{}",
                    "Enter code, finish with a line containing only '.'".bright_black()
                );
                let code = read_block(input)?;
                self.controller.set_code(code);
                println!("{}", ui::render_editor(self.controller.state(), &self.options));
            }
            Command::Load(path) => match self.load_file(&path) {
                Ok(()) => self.show(),
                Err(e) => eprintln!("{}: {:#}", "Error".red().bold(), e),
            },
            Command::Show => self.show(),
            Command::Copy => match &self.controller.state().result {
                Some(result) => println!(
                    "{}",
                    ui::copy_to_clipboard(&result.corrected_code, "corrected code")
                ),
                None => println!("{}", "Nothing to copy yet. Run :analyze first.".yellow()),
            },
            Command::Save(path) => match &self.controller.state().result {
                Some(result) => match fs::write(&path, &result.corrected_code) {
                    Ok(()) => println!("Saved corrected code to {}", path.display()),
                    Err(e) => eprintln!("{}: Failed to write {:?}: {}", "Error".red().bold(), path, e),
                },
                None => println!("{}", "Nothing to save yet. Run :analyze first.".yellow()),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Runs one analysis with the scanning animation. Ctrl-C abandons the
    /// request; its late outcome is then discarded by the epoch check.
    pub async fn analyze(&mut self) -> Phase {
        let ticket = match self.controller.begin_analysis() {
            BeginOutcome::Started(ticket) => ticket,
            BeginOutcome::Rejected | BeginOutcome::AlreadyLoading => {
                return self.controller.state().phase();
            }
        };

        let scanner = Scanner::start(ticket.request.language, self.scan_interval, &self.options.theme);
        let client = self.client.clone();

        tokio::select! {
            outcome = client.analyze(&ticket.request) => {
                scanner.stop();
                self.controller.complete(ticket.epoch, outcome);
            }
            _ = tokio::signal::ctrl_c() => {
                scanner.stop();
                self.controller.abandon();
                println!("{}", "Analysis abandoned.".yellow());
            }
        }

        self.controller.state().phase()
    }

    fn show(&self) {
        let state = self.controller.state();
        println!("{}", ui::render_toolbar(state, &self.options));
        println!("{}", ui::render_editor(state, &self.options));
        println!("{}", ui::render_panel(state, &self.options));
    }
}
