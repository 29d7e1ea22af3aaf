use anyhow::Result;
use clap::Parser;
use code_doctor::ai::AnalysisClient;
use code_doctor::app::{AppController, Phase};
use code_doctor::cli::Cli;
use code_doctor::config::{self, Config};
use code_doctor::console::Console;
use code_doctor::theme::Theme;
use code_doctor::ui::{self, RenderOptions};
use colored::*;
use std::time::Duration;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if dotenv::dotenv().is_ok() {
        debug!("Loaded environment from .env");
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };
    let (mut config, created) = Config::load_or_create(&config_path)?;
    if created {
        println!("Created default config file at {:?}", config_path);
    }

    if let Some(model) = &cli.model {
        config.ai.model = model.clone();
    }
    if let Some(theme) = cli.theme {
        config.display.theme = theme;
    }
    if cli.no_color || !config.display.color_output {
        colored::control::set_override(false);
    }

    let api_key = config.ai.resolve_api_key();
    if api_key.is_none() {
        warn!("No API key found in the environment or {:?}", config_path);
    }
    let client = AnalysisClient::from_config(&config, api_key)?;

    let language = cli.language.unwrap_or(config.editor.default_language);
    let options = RenderOptions {
        theme: Theme::named(config.display.theme),
        line_numbers: config.display.show_line_numbers,
    };
    let mut console = Console::new(
        AppController::new(language),
        client,
        options.clone(),
        Duration::from_millis(config.display.scan_interval_ms),
    );

    if let Some(path) = &cli.file {
        console.load_file(path)?;
    }

    if cli.analyze {
        let phase = console.analyze().await;
        println!("{}", ui::render_panel(console.controller().state(), &options));
        if phase == Phase::Error {
            std::process::exit(1);
        }
        return Ok(());
    }

    if !console.client_ready() {
        println!(
            "{}",
            "No API key configured. Set GEMINI_API_KEY or add ai.api_key to the config file.".yellow()
        );
    }

    console.run().await
}
