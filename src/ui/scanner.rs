use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::language::Language;
use crate::theme::Theme;

const WAITING_MESSAGE: &str = "Waiting for the model...";

/// Simulated "scanning" log shown while the analysis call is in flight.
/// It is purely decorative and knows nothing about the request.
pub struct Scanner {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl Scanner {
    pub fn start(language: Language, interval: Duration, theme: &Theme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        bar.enable_steady_tick(Duration::from_millis(80));

        let lines = language
            .scan_steps()
            .into_iter()
            .map(|step| format!("{} {}", theme.muted.apply("➜"), theme.scan.apply(step)))
            .collect();
        Self::with_bar(bar, lines, interval)
    }

    pub fn with_bar(bar: ProgressBar, lines: Vec<String>, interval: Duration) -> Self {
        let driver = bar.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            for line in lines {
                ticker.tick().await;
                driver.println(&line);
                driver.set_message(line);
            }
            driver.set_message(WAITING_MESSAGE);
        });
        Self { bar, task }
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn stop(self) {
        self.task.abort();
        self.bar.finish_and_clear();
    }
}
