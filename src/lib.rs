pub mod ai;
pub mod app;
pub mod cli;
pub mod config;
pub mod console;
pub mod language;
pub mod theme;
pub mod ui;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ai::{AIError, AnalysisClient, AnalysisProvider, AnalysisRequest, AnalysisResult};
pub use app::{AppController, AppState, Phase};
pub use config::Config;
pub use language::Language;
