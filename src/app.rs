//! Application state and the transitions between idle, loading, success
//! and error.
//!
//! Every analysis is tagged with the epoch current when it started. A
//! resolution whose epoch no longer matches (the user switched language,
//! reset, or abandoned the request in the meantime) is dropped.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::ai::{AIError, AnalysisClient, AnalysisRequest, AnalysisResult};
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub language: Language,
    pub code: String,
    pub result: Option<AnalysisResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub epoch: u64,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            code: language.default_snippet().to_string(),
            result: None,
            loading: false,
            error: None,
            epoch: 0,
            completed_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.result.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    pub fn line_count(&self) -> usize {
        self.code.split('\n').count()
    }

    pub fn char_count(&self) -> usize {
        self.code.chars().count()
    }
}

/// Handed out when an analysis starts; returned with the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    pub epoch: u64,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BeginOutcome {
    Started(AnalysisTicket),
    /// Blank editor; the validation message is already in the state.
    Rejected,
    AlreadyLoading,
}

#[derive(Debug)]
pub struct AppController {
    state: AppState,
}

impl AppController {
    pub fn new(language: Language) -> Self {
        Self {
            state: AppState::new(language),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn select_language(&mut self, language: Language) {
        self.invalidate_in_flight();
        self.state.language = language;
        self.state.code = language.default_snippet().to_string();
        self.state.result = None;
        self.state.error = None;
        self.state.completed_at = None;
    }

    pub fn reset(&mut self) {
        self.select_language(self.state.language);
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.state.code = code.into();
    }

    /// Starts an analysis unless the editor is blank or one is in flight.
    pub fn begin_analysis(&mut self) -> BeginOutcome {
        if self.state.loading {
            warn!(epoch = self.state.epoch, "Analysis already in flight, ignoring trigger");
            return BeginOutcome::AlreadyLoading;
        }

        let request = AnalysisRequest::new(self.state.code.clone(), self.state.language);
        if let Err(e) = request.check() {
            self.fail(e.user_message());
            return BeginOutcome::Rejected;
        }

        self.state.epoch += 1;
        self.state.loading = true;
        self.state.error = None;
        debug!(epoch = self.state.epoch, language = request.language.id(), "Analysis started");

        BeginOutcome::Started(AnalysisTicket {
            epoch: self.state.epoch,
            request,
        })
    }

    /// Applies an outcome. Returns false when the ticket is stale.
    pub fn complete(&mut self, epoch: u64, outcome: Result<AnalysisResult, AIError>) -> bool {
        if !self.state.loading || epoch != self.state.epoch {
            debug!(
                epoch,
                current = self.state.epoch,
                "Discarding stale analysis outcome"
            );
            return false;
        }

        self.state.loading = false;
        match outcome {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.error = None;
                self.state.completed_at = Some(Utc::now());
            }
            Err(e) => self.fail(e.user_message()),
        }
        true
    }

    /// Gives up on the in-flight request without touching result or error.
    pub fn abandon(&mut self) {
        self.invalidate_in_flight();
    }

    /// Runs one analysis to completion against `client`.
    pub async fn analyze(&mut self, client: &AnalysisClient) -> Phase {
        if let BeginOutcome::Started(ticket) = self.begin_analysis() {
            let outcome = client.analyze(&ticket.request).await;
            self.complete(ticket.epoch, outcome);
        }
        self.state.phase()
    }

    fn fail(&mut self, message: String) {
        self.state.error = Some(message);
        self.state.result = None;
        self.state.completed_at = None;
    }

    fn invalidate_in_flight(&mut self) {
        if self.state.loading {
            self.state.epoch += 1;
            self.state.loading = false;
        }
    }
}
