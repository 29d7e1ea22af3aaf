use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::error::AIError;
use crate::language::Language;

pub const EMPTY_CODE_MESSAGE: &str = "Please enter some code to analyze.";

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AnalysisRequest {
    #[validate(custom = "validate_not_blank")]
    pub code: String,
    pub language: Language,
}

fn validate_not_blank(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(EMPTY_CODE_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
        }
    }

    pub fn check(&self) -> Result<(), AIError> {
        self.validate()
            .map_err(|_| AIError::ValidationError(EMPTY_CODE_MESSAGE.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub error_type: String,
    pub detailed_explanation: String,
    pub technical_details: String,
    pub corrected_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_practices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    pub time: String,
    pub space: String,
}

impl AnalysisResult {
    /// Decodes the provider's JSON text. Only field presence is checked.
    pub fn from_json(text: &str) -> Result<Self, AIError> {
        serde_json::from_str(text.trim()).map_err(|e| {
            AIError::ParseError(format!(
                "Failed to decode analysis: {} - Response text: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })
    }

    pub fn tips(&self) -> &[String] {
        self.best_practices.as_deref().unwrap_or(&[])
    }
}
