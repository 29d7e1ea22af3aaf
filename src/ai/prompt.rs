use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AIError;
use super::response::AnalysisRequest;
use super::schema::analysis_schema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub thinking_budget: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            thinking_budget: 2048,
        }
    }
}

/// Everything the provider needs for one structured-output call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
    pub sampling: SamplingConfig,
}

impl GenerationRequest {
    pub fn new(request: &AnalysisRequest, sampling: &SamplingConfig) -> Result<Self, AIError> {
        Ok(Self {
            prompt: build_prompt(request),
            schema: analysis_schema()?,
            sampling: sampling.clone(),
        })
    }
}

/// The code is embedded verbatim; the model treats the fenced block as opaque.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let language = request.language.id();
    format!(
        "You are a world-class Senior Software Engineer and Mentor. \
         Your goal is to debug code and teach the user.\n\
         \n\
         Language: {language}\n\
         \n\
         Code to Analyze:\n\
         ```{language}\n\
         {code}\n\
         ```\n\
         \n\
         Task:\n\
         1. Identify any syntax errors, runtime errors, memory issues, or logical flaws.\n\
         2. Analyze the Time and Space complexity of the algorithm.\n\
         3. Provide a 'Technical Deep Dive' explaining exactly what the computer is doing wrong \
         (e.g., \"The pointer is accessing a memory address 0x0 which is reserved...\").\n\
         4. Provide a 'Beginner Explanation' using simple analogies.\n\
         5. Write the corrected code with comments.\n\
         \n\
         If the code is already correct, suggest an advanced optimization or alternative \
         implementation that is more idiomatic, and explain why.\n\
         \n\
         Output must strictly follow the JSON schema.",
        language = language,
        code = request.code,
    )
}
