use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{Map, Value};

use super::error::AIError;

// Field docs below become the descriptions sent to the provider.

/// Structured analysis of a single code snippet.
#[derive(Debug, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct AnalysisResponseSchema {
    /// A brief, one-sentence summary of the main error.
    pub summary: String,
    /// The category of error (e.g., Syntax Error, Runtime Error, Logical Error, Memory Leak).
    pub error_type: String,
    /// A beginner-friendly, markdown-formatted explanation of why the error occurred, using analogies if helpful.
    pub detailed_explanation: String,
    /// A more technical explanation of what is happening at the compiler/interpreter level (e.g., stack vs heap, memory allocation details, precedence rules).
    pub technical_details: String,
    /// The algorithmic complexity analysis of the provided code.
    pub complexity: ComplexitySchema,
    /// The complete corrected version of the code. Add comments explaining fixes.
    pub corrected_code: String,
    /// A list of 3-5 tips, best practices, or potential optimizations related to the code snippet.
    pub best_practices: Option<Vec<String>>,
}

#[derive(Debug, JsonSchema)]
pub struct ComplexitySchema {
    /// Time complexity (Big O) of the code, with a brief reason.
    pub time: String,
    /// Space complexity (Big O) of the code, with a brief reason.
    pub space: String,
}

/// Response schema in the provider's OpenAPI-subset dialect.
pub fn analysis_schema() -> Result<Value, AIError> {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.option_nullable = false;
        s.option_add_null_type = false;
    });
    let root = settings
        .into_generator()
        .into_root_schema_for::<AnalysisResponseSchema>();

    Ok(to_provider_schema(serde_json::to_value(root)?))
}

/// Rewrites a draft-07 JSON schema into the subset Gemini accepts:
/// upper-case type names, no `$schema`/`title`/`format` keys.
pub fn to_provider_schema(schema: Value) -> Value {
    let Value::Object(mut object) = schema else {
        return schema;
    };

    // Documented fields referencing another type arrive as a single-entry allOf.
    if let Some(Value::Array(mut all_of)) = object.remove("allOf") {
        if all_of.len() == 1 {
            if let Value::Object(inner) = all_of.remove(0) {
                for (key, value) in inner {
                    object.entry(key).or_insert(value);
                }
            }
        }
    }

    let mut out = Map::new();
    for (key, value) in object {
        match key.as_str() {
            "type" => {
                if let Some(name) = primary_type(&value) {
                    out.insert("type".into(), Value::String(name.to_ascii_uppercase()));
                }
            }
            "properties" => {
                if let Value::Object(props) = value {
                    let converted = props
                        .into_iter()
                        .map(|(name, prop)| (name, to_provider_schema(prop)))
                        .collect::<Map<_, _>>();
                    out.insert("properties".into(), Value::Object(converted));
                }
            }
            "items" => {
                out.insert("items".into(), to_provider_schema(value));
            }
            "description" | "required" | "enum" | "nullable" => {
                out.insert(key, value);
            }
            _ => {}
        }
    }
    Value::Object(out)
}

fn primary_type(value: &Value) -> Option<&str> {
    match value {
        Value::String(name) => Some(name.as_str()),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .find(|name| *name != "null"),
        _ => None,
    }
}
