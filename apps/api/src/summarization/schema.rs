//! Typed request/response shapes of the three summarization flows, with the
//! validation applied at the service boundary.
//!
//! Field names are camelCase on the wire to match the client.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Checks a deserialized value against the constraints serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// A flow output: deserializable from the model's JSON and described by a response
/// schema the model is asked to follow.
pub trait StructuredOutput: DeserializeOwned + Validate {
    fn response_schema() -> Value;
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{field}' must not be empty"))
    } else {
        Ok(())
    }
}

fn string_object_schema(field: &str, description: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        field.to_string(),
        json!({ "type": "STRING", "description": description }),
    );
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": [field]
    })
}

// ────────────────────────────────────────────────────────────────────────────
// summarize
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeInput {
    pub transcript: String,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl Validate for SummarizeInput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("transcript", &self.transcript)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeOutput {
    pub summary: String,
}

impl Validate for SummarizeOutput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("summary", &self.summary)
    }
}

impl StructuredOutput for SummarizeOutput {
    fn response_schema() -> Value {
        string_object_schema("summary", "The concise summary of the meeting transcript.")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// refine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineInput {
    pub initial_summary: String,
    pub user_edits: String,
}

impl Validate for RefineInput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("initialSummary", &self.initial_summary)?;
        require_non_empty("userEdits", &self.user_edits)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineOutput {
    pub refined_summary: String,
}

impl Validate for RefineOutput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("refinedSummary", &self.refined_summary)
    }
}

impl StructuredOutput for RefineOutput {
    fn response_schema() -> Value {
        string_object_schema(
            "refinedSummary",
            "The refined summary incorporating user edits and AI improvements.",
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// customize
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeInput {
    pub transcript: String,
    pub original_summary: String,
    pub custom_prompt: String,
}

impl Validate for CustomizeInput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("transcript", &self.transcript)?;
        require_non_empty("originalSummary", &self.original_summary)?;
        require_non_empty("customPrompt", &self.custom_prompt)
    }
}

/// Same shape as `RefineOutput`; kept separate so each flow owns its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeOutput {
    pub refined_summary: String,
}

impl Validate for CustomizeOutput {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("refinedSummary", &self.refined_summary)
    }
}

impl StructuredOutput for CustomizeOutput {
    fn response_schema() -> Value {
        string_object_schema(
            "refinedSummary",
            "The refined summary based on the custom prompt.",
        )
    }
}
