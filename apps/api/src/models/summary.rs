use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated summary as kept in a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: Uuid,
    pub transcript: String,
    /// Last custom instructions applied to this summary; empty if none.
    pub custom_prompt: String,
    pub summary: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl SummaryRecord {
    /// Creates a record for a freshly generated summary. Without a title the record is
    /// named after its creation date, e.g. `Summary 2026-10-18`.
    pub fn new(transcript: String, summary: String, title: Option<String>) -> Self {
        let created_at = Utc::now();
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Summary {}", created_at.format("%Y-%m-%d")));

        Self {
            id: Uuid::new_v4(),
            transcript,
            custom_prompt: String::new(),
            summary,
            title,
            created_at,
        }
    }
}
