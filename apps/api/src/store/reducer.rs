//! Pure state transitions for one session's summary history.
//!
//! `reduce` never performs I/O. The store applies it and persists the result as a
//! separate step.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::summary::SummaryRecord;

/// A session's summaries, newest first, and the one currently open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub summaries: Vec<SummaryRecord>,
    pub active_id: Option<Uuid>,
}

impl SessionState {
    pub fn find(&self, id: Uuid) -> Option<&SummaryRecord> {
        self.summaries.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// A new summary was generated. It goes to the front and becomes active.
    Created(SummaryRecord),
    /// Open an existing summary. Unknown ids leave the state unchanged.
    Selected(Uuid),
    /// Close the active summary (start a new one).
    ClearedSelection,
    /// Replace a summary's text after a refine or customize call.
    Revised {
        id: Uuid,
        summary: String,
        custom_prompt: Option<String>,
    },
    Deleted(Uuid),
}

pub fn reduce(mut state: SessionState, action: Action) -> SessionState {
    match action {
        Action::Created(record) => {
            state.active_id = Some(record.id);
            state.summaries.insert(0, record);
        }
        Action::Selected(id) => {
            if state.find(id).is_some() {
                state.active_id = Some(id);
            }
        }
        Action::ClearedSelection => {
            state.active_id = None;
        }
        Action::Revised {
            id,
            summary,
            custom_prompt,
        } => {
            if let Some(record) = state.summaries.iter_mut().find(|s| s.id == id) {
                record.summary = summary;
                if let Some(prompt) = custom_prompt {
                    record.custom_prompt = prompt;
                }
            }
        }
        Action::Deleted(id) => {
            state.summaries.retain(|s| s.id != id);
            if state.active_id == Some(id) {
                state.active_id = None;
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> SummaryRecord {
        SummaryRecord::new(
            format!("{title} transcript"),
            format!("- {title}"),
            Some(title.to_string()),
        )
    }

    #[test]
    fn test_created_prepends_and_activates() {
        let first = record("first");
        let second = record("second");
        let state = reduce(SessionState::default(), Action::Created(first.clone()));
        let state = reduce(state, Action::Created(second.clone()));

        assert_eq!(state.summaries.len(), 2);
        assert_eq!(state.summaries[0].id, second.id);
        assert_eq!(state.summaries[1].id, first.id);
        assert_eq!(state.active_id, Some(second.id));
    }

    #[test]
    fn test_selected_ignores_unknown_id() {
        let first = record("first");
        let state = reduce(SessionState::default(), Action::Created(first.clone()));
        let state = reduce(state, Action::ClearedSelection);
        assert_eq!(state.active_id, None);

        let state = reduce(state, Action::Selected(Uuid::new_v4()));
        assert_eq!(state.active_id, None);

        let state = reduce(state, Action::Selected(first.id));
        assert_eq!(state.active_id, Some(first.id));
    }

    #[test]
    fn test_revised_changes_only_target() {
        let first = record("first");
        let second = record("second");
        let state = reduce(SessionState::default(), Action::Created(first.clone()));
        let state = reduce(state, Action::Created(second.clone()));

        let state = reduce(
            state,
            Action::Revised {
                id: first.id,
                summary: "- first, refined".to_string(),
                custom_prompt: Some("Focus on decisions".to_string()),
            },
        );

        let revised = state.find(first.id).unwrap();
        assert_eq!(revised.summary, "- first, refined");
        assert_eq!(revised.custom_prompt, "Focus on decisions");
        assert_eq!(state.find(second.id), Some(&second));
    }

    #[test]
    fn test_revised_without_prompt_keeps_existing_prompt() {
        let mut first = record("first");
        first.custom_prompt = "Keep it short".to_string();
        let state = reduce(SessionState::default(), Action::Created(first.clone()));
        let state = reduce(
            state,
            Action::Revised {
                id: first.id,
                summary: "- short".to_string(),
                custom_prompt: None,
            },
        );
        assert_eq!(state.find(first.id).unwrap().custom_prompt, "Keep it short");
    }

    #[test]
    fn test_deleted_clears_active_selection() {
        let first = record("first");
        let second = record("second");
        let state = reduce(SessionState::default(), Action::Created(first.clone()));
        let state = reduce(state, Action::Created(second.clone()));

        let state = reduce(state, Action::Deleted(first.id));
        assert_eq!(state.active_id, Some(second.id));
        assert!(state.find(first.id).is_none());

        let state = reduce(state, Action::Deleted(second.id));
        assert!(state.summaries.is_empty());
        assert_eq!(state.active_id, None);
    }
}
