//! Per-session summary history.
//!
//! State changes go through `SummaryStore::dispatch`, which applies the pure
//! `reducer::reduce` and then writes a JSON snapshot of every session when a
//! store path is configured. Snapshots are written under the write lock so the
//! file always reflects dispatch order.

pub mod handlers;
pub mod reducer;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::summary::SummaryRecord;
use reducer::{reduce, Action, SessionState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("summary {0} not found")]
    SummaryNotFound(Uuid),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store snapshot is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

type Sessions = HashMap<String, SessionState>;

pub struct SummaryStore {
    sessions: RwLock<Sessions>,
    path: Option<PathBuf>,
}

impl SummaryStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            path: None,
        }
    }

    /// Opens a file-backed store. A missing file starts empty; the file is created on
    /// the first dispatch.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let sessions = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Sessions>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(
            "Loaded {} session(s) from {}",
            sessions.len(),
            path.display()
        );
        Ok(Self {
            sessions: RwLock::new(sessions),
            path: Some(path),
        })
    }

    /// Current state of a session. Unknown sessions are empty.
    pub async fn snapshot(&self, session: &str) -> SessionState {
        self.sessions
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn find(&self, session: &str, id: Uuid) -> Result<SummaryRecord, StoreError> {
        self.sessions
            .read()
            .await
            .get(session)
            .and_then(|state| state.find(id))
            .cloned()
            .ok_or(StoreError::SummaryNotFound(id))
    }

    /// Applies `action` to the session and persists the result. Actions that target
    /// a summary fail with `SummaryNotFound` when the session does not hold it.
    /// A failed write leaves the in-memory state unchanged. An unknown session that
    /// reduces to the empty state is neither stored nor written.
    pub async fn dispatch(&self, session: &str, action: Action) -> Result<SessionState, StoreError> {
        let mut sessions = self.sessions.write().await;
        let existing = sessions.get(session).cloned();
        let known = existing.is_some();
        let current = existing.unwrap_or_default();

        if let Some(id) = target_of(&action) {
            if current.find(id).is_none() {
                return Err(StoreError::SummaryNotFound(id));
            }
        }

        let next = reduce(current, action);
        if !known && next == SessionState::default() {
            return Ok(next);
        }

        let previous = sessions.insert(session.to_string(), next.clone());

        if let Some(path) = &self.path {
            if let Err(e) = write_snapshot(path, &sessions).await {
                match previous {
                    Some(state) => sessions.insert(session.to_string(), state),
                    None => sessions.remove(session),
                };
                return Err(e);
            }
        }

        Ok(next)
    }
}

fn target_of(action: &Action) -> Option<Uuid> {
    match action {
        Action::Selected(id) | Action::Deleted(id) => Some(*id),
        Action::Revised { id, .. } => Some(*id),
        Action::Created(_) | Action::ClearedSelection => None,
    }
}

/// Writes to a sibling temp file and renames it over the snapshot.
async fn write_snapshot(path: &Path, sessions: &Sessions) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(sessions)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!("Wrote store snapshot ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
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

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SummaryStore::in_memory();
        let first = record("standup");
        store
            .dispatch("alice", Action::Created(first.clone()))
            .await
            .unwrap();

        assert_eq!(store.snapshot("alice").await.summaries.len(), 1);
        assert!(store.snapshot("bob").await.summaries.is_empty());
        assert!(matches!(
            store.find("bob", first.id).await,
            Err(StoreError::SummaryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_rejects_unknown_target() {
        let store = SummaryStore::in_memory();
        let missing = Uuid::new_v4();
        let result = store.dispatch("alice", Action::Deleted(missing)).await;
        assert!(matches!(result, Err(StoreError::SummaryNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_snapshot_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries.json");

        let record = record("retro");
        {
            let store = SummaryStore::open(&path).await.unwrap();
            store
                .dispatch("alice", Action::Created(record.clone()))
                .await
                .unwrap();
            store
                .dispatch(
                    "alice",
                    Action::Revised {
                        id: record.id,
                        summary: "- retro, revised".to_string(),
                        custom_prompt: None,
                    },
                )
                .await
                .unwrap();
        }

        let reopened = SummaryStore::open(&path).await.unwrap();
        let state = reopened.snapshot("alice").await;
        assert_eq!(state.active_id, Some(record.id));
        assert_eq!(state.summaries[0].summary, "- retro, revised");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_clearing_unknown_session_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries.json");
        let store = SummaryStore::open(&path).await.unwrap();

        let state = store
            .dispatch("stranger", Action::ClearedSelection)
            .await
            .unwrap();
        assert_eq!(state, SessionState::default());
        assert!(store.sessions.read().await.is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("summaries.json");
        let store = SummaryStore::open(&path).await.unwrap();

        let result = store
            .dispatch("alice", Action::Created(record("standup")))
            .await;
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(store.sessions.read().await.get("alice").is_none());

        std::fs::create_dir(dir.path().join("missing-dir")).unwrap();
        let kept = record("kept");
        store
            .dispatch("alice", Action::Created(kept.clone()))
            .await
            .unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::remove_dir(dir.path().join("missing-dir")).unwrap();
        let result = store
            .dispatch(
                "alice",
                Action::Revised {
                    id: kept.id,
                    summary: "- lost".to_string(),
                    custom_prompt: None,
                },
            )
            .await;
        assert!(result.is_err());
        assert_eq!(store.find("alice", kept.id).await.unwrap().summary, "- kept");
    }

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SummaryStore::open(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(store.snapshot("anyone").await, SessionState::default());
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            SummaryStore::open(&path).await,
            Err(StoreError::Serde(_))
        ));
    }
}
