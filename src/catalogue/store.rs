//! Durable persistence for catalogue snapshots: one JSON document at a fixed
//! path, validated structurally on load.

use super::error::CatalogueError;
use super::model::{CatalogueSnapshot, Problem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;

/// On-disk document. `topics` mirrors the snapshot's derived categories;
/// on load the categories are re-derived from `problems`, which is what
/// makes persist/load round-trip exactly.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    metadata: Metadata,
    problems: Vec<Problem>,
    topics: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    total_problems: usize,
    last_update: DateTime<Utc>,
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serializes the snapshot to the fixed path, creating the parent
    /// directory if needed. Overwrites any previous content in a single
    /// write call.
    pub fn persist(&self, snapshot: &CatalogueSnapshot) -> Result<(), CatalogueError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = SnapshotFile {
            metadata: Metadata {
                total_problems: snapshot.problems.len(),
                last_update: Utc::now(),
            },
            problems: snapshot.problems.clone(),
            topics: snapshot.categories.clone(),
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| CatalogueError::CorruptData(e.to_string()))?;
        fs::write(&self.path, json)?;

        info!(
            path = %self.path.display(),
            problems = snapshot.problems.len(),
            "persisted catalogue snapshot"
        );
        Ok(())
    }

    /// Reads and validates the snapshot file. `NotFound` when the file is
    /// absent, `CorruptData` when present but structurally invalid.
    pub fn load(&self) -> Result<CatalogueSnapshot, CatalogueError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(CatalogueError::NotFound),
            Err(e) => return Err(CatalogueError::Persistence(e)),
        };

        let document: SnapshotFile = serde_json::from_str(&raw)
            .map_err(|e| CatalogueError::CorruptData(e.to_string()))?;

        validate(&document)?;

        info!(
            path = %self.path.display(),
            problems = document.problems.len(),
            last_update = %document.metadata.last_update,
            "loaded catalogue snapshot"
        );
        Ok(CatalogueSnapshot::new(document.problems))
    }
}

/// Structural checks beyond what the typed parse already enforces. Never
/// re-contacts upstream; asserts the shape well-formed fetcher output has.
fn validate(document: &SnapshotFile) -> Result<(), CatalogueError> {
    if document.metadata.total_problems != document.problems.len() {
        return Err(CatalogueError::CorruptData(format!(
            "metadata says {} problems, file has {}",
            document.metadata.total_problems,
            document.problems.len()
        )));
    }

    for problem in &document.problems {
        if problem.id.is_empty() || problem.title.is_empty() || problem.slug.is_empty() {
            return Err(CatalogueError::CorruptData(format!(
                "problem '{}' is missing a required field",
                problem.id
            )));
        }
        if !problem.acceptance_rate.is_finite()
            || !(0.0..=100.0).contains(&problem.acceptance_rate)
        {
            return Err(CatalogueError::CorruptData(format!(
                "problem '{}' has acceptance rate {} outside [0, 100]",
                problem.id, problem.acceptance_rate
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::model::{test_problem, Difficulty};
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// Unique path under the system temp dir; cleaned up by the OS.
    fn temp_store() -> SnapshotStore {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "leetbot-store-test-{}-{}/data.json",
            std::process::id(),
            n
        ));
        SnapshotStore::new(path)
    }

    fn sample_snapshot() -> CatalogueSnapshot {
        CatalogueSnapshot::new(vec![
            test_problem("1", Difficulty::Easy, &["Array"]),
            test_problem("2", Difficulty::Hard, &["Array", "DP"]),
            test_problem("3", Difficulty::Medium, &["Tree"]),
        ])
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store();
        let snapshot = sample_snapshot();
        store.persist(&snapshot).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let store = temp_store();
        assert!(matches!(store.load(), Err(CatalogueError::NotFound)));
    }

    #[test]
    fn test_load_invalid_json_is_corrupt() {
        let store = temp_store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        fs::write(&store.path, "{ definitely not json").unwrap();
        assert!(matches!(store.load(), Err(CatalogueError::CorruptData(_))));
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let store = temp_store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        // Valid JSON, wrong document shape
        fs::write(&store.path, r#"{"problems": "lots"}"#).unwrap();
        assert!(matches!(store.load(), Err(CatalogueError::CorruptData(_))));
    }

    #[test]
    fn test_load_bad_difficulty_is_corrupt() {
        let store = temp_store();
        store.persist(&sample_snapshot()).unwrap();
        let raw = fs::read_to_string(&store.path).unwrap();
        fs::write(&store.path, raw.replace("\"Easy\"", "\"Trivial\"")).unwrap();
        assert!(matches!(store.load(), Err(CatalogueError::CorruptData(_))));
    }

    #[test]
    fn test_load_count_mismatch_is_corrupt() {
        let store = temp_store();
        store.persist(&sample_snapshot()).unwrap();
        let raw = fs::read_to_string(&store.path).unwrap();
        fs::write(&store.path, raw.replace("\"totalProblems\": 3", "\"totalProblems\": 7"))
            .unwrap();
        assert!(matches!(store.load(), Err(CatalogueError::CorruptData(_))));
    }

    #[test]
    fn test_load_out_of_range_acceptance_rate_is_corrupt() {
        let store = temp_store();
        store.persist(&sample_snapshot()).unwrap();
        let raw = fs::read_to_string(&store.path).unwrap();
        fs::write(&store.path, raw.replace("50.0", "150.0")).unwrap();
        assert!(matches!(store.load(), Err(CatalogueError::CorruptData(_))));
    }

    #[test]
    fn test_persist_overwrites_previous_content() {
        let store = temp_store();
        store.persist(&sample_snapshot()).unwrap();
        let smaller = CatalogueSnapshot::new(vec![test_problem("9", Difficulty::Easy, &[])]);
        store.persist(&smaller).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, smaller);
    }
}
