//! In-memory query engine over the current catalogue snapshot, plus the
//! refresh path that replaces it.

use super::error::CatalogueError;
use super::fetch::CatalogueFetcher;
use super::fuzzy::{CategoryIndex, MAX_SUGGESTIONS};
use super::model::{CatalogueSnapshot, Problem, ProblemFilter};
use super::store::SnapshotStore;
use rand::seq::IndexedRandom;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Snapshot plus its derived index; always swapped as a unit so the index
/// can never describe a different snapshot than the one being served.
struct CacheState {
    snapshot: CatalogueSnapshot,
    index: CategoryIndex,
}

/// Process-wide problem cache. Reads are synchronous in-memory lookups;
/// only the refresh path does I/O.
pub struct ProblemCache {
    state: RwLock<Arc<CacheState>>,
    refresh_gate: tokio::sync::Mutex<()>,
    fetcher: CatalogueFetcher,
    store: SnapshotStore,
}

impl ProblemCache {
    /// Creates an empty cache; call [`initialize`](Self::initialize) to
    /// populate it from disk or upstream.
    pub fn new(fetcher: CatalogueFetcher, store: SnapshotStore) -> Self {
        let empty = CatalogueSnapshot::empty();
        let index = CategoryIndex::build(&empty.categories);
        Self {
            state: RwLock::new(Arc::new(CacheState {
                snapshot: empty,
                index,
            })),
            refresh_gate: tokio::sync::Mutex::new(()),
            fetcher,
            store,
        }
    }

    fn current(&self) -> Arc<CacheState> {
        self.state.read().expect("cache lock poisoned").clone()
    }

    /// Atomically installs a new snapshot. The index is built before the
    /// reference is rebound, so concurrent readers observe either the old
    /// or the new state in full.
    pub fn swap(&self, snapshot: CatalogueSnapshot) {
        let index = CategoryIndex::build(&snapshot.categories);
        let next = Arc::new(CacheState { snapshot, index });
        *self.state.write().expect("cache lock poisoned") = next;
    }

    /// Number of problems in the current snapshot.
    pub fn size(&self) -> usize {
        self.current().snapshot.problems.len()
    }

    /// Uniformly random problem among those matching `filter`. `None` when
    /// the snapshot is empty or nothing matches; that is not an error and
    /// callers decide how to react.
    pub fn random_problem(&self, filter: &ProblemFilter) -> Option<Problem> {
        let state = self.current();
        let matches: Vec<&Problem> = state
            .snapshot
            .problems
            .iter()
            .filter(|p| filter.matches(p))
            .collect();
        matches.choose(&mut rand::rng()).map(|p| (*p).clone())
    }

    /// Ranked category suggestions for autocomplete, capped at 25. Empty
    /// when no snapshot has ever been installed.
    pub fn search_categories(&self, query: &str) -> Vec<String> {
        self.current().index.search(query, MAX_SUGGESTIONS)
    }

    /// Startup path: serve the persisted snapshot if it validates, otherwise
    /// go straight to a full refresh. Never fatal; on total failure the
    /// cache stays empty and lookups return `None` until the next refresh.
    pub async fn initialize(&self) {
        match self.store.load() {
            Ok(snapshot) => {
                info!(problems = snapshot.problems.len(), "serving persisted catalogue");
                self.swap(snapshot);
            }
            Err(CatalogueError::NotFound) => {
                info!("no persisted catalogue, running initial refresh");
                if let Err(e) = self.force_refresh().await {
                    warn!("initial catalogue refresh failed, starting empty: {e}");
                }
            }
            Err(e) => {
                warn!("persisted catalogue unusable ({e}), running initial refresh");
                if let Err(e) = self.force_refresh().await {
                    warn!("initial catalogue refresh failed, starting empty: {e}");
                }
            }
        }
    }

    /// Full refresh: fetch upstream, persist, reload the persisted copy and
    /// swap it in. The reload means every served snapshot has passed the
    /// store's validation. Any failure leaves the current snapshot serving
    /// untouched. The gate serializes overlapping refresh triggers.
    pub async fn force_refresh(&self) -> Result<usize, CatalogueError> {
        let _gate = self.refresh_gate.lock().await;

        let problems = self.fetcher.fetch().await?;
        let snapshot = CatalogueSnapshot::new(problems);
        self.store.persist(&snapshot)?;
        let validated = self.store.load()?;

        let count = validated.problems.len();
        self.swap(validated);
        info!(problems = count, "catalogue refresh complete");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::model::{test_problem, Difficulty};
    use std::collections::HashSet;
    use std::time::Duration;

    /// Engine wired to an endpoint that refuses connections, so refresh
    /// attempts fail fast without touching the network.
    fn offline_cache() -> ProblemCache {
        let fetcher = CatalogueFetcher::new("http://127.0.0.1:9/", Duration::from_secs(1));
        let path = std::env::temp_dir().join(format!(
            "leetbot-engine-test-{}-{:?}/data.json",
            std::process::id(),
            std::thread::current().id()
        ));
        ProblemCache::new(fetcher, SnapshotStore::new(path))
    }

    fn sample_snapshot() -> CatalogueSnapshot {
        CatalogueSnapshot::new(vec![
            test_problem("1", Difficulty::Easy, &["Array"]),
            test_problem("2", Difficulty::Hard, &["Array", "DP"]),
            test_problem("3", Difficulty::Easy, &["Tree"]),
        ])
    }

    #[test]
    fn test_empty_cache_serves_nothing() {
        let cache = offline_cache();
        assert_eq!(cache.size(), 0);
        assert!(cache.random_problem(&ProblemFilter::default()).is_none());
        assert!(cache.search_categories("").is_empty());
        assert!(cache.search_categories("array").is_empty());
    }

    #[test]
    fn test_swap_installs_snapshot_and_index() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        assert_eq!(cache.size(), 3);
        assert_eq!(cache.search_categories(""), vec!["Array", "DP", "Tree"]);
    }

    #[test]
    fn test_random_problem_respects_difficulty_filter() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        let filter = ProblemFilter {
            difficulty: Some(Difficulty::Easy),
            category: None,
        };
        for _ in 0..50 {
            let p = cache.random_problem(&filter).unwrap();
            assert!(p.id == "1" || p.id == "3", "got non-easy problem {}", p.id);
        }
    }

    #[test]
    fn test_random_problem_respects_category_filter_case_insensitively() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        let filter = ProblemFilter {
            difficulty: None,
            category: Some("dp".to_string()),
        };
        for _ in 0..20 {
            assert_eq!(cache.random_problem(&filter).unwrap().id, "2");
        }
    }

    #[test]
    fn test_random_problem_combined_filter() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        let filter = ProblemFilter {
            difficulty: Some(Difficulty::Easy),
            category: Some("array".to_string()),
        };
        for _ in 0..20 {
            assert_eq!(cache.random_problem(&filter).unwrap().id, "1");
        }
    }

    #[test]
    fn test_no_match_returns_none() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        let filter = ProblemFilter {
            difficulty: Some(Difficulty::Medium),
            category: None,
        };
        assert!(cache.random_problem(&filter).is_none());

        let filter = ProblemFilter {
            difficulty: Some(Difficulty::Hard),
            category: Some("tree".to_string()),
        };
        assert!(cache.random_problem(&filter).is_none());
    }

    #[test]
    fn test_unfiltered_selection_reaches_every_problem() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(cache.random_problem(&ProblemFilter::default()).unwrap().id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_snapshot() {
        let cache = offline_cache();
        cache.swap(sample_snapshot());

        let before_size = cache.size();
        let before_categories = cache.search_categories("");

        let result = cache.force_refresh().await;
        assert!(matches!(
            result,
            Err(CatalogueError::UpstreamUnavailable(_))
        ));

        assert_eq!(cache.size(), before_size);
        assert_eq!(cache.search_categories(""), before_categories);
        assert!(cache
            .random_problem(&ProblemFilter::default())
            .is_some());
    }

    #[tokio::test]
    async fn test_initialize_with_no_file_and_no_upstream_starts_empty() {
        let cache = offline_cache();
        cache.initialize().await;
        assert_eq!(cache.size(), 0);
    }
}
