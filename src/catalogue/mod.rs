//! Problem catalogue cache: fetches the LeetCode problem list, persists it,
//! and serves random/filtered lookups with category autocomplete.
//!
//! Control flow: [`ProblemCache::initialize`] loads the persisted snapshot
//! (or fetches fresh if there is none), and [`refresh::spawn_refresh_job`]
//! re-runs the fetch → persist → load → swap path once a day. Lookups read
//! the in-memory snapshot only and never trigger I/O.

pub mod engine;
pub mod error;
pub mod fetch;
pub mod fuzzy;
pub mod model;
pub mod refresh;
pub mod store;

pub use engine::ProblemCache;
pub use error::CatalogueError;
pub use fetch::CatalogueFetcher;
pub use model::{CatalogueSnapshot, Difficulty, Problem, ProblemFilter};
pub use store::SnapshotStore;
