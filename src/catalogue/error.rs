/// Failure kinds for the problem catalogue.
///
/// Lookup misses (`random_problem` returning `None`) are deliberately not
/// errors; only I/O against the upstream API or the snapshot file is.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// HTTP transport failure, timeout, or non-success status from upstream.
    #[error("LeetCode API unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream responded, but the body doesn't have the expected shape.
    #[error("unexpected LeetCode API response: {0}")]
    UpstreamSchemaMismatch(String),

    /// Writing the snapshot file failed.
    #[error("failed to persist snapshot: {0}")]
    Persistence(#[from] std::io::Error),

    /// No snapshot file exists yet.
    #[error("no cached snapshot on disk")]
    NotFound,

    /// Snapshot file exists but fails structural validation.
    #[error("cached snapshot is corrupt: {0}")]
    CorruptData(String),
}
