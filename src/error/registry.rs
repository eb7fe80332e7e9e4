use std::io;

use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failures of the credential registry's backing store.
///
/// Duplicate adds and missing removals are NOT errors; they are
/// reported as structured outcomes (`AddOutcome`, `RemoveOutcome`).
/// Everything here means the store itself misbehaved.
#[derive(Debug, Error)]
pub enum RegistryError {
    // ==== System / External ====
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    // ==== General ====
    #[error("internal error: {0}")]
    Internal(String),
}
