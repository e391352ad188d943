//! Result and Error types for the database build

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, build::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `x4tools-build`
///
/// Everything here is fatal to a build. Problems with individual records are
/// counted in the [BuildStats](crate::BuildStats) instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure in either the index or the output database
    #[error("SQLite operation failed")]
    Sqlite(#[from] rusqlite::Error),

    /// Failure to serialise the summary
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Index file does not exist
    #[error("index \"{0}\" not found")]
    IndexNotFound(PathBuf),

    /// Output path is empty or the same as the index
    #[error("invalid output path \"{0}\"")]
    InvalidOutput(PathBuf),
}
