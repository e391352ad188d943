//! Result and Error types for the EXFOR reader

/// Type alias for `Result<T, x4::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `x4tools-x4` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("parser failed on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("unexpected keyword on line {line} (expected {expected:?}, found {found:?})")]
    UnexpectedKeyword {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("reached end of file inside {0}")]
    UnexpectedEndOfFile(String),

    #[error("{section} section on line {line} is missing its headings or units")]
    IncompleteSection { section: String, line: usize },
}
