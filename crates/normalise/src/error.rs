//! Result and Error types for the normalisation library

/// Type alias for `Result<T, normalise::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `x4tools-normalise`
///
/// None of these are fatal to a build. They describe why a single record
/// could not be normalised so that callers can skip and count it.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Target string is not of the form `SYMBOL-MASS[-M[n]]`
    #[error("failed to parse target from \"{0}\"")]
    InvalidTarget(String),

    /// Symbol is well formed but not one of the 118 known elements
    #[error("unknown element symbol \"{0}\"")]
    UnknownElement(String),

    /// Projectile code outside of the supported vocabulary
    #[error("failed to infer projectile from \"{0}\"")]
    UnknownProjectile(String),

    /// Quantity code outside of the supported set
    #[error("unsupported quantity \"{0}\"")]
    UnsupportedQuantity(String),
}
