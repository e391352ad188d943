//! Raw cell values held by a dataset

// external crates
use serde::{Deserialize, Serialize};

/// A single cell of a dataset row
///
/// EXFOR data fields are mostly numbers, but blank fields and the odd piece of
/// free text do turn up. The reader keeps whatever it found rather than
/// guessing, and leaves interpretation to the caller.
///
/// ```rust
/// # use x4tools_x4::Scalar;
/// assert_eq!(Scalar::from(2.5), Scalar::Number(2.5));
/// assert_eq!(Scalar::from("NA"), Scalar::Text("NA".to_string()));
/// assert_eq!(Scalar::from(None::<f64>), Scalar::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Blank field
    #[default]
    Null,
    /// Anything that parsed as a floating point number
    Number(f64),
    /// Anything else, trimmed
    Text(String),
}

impl Scalar {
    /// True for the [Scalar::Null] variant
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<Option<f64>> for Scalar {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Scalar::Null, Scalar::Number)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "none"),
            Scalar::Number(value) => write!(f, "{value}"),
            Scalar::Text(text) => write!(f, "{text}"),
        }
    }
}
