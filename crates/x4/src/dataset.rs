//! Simplified per-pointer datasets

// standard library
use std::collections::BTreeMap;

// internal modules
use crate::scalar::Scalar;

// external crates
use serde::{Deserialize, Serialize};

/// Pointer used for datasets that do not carry one
pub const BLANK_POINTER: &str = " ";

/// Ordered collection of every simplified dataset in an entry
pub type DatasetMap = BTreeMap<DatasetKey, Dataset>;

/// Identifies a dataset by `(entry, subentry, pointer)`
///
/// The pointer is a single character, or [BLANK_POINTER] for subentries
/// containing a single reaction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetKey {
    /// Entry accession number, e.g. `10001`
    pub entry: String,
    /// Subentry accession number, e.g. `10001002`
    pub subentry: String,
    /// Pointer character or [BLANK_POINTER]
    pub pointer: String,
}

impl DatasetKey {
    /// Convenience constructor from anything string-like
    pub fn new(entry: impl Into<String>, subentry: impl Into<String>, pointer: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            subentry: subentry.into(),
            pointer: pointer.into(),
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}[{}]", self.entry, self.subentry, self.pointer)
    }
}

/// A single table of measured values with every column materialised
///
/// Labels and units are parallel sequences, one per column. Rows are stored in
/// file order and every row has one cell per column, with COMMON values
/// already repeated into each row.
///
/// ```rust
/// # use x4tools_x4::{Dataset, Scalar};
/// let dataset = Dataset::new(
///     vec!["EN".into(), "DATA".into()],
///     vec!["MEV".into(), "B".into()],
///     vec![vec![Scalar::from(1.0), Scalar::from(2.5)]],
/// );
///
/// assert_eq!(dataset.column("DATA"), Some(1));
/// assert_eq!(dataset.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column headings without their pointer character
    pub labels: Vec<String>,
    /// Units for each column
    pub units: Vec<String>,
    /// Row data
    pub data: Vec<Vec<Scalar>>,
}

impl Dataset {
    pub fn new(labels: Vec<String>, units: Vec<String>, data: Vec<Vec<Scalar>>) -> Self {
        Self {
            labels,
            units,
            data,
        }
    }

    /// Index of the first column with exactly this label
    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if there are no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
