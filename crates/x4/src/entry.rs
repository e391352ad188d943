//! Core EXFOR data structures

// standard library
use std::collections::BTreeSet;

// internal modules
use crate::dataset::{Dataset, DatasetKey, DatasetMap, BLANK_POINTER};
use crate::scalar::Scalar;

// external crates
use serde::{Deserialize, Serialize};

/// A complete EXFOR entry
///
/// An entry is one experimental work, split into subentries. The first
/// subentry (`001`) holds bibliographic information and any COMMON values that
/// apply to every other subentry. The remaining subentries each hold one or
/// more measured reactions.
///
/// The raw structure is rarely what anyone wants to work with. See
/// [Entry::simplified_datasets()] for flat tables of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry accession number, e.g. `10001`
    pub accession: String,
    /// All subentries in file order, including `001`
    pub subentries: Vec<Subentry>,
}

/// One subentry of an [Entry]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subentry {
    /// Full subentry accession number, e.g. `10001002`
    pub accession: String,
    /// REACTION strings found in the BIB section
    pub reactions: Vec<Reaction>,
    /// COMMON section, if present
    pub common: Option<Section>,
    /// DATA section, if present
    pub data: Option<Section>,
}

/// A REACTION keyword and its pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Pointer character, blank if the subentry has a single reaction
    pub pointer: char,
    /// Full reaction text with continuation lines joined
    pub text: String,
}

/// A COMMON or DATA table as written in the file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Scalar>>,
}

/// Heading and unit for a single column of a [Section]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Heading with the pointer removed, e.g. `DATA-ERR`
    pub label: String,
    /// Pointer character from column 11 of the heading field
    pub pointer: char,
    /// Unit, e.g. `MEV`
    pub unit: String,
}

impl Column {
    /// True if the column belongs to every pointer, or to this one
    fn applies_to(&self, pointer: char) -> bool {
        self.pointer == ' ' || self.pointer == pointer
    }
}

impl Subentry {
    /// Last three digits of the accession number
    pub fn number(&self) -> &str {
        let start = self.accession.len().saturating_sub(3);
        self.accession.get(start..).unwrap_or_default()
    }

    /// The bibliographic `001` subentry
    pub fn is_common(&self) -> bool {
        self.number() == "001"
    }

    /// All pointers used by the reactions and data headings
    ///
    /// Falls back to the blank pointer if nothing in the subentry is pointed.
    pub fn pointers(&self) -> Vec<char> {
        let mut pointers: BTreeSet<char> = self
            .reactions
            .iter()
            .map(|r| r.pointer)
            .chain(self.data.iter().flat_map(|d| d.columns.iter().map(|c| c.pointer)))
            .filter(|p| *p != ' ')
            .collect();

        if pointers.is_empty() {
            pointers.insert(' ');
        }
        pointers.into_iter().collect()
    }

    /// Reaction text for a pointer, or the only reaction if not pointed
    pub fn reaction(&self, pointer: char) -> Option<&str> {
        self.reactions
            .iter()
            .find(|r| r.pointer == pointer)
            .or_else(|| self.reactions.first())
            .map(|r| r.text.as_str())
    }
}

impl Entry {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            subentries: Vec::new(),
        }
    }

    /// Find a subentry by its full accession number
    pub fn subentry(&self, accession: &str) -> Option<&Subentry> {
        self.subentries.iter().find(|s| s.accession == accession)
    }

    /// Flat tables of values for every subentry and pointer
    ///
    /// Every data subentry produces one [Dataset] per pointer, keyed by
    /// `(entry, subentry, pointer)`. Subentries without pointers are keyed with
    /// the [BLANK_POINTER].
    ///
    /// All columns are materialised, so the COMMON values from the `001`
    /// subentry and from the subentry itself are repeated at the start of every
    /// row, followed by the DATA columns belonging to that pointer.
    ///
    /// ```rust
    /// # use x4tools_x4::{Entry, DatasetKey};
    /// # fn example(entry: Entry) {
    /// let datasets = entry.simplified_datasets();
    ///
    /// if let Some(dataset) = datasets.get(&DatasetKey::new("10001", "10001002", " ")) {
    ///     println!("{:?}", dataset.labels);
    /// }
    /// # }
    /// ```
    pub fn simplified_datasets(&self) -> DatasetMap {
        let shared_common = self
            .subentries
            .iter()
            .find(|s| s.is_common())
            .and_then(|s| s.common.as_ref());

        let mut datasets = DatasetMap::new();

        for subentry in self.subentries.iter().filter(|s| !s.is_common()) {
            let Some(data) = &subentry.data else {
                continue;
            };

            for pointer in subentry.pointers() {
                let commons = [shared_common, subentry.common.as_ref()];
                let dataset = materialise(pointer, commons.into_iter().flatten(), data);

                let pointer = match pointer {
                    ' ' => BLANK_POINTER.to_string(),
                    p => p.to_string(),
                };

                datasets.insert(
                    DatasetKey::new(&self.accession, &subentry.accession, pointer),
                    dataset,
                );
            }
        }

        datasets
    }
}

/// Join COMMON values and DATA columns for a single pointer
fn materialise<'a>(
    pointer: char,
    commons: impl Iterator<Item = &'a Section>,
    data: &Section,
) -> Dataset {
    let mut labels = Vec::new();
    let mut units = Vec::new();
    let mut prefix = Vec::new();

    // COMMON sections hold a single row of constants
    for common in commons {
        let first_row = common.rows.first();
        for (i, column) in common.columns.iter().enumerate() {
            if !column.applies_to(pointer) {
                continue;
            }
            labels.push(column.label.clone());
            units.push(column.unit.clone());
            prefix.push(first_row.and_then(|r| r.get(i)).cloned().unwrap_or_default());
        }
    }

    let selected: Vec<usize> = data
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.applies_to(pointer))
        .map(|(i, _)| i)
        .collect();

    for &i in &selected {
        labels.push(data.columns[i].label.clone());
        units.push(data.columns[i].unit.clone());
    }

    let rows = data
        .rows
        .iter()
        .map(|row| {
            let mut values = prefix.clone();
            values.extend(selected.iter().map(|&i| row.get(i).cloned().unwrap_or_default()));
            values
        })
        .collect();

    Dataset::new(labels, units, rows)
}
