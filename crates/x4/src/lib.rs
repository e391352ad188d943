//! Reader for EXFOR nuclear reaction data files
//!
//! EXFOR is the exchange format used by the international network of nuclear
//! reaction data centres. Files are fixed-format 80 column records, grouped
//! into entries and subentries.
//!
//! This crate reads the structure of `.x4` files as distributed with the x4i3
//! package and flattens each measured reaction into a simple table.
//!
//! - [Entry] - A complete EXFOR entry with every [Subentry]
//! - [Dataset] - A flat table of labels, units, and rows for one reaction
//! - [EntryLoader] - Anything that can find entries by accession number
//!
//! # Quickstart example
//!
//! ```rust, no_run
//! # use x4tools_x4::{EntryLoader, X4Directory};
//! let loader = X4Directory::new("/path/to/x4i3/data/db");
//! let entry = loader.load_entry("10001").unwrap().expect("entry not found");
//!
//! for (key, dataset) in entry.simplified_datasets() {
//!     println!("{key}: {} rows, columns {:?}", dataset.len(), dataset.labels);
//! }
//! ```

mod dataset;
mod entry;
mod error;
mod loader;
mod parsers;
mod reader;
mod scalar;

// flatten public API and inline the documentation
#[doc(inline)]
pub use dataset::{Dataset, DatasetKey, DatasetMap, BLANK_POINTER};

#[doc(inline)]
pub use entry::{Column, Entry, Reaction, Section, Subentry};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use loader::{EntryLoader, X4Directory};

#[doc(inline)]
pub use reader::{parse_x4, read_x4};

#[doc(inline)]
pub use scalar::Scalar;
