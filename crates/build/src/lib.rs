//! Build a normalised EXFOR SQLite database from an x4i3 index
//!
//! The x4i3 package ships an `index.tbl` SQLite index with one row per
//! reaction, alongside the full EXFOR entries. This crate reads the index,
//! loads each entry once through an [EntryLoader](x4tools_x4::EntryLoader),
//! and writes a compact database of entries and data points.
//!
//! ```text
//! exfor_meta     key, value
//! exfor_entries  entry_id, subentry_id, target_Z, target_A, state,
//!                projectile, reaction, quantity, reference, year
//! exfor_points   entry_id, subentry_id, point_index, energy_eV, kT_keV,
//!                value, uncertainty
//! ```
//!
//! Energies are in eV and temperatures in keV, see
//! [x4tools_normalise] for the details of the normalisation.
//!
//! # Quickstart example
//!
//! ```rust, no_run
//! # use x4tools_build::{build, BuildOptions};
//! # use x4tools_x4::X4Directory;
//! let options = BuildOptions {
//!     index: "/path/to/x4i3/data/index.tbl".into(),
//!     output: "exfor.sqlite".into(),
//!     limit: 500,
//!     ..Default::default()
//! };
//!
//! let loader = X4Directory::new("/path/to/x4i3/data/db");
//! let stats = build(&options, &loader).unwrap();
//!
//! println!("{stats}");
//! ```

mod driver;
mod error;
mod index;
mod options;
mod stats;
mod store;

// flatten public API and inline the documentation
#[doc(inline)]
pub use driver::{build, CHECKPOINT_ROWS};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use index::{IndexRow, IndexStore, INDEX_TABLE};

#[doc(inline)]
pub use options::{BuildOptions, TMP_SUFFIX};

#[doc(inline)]
pub use stats::BuildStats;

#[doc(inline)]
pub use store::{EntryRecord, OutputStore, SCHEMA, SCHEMA_VERSION};
