//! Loading entries by accession number

// standard library
use std::path::{Path, PathBuf};

// internal modules
use crate::entry::Entry;
use crate::error::Result;
use crate::reader::read_x4;

// external crates
use log::trace;

/// Anything that can provide a full [Entry] for an accession number
///
/// The result distinguishes between an entry that does not exist (`Ok(None)`)
/// and one that exists but could not be loaded (`Err`), since callers
/// generally count these separately.
pub trait EntryLoader {
    /// Load a single entry, e.g. `"10001"`
    fn load_entry(&self, accession: &str) -> Result<Option<Entry>>;
}

impl<L: EntryLoader + ?Sized> EntryLoader for &L {
    fn load_entry(&self, accession: &str) -> Result<Option<Entry>> {
        (**self).load_entry(accession)
    }
}

/// Directory of `.x4` files laid out the way x4i3 stores them
///
/// Entries are stored one per file under a sub-directory named after the
/// first three characters of the accession number, e.g.
/// `<root>/100/10001.x4` or `<root>/c00/C0001.x4`. A flat layout of
/// `<root>/10001.x4` is also accepted.
///
/// ```rust, no_run
/// # use x4tools_x4::{EntryLoader, X4Directory};
/// let loader = X4Directory::new("/path/to/x4i3/data/db");
///
/// if let Some(entry) = loader.load_entry("10001").unwrap() {
///     println!("{} subentries", entry.subentries.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct X4Directory {
    root: PathBuf,
}

impl X4Directory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the entry files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the file for an accession number, if one exists
    pub fn entry_path(&self, accession: &str) -> Option<PathBuf> {
        let filename = format!("{accession}.x4");
        let prefix: String = accession.chars().take(3).collect();

        [
            self.root.join(prefix.to_lowercase()).join(&filename),
            self.root.join(&prefix).join(&filename),
            self.root.join(&filename),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }
}

impl EntryLoader for X4Directory {
    fn load_entry(&self, accession: &str) -> Result<Option<Entry>> {
        let Some(path) = self.entry_path(accession) else {
            trace!("No file found for entry {accession}");
            return Ok(None);
        };

        let entry = read_x4(&path)?
            .into_iter()
            .find(|entry| entry.accession == accession);
        Ok(entry)
    }
}
