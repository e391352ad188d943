//! Counters collected over a build

// standard library
use std::format as f;
use std::path::Path;

// internal modules
use crate::error::Result;

// external crates
use serde::{Deserialize, Serialize};

/// Named counters for everything written or skipped during a build
///
/// No record failure stops a build, so these are the only indication of how
/// much of the index made it into the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Rows matching the candidate filter, capped by any limit
    pub candidate_rows: usize,
    /// Index rows visited
    pub rows_processed: usize,
    /// Entries with no record available from the loader
    pub missing_entries: usize,
    /// Entries whose record could not be loaded
    pub entry_load_errors: usize,
    /// Rows with an unusable target or an unsupported quantity
    pub skipped_non_nuclide_or_quantity: usize,
    /// Rows with an unknown projectile
    pub skipped_projectile: usize,
    /// Rows with no matching dataset in the entry
    pub missing_dataset: usize,
    /// Rows whose dataset produced no points
    pub empty_points: usize,
    /// Rows written to `exfor_entries`
    pub entries_inserted: usize,
    /// Rows written to `exfor_points`
    pub points_inserted: usize,
}

impl BuildStats {
    /// Total number of index rows skipped for any reason
    ///
    /// Entry-level failures skip every row of the entry but are counted once,
    /// so this is a lower bound on skipped rows.
    pub fn skipped(&self) -> usize {
        self.missing_entries
            + self.entry_load_errors
            + self.skipped_non_nuclide_or_quantity
            + self.skipped_projectile
            + self.missing_dataset
            + self.empty_points
    }

    /// Write the counters to a pretty-printed JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl std::fmt::Display for BuildStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Build statistics\n".to_string();
        s += &f!("  Candidate rows       {}\n", self.candidate_rows);
        s += &f!("  Rows processed       {}\n", self.rows_processed);
        s += &f!("  Entries inserted     {}\n", self.entries_inserted);
        s += &f!("  Points inserted      {}\n", self.points_inserted);
        s += "Skipped\n";
        s += &f!("  Missing entries      {}\n", self.missing_entries);
        s += &f!("  Entry load errors    {}\n", self.entry_load_errors);
        s += &f!("  Nuclide or quantity  {}\n", self.skipped_non_nuclide_or_quantity);
        s += &f!("  Projectile           {}\n", self.skipped_projectile);
        s += &f!("  Missing dataset      {}\n", self.missing_dataset);
        s += &f!("  Empty points         {}", self.empty_points);
        write!(f, "{s}")
    }
}
