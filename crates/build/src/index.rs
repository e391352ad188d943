//! Read-only access to the x4i3 index of EXFOR reactions

// standard library
use std::format as f;
use std::path::Path;

// internal modules
use crate::error::{Error, Result};

// external crates
use log::debug;
use rusqlite::{Connection, OpenFlags, Row};
use x4tools_normalise::{Projectile, Quantity};
use x4tools_x4::BLANK_POINTER;

/// Name of the index table holding one row per reaction
pub const INDEX_TABLE: &str = "theworks";

/// A single candidate row of the index
///
/// Only the entry and subentry are guaranteed. Everything else is taken as
/// found and validated later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRow {
    /// Entry accession number, e.g. `10001`
    pub entry: String,
    /// Subentry accession number, e.g. `10001002`
    pub subentry: String,
    /// Pointer within the subentry, usually blank
    pub pointer: Option<String>,
    /// Target code, e.g. `FE-56`
    pub target: Option<String>,
    /// Projectile code, e.g. `N`
    pub projectile: Option<String>,
    /// Full reaction string
    pub reaction: Option<String>,
    /// Quantity code, e.g. `SIG`
    pub quantity: Option<String>,
    /// First author or reference
    pub author: Option<String>,
}

impl IndexRow {
    /// Pointer trimmed of whitespace, or the blank pointer if there is none
    ///
    /// ```rust
    /// # use x4tools_build::IndexRow;
    /// let mut row = IndexRow::default();
    /// assert_eq!(row.pointer(), " ");
    ///
    /// row.pointer = Some(" 2 ".into());
    /// assert_eq!(row.pointer(), "2");
    /// ```
    pub fn pointer(&self) -> String {
        match self.pointer.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => BLANK_POINTER.to_string(),
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            entry: row.get(0)?,
            subentry: row.get(1)?,
            pointer: row.get(2)?,
            target: row.get(3)?,
            projectile: row.get(4)?,
            reaction: row.get(5)?,
            quantity: row.get(6)?,
            author: row.get(7)?,
        })
    }
}

/// Read-only connection to an x4i3 `index.tbl`
#[derive(Debug)]
pub struct IndexStore {
    conn: Connection,
}

impl IndexStore {
    /// Open an existing index without ever modifying it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::IndexNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened index {}", path.display());
        Ok(Self { conn })
    }

    /// Total number of rows with a supported quantity and projectile
    pub fn count_candidates(&self) -> Result<usize> {
        let query = f!("SELECT COUNT(*) FROM {INDEX_TABLE} WHERE {}", candidate_filter());
        let count: i64 = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Visit candidate rows in `(entry, subentry, pointer)` order
    ///
    /// At most `limit` rows are visited, or every candidate if the limit is
    /// zero. Stops at the first error returned by the visitor.
    pub fn for_each_candidate<F>(&self, limit: usize, mut visit: F) -> Result<()>
    where
        F: FnMut(IndexRow) -> Result<()>,
    {
        let mut statement = self.conn.prepare(&candidate_query(limit))?;
        let mut rows = statement.query([])?;

        while let Some(row) = rows.next()? {
            visit(IndexRow::from_row(row)?)?;
        }
        Ok(())
    }
}

/// Row query for every candidate, optionally limited
fn candidate_query(limit: usize) -> String {
    let mut query = f!(
        "SELECT entry, subent, pointer, target, projectile, reaction, quantity, author \
         FROM {INDEX_TABLE} WHERE {} ORDER BY entry, subent, pointer",
        candidate_filter()
    );
    if limit > 0 {
        query += &f!(" LIMIT {limit}");
    }
    query
}

/// Restrict to the supported quantities and projectiles
fn candidate_filter() -> String {
    f!(
        "quantity IN ({}) AND projectile IN ({})",
        sql_list(&Quantity::EXFOR_CODES),
        sql_list(&Projectile::EXFOR_CODES)
    )
}

fn sql_list(codes: &[&str]) -> String {
    codes
        .iter()
        .map(|code| f!("'{code}'"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_text() {
        assert_eq!(
            candidate_filter(),
            "quantity IN ('SIG','DA','DE','FY','MACS') AND projectile IN ('N','P','G','D','A','HE3','H')"
        );
        assert!(candidate_query(0).ends_with("ORDER BY entry, subent, pointer"));
        assert!(candidate_query(25).ends_with("ORDER BY entry, subent, pointer LIMIT 25"));
    }

    #[test]
    fn blank_pointers() {
        let mut row = IndexRow {
            pointer: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(row.pointer(), BLANK_POINTER);

        row.pointer = None;
        assert_eq!(row.pointer(), BLANK_POINTER);

        row.pointer = Some("A".to_string());
        assert_eq!(row.pointer(), "A");
    }
}
