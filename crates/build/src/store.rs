//! Output database of normalised entries and points

// standard library
use std::path::Path;

// internal modules
use crate::error::Result;

// external crates
use log::{debug, trace};
use rusqlite::{params, Connection};
use x4tools_normalise::{Point, Projectile, Quantity, Target};

/// Output schema, created if missing
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS exfor_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS exfor_entries (
  entry_id TEXT NOT NULL,
  subentry_id TEXT NOT NULL,
  target_Z INTEGER NOT NULL,
  target_A INTEGER,
  state INTEGER NOT NULL DEFAULT 0,
  projectile TEXT NOT NULL,
  reaction TEXT,
  quantity TEXT NOT NULL,
  reference TEXT,
  year INTEGER,
  PRIMARY KEY(entry_id, subentry_id)
);
CREATE TABLE IF NOT EXISTS exfor_points (
  entry_id TEXT NOT NULL,
  subentry_id TEXT NOT NULL,
  point_index INTEGER NOT NULL,
  energy_eV REAL,
  kT_keV REAL,
  value REAL,
  uncertainty REAL,
  FOREIGN KEY(entry_id, subentry_id) REFERENCES exfor_entries(entry_id, subentry_id)
);
CREATE INDEX IF NOT EXISTS idx_exfor_entries_lookup ON exfor_entries(target_Z, target_A, state, projectile, quantity);
CREATE INDEX IF NOT EXISTS idx_exfor_points_lookup ON exfor_points(entry_id, subentry_id, point_index);
";

/// Schema version recorded in the metadata
pub const SCHEMA_VERSION: &str = "1";

/// Everything written to `exfor_entries` for one dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryRecord<'a> {
    pub entry_id: &'a str,
    /// Subentry, with `:<pointer>` appended for pointed datasets
    pub subentry_id: &'a str,
    pub target: Target,
    pub projectile: Projectile,
    pub reaction: Option<&'a str>,
    pub quantity: Quantity,
    pub reference: Option<&'a str>,
}

/// Writer for the output database
///
/// Everything is written inside a transaction that is committed on every
/// [OutputStore::checkpoint()] and on [OutputStore::finish()]. Dropping the
/// store without finishing loses anything since the last checkpoint.
#[derive(Debug)]
pub struct OutputStore {
    conn: Connection,
}

impl OutputStore {
    /// Open (or create) a database and make sure the schema exists
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        debug!("Output journal mode {mode}");

        conn.execute_batch(SCHEMA)?;
        conn.execute_batch("BEGIN;")?;
        Ok(Self { conn })
    }

    /// Commit everything so far and start a new transaction
    pub fn checkpoint(&self) -> Result<()> {
        trace!("Checkpoint commit");
        self.conn.execute_batch("COMMIT; BEGIN;")?;
        Ok(())
    }

    /// Insert a single entry, failing if it already exists
    pub fn insert_entry(&self, record: &EntryRecord) -> Result<()> {
        let mut statement = self.conn.prepare_cached(
            "INSERT INTO exfor_entries(entry_id, subentry_id, target_Z, target_A, state, projectile, reaction, quantity, reference, year) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        statement.execute(params![
            record.entry_id,
            record.subentry_id,
            record.target.z,
            record.target.a,
            record.target.state.level(),
            record.projectile.code(),
            record.reaction,
            record.quantity.code(),
            record.reference,
            None::<i64>,
        ])?;
        Ok(())
    }

    /// Insert the points belonging to an entry
    pub fn insert_points(&self, entry_id: &str, subentry_id: &str, points: &[Point]) -> Result<()> {
        let mut statement = self.conn.prepare_cached(
            "INSERT INTO exfor_points(entry_id, subentry_id, point_index, energy_eV, kT_keV, value, uncertainty) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for point in points {
            statement.execute(params![
                entry_id,
                subentry_id,
                point.index as i64,
                point.energy_ev,
                point.kt_kev,
                point.value,
                point.uncertainty,
            ])?;
        }
        Ok(())
    }

    /// Set a metadata value, replacing any previous value
    pub fn write_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO exfor_meta(key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Commit the final transaction and close the database
    pub fn finish(self) -> Result<()> {
        self.conn.execute_batch("COMMIT;")?;
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x4tools_normalise::IsomerState;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn write_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sqlite");

        let store = OutputStore::create(&path).unwrap();
        let record = EntryRecord {
            entry_id: "10001",
            subentry_id: "10001002:1",
            target: Target {
                z: 92,
                a: 235,
                state: IsomerState::Excited(1),
            },
            projectile: Projectile::Neutron,
            reaction: Some("(92-U-235-M(N,F),,SIG)"),
            quantity: Quantity::CrossSection,
            reference: None,
        };
        store.insert_entry(&record).unwrap();

        let point = Point {
            index: 3,
            energy_ev: Some(1.0),
            kt_kev: None,
            value: 2.0,
            uncertainty: None,
        };
        store.insert_points("10001", "10001002:1", &[point, point]).unwrap();
        store.checkpoint().unwrap();
        store.write_meta("schema_version", "0").unwrap();
        store.write_meta("schema_version", SCHEMA_VERSION).unwrap();

        // primary key violation
        assert!(store.insert_entry(&record).is_err());
        store.finish().unwrap();

        let conn = Connection::open(&path).unwrap();
        assert_eq!(count(&conn, "exfor_entries"), 1);
        assert_eq!(count(&conn, "exfor_points"), 2);
        assert_eq!(count(&conn, "exfor_meta"), 1);

        let (state, projectile, year): (i64, String, Option<i64>) = conn
            .query_row(
                "SELECT state, projectile, year FROM exfor_entries",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(state, 1);
        assert_eq!(projectile, "n");
        assert_eq!(year, None);
    }
}
