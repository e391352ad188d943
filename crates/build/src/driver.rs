//! Single pass build of the output database from the index

// standard library
use std::collections::{HashMap, HashSet};
use std::format as f;
use std::path::Path;

// internal modules
use crate::error::{Error, Result};
use crate::index::{IndexRow, IndexStore};
use crate::options::{with_suffix, BuildOptions};
use crate::stats::BuildStats;
use crate::store::{EntryRecord, OutputStore, SCHEMA_VERSION};

// external crates
use log::{debug, info, trace, warn};
use x4tools_normalise::{extract_points, Error as NormaliseError, Projectile, Quantity, Target};
use x4tools_x4::{DatasetKey, DatasetMap, EntryLoader, BLANK_POINTER};

/// Number of index rows between checkpoint commits
pub const CHECKPOINT_ROWS: usize = 20_000;

/// Build the output database described by `options`
///
/// Candidate rows are read from the index in `(entry, subentry, pointer)`
/// order and grouped by entry, so that every entry is loaded only once.
/// Rows that cannot be normalised are skipped and counted.
///
/// The database is written to [BuildOptions::tmp_output()] and only moved
/// over the final output once everything has been committed, so a failed
/// build never touches an existing output.
///
/// ```rust, no_run
/// # use x4tools_build::{build, BuildOptions};
/// # use x4tools_x4::X4Directory;
/// let options = BuildOptions {
///     index: "x4i3/data/index.tbl".into(),
///     output: "exfor.sqlite".into(),
///     ..Default::default()
/// };
///
/// let stats = build(&options, &X4Directory::new("x4i3/data/db")).unwrap();
/// println!("{stats}");
/// ```
pub fn build<L: EntryLoader>(options: &BuildOptions, loader: &L) -> Result<BuildStats> {
    if options.output.as_os_str().is_empty() || options.output == options.index {
        return Err(Error::InvalidOutput(options.output.clone()));
    }

    let index = IndexStore::open(&options.index)?;
    let total = index.count_candidates()?;
    info!("{total} candidate rows in {}", options.index.display());

    let tmp_output = options.tmp_output();
    prepare_output(&tmp_output)?;
    let store = OutputStore::create(&tmp_output)?;

    let mut builder = Builder::new(&store, loader, options.max_points);
    builder.stats.candidate_rows = options.candidate_rows(total);
    index.for_each_candidate(options.limit, |row| builder.push(row))?;
    let stats = builder.finish()?;

    store.write_meta("schema_version", SCHEMA_VERSION)?;
    store.write_meta("built_at", &chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())?;
    store.write_meta("source", &options.source_description())?;
    store.write_meta("candidate_rows", &stats.candidate_rows.to_string())?;
    store.finish()?;

    std::fs::rename(&tmp_output, &options.output)?;
    debug!("Moved {} to {}", tmp_output.display(), options.output.display());

    Ok(stats)
}

/// Clear out anything left behind by an earlier failed build
fn prepare_output(tmp_output: &Path) -> Result<()> {
    if let Some(parent) = tmp_output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    for path in [
        tmp_output.to_path_buf(),
        with_suffix(tmp_output, "-wal"),
        with_suffix(tmp_output, "-shm"),
    ] {
        if path.exists() {
            warn!("Removing stale {}", path.display());
            std::fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Accumulates index rows by entry and writes them out
struct Builder<'a, L> {
    store: &'a OutputStore,
    loader: &'a L,
    max_points: usize,
    /// Rows of the entry currently being accumulated
    pending: Vec<IndexRow>,
    /// `(entry_id, subentry_id)` pairs already written
    written: HashSet<(String, String)>,
    stats: BuildStats,
}

// ! Internal API
impl<'a, L: EntryLoader> Builder<'a, L> {
    fn new(store: &'a OutputStore, loader: &'a L, max_points: usize) -> Self {
        Self {
            store,
            loader,
            max_points,
            pending: Vec::new(),
            written: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    /// Take the next index row, writing out the previous entry when it changes
    fn push(&mut self, row: IndexRow) -> Result<()> {
        self.stats.rows_processed += 1;

        if self.pending.first().is_some_and(|first| first.entry != row.entry) {
            self.flush()?;
        }
        self.pending.push(row);

        if self.stats.rows_processed % CHECKPOINT_ROWS == 0 {
            self.store.checkpoint()?;
            info!(
                "rows={} entries={} points={}",
                self.stats.rows_processed, self.stats.entries_inserted, self.stats.points_inserted
            );
        }
        Ok(())
    }

    /// Write out the last entry and hand back the counters
    fn finish(mut self) -> Result<BuildStats> {
        self.flush()?;
        Ok(self.stats)
    }

    /// Load the pending entry and write every row that can be normalised
    fn flush(&mut self) -> Result<()> {
        let rows = std::mem::take(&mut self.pending);
        let Some(entry_id) = rows.first().map(|row| row.entry.as_str()) else {
            return Ok(());
        };

        let entry = match self.loader.load_entry(entry_id) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("Entry {entry_id} not found");
                self.stats.missing_entries += 1;
                return Ok(());
            }
            Err(e) => {
                warn!("Failed to load entry {entry_id}: {e}");
                self.stats.entry_load_errors += 1;
                return Ok(());
            }
        };

        let datasets = entry.simplified_datasets();

        // first dataset of each subentry, for rows with an unknown pointer
        let mut by_subentry: HashMap<&str, &DatasetKey> = HashMap::new();
        for key in datasets.keys() {
            by_subentry.entry(key.subentry.as_str()).or_insert(key);
        }

        for row in &rows {
            self.write_row(row, &datasets, &by_subentry)?;
        }
        Ok(())
    }

    /// Normalise a single index row and write it if it is new
    fn write_row(
        &mut self,
        row: &IndexRow,
        datasets: &DatasetMap,
        by_subentry: &HashMap<&str, &DatasetKey>,
    ) -> Result<()> {
        let target = match row.target.as_deref().map(str::parse::<Target>) {
            Some(Ok(target)) => Some(target),
            Some(Err(e @ NormaliseError::UnknownElement(_))) => {
                warn!("{}: {e}", row.subentry);
                None
            }
            _ => None,
        };
        let quantity = row.quantity.as_deref().and_then(|q| q.parse::<Quantity>().ok());
        let (Some(target), Some(quantity)) = (target, quantity) else {
            trace!("Skipping {} {:?} {:?}", row.subentry, row.target, row.quantity);
            self.stats.skipped_non_nuclide_or_quantity += 1;
            return Ok(());
        };

        let Some(projectile) = row.projectile.as_deref().and_then(|p| p.parse::<Projectile>().ok())
        else {
            trace!("Skipping {} projectile {:?}", row.subentry, row.projectile);
            self.stats.skipped_projectile += 1;
            return Ok(());
        };

        let pointer = row.pointer();
        let key = DatasetKey::new(&row.entry, &row.subentry, &pointer);
        let dataset = datasets.get(&key).or_else(|| {
            by_subentry
                .get(row.subentry.as_str())
                .and_then(|fallback| datasets.get(*fallback))
        });

        let Some(dataset) = dataset else {
            debug!("No dataset for {key}");
            self.stats.missing_dataset += 1;
            return Ok(());
        };

        let points = extract_points(dataset, quantity, self.max_points);
        if points.is_empty() {
            debug!("No usable points in {key}");
            self.stats.empty_points += 1;
            return Ok(());
        }

        let subentry_id = match pointer.as_str() {
            BLANK_POINTER => row.subentry.clone(),
            p => f!("{}:{p}", row.subentry),
        };

        if !self.written.insert((row.entry.clone(), subentry_id.clone())) {
            trace!("Already written {}/{subentry_id}", row.entry);
            return Ok(());
        }

        self.store.insert_entry(&EntryRecord {
            entry_id: &row.entry,
            subentry_id: &subentry_id,
            target,
            projectile,
            reaction: row.reaction.as_deref(),
            quantity,
            reference: row.author.as_deref(),
        })?;
        self.store.insert_points(&row.entry, &subentry_id, &points)?;

        self.stats.entries_inserted += 1;
        self.stats.points_inserted += points.len();
        Ok(())
    }
}
