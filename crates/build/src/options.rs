//! Settings for a single database build

// standard library
use std::path::{Path, PathBuf};

/// Suffix appended to the output path while a build is in progress
pub const TMP_SUFFIX: &str = ".tmp.build";

/// Settings for a single build
///
/// The defaults mirror the command line defaults of `x4build`.
///
/// ```rust
/// # use x4tools_build::BuildOptions;
/// let options = BuildOptions {
///     index: "x4i3/data/index.tbl".into(),
///     limit: 1000,
///     ..Default::default()
/// };
///
/// assert_eq!(options.max_points, 5000);
/// assert_eq!(options.source_description(), "x4i3 index.tbl limit=1000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// x4i3 `index.tbl` SQLite file
    pub index: PathBuf,
    /// Final location of the output database
    pub output: PathBuf,
    /// Maximum number of candidate index rows, 0 for all of them
    pub limit: usize,
    /// Maximum number of rows considered from any one dataset
    pub max_points: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            index: PathBuf::from("index.tbl"),
            output: PathBuf::from("exfor.sqlite"),
            limit: 0,
            max_points: 5000,
        }
    }
}

impl BuildOptions {
    /// Path the database is written to before being moved into place
    ///
    /// ```rust
    /// # use x4tools_build::BuildOptions;
    /// # use std::path::Path;
    /// let options = BuildOptions {
    ///     output: "data/exfor.sqlite".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(options.tmp_output(), Path::new("data/exfor.sqlite.tmp.build"));
    /// ```
    pub fn tmp_output(&self) -> PathBuf {
        with_suffix(&self.output, TMP_SUFFIX)
    }

    /// Description of the build recorded in the `source` metadata
    pub fn source_description(&self) -> String {
        match self.limit {
            0 => "x4i3 index.tbl full".to_string(),
            n => format!("x4i3 index.tbl limit={n}"),
        }
    }

    /// Number of candidate rows the build will consider out of `total`
    pub fn candidate_rows(&self, total: usize) -> usize {
        match self.limit {
            0 => total,
            n => n.min(total),
        }
    }
}

/// Append to a file name without touching any existing extension
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
