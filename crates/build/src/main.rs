//! Command line tool for building the EXFOR database

// standard library
use std::path::PathBuf;

// external crates
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use x4tools_build::{build, BuildOptions};
use x4tools_x4::X4Directory;

/// Build a normalised EXFOR SQLite database from an x4i3 index
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the x4i3 index.tbl
    #[arg(long, value_name = "PATH", env = "X4TOOLS_INDEX")]
    index: PathBuf,

    /// Directory of .x4 entry files [default: <index dir>/db]
    #[arg(long, value_name = "DIR", env = "X4TOOLS_DB")]
    db_root: Option<PathBuf>,

    /// Output database path
    #[arg(long, value_name = "PATH", env = "X4TOOLS_OUTPUT", default_value = "exfor.sqlite")]
    output: PathBuf,

    /// Maximum number of index rows, 0 for a full build
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Maximum number of rows read from any one dataset
    #[arg(long, default_value_t = 5000)]
    max_points_per_dataset: usize,

    /// Also write the build statistics as JSON
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn db_root(&self) -> PathBuf {
        self.db_root.clone().unwrap_or_else(|| {
            self.index
                .parent()
                .map(|dir| dir.join("db"))
                .unwrap_or_else(|| PathBuf::from("db"))
        })
    }

    fn options(&self) -> BuildOptions {
        BuildOptions {
            index: self.index.clone(),
            output: self.output.clone(),
            limit: self.limit,
            max_points: self.max_points_per_dataset,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let loader = X4Directory::new(cli.db_root());
    info!("Reading entries from {}", loader.root().display());

    let options = cli.options();
    let stats = build(&options, &loader)
        .with_context(|| format!("failed to build {}", options.output.display()))?;

    println!(
        "done output={} entries={} points={}",
        options.output.display(),
        stats.entries_inserted,
        stats.points_inserted
    );
    println!("{stats}");

    if let Some(path) = &cli.summary_json {
        stats
            .write_json(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    Ok(())
}

/// Progress lines are at info level, so show them by default
fn init_logging(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .module(module_path!())
        .module("x4tools_build")
        .module("x4tools_x4")
        .module("x4tools_normalise")
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_module_names(cli.verbose > 1)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .context("failed to initialise logging")
}
