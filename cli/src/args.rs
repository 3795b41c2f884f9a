use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "prunestack",
    bin_name = "prunestack",
    about = "Remove test framework and runtime frames from a stack trace"
)]
pub struct Args {
    /// File containing the stack trace, or `-` for stdin.
    pub path: Option<PathBuf>,

    /// Number of frames to skip after the frame that produced the trace.
    #[clap(long, default_value_t = 0)]
    pub skip: usize,

    /// Built-in denylist to start from.
    #[clap(long, value_enum, default_value_t = Preset::Go)]
    pub preset: Preset,

    /// JSON file with a list of `{ "category": ..., "pattern": ... }` entries.
    /// Replaces the preset unless `--extend` is given.
    #[clap(long)]
    pub denylist: Option<PathBuf>,

    /// Add the entries from `--denylist` to the preset instead of replacing it.
    #[clap(long, requires = "denylist")]
    pub extend: bool,

    /// Print the effective denylist as JSON and exit.
    #[clap(long)]
    pub print_denylist: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Go stack dumps from Ginkgo test suites.
    Go,

    /// Rust backtraces rendered by `codelocation`.
    Rust,
}
