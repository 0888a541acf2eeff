//! Command-line surface. Scoped down from the original Typer app
//! (`scan`/`install`/`uninstall`/`init`/`audit`) to the two subcommands this
//! core crate keeps: `scan` and `init`. Grounded on
//! `original_source/src/gitsafe/cli.py`, ported into clap's derive idiom.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::severity::Severity;

#[derive(Parser, Debug)]
#[command(name = "gitsafe-core", about = "Block secrets before they reach your repository.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan staged changes (or a commit range in CI) for secrets.
    Scan(ScanArgs),
    /// Write a starter .gitsafe.toml in the repo root.
    Init,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to .gitsafe.toml, overriding the repo-root default.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Severity threshold that fails the scan.
    #[arg(long, value_enum)]
    pub fail_on: Option<Severity>,

    /// Force CI mode (auto-detected from the `CI` env var otherwise).
    #[arg(long)]
    pub ci: bool,

    /// Base commit for a commit-range diff (CI mode).
    #[arg(long = "from")]
    pub from_ref: Option<String>,

    /// Head commit for a commit-range diff (CI mode); defaults to `HEAD`.
    #[arg(long = "to")]
    pub to_ref: Option<String>,

    /// List files that would be scanned, without scanning them.
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long)]
    pub verbose: bool,
}
