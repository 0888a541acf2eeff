//! `gitsafe-core` binary — the smallest caller needed to run the detection
//! pipeline end to end. Grounded on `original_source/src/gitsafe/cli.py`;
//! deliberately scoped down to `scan`/`init` — a richer renderer contract
//! (JSON/SARIF/CI annotations) stays out of scope for this core crate.

use std::process::ExitCode;

use clap::Parser;
use gitsafe_core::cli::{Cli, Command, ScanArgs};
use gitsafe_core::config::{Config, DEFAULT_TOML};
use gitsafe_core::rules::RuleRegistry;
use gitsafe_core::{engine, vcs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Command::Scan(args) if args.verbose);
    init_tracing(verbose);

    match cli.command {
        Command::Scan(args) => run_scan(args),
        Command::Init => run_init(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_scan(args: ScanArgs) -> ExitCode {
    let repo_root = match vcs::repo_root(&std::env::current_dir().unwrap_or_default()) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let mut config = match Config::load(&repo_root, args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(fail_on) = args.fail_on {
        config.scan.fail_on = fail_on;
    }

    let registry = match RuleRegistry::build(&config, Vec::new()) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("rule error: {err}");
            return ExitCode::from(2);
        }
    };

    let ci_mode = args.ci || std::env::var("CI").map(|v| v == "true" || v == "1").unwrap_or(false);

    let diff_text = match (ci_mode, &args.from_ref) {
        (true, Some(from)) => {
            let to = args.to_ref.as_deref().unwrap_or("HEAD");
            vcs::commit_range_diff(&repo_root, from, to)
        }
        _ => vcs::staged_diff(&repo_root),
    };
    let diff_text = match diff_text {
        Ok(text) => text,
        Err(err) => {
            eprintln!("git error: {err}");
            return ExitCode::from(2);
        }
    };

    if diff_text.trim().is_empty() {
        println!("No staged changes to scan.");
        return ExitCode::from(0);
    }

    if args.dry_run {
        let events = gitsafe_core::git_diff::parse(&diff_text);
        let files: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                gitsafe_core::git_diff::DiffEvent::FileEnter { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect();
        println!("Dry run — {} file(s) would be scanned:", files.len());
        for file in files {
            println!("  {file}");
        }
        return ExitCode::from(0);
    }

    let result = match engine::scan(&diff_text, &config, &registry, &repo_root, ci_mode) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("scanner error: {err}");
            return ExitCode::from(2);
        }
    };

    print_summary(&result, ci_mode);

    if result.blocked {
        ExitCode::from(1)
    } else {
        ExitCode::from(0)
    }
}

fn print_summary(result: &gitsafe_core::findings::ScanResult, ci_mode: bool) {
    use gitsafe_core::severity::Severity;

    println!(
        "scanned {} file(s) in {:.1}ms, {} skipped",
        result.scanned_files,
        result.duration_ms,
        result.skipped_files.len()
    );

    for finding in &result.findings {
        let redacted = gitsafe_core::findings::redact(&finding.matched_value, ci_mode);
        let marker = if finding.is_blocking { "BLOCK" } else { "warn " };
        println!(
            "  [{marker}] {} {}:{} {} ({})",
            finding.severity, finding.file, finding.line_no, finding.rule_name, redacted
        );
    }

    if result.findings.is_empty() {
        println!("no findings.");
    } else if !result.blocked {
        println!(
            "{} finding(s), none at or above the configured threshold ({}).",
            result.findings.len(),
            Severity::High
        );
    }
}

fn run_init() -> ExitCode {
    let repo_root = match vcs::repo_root(&std::env::current_dir().unwrap_or_default()) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let config_path = repo_root.join(".gitsafe.toml");
    if config_path.exists() {
        eprintln!("warning: .gitsafe.toml already exists at {}", config_path.display());
        return ExitCode::from(1);
    }

    if let Err(err) = std::fs::write(&config_path, DEFAULT_TOML) {
        eprintln!("error writing {}: {}", config_path.display(), err);
        return ExitCode::from(2);
    }

    println!("created {}", config_path.display());
    ExitCode::from(0)
}
