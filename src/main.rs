//! pkgup - package upgrade checker CLI tool
//!
//! Compares the installed package database against a candidate index and
//! prints the `pkg_add -u` command line that would bring it up to date.

use anyhow::Context;
use clap::Parser;
use pkgup::cli::{CliArgs, Command};
use pkgup::config::Config;
use pkgup::domain::{compare_versions, Version};
use pkgup::index::{index_header, PackingList};
use pkgup::orchestrator::Orchestrator;
use pkgup::output::{create_formatter, OutputConfig};
use pkgup::signify::signify_timestamp;
use std::cmp::Ordering;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`
fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    match &args.command {
        Some(Command::Sign {
            digest,
            signify,
            contents,
        }) => sign(*digest, signify.as_ref(), contents),
        Some(Command::Vercmp { a, b }) => vercmp(a, b),
        None => check(&args),
    }
}

fn check(args: &CliArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load(args)?;
    tracing::debug!("pkgup v{}", env!("CARGO_PKG_VERSION"));

    let output_config = OutputConfig::from_cli(config.json, config.verbose, config.cron)
        .with_color(!config.json && io::stderr().is_terminal());

    let result = Orchestrator::new(config).run()?;

    // Output results
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    formatter.format(&result, &mut stderr, &mut stdout)?;
    stdout.flush()?;

    if result.has_errors() {
        // Partial success - some entries could not be processed
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Print candidate index lines for packing lists
fn sign(digest: bool, signify: Option<&PathBuf>, contents: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    if let Some(path) = signify {
        let block = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read signify block {}", path.display()))?;
        writeln!(stdout, "{}", index_header(&signify_timestamp(&block)?))?;
    }

    let mut failed = false;
    for path in contents {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                failed = true;
                continue;
            }
        };
        match PackingList::parse(&text).index_line(digest) {
            Some(line) => writeln!(stdout, "{}", line)?,
            None => {
                tracing::warn!("no @name in {}", path.display());
                failed = true;
            }
        }
    }
    stdout.flush()?;

    Ok(if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

/// Print `a <|=|> b`
fn vercmp(a: &str, b: &str) -> anyhow::Result<ExitCode> {
    let symbol = match compare_versions(&Version::parse(a), &Version::parse(b)) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    println!("{} {} {}", a, symbol, b);
    Ok(ExitCode::SUCCESS)
}
