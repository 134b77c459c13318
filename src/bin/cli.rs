//! Writes the eco utility peak shift registry file for the next four work
//! periods.
//!
//! ```bash
//! # Write the file using teco_peakshift_settings.yaml from the current directory
//! peakshift peakshift.reg
//!
//! # Back up the current key, write, and import, ignoring failed checks
//! peakshift peakshift.reg --backup backup.reg --import -c
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;

use peakshift::system::{self, RegistryAccess};
use peakshift::{
    DEFAULT_SETTINGS_FILE, PEAK_SHIFT_KEY, PeakShiftSchedule, load_settings, save_periods_to_csv,
    write_reg_file,
};

#[derive(Parser)]
#[command(name = "peakshift")]
#[command(about = "Generate an eco utility peak shift registry file for the coming work periods")]
#[command(version)]
struct Cli {
    /// Path of the .reg file to write
    output: PathBuf,

    /// Continue even when prerequisite checks fail
    #[arg(short = 'c', long = "continue")]
    continue_on_failure: bool,

    /// Settings file (YAML, or JSON with a .json extension)
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// First day to consider (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Export the current peak shift key to this file before writing
    #[arg(long)]
    backup: Option<PathBuf>,

    /// Import the generated file into the registry
    #[arg(long)]
    import: bool,

    /// Also write the computed periods as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let directive = if verbose {
        "peakshift=debug"
    } else {
        "peakshift=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli, registry: &dyn RegistryAccess) -> Result<()> {
    let settings = load_settings(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    let failures = system::check_prerequisites(&settings, registry);
    system::enforce(failures, cli.continue_on_failure)?;

    let start = cli.start_date.unwrap_or_else(|| Local::now().date_naive());
    info!(%start, "computing work periods");
    let schedule = PeakShiftSchedule::build(&settings, start)?;

    for (i, period) in schedule.periods().iter().enumerate() {
        println!(
            "PeakShift{}: {} to {} ({} days)",
            i + 1,
            period.start(),
            period.end(),
            period.len_days()
        );
    }

    if let Some(backup) = &cli.backup {
        registry
            .export_key(PEAK_SHIFT_KEY, backup)
            .with_context(|| format!("Failed to back up registry to {}", backup.display()))?;
    }

    write_reg_file(&cli.output, schedule.reg_file())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Registry file written to {}", cli.output.display());

    if let Some(csv) = &cli.csv {
        save_periods_to_csv(csv, schedule.periods())
            .with_context(|| format!("Failed to write {}", csv.display()))?;
    }

    if cli.import {
        registry
            .import_file(&cli.output)
            .with_context(|| format!("Failed to import {}", cli.output.display()))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let registry = system::default_registry();
    run(cli, registry.as_ref())
}
