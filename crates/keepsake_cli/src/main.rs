//! keepsake - small journaling jars for the terminal
//!
//! Subcommands:
//! - `keepsake commit` - git-style life commits with stats
//! - `keepsake pebbles` - gratitude pebbles
//! - `keepsake capsule` - notes for a future self
//! - `keepsake jar` - the memory jar

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use clap::builder::RangedU64ValueParser;
use keepsake_core::{default_log_level, init_logging, ConfigOverrides, MAX_BACKUPS_LIMIT};
use log::{debug, error};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod prompt;
mod term;

use commands::{capsule, commit, jar, pebbles, CliError, Context};

#[derive(Debug, Parser)]
#[command(name = "keepsake")]
#[command(about = "Small journaling jars for the terminal")]
#[command(version)]
struct Cli {
    /// Data file for the selected tool, overriding its default location
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Backup generations kept on each save, at most 10
    #[arg(
        long,
        global = true,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_BACKUPS_LIMIT as u64)
    )]
    backups: Option<usize>,

    /// Seed for reproducible random picks
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<u64>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true, env = "KEEPSAKE_LOG", default_value = default_log_level())]
    log_level: String,

    /// Write rotating log files to this absolute directory instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a life commit, or browse past ones
    Commit(commit::CommitArgs),

    /// A quiet jar for small, good things
    #[command(subcommand)]
    Pebbles(pebbles::PebblesCommand),

    /// Leave gentle notes for your future self
    #[command(subcommand)]
    Capsule(capsule::CapsuleCommand),

    /// Keep small moments worth remembering
    #[command(subcommand)]
    Jar(jar::JarCommand),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if let Err(print_err) = err.print() {
                debug!("event=cli_usage_print module=cli status=error error={print_err}");
            }
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = init_logging(&cli.log_level, cli.log_dir.as_deref()) {
        eprintln!("  Error: {err}");
        return ExitCode::FAILURE;
    }

    let rng = match cli.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let mut ctx = Context {
        overrides: ConfigOverrides {
            file: cli.file,
            max_backups: cli.backups,
        },
        style: term::Style::detect(),
        rng,
        now: Utc::now(),
        today: Local::now().date_naive(),
    };
    debug!(
        "event=cli_start module=cli status=ok command={:?} seeded={}",
        cli.command,
        cli.seed.is_some()
    );

    let result = match cli.command {
        Commands::Commit(args) => commit::run(args, &mut ctx),
        Commands::Pebbles(command) => pebbles::run(command, &mut ctx),
        Commands::Capsule(command) => capsule::run(command, &mut ctx),
        Commands::Jar(command) => jar::run(command, &mut ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Cancelled) => {
            debug!("event=cli_cancelled module=cli status=ok");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("event=cli_failed module=cli status=error error={err}");
            eprintln!("  Error: {err}");
            ExitCode::FAILURE
        }
    }
}
