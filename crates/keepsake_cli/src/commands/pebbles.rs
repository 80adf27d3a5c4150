//! `keepsake pebbles`: a quiet jar for small, good things.

use super::{CliError, Context};
use crate::prompt;
use crate::term::plural;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use keepsake_core::{require_text, sample, Pebble, ToolKind};
use rand::Rng;

const SHAKE_MIN: usize = 3;
const SHAKE_MAX: usize = 5;

#[derive(Debug, Subcommand)]
pub enum PebblesCommand {
    /// Add a pebble; prompts when no text is given
    Add {
        /// A few words
        text: Option<String>,
    },
    /// Shake the jar and surface a few pebbles
    Shake,
    /// List all pebbles, oldest first
    List,
    /// Empty the jar
    Clear(ClearArgs),
    /// Jar summary
    Stats,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(command: PebblesCommand, ctx: &mut Context) -> Result<(), CliError> {
    let journal = ctx.journal::<Pebble>(ToolKind::Pebbles)?;
    match command {
        PebblesCommand::Add { text } => {
            let raw = match text {
                Some(text) => text,
                None => prompt::ask("  what's something good?")?.ok_or(CliError::Cancelled)?,
            };
            let text = require_text(&raw)?;
            let loaded = journal.append(Pebble::new(text, ctx.now))?;
            super::report_outcome(&loaded.outcome);
            println!("  noted.");
            Ok(())
        }
        PebblesCommand::Shake => {
            let store = ctx.load(&journal)?;
            if store.is_empty() {
                println!("  your jar is empty.");
                println!("  try: keepsake pebbles add \"something good\"");
                return Ok(());
            }
            let count = ctx.rng.random_range(SHAKE_MIN..=SHAKE_MAX);
            println!();
            for pebble in sample(&store.records, count, &mut ctx.rng) {
                println!("    \u{b7} {}", pebble.text);
            }
            println!();
            Ok(())
        }
        PebblesCommand::List => {
            let store = ctx.load(&journal)?;
            if store.is_empty() {
                println!("  no pebbles yet.");
                return Ok(());
            }
            println!();
            for pebble in &store.records {
                println!("  {}  {}", friendly_date(pebble.timestamp), pebble.text);
            }
            println!();
            Ok(())
        }
        PebblesCommand::Clear(args) => {
            let store = ctx.load(&journal)?;
            if store.is_empty() {
                println!("  already empty.");
                return Ok(());
            }
            let count = store.len();
            if !args.yes {
                let question = format!("  remove {count} {}?", plural(count, "pebble", "pebbles"));
                if !prompt::confirm(&question)?.ok_or(CliError::Cancelled)? {
                    println!("  kept everything.");
                    return Ok(());
                }
            }
            journal.clear()?;
            println!("  jar emptied.");
            Ok(())
        }
        PebblesCommand::Stats => {
            let store = ctx.load(&journal)?;
            let (Some(first), Some(latest)) = (store.records.first(), store.records.last()) else {
                println!("  no pebbles yet.");
                return Ok(());
            };
            println!();
            println!("  {} {}", store.len(), plural(store.len(), "pebble", "pebbles"));
            println!("  first:   {}", friendly_date(first.timestamp));
            println!("  latest:  {}", friendly_date(latest.timestamp));
            println!();
            Ok(())
        }
    }
}

/// Short lowercase date such as `mar 09, 2026`.
fn friendly_date(at: DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string().to_lowercase()
}
