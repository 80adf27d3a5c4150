//! `keepsake capsule`: gentle notes for a future self.

use super::{report_outcome, CliError, Context};
use crate::term::{plural, preview};
use clap::Subcommand;
use keepsake_core::model::lenient::parse_tag_list;
use keepsake_core::stats::{oldest, relative_time};
use keepsake_core::{pick_uniform, require_text, CapsuleNote, ToolKind};

const PREVIEW_CHARS: usize = 50;
const RULE_WIDTH: usize = 30;

#[derive(Debug, Subcommand)]
pub enum CapsuleCommand {
    /// Bury a new message
    Add {
        /// The words you want to save
        message: String,

        /// Comma-separated tags
        #[arg(long, value_name = "TAGS")]
        tags: Option<String>,
    },
    /// Open the capsule and find a surprise
    Open,
    /// See everything buried so far
    List,
    /// Revisit the very first message
    Oldest,
}

pub fn run(command: CapsuleCommand, ctx: &mut Context) -> Result<(), CliError> {
    let journal = ctx.journal::<CapsuleNote>(ToolKind::Capsule)?;
    match command {
        CapsuleCommand::Add { message, tags } => {
            let message = require_text(&message)?;
            let mut note = CapsuleNote::new(message, ctx.now);
            note.tags = tags.as_deref().map(parse_tag_list).unwrap_or_default();
            let loaded = journal.append(note)?;
            report_outcome(&loaded.outcome);
            println!();
            println!("  \u{1f331}  Your words have been buried safely.");
            println!("  Someday, you\u{2019}ll find them again.");
            println!();
            Ok(())
        }
        CapsuleCommand::Open => {
            let store = ctx.load(&journal)?;
            let Some(note) = pick_uniform(&store.records, &mut ctx.rng) else {
                println!();
                println!("  The capsule is empty.");
                println!("  Maybe leave something for future-you?");
                println!();
                return Ok(());
            };
            let rule = "  \u{2500}".repeat(RULE_WIDTH);
            println!();
            println!("{rule}");
            println!();
            println!(
                "  \u{1f4dc}  You left this for yourself {}:",
                relative_time(note.created_at, ctx.now)
            );
            println!();
            println!("     \u{201c}{}\u{201d}", note.message);
            println!();
            println!("{rule}");
            println!();
            Ok(())
        }
        CapsuleCommand::List => {
            let store = ctx.load(&journal)?;
            if store.is_empty() {
                println!();
                println!("  Nothing here yet. The capsule is waiting.");
                println!();
                return Ok(());
            }
            println!();
            println!("  \u{1f30d}  Everything you\u{2019}ve buried so far:");
            println!();
            for (index, note) in store.records.iter().enumerate() {
                println!("  {:>3}.  \u{201c}{}\u{201d}", index + 1, preview(&note.message, PREVIEW_CHARS));
                println!("        \u{2014} {}", relative_time(note.created_at, ctx.now));
                if !note.tags.is_empty() {
                    println!("        #{}", note.tags.join(" #"));
                }
                println!();
            }
            println!(
                "  {} little {}, waiting to be remembered.",
                store.len(),
                plural(store.len(), "note", "notes")
            );
            println!();
            Ok(())
        }
        CapsuleCommand::Oldest => {
            let store = ctx.load(&journal)?;
            let Some(note) = oldest(&store.records) else {
                println!();
                println!("  No memories yet. Write one today?");
                println!();
                return Ok(());
            };
            println!();
            println!("  \u{1f30c}  Here\u{2019}s where it all began\u{2026}");
            println!();
            println!("  You wrote this {}:", relative_time(note.created_at, ctx.now));
            println!();
            println!("     \u{201c}{}\u{201d}", note.message);
            println!();
            println!("  Look how far you\u{2019}ve come.");
            println!();
            Ok(())
        }
    }
}
