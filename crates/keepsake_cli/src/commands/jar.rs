//! `keepsake jar`: small moments worth keeping.

use super::{report_outcome, CliError, Context};
use crate::term::plural;
use clap::Subcommand;
use keepsake_core::stats::{group_by_day, search};
use keepsake_core::{pick_uniform, require_text, Memory, ToolKind};
use rand::Rng;

const GENTLE_HEADERS: [&str; 10] = [
    "you kept this one:",
    "remember this?",
    "a small thing, but yours:",
    "you reached into the jar and found:",
    "from a past you, with love:",
    "unfolding a note...",
    "this was worth keeping:",
    "a moment you held onto:",
    "you wrote this down because it mattered:",
    "the jar remembers:",
];

const EMPTY_JAR_MESSAGES: [&str; 3] = [
    "The jar is empty. But that's okay, every jar starts this way.",
    "Nothing in here yet. The first memory is always the hardest to name.",
    "An empty jar, waiting. What would you like to keep?",
];

#[derive(Debug, Subcommand)]
pub enum JarCommand {
    /// Drop a memory into the jar
    Add {
        /// The moment, in a few words
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Pull one out at random
    Random,
    /// See them all, grouped by day
    List {
        /// Only show the most recent LIMIT days
        limit: Option<usize>,
    },
    /// What did you notice today?
    Today,
    /// Look for something specific
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// How full is the jar?
    Count,
}

pub fn run(command: JarCommand, ctx: &mut Context) -> Result<(), CliError> {
    let journal = ctx.journal::<Memory>(ToolKind::Jar)?;
    match command {
        JarCommand::Add { text } => {
            let text = require_text(&text.join(" "))?;
            let memory = Memory::new(text, ctx.now, ctx.today);
            let loaded = journal.append(memory.clone())?;
            report_outcome(&loaded.outcome);
            println!();
            println!("  dropped into the jar. kept safe.");
            println!();
            println!("{}", format_memory(&memory));
            println!();
            match loaded.store.len() {
                1 => println!("  (the first one. every jar starts somewhere.)"),
                count => println!("  ({count} memories in the jar now.)"),
            }
            println!();
            Ok(())
        }
        JarCommand::Random => {
            let store = ctx.load(&journal)?;
            let Some(memory) = pick_uniform(&store.records, &mut ctx.rng) else {
                print_empty(ctx);
                return Ok(());
            };
            let header = GENTLE_HEADERS[ctx.rng.random_range(0..GENTLE_HEADERS.len())];
            println!();
            println!("  {header}");
            println!();
            println!("{}", format_memory(memory));
            println!();
            Ok(())
        }
        JarCommand::List { limit } => {
            let store = ctx.load(&journal)?;
            if store.is_empty() {
                print_empty(ctx);
                return Ok(());
            }
            let days = group_by_day(&store.records);
            let skip = match limit {
                Some(limit) if limit > 0 => days.len().saturating_sub(limit),
                _ => 0,
            };
            println!();
            println!(
                "  the jar holds {} {}.",
                store.len(),
                plural(store.len(), "memory", "memories")
            );
            println!();
            for (day, memories) in days.into_iter().skip(skip) {
                println!("  {day}");
                for memory in memories {
                    println!("    \"{}\"", memory.text);
                }
                println!();
            }
            Ok(())
        }
        JarCommand::Today => {
            let store = ctx.load(&journal)?;
            let todays: Vec<&Memory> = store
                .records
                .iter()
                .filter(|memory| memory.date == ctx.today)
                .collect();
            if todays.is_empty() {
                println!();
                println!("  nothing in the jar from today yet.");
                println!("  what would you like to keep?");
                println!();
                println!("  usage: keepsake jar add \"your moment here\"");
                println!();
                return Ok(());
            }
            println!();
            println!(
                "  today's jar ({} {}):",
                todays.len(),
                plural(todays.len(), "moment", "moments")
            );
            println!();
            for memory in todays {
                println!("    \"{}\"", memory.text);
            }
            println!();
            Ok(())
        }
        JarCommand::Search { query } => {
            let query = query.join(" ");
            let store = ctx.load(&journal)?;
            let found = search(&store.records, &query);
            println!();
            if found.is_empty() {
                println!("  nothing in the jar matches \"{query}\".");
                println!("  but that's okay. not everything needs to be found.");
                println!();
                return Ok(());
            }
            println!(
                "  found {} {} matching \"{query}\":",
                found.len(),
                plural(found.len(), "memory", "memories")
            );
            println!();
            for memory in found {
                println!("{}", format_memory(memory));
                println!();
            }
            Ok(())
        }
        JarCommand::Count => {
            let count = ctx.load(&journal)?.len();
            println!();
            println!("  {}", count_line(count));
            println!();
            Ok(())
        }
    }
}

fn print_empty(ctx: &mut Context) {
    let message = EMPTY_JAR_MESSAGES[ctx.rng.random_range(0..EMPTY_JAR_MESSAGES.len())];
    println!();
    println!("  {message}");
    println!();
}

fn format_memory(memory: &Memory) -> String {
    format!("  \"{}\"\n  \u{2014} {}", memory.text, memory.date)
}

fn count_line(count: usize) -> String {
    match count {
        0 => "the jar is empty. waiting for the first moment.".to_string(),
        1 => "one memory in the jar. the beginning of something.".to_string(),
        2..=9 => format!("{count} memories. the jar is filling, slowly."),
        10..=49 => format!("{count} memories. a small collection of kept things."),
        50..=99 => format!("{count} memories. the jar is getting heavy, in a good way."),
        _ => format!("{count} memories. a life, in small pieces. all yours."),
    }
}

#[cfg(test)]
mod tests {
    use super::{count_line, format_memory};
    use chrono::{NaiveDate, Utc};
    use keepsake_core::Memory;

    #[test]
    fn count_line_grows_with_the_jar() {
        assert!(count_line(0).starts_with("the jar is empty"));
        assert!(count_line(1).starts_with("one memory"));
        assert_eq!(count_line(7), "7 memories. the jar is filling, slowly.");
        assert!(count_line(120).contains("a life, in small pieces"));
    }

    #[test]
    fn memory_shows_text_and_day() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let memory = Memory::new("a sunrise", Utc::now(), day);
        assert_eq!(format_memory(&memory), "  \"a sunrise\"\n  \u{2014} 2026-03-09");
    }
}
