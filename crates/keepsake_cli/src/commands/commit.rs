//! `keepsake commit`: git-style life commits.

use super::{report_outcome, CliError, Context};
use crate::prompt;
use crate::term::{plural, Style};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use keepsake_core::model::lenient::parse_tag_list;
use keepsake_core::stats::{self, Heatmap, HEATMAP_LEVELS};
use keepsake_core::{
    chance, detect_commit_type, pick_uniform, CommitRequest, CommitService, CommitType, Energy,
    JournalService, LifeCommit, Mood, RecordedCommit, ToolKind, ValidationError,
};

const LOG_DEFAULT_COUNT: usize = 10;
const TOP_THEMES_COUNT: usize = 5;
const STREAK_MIN_DISPLAY: u32 = 2;
const HEATMAP_WEEKS: usize = 15;
const HEATMAP_LABEL_WIDTH: usize = 4;
const HEATMAP_DAY_LABELS: [&str; 7] = ["Mon", "", "Wed", "", "Fri", "", "Sun"];
const HEATMAP_CHARS_COLOR: [&str; HEATMAP_LEVELS] = ["\u{2591}", "\u{2592}", "\u{2593}", "\u{2588}"];
const HEATMAP_CHARS_PLAIN: [&str; HEATMAP_LEVELS] = [".", "o", "O", "#"];
const COMMIT_INDENT: &str = "    ";
const NO_COMMITS: &str = "\n  No commits yet. Start with: keepsake commit\n";

const REFLECTION_NUMERATOR: u32 = 3;
const REFLECTION_DENOMINATOR: u32 = 10;
const REFLECTION_LINES: [&str; 7] = [
    "Small commits still move the project forward.",
    "Consistency compounds.",
    "You showed up today. That matters.",
    "Progress isn't always visible, but it's real.",
    "Every commit is a choice to keep going.",
    "The changelog of your life is being written.",
    "Ship it. Reflect. Repeat.",
];

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CommitArgs {
    #[command(subcommand)]
    pub action: Option<CommitAction>,

    #[command(flatten)]
    pub quick: QuickArgs,
}

/// Flags for a one-line commit; without `-m` the commit is built from prompts.
#[derive(Debug, Default, Args)]
pub struct QuickArgs {
    /// Quick commit message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Commit type override (feat, fix, refactor, chore, docs, style, test)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Commit scope
    #[arg(long, value_name = "SCOPE")]
    pub scope: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_name = "TAGS")]
    pub tags: Option<String>,

    /// Mood score (-2 to 2)
    #[arg(long, allow_negative_numbers = true)]
    pub mood: Option<i64>,

    /// Energy score (1 to 5)
    #[arg(long, allow_negative_numbers = true)]
    pub energy: Option<i64>,

    /// Extended details for the commit
    #[arg(long)]
    pub details: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CommitAction {
    /// View commit history, newest first
    Log {
        /// Show every commit with full details
        #[arg(long)]
        full: bool,
    },
    /// Surface a random past commit
    Random,
    /// Summarize a recent period
    Summary {
        #[arg(value_enum, default_value_t = Period::Week)]
        period: Period,
    },
    /// Totals, streak, trends and an activity heatmap
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Week,
}

pub fn run(args: CommitArgs, ctx: &mut Context) -> Result<(), CliError> {
    let journal = ctx.journal::<LifeCommit>(ToolKind::Commits)?;
    match args.action {
        Some(CommitAction::Log { full }) => show_log(&journal, full, ctx),
        Some(CommitAction::Random) => show_random(&journal, ctx),
        Some(CommitAction::Summary { period }) => show_summary(&journal, period, ctx),
        Some(CommitAction::Stats) => show_stats(&journal, ctx),
        None if args.quick.message.is_some() => quick(args.quick, journal, ctx),
        None => interactive(journal, ctx),
    }
}

fn quick(args: QuickArgs, journal: JournalService<LifeCommit>, ctx: &mut Context) -> Result<(), CliError> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<CommitType>)
        .transpose()
        .map_err(ValidationError::from)?;
    let request = CommitRequest {
        message: args.message.unwrap_or_default(),
        kind,
        scope: args.scope,
        details: args.details,
        tags: args.tags.as_deref().map(parse_tag_list).unwrap_or_default(),
        mood: args.mood,
        energy: args.energy,
    };
    record(request, journal, ctx)
}

fn interactive(journal: JournalService<LifeCommit>, ctx: &mut Context) -> Result<(), CliError> {
    let style = ctx.style;
    println!();
    let Some(mut message) = prompt::ask("  What changed today?\n  >")? else {
        return Err(CliError::Cancelled);
    };
    if message.is_empty() {
        println!("\n  Nothing to commit.\n");
        return Ok(());
    }

    let suggested = format!("{}(life): {message}", detect_commit_type(&message));
    println!();
    println!("  Suggested commit:");
    println!();
    println!("  {}", style.bold(&suggested));
    println!();

    let Some(accept) = prompt::ask_or("  Accept? (Y/n/edit)", "Y")? else {
        return Err(CliError::Cancelled);
    };
    match accept.to_lowercase().as_str() {
        "n" | "no" => {
            println!("\n  Commit discarded.\n");
            return Ok(());
        }
        "edit" => {
            let Some(edited) = prompt::ask("  Enter commit message:\n  >")? else {
                return Err(CliError::Cancelled);
            };
            if edited.is_empty() {
                println!("\n  Nothing to commit.\n");
                return Ok(());
            }
            message = edited;
        }
        _ => {}
    }

    let Some(raw_tags) = prompt::ask("  Add tags? (comma separated or skip)")? else {
        return Err(CliError::Cancelled);
    };
    let tags = if raw_tags.eq_ignore_ascii_case("skip") {
        Vec::new()
    } else {
        parse_tag_list(&raw_tags)
    };
    let Some(energy) = prompt::ask_clamped("  Energy today", Energy::DEFAULT, Energy::MIN, Energy::MAX)? else {
        return Err(CliError::Cancelled);
    };
    let Some(mood) = prompt::ask_clamped("  Mood today", Mood::DEFAULT, Mood::MIN, Mood::MAX)? else {
        return Err(CliError::Cancelled);
    };

    let request = CommitRequest {
        tags,
        mood: Some(mood),
        energy: Some(energy),
        ..CommitRequest::new(message)
    };
    record(request, journal, ctx)
}

fn record(request: CommitRequest, journal: JournalService<LifeCommit>, ctx: &mut Context) -> Result<(), CliError> {
    let service = CommitService::new(journal);
    let recorded = service.record(request, ctx.now, ctx.today)?;
    report_outcome(&recorded.outcome);
    print_recorded(&recorded, ctx);
    Ok(())
}

fn print_recorded(recorded: &RecordedCommit, ctx: &mut Context) {
    let style = ctx.style;
    let commit = &recorded.commit;
    println!();
    println!("  {} Commit recorded", style.green("\u{2714}"));
    println!();
    println!("  {} {}", style.yellow("commit"), style.yellow(&commit.short_id()));
    println!("  Author: You");
    println!("  Date:   {}", long_date(commit.date, ctx.today));
    println!();
    println!("{COMMIT_INDENT}{}: {}", commit.type_scope(), commit.message);
    println!();
    if recorded.streak >= STREAK_MIN_DISPLAY {
        println!("  \u{1f525} {} day commit streak", recorded.streak);
        println!();
    }
    reflect(ctx);
}

fn show_log(journal: &JournalService<LifeCommit>, full: bool, ctx: &Context) -> Result<(), CliError> {
    let store = ctx.load(journal)?;
    if store.is_empty() {
        println!("{NO_COMMITS}");
        return Ok(());
    }
    let style = ctx.style;
    let newest_first = store.records.iter().rev();

    println!();
    if full {
        println!("  {}", style.bold("Life Commits"));
        println!();
        for commit in newest_first {
            print_full(commit, ctx);
        }
        return Ok(());
    }

    println!("  {}", style.bold("Recent life commits:"));
    println!();
    for commit in newest_first.take(LOG_DEFAULT_COUNT) {
        let date = format!("{:<8}", short_date(commit.date, ctx.today));
        println!("  {}  {}: {}", style.dim(&date), commit.type_scope(), commit.message);
    }
    let remaining = store.len().saturating_sub(LOG_DEFAULT_COUNT);
    if remaining > 0 {
        println!();
        println!(
            "  {}",
            style.dim(&format!("... and {remaining} more (use commit log --full)"))
        );
    }
    println!();
    Ok(())
}

fn print_full(commit: &LifeCommit, ctx: &Context) {
    let style = ctx.style;
    println!("  {} {}", style.yellow("commit"), style.yellow(&commit.short_id()));
    println!("  Author: You");
    println!("  Date:   {}", long_date(commit.date, ctx.today));
    println!();
    println!("{COMMIT_INDENT}{}: {}", commit.type_scope(), commit.message);
    if !commit.details.is_empty() {
        println!();
        println!("{COMMIT_INDENT}{}", commit.details);
    }
    if !commit.tags.is_empty() {
        println!("{COMMIT_INDENT}Tags: {}", commit.tags.join(", "));
    }
    println!("{COMMIT_INDENT}Mood: {}  Energy: {}", commit.mood, commit.energy.value());
    println!();
    println!("  {}", style.dim("---"));
    println!();
}

fn show_random(journal: &JournalService<LifeCommit>, ctx: &mut Context) -> Result<(), CliError> {
    let store = ctx.load(journal)?;
    let Some(commit) = pick_uniform(&store.records, &mut ctx.rng) else {
        println!("{NO_COMMITS}");
        return Ok(());
    };
    let ago = stats::relative_day(commit.date, ctx.today);
    println!();
    println!("  {}", ctx.style.dim(&format!("From {ago}:")));
    println!();
    println!("  {}: {}", commit.type_scope(), commit.message);
    if !commit.tags.is_empty() {
        println!("  Tags: {}", commit.tags.join(", "));
    }
    println!("  Mood: {}", commit.mood);
    println!();
    Ok(())
}

fn show_summary(journal: &JournalService<LifeCommit>, period: Period, ctx: &mut Context) -> Result<(), CliError> {
    let store = ctx.load(journal)?;
    let (label, days) = match period {
        Period::Week => ("weekly", stats::daily::DAYS_PER_WEEK as u64),
    };
    let cutoff = ctx
        .today
        .checked_sub_days(chrono::Days::new(days))
        .unwrap_or(ctx.today);
    let recent: Vec<LifeCommit> = stats::since(&store.records, cutoff).into_iter().cloned().collect();
    if recent.is_empty() {
        println!("\n  No commits in the {label} period.\n");
        return Ok(());
    }

    let averages = stats::averages(&recent);
    let themes = stats::top_tags(&recent, TOP_THEMES_COUNT);
    let style = ctx.style;
    println!();
    println!("  {}", style.bold("Weekly Life Summary"));
    println!();
    println!("  Commits:        {}", averages.count);
    if !themes.is_empty() {
        println!("  Top themes:     {}", themes.join(", "));
    }
    println!("  Mood average:   {:+.1}", averages.mood);
    println!("  Energy average: {:.1}", averages.energy);
    println!();
    reflect(ctx);
    Ok(())
}

fn show_stats(journal: &JournalService<LifeCommit>, ctx: &Context) -> Result<(), CliError> {
    let store = ctx.load(journal)?;
    let commits = &store.records;
    if commits.is_empty() {
        println!("{NO_COMMITS}");
        return Ok(());
    }
    let style = ctx.style;
    let streak = stats::streak(commits, ctx.today);
    let overall = stats::averages(commits);

    println!();
    println!("  {}", style.bold("Life Stats"));
    println!();
    println!("  Total commits:  {}", commits.len());
    println!("  Current streak: {streak} {}", plural(streak as usize, "day", "days"));
    println!("  Mood average:   {:+.1}", overall.mood);
    println!("  Energy average: {:.1}", overall.energy);
    println!();

    let tags = stats::tag_counts(commits);
    if !tags.is_empty() {
        println!("  {}", style.bold("Top Tags"));
        println!();
        for (tag, count) in tags.iter().take(TOP_THEMES_COUNT) {
            println!("    {tag:<20} {count}");
        }
        println!();
    }

    println!("  {}", style.bold("Commit Types"));
    println!();
    for (kind, count) in stats::type_distribution(commits) {
        println!("    {:<12} {count}", kind.as_str());
    }
    println!();

    let trend = stats::weekly_trend(commits, ctx.today);
    println!("  {}", style.bold("Weekly Trend"));
    println!();
    println!("    {:14} {:>10}  {:>10}", "", "This week", "Last week");
    println!(
        "    {:<14} {:>10}  {:>10}",
        "Commits", trend.this_week.count, trend.last_week.count
    );
    println!(
        "    {:<14} {:>+10.1}  {:>+10.1}",
        "Mood avg", trend.this_week.mood, trend.last_week.mood
    );
    println!(
        "    {:<14} {:>10.1}  {:>10.1}",
        "Energy avg", trend.this_week.energy, trend.last_week.energy
    );
    println!();

    let correlations = stats::tag_mood_correlation(commits, TOP_THEMES_COUNT);
    if !correlations.is_empty() {
        println!("  {}", style.bold("Tag-Mood Correlation"));
        println!();
        for entry in correlations {
            println!(
                "    {:<20} mood {:+.1}  ({} commits)",
                entry.tag, entry.mood, entry.count
            );
        }
        println!();
    }

    println!("  {}", style.bold("Activity"));
    println!();
    let grid = stats::heatmap(commits, ctx.today, HEATMAP_WEEKS);
    for line in render_heatmap(&grid, style) {
        println!("  {line}");
    }
    println!();
    println!("{}", heatmap_legend(style));
    println!();
    Ok(())
}

/// Prints a reflection line with 3-in-10 odds.
fn reflect(ctx: &mut Context) {
    if !chance(REFLECTION_NUMERATOR, REFLECTION_DENOMINATOR, &mut ctx.rng) {
        return;
    }
    if let Some(line) = pick_uniform(&REFLECTION_LINES, &mut ctx.rng) {
        println!("  {}", ctx.style.dim(line));
        println!();
    }
}

fn short_date(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else {
        day.format("%b %d").to_string()
    }
}

fn long_date(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else {
        day.format("%b %d, %Y").to_string()
    }
}

fn intensity_cell(count: Option<usize>, style: Style) -> String {
    let Some(count) = count else {
        return " ".to_string();
    };
    let level = Heatmap::intensity(count);
    if !style.is_colored() {
        return HEATMAP_CHARS_PLAIN[level].to_string();
    }
    let glyph = HEATMAP_CHARS_COLOR[level];
    match level {
        0 => glyph.to_string(),
        1 => style.dim(glyph),
        2 => style.yellow(glyph),
        _ => style.green(glyph),
    }
}

/// Month header plus one line per weekday, trailing spaces removed.
fn render_heatmap(grid: &Heatmap, style: Style) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.cells.len() + 1);

    let mut header = " ".repeat(HEATMAP_LABEL_WIDTH);
    for label in &grid.month_labels {
        match label {
            Some(month) => header.push_str(&format!("{:<2}", month.chars().take(3).collect::<String>())),
            None => header.push_str("  "),
        }
    }
    lines.push(header.trim_end().to_string());

    for (weekday, row) in grid.cells.iter().enumerate() {
        let mut line = format!("{:<width$}", HEATMAP_DAY_LABELS[weekday], width = HEATMAP_LABEL_WIDTH);
        for count in row {
            line.push_str(&intensity_cell(*count, style));
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn heatmap_legend(style: Style) -> String {
    let glyphs: Vec<String> = if style.is_colored() {
        (0..HEATMAP_LEVELS).map(|level| intensity_cell(Some(level), style)).collect()
    } else {
        HEATMAP_CHARS_PLAIN.iter().map(|glyph| glyph.to_string()).collect()
    };
    format!("  Less {} More", glyphs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{heatmap_legend, long_date, render_heatmap, short_date, CommitArgs};
    use crate::term::Style;
    use chrono::{NaiveDate, Utc};
    use clap::Parser;
    use keepsake_core::stats::heatmap;
    use keepsake_core::{CommitType, LifeCommit};

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: CommitArgs,
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn dates_read_today_for_the_current_day() {
        assert_eq!(short_date(day(11), day(11)), "Today");
        assert_eq!(short_date(day(9), day(11)), "Mar 09");
        assert_eq!(long_date(day(9), day(11)), "Mar 09, 2026");
    }

    #[test]
    fn plain_heatmap_marks_counts_and_leaves_future_blank() {
        let commits = vec![
            LifeCommit::new("a", CommitType::Feat, Utc::now(), day(9)),
            LifeCommit::new("b", CommitType::Feat, Utc::now(), day(9)),
            LifeCommit::new("c", CommitType::Feat, Utc::now(), day(11)),
        ];
        let grid = heatmap(&commits, day(11), 2);
        let lines = render_heatmap(&grid, Style::plain());

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "    Mar");
        assert_eq!(lines[1], "Mon . O");
        assert_eq!(lines[3], "Wed . o");
        assert_eq!(lines[7], "Sun .");
    }

    #[test]
    fn plain_legend_lists_levels() {
        assert_eq!(heatmap_legend(Style::plain()), "  Less . o O # More");
    }

    #[test]
    fn negative_mood_parses_as_a_value() {
        let parsed = Harness::try_parse_from(["commit", "-m", "rest", "--mood", "-2"]).unwrap();
        assert_eq!(parsed.args.quick.mood, Some(-2));
        assert!(parsed.args.action.is_none());
    }
}
