//! Line prompts on stdin.
//!
//! End of input yields `None`; callers treat it as a cancel and write
//! nothing.

use std::io::{self, BufRead, Write};

/// Asks `question` on stdout and reads one trimmed line from stdin.
pub fn ask(question: &str) -> io::Result<Option<String>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_with(&mut stdin.lock(), &mut stdout.lock(), question)
}

/// Like `ask`, falling back to `default` on an empty answer.
pub fn ask_or(question: &str, default: &str) -> io::Result<Option<String>> {
    let question = format!("{question} [{default}]");
    Ok(ask(&question)?.map(|answer| {
        if answer.is_empty() {
            default.to_string()
        } else {
            answer
        }
    }))
}

/// Asks for an integer, clamping into `min..=max`; unparsable input keeps
/// `default`.
pub fn ask_clamped(question: &str, default: i64, min: i64, max: i64) -> io::Result<Option<i64>> {
    let question = format!("{question} ({min}\u{2013}{max})?");
    Ok(ask_or(&question, &default.to_string())?.map(|answer| clamp_answer(&answer, default, min, max)))
}

/// Asks a yes/no question; only `y` or `yes` confirm.
pub fn confirm(question: &str) -> io::Result<Option<bool>> {
    let question = format!("{question} [y/N]");
    Ok(ask(&question)?.map(|answer| is_yes(&answer)))
}

pub fn ask_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question} ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn clamp_answer(answer: &str, default: i64, min: i64, max: i64) -> i64 {
    answer
        .trim()
        .parse::<i64>()
        .map(|value| value.clamp(min, max))
        .unwrap_or(default)
}
