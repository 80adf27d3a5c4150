//! Terminal styling for command output.
//!
//! ANSI escapes are emitted only when stdout is a terminal, so piped output
//! stays plain text.

use std::io::IsTerminal;

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Whether styled output is enabled for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn is_colored(self) -> bool {
        self.color
    }

    pub fn bold(self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn dim(self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn green(self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn yellow(self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Picks the singular or plural noun for `count`.
pub fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Shortens `text` to at most `max` characters, ending with an ellipsis.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}\u{2026}")
}

#[cfg(test)]
mod tests {
    use super::{plural, preview, Style};

    #[test]
    fn plain_style_leaves_text_untouched() {
        assert_eq!(Style::plain().bold("Life Stats"), "Life Stats");
        assert_eq!(Style::plain().dim("---"), "---");
    }

    #[test]
    fn colored_style_wraps_and_resets() {
        assert_eq!(Style { color: true }.green("ok"), "\x1b[32mok\x1b[0m");
    }

    #[test]
    fn plural_picks_by_count() {
        assert_eq!(plural(1, "pebble", "pebbles"), "pebble");
        assert_eq!(plural(0, "pebble", "pebbles"), "pebbles");
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("short", 50), "short");
        let long = "é".repeat(60);
        let shortened = preview(&long, 50);
        assert_eq!(shortened.chars().count(), 48);
        assert!(shortened.ends_with('\u{2026}'));
    }
}
