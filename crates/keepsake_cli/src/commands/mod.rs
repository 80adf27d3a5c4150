//! Subcommand handlers.
//!
//! # Responsibility
//! - Resolve each tool's store from the shared overrides.
//! - Render results; all state changes go through `keepsake_core`.
//!
//! # Invariants
//! - Handlers return `CliError` instead of exiting; `main` owns exit codes.
//! - A cancelled prompt returns before any store write.

pub mod capsule;
pub mod commit;
pub mod jar;
pub mod pebbles;

use crate::term::Style;
use chrono::{DateTime, NaiveDate, Utc};
use keepsake_core::{
    ConfigError, ConfigOverrides, JournalService, LoadOutcome, Record, ServiceError, Store,
    StoreError, ToolKind, ValidationError,
};
use log::debug;
use rand_pcg::Pcg32;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Failure of one command invocation.
#[derive(Debug)]
pub enum CliError {
    Validation(ValidationError),
    Store(StoreError),
    Config(ConfigError),
    Prompt(io::Error),
    /// The user ended a prompt with end-of-input.
    Cancelled,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Prompt(err) => write!(f, "failed to read input: {err}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Prompt(err) => Some(err),
            Self::Cancelled => None,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err),
            ServiceError::Store(err) => Self::Store(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Prompt(value)
    }
}

/// Per-invocation state shared by every handler.
pub struct Context {
    pub overrides: ConfigOverrides,
    pub style: Style,
    pub rng: Pcg32,
    pub now: DateTime<Utc>,
    /// Local calendar day; record days and streaks use it.
    pub today: NaiveDate,
}

impl Context {
    /// Opens the journal for `tool` with the command-line overrides applied.
    pub fn journal<R: Record>(&self, tool: ToolKind) -> Result<JournalService<R>, CliError> {
        let config = tool.resolve(&self.overrides)?;
        debug!(
            "event=store_resolved module=cli status=ok tool={tool:?} path={} backups={}",
            config.path.display(),
            config.max_backups
        );
        Ok(JournalService::open(config))
    }

    /// Loads a journal's store, telling the user if it had to be repaired.
    pub fn load<R: Record>(&self, journal: &JournalService<R>) -> Result<Store<R>, CliError> {
        let loaded = journal.load()?;
        report_outcome(&loaded.outcome);
        Ok(loaded.store)
    }
}

/// Prints a notice on stderr when the store was not read from its primary
/// file as-is.
pub fn report_outcome(outcome: &LoadOutcome) {
    if let Some(notice) = outcome_notice(outcome) {
        eprintln!("{notice}");
    }
}

fn outcome_notice(outcome: &LoadOutcome) -> Option<String> {
    let (headline, preserved) = match outcome {
        LoadOutcome::Fresh | LoadOutcome::Primary => return None,
        LoadOutcome::Recovered {
            generation,
            preserved,
        } => (
            format!("  note: the data file was unreadable; restored from backup {generation}."),
            preserved,
        ),
        LoadOutcome::Reset { preserved } => (
            "  note: the data file was unreadable and no backup could be used; starting fresh."
                .to_string(),
            preserved,
        ),
    };
    Some(format!(
        "{headline}\n  the damaged file was kept at {}",
        preserved.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::{outcome_notice, CliError};
    use keepsake_core::{LoadOutcome, ServiceError, ValidationError};
    use std::path::PathBuf;

    #[test]
    fn clean_loads_stay_quiet() {
        assert_eq!(outcome_notice(&LoadOutcome::Fresh), None);
        assert_eq!(outcome_notice(&LoadOutcome::Primary), None);
    }

    #[test]
    fn recovery_names_generation_and_preserved_copy() {
        let notice = outcome_notice(&LoadOutcome::Recovered {
            generation: 2,
            preserved: PathBuf::from("life.json.corrupted"),
        })
        .unwrap();
        assert!(notice.contains("backup 2"));
        assert!(notice.contains("life.json.corrupted"));
    }

    #[test]
    fn reset_names_the_preserved_copy() {
        let notice = outcome_notice(&LoadOutcome::Reset {
            preserved: PathBuf::from("pebbles.json.corrupted"),
        })
        .unwrap();
        assert!(notice.contains("starting fresh"));
        assert!(notice.ends_with("kept at pebbles.json.corrupted"));
    }

    #[test]
    fn service_errors_unwrap_into_cli_variants() {
        let err = CliError::from(ServiceError::Validation(ValidationError::EmptyText));
        assert!(matches!(err, CliError::Validation(ValidationError::EmptyText)));
        assert_eq!(err.to_string(), "text cannot be empty");
    }
}
