//! Life-commit use-case service.
//!
//! # Responsibility
//! - Infer a commit type from the message when none is given.
//! - Validate quick-commit input and append the commit to the store.
//!
//! # Invariants
//! - Explicit mood/energy input outside the declared ranges is rejected
//!   here; interactive callers clamp before building the request.
//! - The stored timestamp is assigned by the service, never the caller.

use crate::model::commit::{CommitType, Energy, LifeCommit, Mood};
use crate::service::journal_service::{JournalService, ServiceError, ValidationError};
use crate::stats::streak;
use crate::store::{LoadOutcome, Loaded};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid word regex"));

const WORD_TRIM: &[char] = &['.', ',', '!', '?', ';', ':'];

const TYPE_KEYWORDS: &[(&str, CommitType)] = &[
    ("fixed", CommitType::Fix),
    ("repaired", CommitType::Fix),
    ("resolved", CommitType::Fix),
    ("debugged", CommitType::Fix),
    ("patched", CommitType::Fix),
    ("learned", CommitType::Docs),
    ("studied", CommitType::Docs),
    ("researched", CommitType::Docs),
    ("documented", CommitType::Docs),
    ("noted", CommitType::Docs),
    ("tried", CommitType::Feat),
    ("built", CommitType::Feat),
    ("created", CommitType::Feat),
    ("shipped", CommitType::Feat),
    ("launched", CommitType::Feat),
    ("finished", CommitType::Feat),
    ("completed", CommitType::Feat),
    ("started", CommitType::Feat),
    ("made", CommitType::Feat),
    ("added", CommitType::Feat),
    ("improved", CommitType::Refactor),
    ("optimized", CommitType::Refactor),
    ("refactored", CommitType::Refactor),
    ("restructured", CommitType::Refactor),
    ("simplified", CommitType::Refactor),
    ("cleaned", CommitType::Chore),
    ("organized", CommitType::Chore),
    ("maintained", CommitType::Chore),
    ("updated", CommitType::Chore),
    ("styled", CommitType::Style),
    ("designed", CommitType::Style),
    ("formatted", CommitType::Style),
    ("tested", CommitType::Test),
    ("verified", CommitType::Test),
    ("validated", CommitType::Test),
];

/// Infers the commit type from the first keyword found in `message`.
///
/// Words are lowercased and stripped of trailing punctuation; `feat` is
/// the fallback when nothing matches.
pub fn detect_commit_type(message: &str) -> CommitType {
    WORD_RE
        .find_iter(&message.to_lowercase())
        .map(|word| word.as_str().trim_matches(WORD_TRIM).to_string())
        .find_map(|word| {
            TYPE_KEYWORDS
                .iter()
                .find(|(keyword, _)| *keyword == word)
                .map(|(_, kind)| *kind)
        })
        .unwrap_or_default()
}

/// Raw quick-commit input, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRequest {
    pub message: String,
    /// Explicit type; detected from the message when `None`.
    pub kind: Option<CommitType>,
    pub scope: Option<String>,
    pub details: Option<String>,
    pub tags: Vec<String>,
    pub mood: Option<i64>,
    pub energy: Option<i64>,
}

impl CommitRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Validates the request and builds the commit stamped at `now`/`today`.
    ///
    /// # Errors
    /// - `EmptyText` when the message is blank.
    /// - `MoodOutOfRange` / `EnergyOutOfRange` for explicit scores outside
    ///   their ranges.
    pub fn into_commit(
        self,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<LifeCommit, ValidationError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let mood = match self.mood {
            Some(value) => Mood::checked(value).ok_or(ValidationError::MoodOutOfRange(value))?,
            None => Mood::default(),
        };
        let energy = match self.energy {
            Some(value) => {
                Energy::checked(value).ok_or(ValidationError::EnergyOutOfRange(value))?
            }
            None => Energy::default(),
        };
        let kind = self.kind.unwrap_or_else(|| detect_commit_type(message));

        Ok(LifeCommit::new(message, kind, now, today)
            .with_scope(self.scope.as_deref().unwrap_or_default())
            .with_details(self.details.unwrap_or_default().trim())
            .with_tags(&self.tags)
            .with_mood(mood.value())
            .with_energy(energy.value()))
    }
}

/// Outcome of recording a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub commit: LifeCommit,
    /// Consecutive-day streak including the new commit.
    pub streak: u32,
    pub total: usize,
    /// How the store was obtained before the append.
    pub outcome: LoadOutcome,
}

/// Records life commits into a journal store.
pub struct CommitService {
    journal: JournalService<LifeCommit>,
}

impl CommitService {
    pub fn new(journal: JournalService<LifeCommit>) -> Self {
        Self { journal }
    }

    pub fn journal(&self) -> &JournalService<LifeCommit> {
        &self.journal
    }

    /// Validates, appends and saves one commit.
    ///
    /// Validation happens before the store is loaded, so invalid input
    /// never touches the file.
    pub fn record(
        &self,
        request: CommitRequest,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<RecordedCommit, ServiceError> {
        let commit = request.into_commit(now, today)?;
        let Loaded { store, outcome } = self.journal.append(commit.clone())?;
        Ok(RecordedCommit {
            streak: streak(&store.records, today),
            total: store.len(),
            outcome,
            commit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_commit_type, CommitRequest};
    use crate::model::commit::CommitType;
    use crate::service::journal_service::ValidationError;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn detects_first_keyword_ignoring_punctuation() {
        assert_eq!(detect_commit_type("Finally FIXED the sink!"), CommitType::Fix);
        assert_eq!(detect_commit_type("learned rust, built a shed"), CommitType::Docs);
        assert_eq!(detect_commit_type("Cleaned."), CommitType::Chore);
        assert_eq!(detect_commit_type("a quiet walk"), CommitType::Feat);
    }

    #[test]
    fn request_rejects_blank_message_and_bad_scores() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let err = CommitRequest::new("   ").into_commit(Utc::now(), today).unwrap_err();
        assert_eq!(err, ValidationError::EmptyText);

        let mut request = CommitRequest::new("walked");
        request.mood = Some(99);
        let err = request.into_commit(Utc::now(), today).unwrap_err();
        assert_eq!(err, ValidationError::MoodOutOfRange(99));

        let mut request = CommitRequest::new("walked");
        request.energy = Some(0);
        let err = request.into_commit(Utc::now(), today).unwrap_err();
        assert_eq!(err, ValidationError::EnergyOutOfRange(0));
    }

    #[test]
    fn request_fills_defaults_and_detects_type() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut request = CommitRequest::new("  tested the new bike ");
        request.tags = vec!["Outdoors".to_string(), " Outdoors ".to_string()];
        request.scope = Some("  ".to_string());

        let commit = request.into_commit(Utc::now(), today).unwrap();

        assert_eq!(commit.message, "tested the new bike");
        assert_eq!(commit.kind, CommitType::Test);
        assert_eq!(commit.scope, "life");
        assert_eq!(commit.tags, vec!["Outdoors"]);
        assert_eq!(commit.mood.value(), 0);
        assert_eq!(commit.energy.value(), 3);
        assert_eq!(commit.date, today);
    }
}
