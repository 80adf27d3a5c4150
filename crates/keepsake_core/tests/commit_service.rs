use chrono::{Duration, NaiveDate, Utc};
use keepsake_core::{
    CommitRequest, CommitService, CommitType, JournalService, LifeCommit, ServiceError,
    StoreConfig, ValidationError,
};
use std::fs;

fn service(dir: &tempfile::TempDir) -> CommitService {
    let config = StoreConfig::new(dir.path().join("nested").join("life_commits.json")).with_backups(3);
    CommitService::new(JournalService::<LifeCommit>::open(config))
}

#[test]
fn record_creates_directory_and_reports_streak() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);
    let today = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();

    let mut yesterday = CommitRequest::new("Studied Spanish for an hour");
    yesterday.tags = vec!["learning".to_string()];
    let first = service
        .record(yesterday, Utc::now(), today - Duration::days(1))
        .unwrap();
    assert_eq!(first.commit.kind, CommitType::Docs);
    assert_eq!(first.total, 1);

    let mut request = CommitRequest::new("Shipped the garden bed");
    request.kind = Some(CommitType::Chore);
    request.mood = Some(2);
    request.energy = Some(5);
    let second = service.record(request, Utc::now(), today).unwrap();

    assert_eq!(second.commit.kind, CommitType::Chore);
    assert_eq!(second.streak, 2);
    assert_eq!(second.total, 2);
    assert!(service.journal().store().path().exists());
}

#[test]
fn validation_failure_does_not_touch_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);
    let today = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
    service
        .record(CommitRequest::new("first"), Utc::now(), today)
        .unwrap();
    let before = fs::read(service.journal().store().path()).unwrap();

    let mut request = CommitRequest::new("too happy");
    request.mood = Some(99);
    let err = service.record(request, Utc::now(), today).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MoodOutOfRange(99))
    ));
    assert_eq!(fs::read(service.journal().store().path()).unwrap(), before);
}

#[test]
fn unknown_type_converts_to_validation_error() {
    let err: ValidationError = "hobby".parse::<CommitType>().unwrap_err().into();
    assert_eq!(err, ValidationError::UnknownCommitType("hobby".to_string()));
    assert!(err.to_string().contains("feat|fix"));
}
