//! Persistence Integration Tests
//!
//! Case context and interview summaries through the workflow API, on both
//! in-memory and on-disk databases.

use std::sync::Arc;

use tempfile::TempDir;

use expert_tool::models::case::Case;
use expert_tool::models::interview::{InterviewSummary, InterviewTags};
use expert_tool::{AppError, Database, ExpertCatalog, TemplateEngine, WorkflowService};
use expert_tool_llm::DeterministicFallbackGenerator;

fn service_on(database: Database) -> WorkflowService {
    WorkflowService::new(
        Arc::new(ExpertCatalog::builtin()),
        Arc::new(TemplateEngine::with_builtins()),
        Arc::new(DeterministicFallbackGenerator::new()),
        database,
    )
}

#[test]
fn test_case_round_trip_and_last_write_wins() {
    let service = service_on(Database::new_in_memory().unwrap());

    let mut case = Case::new("CASE-001", "market sizing");
    case.scope = "North America".to_string();
    case.notes = "Focus on mid-size plants".to_string();
    service.save_case_context(&case).unwrap();
    assert_eq!(service.load_case_context("CASE-001").unwrap(), case);

    let replacement = Case::new("CASE-001", "competitive landscape");
    service.save_case_context(&replacement).unwrap();
    assert_eq!(service.load_case_context("CASE-001").unwrap(), replacement);
}

#[test]
fn test_blank_case_code_is_invalid() {
    let service = service_on(Database::new_in_memory().unwrap());
    assert!(matches!(
        service.save_case_context(&Case::new("", "anything")),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        service.load_case_context("   "),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_interviews_listed_newest_first() {
    let database = Database::new_in_memory().unwrap();
    let service = service_on(database.clone());

    let older = InterviewSummary {
        created_at: "2025-01-01T09:00:00.000000Z".to_string(),
        ..InterviewSummary::new("E1", "s1", "t1", "")
    };
    let older_id = database.save_summary(&older).unwrap();
    let newer_id = service.save_interview("E2", "s2", "t2", "n2").unwrap();

    let ids: Vec<i64> = service
        .list_interviews()
        .unwrap()
        .into_iter()
        .filter_map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![newer_id, older_id]);

    let recent = service.recent_interviews(1).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].expert_id, "E2");
}

#[test]
fn test_missing_interview_is_not_found() {
    let service = service_on(Database::new_in_memory().unwrap());
    assert!(matches!(
        service.load_interview(7),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_data_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("et_interviews.db");

    let id = {
        let service = service_on(Database::open(&path).unwrap());
        service
            .save_case_context(&Case::new("CASE-002", "pricing review"))
            .unwrap();
        service.save_interview("E2", "script", "transcript", "notes").unwrap()
    };

    let service = service_on(Database::open(&path).unwrap());
    assert_eq!(
        service.load_case_context("CASE-002").unwrap().objective,
        "pricing review"
    );
    let loaded = service.load_interview(id).unwrap();
    assert_eq!(loaded.notes, "notes");
    assert!(chrono::DateTime::parse_from_rfc3339(&loaded.created_at).is_ok());
}

#[test]
fn test_mixed_offsets_list_chronologically() {
    let service = service_on(Database::new_in_memory().unwrap());

    // 07:30Z, 08:00Z and 09:00Z written in three different notations
    let middle = InterviewSummary {
        created_at: "2025-03-01T10:00:00+02:00".to_string(),
        ..InterviewSummary::new("E1", "s", "t", "")
    };
    let newest = InterviewSummary {
        created_at: "2025-03-01T09:00:00Z".to_string(),
        ..InterviewSummary::new("E2", "s", "t", "")
    };
    let oldest = InterviewSummary {
        created_at: "2025-03-01T02:30:00.000-05:00".to_string(),
        ..InterviewSummary::new("E3", "s", "t", "")
    };
    let middle_id = service.save_interview_summary(&middle).unwrap();
    let newest_id = service.save_interview_summary(&newest).unwrap();
    let oldest_id = service.save_interview_summary(&oldest).unwrap();

    let listed = service.list_interviews().unwrap();
    let ids: Vec<i64> = listed.iter().filter_map(|s| s.id).collect();
    assert_eq!(ids, vec![newest_id, middle_id, oldest_id]);
    assert_eq!(listed[2].created_at, "2025-03-01T07:30:00.000000Z");

    let bad = InterviewSummary {
        created_at: "03/01/2025 09:00".to_string(),
        ..InterviewSummary::new("E1", "s", "t", "")
    };
    assert!(matches!(
        service.save_interview_summary(&bad),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_tags_and_rating_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("et_interviews.db");
    let tags = InterviewTags {
        industries: vec!["Logistics".to_string()],
        functions: vec!["Operations".to_string()],
        levels: vec!["VP".to_string()],
        topics: vec!["last mile".to_string()],
    };

    let id = {
        let service = service_on(Database::open(&path).unwrap());
        let summary = InterviewSummary::new("E6", "script", "transcript", "notes")
            .with_tags(tags.clone());
        let id = service.save_interview_summary(&summary).unwrap();
        service.rate_interview(id, 9).unwrap();
        id
    };

    let service = service_on(Database::open(&path).unwrap());
    let loaded = service.load_interview(id).unwrap();
    assert_eq!(loaded.tags, tags);
    assert_eq!(loaded.rating, Some(9));
}

#[test]
fn test_unwritable_location_is_storage_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("occupied");
    std::fs::write(&blocker, "not a directory").unwrap();

    let err = Database::open(&blocker.join("nested").join("et_interviews.db")).unwrap_err();
    assert!(err.is_storage_error(), "unexpected error: {err}");
}
