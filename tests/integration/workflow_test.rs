//! Workflow Integration Tests
//!
//! Drives the public workflow API the way the demo binary does.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use expert_tool::models::case::Case;
use expert_tool::models::expert::SearchCriteria;
use expert_tool::models::interview::{Depth, InterviewOptions, InterviewSummary, Tone};
use expert_tool::services::template::OUTREACH_EMAIL;
use expert_tool::services::workflow::ELABORATION_HEADING;
use expert_tool::{AppError, Database, EmailStyle, ExpertCatalog, TemplateEngine, WorkflowService};
use expert_tool_llm::{DeterministicFallbackGenerator, TextGenerator, FALLBACK_PREFIX};

// ============================================================================
// Helper Functions
// ============================================================================

fn offline_service() -> WorkflowService {
    service_with(Arc::new(DeterministicFallbackGenerator::new()), TemplateEngine::with_builtins())
}

fn service_with(generator: Arc<dyn TextGenerator>, templates: TemplateEngine) -> WorkflowService {
    WorkflowService::new(
        Arc::new(ExpertCatalog::builtin()),
        Arc::new(templates),
        generator,
        Database::new_in_memory().unwrap(),
    )
}

/// Generator that records prompts and answers with a fixed string
#[derive(Default)]
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        "- Q: Canned follow-up?".to_string()
    }
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_filter_law() {
    let service = offline_service();
    let all = service.search_experts(None);

    for filter in ["acme", "VP", "europe", "Head", "zzz", "a ", " Pacific", "acme "] {
        let needle = filter.to_lowercase();
        let expected: Vec<&str> = all
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.company.to_lowercase().contains(&needle)
                    || e.geography.to_lowercase().contains(&needle)
            })
            .map(|e| e.id.as_str())
            .collect();
        let actual: Vec<&str> = service
            .search_experts(Some(filter))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(actual, expected, "filter {filter:?}");
    }

    let padded: Vec<&str> = service
        .search_experts(Some("a "))
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(padded, vec!["E4"]);
}

#[test]
fn test_empty_search_returns_full_catalog_in_order() {
    let service = offline_service();
    let catalog = ExpertCatalog::builtin();
    let ids: Vec<&str> = service
        .search_experts(Some(""))
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    let expected: Vec<&str> = catalog.experts().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_rank_experts_prefers_industry_match() {
    let service = offline_service();
    let criteria = SearchCriteria {
        industries: vec!["Software / SaaS".to_string()],
        free_text: "pricing packaging".to_string(),
        ..Default::default()
    };
    let ranked = service.rank_experts(&criteria);
    assert_eq!(ranked[0].expert.id, "E2");
    assert!(ranked[0].score > ranked.last().unwrap().score);
    assert!(ranked
        .last()
        .unwrap()
        .match_reasons
        .iter()
        .any(|r| r.starts_with("Industry mismatch")));
}

#[test]
fn test_agency_canvass_feeds_recommendations() {
    let service = offline_service();
    let criteria = SearchCriteria {
        industries: vec!["Logistics".to_string()],
        functions: vec!["Operations".to_string()],
        ..Default::default()
    };
    let networks = vec!["NEXUS".to_string(), "PRIME".to_string()];
    let responses = service
        .simulate_agency_responses(&criteria, "", &networks)
        .unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].agency_name, "NEXUS");
    let ranked = service.rank_experts(&criteria);
    assert_eq!(
        responses[0].recommended_experts[0].expert_id,
        ranked[0].expert.id
    );

    let recommended = service.recommend_experts(&criteria, &responses).unwrap();
    assert_eq!(recommended.len(), ranked.len());
    let mentioned: Vec<&str> = responses
        .iter()
        .flat_map(|r| r.recommended_experts.iter().map(|e| e.expert_id.as_str()))
        .collect();
    for item in &recommended {
        let base = ranked
            .iter()
            .find(|r| r.expert.id == item.expert.id)
            .unwrap()
            .score;
        if mentioned.contains(&item.expert.id.as_str()) {
            assert!(item.score >= base, "{} lost score", item.expert.id);
            assert!(item.match_reasons[0].starts_with("Agency recommendations"));
        } else {
            assert_eq!(item.score, base);
        }
    }
    for pair in recommended.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

// ============================================================================
// Script generation
// ============================================================================

#[tokio::test]
async fn test_market_sizing_scenario() {
    let service = offline_service();
    service
        .save_case_context(&Case::new("CASE-001", "market sizing"))
        .unwrap();

    let first = service.generate_script("E1", "CASE-001").await.unwrap();
    let second = service.generate_script("E1", "CASE-001").await.unwrap();

    for expected in ["COO", "Acme", "CASE-001", "market sizing"] {
        assert!(first.contains(expected), "script is missing {expected}");
    }
    assert_eq!(first, second);
    assert!(first.contains(&format!("{}\n{}", ELABORATION_HEADING, FALLBACK_PREFIX)));
}

#[tokio::test]
async fn test_generator_receives_rendered_template() {
    let generator = Arc::new(RecordingGenerator::default());
    let service = service_with(generator.clone(), TemplateEngine::with_builtins());

    let script = service.generate_script("E4", "").await.unwrap();
    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Head of Procurement"));
    assert!(script.starts_with(prompts[0].trim_end()));
    assert!(script.ends_with(&format!("{}\n- Q: Canned follow-up?", ELABORATION_HEADING)));
}

#[tokio::test]
async fn test_unknown_expert_fails_before_generation() {
    let generator = Arc::new(RecordingGenerator::default());
    let service = service_with(generator.clone(), TemplateEngine::with_builtins());

    let err = service.generate_script("E999", "CASE-001").await.unwrap_err();
    assert!(matches!(err, AppError::ExpertNotFound(_)));
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_script_template_is_reported() {
    let service = service_with(
        Arc::new(DeterministicFallbackGenerator::new()),
        TemplateEngine::new(),
    );
    let err = service.generate_script("E1", "").await.unwrap_err();
    assert!(matches!(err, AppError::TemplateNotFound(_)));
}

// ============================================================================
// Transcript, digest, and save
// ============================================================================

#[tokio::test]
async fn test_full_interview_pass() {
    let service = offline_service();
    service
        .save_case_context(&Case::new("CASE-002", "pricing review"))
        .unwrap();

    let script = service.generate_script("E2", "CASE-002").await.unwrap();
    let transcript = service.simulate_transcript(&script);
    assert_eq!(transcript, service.simulate_transcript(&script));

    for line in script.lines() {
        if let Some(question) = line.trim().strip_prefix("- Q:") {
            let question = question.trim();
            assert!(
                transcript.contains(&format!("Consultant: {}", question)),
                "transcript is missing {question}"
            );
        }
    }

    let digest = service
        .summarize_interview("E2", &script, &transcript)
        .unwrap();
    let notes = digest.to_markdown();
    assert!(notes.starts_with("## Executive Summary"));

    let id = service
        .save_interview("E2", &script, &transcript, &notes)
        .unwrap();
    let saved = service.load_interview(id).unwrap();
    assert_eq!(saved.script, script);
    assert_eq!(saved.transcript, transcript);
    assert_eq!(saved.notes, notes);
}

#[tokio::test]
async fn test_options_flow_through_script_and_transcript() {
    let service = offline_service();
    let options = InterviewOptions {
        length_minutes: 45,
        tone: Tone::Friendly,
        depth: Depth::HighLevel,
        refine_text: "carrier contracts".to_string(),
    };
    let script = service
        .generate_script_with("E6", "", &options)
        .await
        .unwrap();
    assert!(script.contains("**Format:** 45 minutes, friendly tone, high-level"));

    let transcript = service.simulate_transcript_with(&script, &options);
    assert!(transcript.starts_with(Tone::Friendly.opening().unwrap()));
    assert!(transcript.contains("Consultant: Let's start with carrier contracts."));
    assert!(!transcript.contains("Can you clarify the constraint behind that?"));
    assert_eq!(transcript, service.simulate_transcript_with(&script, &options));
}

#[test]
fn test_digest_tags_are_saved_with_rating() {
    let service = offline_service();
    let script = "- Q: How do you design a last mile network?";
    let transcript = service.simulate_transcript(script);
    let digest = service
        .summarize_interview("E6", script, &transcript)
        .unwrap();

    let summary = InterviewSummary::new("E6", script, &transcript, digest.to_markdown())
        .with_tags(digest.tags.clone())
        .with_rating(6);
    let id = service.save_interview_summary(&summary).unwrap();

    let saved = service.load_interview(id).unwrap();
    assert_eq!(saved.tags, digest.tags);
    assert_eq!(saved.tags.levels, vec!["VP"]);
    assert_eq!(saved.rating, Some(6));
}

#[test]
fn test_summarize_unknown_expert() {
    let err = offline_service()
        .summarize_interview("missing", "s", "t")
        .unwrap_err();
    assert!(matches!(err, AppError::ExpertNotFound(_)));
}

// ============================================================================
// Agency email
// ============================================================================

#[test]
fn test_outreach_email_from_asset() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("email_template.md");
    let mut templates = TemplateEngine::with_builtins();
    templates.load_asset(OUTREACH_EMAIL, &path).unwrap();
    let service = service_with(Arc::new(DeterministicFallbackGenerator::new()), templates);

    let mut case = Case::new("CASE-003", "operations diagnostic");
    case.scope = "Hospital network".to_string();
    service.save_case_context(&case).unwrap();

    let email = service
        .draft_agency_email("E3", "CASE-003", EmailStyle::Outreach)
        .unwrap();
    assert!(email.starts_with("Subject: Expert request for CASE-003"));
    assert!(email.contains("Objective: operations diagnostic"));
    assert!(email.contains("Industry: Healthcare Providers"));
    assert!(!email.contains("{{"));
}
