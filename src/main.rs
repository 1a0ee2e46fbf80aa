// Expert Tool - demo entry point
//
// Runs one search -> agency canvass -> script -> transcript -> save pass against
// the configured database and logs what happened.

use anyhow::Context;

use expert_tool::models::case::Case;
use expert_tool::models::expert::SearchCriteria;
use expert_tool::models::interview::InterviewSummary;
use expert_tool::storage::ConfigService;
use expert_tool::{AppError, AppState};

const DEMO_EXPERT: &str = "E1";
const DEMO_CASE: &str = "CASE-001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ConfigService::new().context("failed to load config")?;
    tracing::info!(path = %config.path().display(), "Loaded configuration");

    let state =
        AppState::initialize(config.get_config_clone()).context("failed to initialize state")?;
    let workflow = state.workflow();

    let matches = workflow.search_experts(Some("acme"));
    tracing::info!(count = matches.len(), "Experts matching 'acme'");
    for expert in &matches {
        tracing::info!(id = %expert.id, name = %expert.name, headline = %expert.headline());
    }

    match workflow.load_case_context(DEMO_CASE) {
        Ok(case) => tracing::info!(case_code = %case.case_code, "Using saved case"),
        Err(AppError::NotFound(_)) => {
            let mut case = Case::new(DEMO_CASE, "market sizing");
            case.scope = "Industrial automation, North America".to_string();
            case.industry = "Industrial Manufacturing".to_string();
            workflow.save_case_context(&case)?;
        }
        Err(e) => return Err(e.into()),
    }

    let criteria = SearchCriteria {
        industries: vec!["Industrial Manufacturing".to_string()],
        functions: vec!["Operations".to_string()],
        free_text: "automation market sizing".to_string(),
        ..Default::default()
    };
    let responses = workflow.simulate_agency_responses(&criteria, DEMO_CASE, &[])?;
    let recommended = workflow.recommend_experts(&criteria, &responses)?;
    for ranked in recommended.iter().take(3) {
        tracing::info!(
            id = %ranked.expert.id,
            score = ranked.score,
            reasons = ?ranked.match_reasons,
            "Recommended expert"
        );
    }

    let script = workflow.generate_script(DEMO_EXPERT, DEMO_CASE).await?;
    let transcript = workflow.simulate_transcript(&script);
    let digest = workflow.summarize_interview(DEMO_EXPERT, &script, &transcript)?;

    let summary =
        InterviewSummary::new(DEMO_EXPERT, &script, &transcript, digest.to_markdown())
            .with_tags(digest.tags.clone());
    let id = workflow.save_interview_summary(&summary)?;
    tracing::info!(
        id,
        script_lines = script.lines().count(),
        transcript_lines = transcript.lines().count(),
        metrics = digest.metrics.len(),
        "Saved demo interview"
    );

    let recent = workflow.recent_interviews(state.config().recent_limit)?;
    for summary in &recent {
        tracing::info!(
            id = ?summary.id,
            expert_id = %summary.expert_id,
            created_at = %summary.created_at,
            "Recent interview"
        );
    }

    Ok(())
}
