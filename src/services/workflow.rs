//! Workflow Service
//!
//! Ties the catalog, templates, generator, and database together into the
//! operations a consultant performs: find an expert, canvass agencies, draft a
//! script, simulate the call, summarize it, and save the result against a case.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use expert_tool_llm::TextGenerator;

use crate::models::agency::AgencyResponse;
use crate::models::case::{Case, CaseSummary};
use crate::models::expert::{Expert, RankedExpert, SearchCriteria};
use crate::models::interview::{InterviewDigest, InterviewOptions, InterviewSummary, InterviewTags};
use crate::services::catalog::ExpertCatalog;
use crate::services::template::{
    TemplateEngine, AGENCY_BRAND, AGENCY_SHORT, INTERVIEW_SCRIPT, OUTREACH_EMAIL,
};
use crate::services::{agency, digest, scoring, transcript};
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

/// Heading placed between the rendered script and the generated elaboration
pub const ELABORATION_HEADING: &str = "## Suggested Elaboration";

/// Value bound to case fields that have not been filled in
const NOT_PROVIDED: &str = "Not provided";

/// Addressee used by agency emails
const DEFAULT_CONTACT: &str = "Team";

/// Recent interviews whose tags feed recommendations
const HISTORY_WINDOW: u32 = 10;

/// Layout of an agency outreach email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStyle {
    /// Long candidate write-up
    Brand,
    /// Short booking reply
    Short,
    /// External template loaded from disk
    Outreach,
}

impl EmailStyle {
    /// Template rendered for this style
    pub fn template_name(&self) -> &'static str {
        match self {
            EmailStyle::Brand => AGENCY_BRAND,
            EmailStyle::Short => AGENCY_SHORT,
            EmailStyle::Outreach => OUTREACH_EMAIL,
        }
    }
}

fn or_not_provided(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

/// Orchestrates the expert interview workflow. Holds no per-call state.
pub struct WorkflowService {
    catalog: Arc<ExpertCatalog>,
    templates: Arc<TemplateEngine>,
    generator: Arc<dyn TextGenerator>,
    database: Database,
}

impl WorkflowService {
    pub fn new(
        catalog: Arc<ExpertCatalog>,
        templates: Arc<TemplateEngine>,
        generator: Arc<dyn TextGenerator>,
        database: Database,
    ) -> Self {
        Self {
            catalog,
            templates,
            generator,
            database,
        }
    }

    /// Name of the active text generator
    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// The backing database
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn expert(&self, expert_id: &str) -> AppResult<&Expert> {
        self.catalog
            .get_expert(expert_id)
            .ok_or_else(|| AppError::ExpertNotFound(expert_id.to_string()))
    }

    /// Case context for template bindings; a blank code means no case
    fn case_or_default(&self, case_code: &str) -> AppResult<Case> {
        if case_code.trim().is_empty() {
            return Ok(Case::default());
        }
        Ok(self
            .database
            .load_case(case_code)?
            .unwrap_or_else(|| Case::new(case_code, "")))
    }

    /// Experts matching `filter` on title, company, or geography
    pub fn search_experts(&self, filter: Option<&str>) -> Vec<&Expert> {
        self.catalog.list_experts(filter)
    }

    /// Case codes and labels from the catalog
    pub fn list_cases(&self) -> Vec<CaseSummary> {
        self.catalog.list_cases()
    }

    /// Rank every expert against `criteria`, best match first
    pub fn rank_experts(&self, criteria: &SearchCriteria) -> Vec<RankedExpert> {
        scoring::rank_experts(criteria, self.catalog.experts())
    }

    /// Simulate expert-network replies to an outreach for `criteria`.
    ///
    /// A blank `networks` list contacts the default networks.
    pub fn simulate_agency_responses(
        &self,
        criteria: &SearchCriteria,
        case_code: &str,
        networks: &[String],
    ) -> AppResult<Vec<AgencyResponse>> {
        let case = self.case_or_default(case_code)?;
        let ranked = self.rank_experts(criteria);
        let responses = agency::simulate_responses(&ranked, networks, |style, expert| {
            self.templates
                .render(style.template_name(), &email_bindings(expert, &case))
        })?;
        tracing::info!(agencies = responses.len(), case_code, "Simulated agency responses");
        Ok(responses)
    }

    /// Rank experts on criteria, agency mentions, and the tags of recent interviews
    pub fn recommend_experts(
        &self,
        criteria: &SearchCriteria,
        responses: &[AgencyResponse],
    ) -> AppResult<Vec<RankedExpert>> {
        let history: Vec<InterviewTags> = self
            .database
            .list_recent_summaries(HISTORY_WINDOW)?
            .into_iter()
            .map(|s| s.tags)
            .collect();
        let ranked = self.rank_experts(criteria);
        Ok(agency::synthesize(
            self.catalog.experts(),
            &ranked,
            responses,
            &history,
        ))
    }

    /// Draft an interview script for an expert and (optionally saved) case.
    ///
    /// The rendered template is followed by the generator's elaboration of it.
    pub async fn generate_script(&self, expert_id: &str, case_code: &str) -> AppResult<String> {
        self.generate_script_with(expert_id, case_code, &InterviewOptions::default())
            .await
    }

    /// Draft an interview script with explicit length, tone, depth, and focus
    pub async fn generate_script_with(
        &self,
        expert_id: &str,
        case_code: &str,
        options: &InterviewOptions,
    ) -> AppResult<String> {
        options.validate().map_err(AppError::invalid_input)?;
        let expert = self.expert(expert_id)?;
        let case = self.case_or_default(case_code)?;

        let bindings: HashMap<String, String> = [
            ("expert_name", expert.name.clone()),
            ("expert_title", expert.title.clone()),
            ("expert_company", expert.company.clone()),
            ("expert_geography", expert.geography.clone()),
            ("expert_years", expert.years_experience.to_string()),
            ("case_code", or_not_provided(&case.case_code)),
            ("objective", or_not_provided(&case.objective)),
            ("scope", or_not_provided(&case.scope)),
            ("notes", or_not_provided(&case.notes)),
            ("length_minutes", options.length_minutes.to_string()),
            ("tone", options.tone.label().to_lowercase()),
            ("depth", options.depth.label().to_lowercase()),
            ("focus", or_not_provided(options.focus().unwrap_or_default())),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let rendered = self.templates.render(INTERVIEW_SCRIPT, &bindings)?;
        let generated = self.generator.generate(&rendered).await;

        tracing::info!(
            expert_id,
            case_code,
            generator = self.generator.name(),
            "Generated interview script"
        );
        Ok(format!(
            "{}\n\n{}\n{}",
            rendered.trim_end(),
            ELABORATION_HEADING,
            generated
        ))
    }

    /// Simulate a transcript for `script`
    pub fn simulate_transcript(&self, script: &str) -> String {
        transcript::simulate_transcript(script)
    }

    /// Simulate a transcript shaped by tone, depth, and focus
    pub fn simulate_transcript_with(&self, script: &str, options: &InterviewOptions) -> String {
        transcript::simulate_transcript_with(script, options)
    }

    /// Structured summary of an interview with a catalog expert
    pub fn summarize_interview(
        &self,
        expert_id: &str,
        script: &str,
        transcript: &str,
    ) -> AppResult<InterviewDigest> {
        let expert = self.expert(expert_id)?;
        Ok(digest::summarize(expert, script, transcript))
    }

    /// Persist an interview for a catalog expert, returning its id
    pub fn save_interview(
        &self,
        expert_id: &str,
        script: &str,
        transcript: &str,
        notes: &str,
    ) -> AppResult<i64> {
        self.save_interview_summary(&InterviewSummary::new(expert_id, script, transcript, notes))
    }

    /// Persist a prepared summary (tags, rating, or an id to overwrite) for a
    /// catalog expert, returning its id
    pub fn save_interview_summary(&self, summary: &InterviewSummary) -> AppResult<i64> {
        self.expert(&summary.expert_id)?;
        let id = self.database.save_summary(summary)?;
        tracing::info!(id, expert_id = %summary.expert_id, "Saved interview");
        Ok(id)
    }

    /// Record the consultant's 0-10 quality rating for a saved interview
    pub fn rate_interview(&self, id: i64, rating: u8) -> AppResult<()> {
        let summary = self.load_interview(id)?.with_rating(rating);
        self.database.save_summary(&summary)?;
        tracing::info!(id, rating, "Rated interview");
        Ok(())
    }

    /// Every saved interview, newest first
    pub fn list_interviews(&self) -> AppResult<Vec<InterviewSummary>> {
        self.database.list_summaries()
    }

    /// The `limit` newest interviews
    pub fn recent_interviews(&self, limit: u32) -> AppResult<Vec<InterviewSummary>> {
        self.database.list_recent_summaries(limit)
    }

    /// Load a saved interview
    pub fn load_interview(&self, id: i64) -> AppResult<InterviewSummary> {
        self.database
            .load_summary(id)?
            .ok_or_else(|| AppError::not_found(format!("interview {}", id)))
    }

    /// Save case context, replacing any earlier version
    pub fn save_case_context(&self, case: &Case) -> AppResult<()> {
        if case.case_code.trim().is_empty() {
            return Err(AppError::invalid_input("case code must not be empty"));
        }
        self.database.save_case(case)?;
        tracing::info!(case_code = %case.case_code, "Saved case context");
        Ok(())
    }

    /// Load case context by code
    pub fn load_case_context(&self, case_code: &str) -> AppResult<Case> {
        if case_code.trim().is_empty() {
            return Err(AppError::invalid_input("case code must not be empty"));
        }
        self.database
            .load_case(case_code)?
            .ok_or_else(|| AppError::not_found(format!("case {}", case_code)))
    }

    /// Draft an email to an expert network about a candidate.
    ///
    /// `Outreach` requires the external template to have been loaded.
    pub fn draft_agency_email(
        &self,
        expert_id: &str,
        case_code: &str,
        style: EmailStyle,
    ) -> AppResult<String> {
        let expert = self.expert(expert_id)?;
        let case = self.case_or_default(case_code)?;
        let bindings = email_bindings(expert, &case);
        self.templates.render(style.template_name(), &bindings)
    }
}

/// Values available to every agency email template
fn email_bindings(expert: &Expert, case: &Case) -> HashMap<String, String> {
    let headline = expert.headline();
    let availability = expert.availability.clone().unwrap_or_else(|| {
        "This expert has not provided availability. We can expedite upon request.".to_string()
    });
    let availability_short = if availability.contains("Available") {
        "available for a call this week"
    } else {
        "pending availability"
    };
    let relevant_experience = if expert.industry_tags.is_empty() {
        headline.clone()
    } else {
        expert.industry_tags.join("; ")
    };
    let bio_paragraph = format!(
        "{} is a former {} with {} years of experience. Their expertise spans {}.",
        expert.name,
        headline,
        expert.years_experience,
        expert.topic_keywords.join(", ")
    );
    let industry = if case.industry.trim().is_empty() {
        expert.industry_tags.first().cloned().unwrap_or_default()
    } else {
        case.industry.clone()
    };

    [
        ("contact_name", DEFAULT_CONTACT.to_string()),
        ("expert_name", expert.name.clone()),
        ("expert_headline", headline),
        ("geography", expert.geography.clone()),
        ("bio_paragraph", bio_paragraph),
        ("availability", availability),
        ("availability_short", availability_short.to_string()),
        ("relevant_experience", relevant_experience),
        (
            "highlight_1",
            format!("Led initiatives in {}.", expert.function_tags.join(", ")),
        ),
        (
            "highlight_2",
            format!("Experienced across {}.", expert.industry_tags.join(", ")),
        ),
        (
            "highlight_3",
            format!("Languages: {}.", expert.languages.join(", ")),
        ),
        ("case_code", or_not_provided(&case.case_code)),
        ("objective", or_not_provided(&case.objective)),
        ("scope", or_not_provided(&case.scope)),
        ("industry", or_not_provided(&industry)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
