//! Interview Models
//!
//! Persisted interview summaries, the options that shape a script and its
//! transcript, and the structured digest synthesized from a
//! script/transcript pair.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Highest interview quality rating
pub const MAX_RATING: u8 = 10;

/// Interview lengths offered when drafting a script, in minutes
pub const LENGTH_CHOICES: [u32; 3] = [30, 45, 60];

/// Tags stored with an interview and matched against later searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewTags {
    pub industries: Vec<String>,
    pub functions: Vec<String>,
    pub levels: Vec<String>,
    pub topics: Vec<String>,
}

impl InterviewTags {
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
            && self.functions.is_empty()
            && self.levels.is_empty()
            && self.topics.is_empty()
    }
}

/// A saved script/transcript/notes triple tied to an expert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewSummary {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub expert_id: String,
    pub script: String,
    pub transcript: String,
    pub notes: String,
    /// RFC 3339 UTC timestamp with microsecond precision
    pub created_at: String,
    #[serde(default)]
    pub tags: InterviewTags,
    /// Consultant's quality score, 0 to `MAX_RATING`
    #[serde(default)]
    pub rating: Option<u8>,
}

impl InterviewSummary {
    /// Create an unsaved summary stamped with the current time
    pub fn new(
        expert_id: impl Into<String>,
        script: impl Into<String>,
        transcript: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            expert_id: expert_id.into(),
            script: script.into(),
            transcript: transcript.into(),
            notes: notes.into(),
            created_at: now_timestamp(),
            tags: InterviewTags::default(),
            rating: None,
        }
    }

    pub fn with_tags(mut self, tags: InterviewTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Current UTC time in the format stored by the database.
///
/// Fixed-width so lexical order equals chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Re-emit any RFC 3339 timestamp in the stored UTC microsecond format
pub fn normalize_timestamp(value: &str) -> Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Interviewer register, reflected in the script header and transcript opening
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Neutral,
    Assertive,
    Friendly,
}

impl Tone {
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Assertive => "Assertive",
            Tone::Friendly => "Friendly",
        }
    }

    /// Line the consultant opens with, if any
    pub fn opening(&self) -> Option<&'static str> {
        match self {
            Tone::Neutral => None,
            Tone::Assertive => Some("Consultant: We will keep this focused and time-boxed."),
            Tone::Friendly => {
                Some("Consultant: Appreciate you taking the time to share your experience.")
            }
        }
    }
}

/// How far an interview drills into each topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Depth {
    #[serde(rename = "High-level")]
    HighLevel,
    #[default]
    #[serde(rename = "Deep-dive")]
    DeepDive,
}

impl Depth {
    pub fn label(&self) -> &'static str {
        match self {
            Depth::HighLevel => "High-level",
            Depth::DeepDive => "Deep-dive",
        }
    }
}

/// Knobs for drafting a script and simulating its transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewOptions {
    /// One of `LENGTH_CHOICES`
    pub length_minutes: u32,
    pub tone: Tone,
    pub depth: Depth,
    /// Extra focus requested by the consultant; blank for none
    pub refine_text: String,
}

impl Default for InterviewOptions {
    fn default() -> Self {
        Self {
            length_minutes: 60,
            tone: Tone::default(),
            depth: Depth::default(),
            refine_text: String::new(),
        }
    }
}

impl InterviewOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !LENGTH_CHOICES.contains(&self.length_minutes) {
            return Err(format!(
                "interview length must be one of {:?} minutes, got {}",
                LENGTH_CHOICES, self.length_minutes
            ));
        }
        Ok(())
    }

    /// The refine text trimmed, or `None` when blank
    pub fn focus(&self) -> Option<&str> {
        let focus = self.refine_text.trim();
        (!focus.is_empty()).then_some(focus)
    }
}

/// Insights grouped under one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInsight {
    pub theme: String,
    pub bullets: Vec<String>,
}

/// A number quoted in the transcript with surrounding context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricMention {
    pub value: String,
    pub context: String,
}

/// Structured summary of one interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDigest {
    pub executive_summary: Vec<String>,
    pub credibility_bullets: Vec<String>,
    pub credibility_paragraph: String,
    pub insights_by_theme: Vec<ThemeInsight>,
    pub open_questions: Vec<String>,
    pub next_steps: Vec<String>,
    pub metrics: Vec<MetricMention>,
    pub topics: Vec<String>,
    /// Tags to store with the saved interview
    pub tags: InterviewTags,
}

impl InterviewDigest {
    /// Render the digest as Markdown, suitable for summary notes
    pub fn to_markdown(&self) -> String {
        let mut lines = vec!["## Executive Summary".to_string()];
        lines.extend(self.executive_summary.iter().map(|b| format!("- {}", b)));
        lines.push(String::new());

        lines.push("## Expert Credibility & Relevance".to_string());
        lines.extend(self.credibility_bullets.iter().map(|b| format!("- {}", b)));
        lines.push(self.credibility_paragraph.clone());
        lines.push(String::new());

        lines.push("## Key Insights by Theme".to_string());
        for insight in &self.insights_by_theme {
            lines.push(format!("**{}**", insight.theme));
            lines.extend(insight.bullets.iter().map(|b| format!("- {}", b)));
        }
        lines.push(String::new());

        if !self.metrics.is_empty() {
            lines.push("## Illustrative Metrics".to_string());
            lines.extend(
                self.metrics
                    .iter()
                    .map(|m| format!("- {} ({})", m.value, m.context)),
            );
            lines.push(String::new());
        }

        lines.push("## Open Questions / Uncertainties".to_string());
        lines.extend(self.open_questions.iter().map(|b| format!("- {}", b)));
        lines.push(String::new());

        lines.push("## Suggested Next Steps".to_string());
        lines.extend(self.next_steps.iter().map(|b| format!("- {}", b)));
        lines.join("\n")
    }
}
