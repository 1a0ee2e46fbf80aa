//! Interview Digest
//!
//! Deterministic structured summary of one interview: executive bullets,
//! credibility, insights by theme, open questions, next steps, and the
//! figures quoted in the transcript.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;

use expert_tool_core::{ranked_keywords, stable_seed};

use crate::models::expert::Expert;
use crate::models::interview::{InterviewDigest, InterviewTags, MetricMention, ThemeInsight};

const MAX_THEMES: usize = 5;
/// Characters of transcript kept on each side of a metric
const METRIC_CONTEXT: usize = 40;

const EXECUTIVE_BULLETS: &[&str] = &[
    "Expert has direct ownership experience aligned with the request.",
    "Insights reflect operational realities and trade-offs in execution.",
    "Illustrative metrics suggest material impact if levers are applied.",
    "Clear constraints and compliance boundaries were reinforced.",
    "Follow-on expert suggestions can deepen validation.",
    "Prioritize data quality and change management early.",
    "Stakeholder alignment is the most common blocker.",
];

const INSIGHTS: &[&str] = &[
    "Primary value driver in {theme} is process clarity and ownership.",
    "Sequencing changes in {theme} reduces risk and rework.",
    "Metrics discipline is critical to sustain {theme} improvements.",
];

const OPEN_QUESTIONS: &[&str] = &[
    "What baseline metrics should be prioritized for benchmarking?",
    "Which constraints are unique to the target client context?",
    "What is the feasible timeline for impact realization?",
    "Which stakeholders will resist change and why?",
];

const NEXT_STEPS: &[&str] = &[
    "Validate themes with a peer expert in an adjacent industry.",
    "Collect anonymized metrics or public benchmarks for triangulation.",
    "Draft a hypothesis tree for the top two levers.",
    "Plan a follow-up with the expert to test open questions.",
];

fn metric_regex() -> &'static Regex {
    static METRIC: OnceLock<Regex> = OnceLock::new();
    METRIC.get_or_init(|| Regex::new(r"(\d{1,3}(?:\.\d+)?)(%|x|k|m)?").expect("valid metric regex"))
}

/// Shuffle a bank and keep a random count in `min..=bank.len()`
fn sample(rng: &mut StdRng, bank: &[&str], min: usize) -> Vec<String> {
    let mut items: Vec<&str> = bank.to_vec();
    items.shuffle(rng);
    let keep = rng.gen_range(min.min(items.len())..=items.len());
    items.into_iter().take(keep).map(str::to_string).collect()
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Every number in `transcript` with up to 40 bytes of surrounding context
pub fn extract_metrics(transcript: &str) -> Vec<MetricMention> {
    metric_regex()
        .find_iter(transcript)
        .map(|m| {
            let start = floor_boundary(transcript, m.start().saturating_sub(METRIC_CONTEXT));
            let end = ceil_boundary(transcript, (m.end() + METRIC_CONTEXT).min(transcript.len()));
            MetricMention {
                value: m.as_str().to_string(),
                context: transcript[start..end].replace('\n', " ").trim().to_string(),
            }
        })
        .collect()
}

/// Themes for the digest: expert topics plus the script's dominant keywords
fn pick_themes(rng: &mut StdRng, expert: &Expert, script: &str) -> Vec<String> {
    let mut themes: Vec<String> = Vec::new();
    let candidates = expert
        .topic_keywords
        .iter()
        .cloned()
        .chain(ranked_keywords(script, MAX_THEMES));
    for theme in candidates {
        if !themes.contains(&theme) {
            themes.push(theme);
        }
    }
    themes.shuffle(rng);
    themes.truncate(MAX_THEMES);
    themes
}

/// Summarize an interview with `expert`.
pub fn summarize(expert: &Expert, script: &str, transcript: &str) -> InterviewDigest {
    let mut rng = StdRng::seed_from_u64(stable_seed([expert.id.as_str(), script, transcript]));
    let topics = pick_themes(&mut rng, expert, script);

    let executive_summary = sample(&mut rng, EXECUTIVE_BULLETS, 5);

    let credibility_bullets = vec![
        format!(
            "Role level: {} with {} years.",
            expert.role_level, expert.years_experience
        ),
        format!("Industries covered: {}.", expert.industry_tags.join(", ")),
        format!("Current or former company: {}.", expert.company),
    ];
    let credibility_paragraph = format!(
        "{} appears highly relevant based on direct scope ownership and recent leadership \
         experience as {}. Responses were consistent and bounded by compliance.",
        expert.name,
        expert.headline()
    );

    let insights_by_theme: Vec<ThemeInsight> = topics
        .iter()
        .map(|theme| {
            let bullets: Vec<String> = sample(&mut rng, INSIGHTS, 2)
                .into_iter()
                .map(|b| b.replace("{theme}", theme))
                .collect();
            ThemeInsight {
                theme: theme.clone(),
                bullets,
            }
        })
        .collect();

    let open_questions = sample(&mut rng, OPEN_QUESTIONS, 3);
    let next_steps = sample(&mut rng, NEXT_STEPS, 3);

    let tags = InterviewTags {
        industries: expert.industry_tags.clone(),
        functions: expert.function_tags.clone(),
        levels: vec![expert.role_level.clone()],
        topics: topics.clone(),
    };

    InterviewDigest {
        executive_summary,
        credibility_bullets,
        credibility_paragraph,
        insights_by_theme,
        open_questions,
        next_steps,
        metrics: extract_metrics(transcript),
        topics,
        tags,
    }
}
