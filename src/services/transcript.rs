//! Transcript Simulator
//!
//! Turns an interview script into a mock Consultant/Expert transcript. The
//! same script and options always produce the same transcript.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use expert_tool_core::stable_seed;

use crate::models::interview::{Depth, InterviewOptions};

const QUESTION_PREFIX: &str = "- Q:";

const INTRO: &[&str] = &[
    "Consultant: Thanks for joining today. We will keep this high level and avoid confidential specifics.",
    "Expert: Happy to help. I'll stay within compliance boundaries and share generalized patterns only.",
];

const ANSWERS: &[&str] = &[
    "Expert: In my experience, the biggest driver is alignment between teams and clear ownership. We saw illustrative gains of {num}% when governance was tightened.",
    "Expert: The baseline varies, but a reasonable illustrative range is {num}-{num2}%. The key is sequencing the work.",
    "Expert: The first 30 days should focus on data quality and quick wins. We typically measured cycle time and cost-to-serve.",
    "Expert: I would avoid any competitor-sensitive details, but broadly the pattern is consistent across operators.",
];

const CLARIFY_QUESTION: &str = "Consultant: Can you clarify the constraint behind that?";
const CLARIFY_ANSWER: &str = "Expert: Constraints were usually resource bandwidth and change management; we kept efforts scoped to non-confidential data.";
const CLARIFY_PROBABILITY: f64 = 0.4;

const CLOSING: &[&str] = &[
    "Consultant: Any final caveats or compliance reminders?",
    "Expert: Yes, please avoid confidential client info and MNPI; I can provide generalized patterns and illustrative figures only.",
];

/// Questions to ask, in script order.
///
/// `- Q:` lines win; otherwise Markdown headings; otherwise every non-empty line.
pub fn extract_questions(script: &str) -> Vec<String> {
    let lines: Vec<&str> = script
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let questions: Vec<String> = lines
        .iter()
        .filter_map(|l| l.strip_prefix(QUESTION_PREFIX))
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if !questions.is_empty() {
        return questions;
    }

    let headings: Vec<String> = lines
        .iter()
        .filter(|l| l.starts_with('#'))
        .map(|l| l.trim_start_matches('#').trim().to_string())
        .filter(|h| !h.is_empty())
        .collect();
    if !headings.is_empty() {
        return headings;
    }

    lines.iter().map(|l| l.to_string()).collect()
}

/// Simulate an interview transcript for `script` with default options.
pub fn simulate_transcript(script: &str) -> String {
    simulate_transcript_with(script, &InterviewOptions::default())
}

/// Simulate an interview transcript for `script`.
///
/// A focus becomes the first question, `Depth::HighLevel` drops the
/// clarification exchanges, and a non-neutral tone adds an opening line.
pub fn simulate_transcript_with(script: &str, options: &InterviewOptions) -> String {
    let mut seed_parts = vec![script];
    if *options != InterviewOptions::default() {
        seed_parts.extend([
            options.tone.label(),
            options.depth.label(),
            options.focus().unwrap_or_default(),
        ]);
    }
    let mut rng = StdRng::seed_from_u64(stable_seed(seed_parts));

    let mut questions = extract_questions(script);
    if let Some(focus) = options.focus() {
        questions.insert(0, format!("Let's start with {}. What matters most there?", focus));
    }

    let mut lines: Vec<String> = Vec::new();
    if let Some(opening) = options.tone.opening() {
        lines.push(opening.to_string());
    }
    lines.extend(INTRO.iter().map(|l| l.to_string()));
    lines.push(String::new());

    for question in &questions {
        lines.push(format!("Consultant: {}", question));

        let low: u32 = rng.gen_range(5..=25);
        let high = low + rng.gen_range(5..=20);
        let answer = ANSWERS.choose(&mut rng).copied().unwrap_or(ANSWERS[0]);
        lines.push(
            answer
                .replace("{num2}", &high.to_string())
                .replace("{num}", &low.to_string()),
        );

        if options.depth == Depth::DeepDive && rng.gen_bool(CLARIFY_PROBABILITY) {
            lines.push(CLARIFY_QUESTION.to_string());
            lines.push(CLARIFY_ANSWER.to_string());
        }
    }

    if !questions.is_empty() {
        lines.push(String::new());
    }
    lines.extend(CLOSING.iter().map(|l| l.to_string()));

    tracing::debug!(
        questions = questions.len(),
        tone = options.tone.label(),
        depth = options.depth.label(),
        "Simulated transcript"
    );
    lines.join("\n")
}
