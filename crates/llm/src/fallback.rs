//! Deterministic Fallback Generator
//!
//! Local synthesis used when no text-generation service is configured or the
//! remote call fails. The output is a fixed prefix followed by an elaboration
//! whose themes come from the prompt's keywords and whose question order comes
//! from a `StdRng` seeded by a hash of the prompt, so one prompt always maps to
//! one text.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use expert_tool_core::{ranked_keywords, stable_seed};

use super::provider::TextGenerator;

/// First line of every locally synthesized text.
pub const FALLBACK_PREFIX: &str =
    "[Offline draft] Generated locally; no text-generation service was used.";

/// Keywords considered as theme candidates before shuffling
const THEME_CANDIDATES: usize = 8;
/// Themes elaborated per prompt
const MAX_THEMES: usize = 4;

const OBJECTIVES: &[&str] = &[
    "Validate practical, first-hand experience with the topics below.",
    "Understand the key levers and trade-offs behind recent decisions.",
    "Capture constraints and risks the client team should plan for.",
    "Collect actionable benchmarks and illustrative metrics.",
    "Identify follow-on experts and public sources.",
];

const THEME_QUESTIONS: &[&str] = &[
    "What are the top value drivers in {theme} today?",
    "How do you structure decision criteria for {theme} initiatives?",
    "What data or metrics are essential to manage {theme} performance?",
    "Where do teams typically underestimate effort in {theme}?",
    "How should leaders sequence improvements in {theme}?",
    "What are the most common failure modes in {theme}?",
];

const FOLLOW_UPS: &[&str] = &[
    "Can you share an illustrative example and the key outcomes?",
    "What would you measure in the first 30 days?",
    "How did you align incentives across teams?",
    "What was the fastest lever to change?",
];

const WRAP_UP: &[&str] = &[
    "What metrics or artifacts should we request to validate assumptions?",
    "Who else should we speak with to triangulate this topic?",
    "What signals would change your recommendation?",
    "What is the most important watch-out for this engagement?",
    "Any final compliance reminders or boundaries we should respect?",
];

/// Seeded local text synthesis
#[derive(Debug, Clone, Default)]
pub struct DeterministicFallbackGenerator;

impl DeterministicFallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize the fallback text for a prompt.
    pub fn synthesize(&self, prompt: &str) -> String {
        let mut rng = StdRng::seed_from_u64(stable_seed([prompt]));

        let mut themes = ranked_keywords(prompt, THEME_CANDIDATES);
        themes.shuffle(&mut rng);
        themes.truncate(MAX_THEMES);
        if themes.is_empty() {
            themes.push("general".to_string());
        }

        let mut objectives: Vec<&str> = OBJECTIVES.to_vec();
        objectives.shuffle(&mut rng);
        objectives.truncate(rng.gen_range(3..=OBJECTIVES.len()));

        let mut lines = vec![FALLBACK_PREFIX.to_string(), String::new()];
        lines.push("### Objectives".to_string());
        lines.extend(objectives.iter().map(|o| format!("- {}", o)));
        lines.push(String::new());

        lines.push("### Probing Questions".to_string());
        for theme in &themes {
            let mut questions: Vec<&str> = THEME_QUESTIONS.to_vec();
            questions.shuffle(&mut rng);
            let mut follow_ups: Vec<&str> = FOLLOW_UPS.to_vec();
            follow_ups.shuffle(&mut rng);

            lines.push(format!("#### Theme: {}", theme));
            for q in questions.iter().take(3) {
                lines.push(format!("- Q: {}", q.replace("{theme}", theme)));
            }
            for f in follow_ups.iter().take(2) {
                lines.push(format!("- Follow-up: {}", f));
            }
        }
        lines.push(String::new());

        let mut wrap_up: Vec<&str> = WRAP_UP.to_vec();
        wrap_up.shuffle(&mut rng);
        wrap_up.truncate(rng.gen_range(3..=WRAP_UP.len()));
        lines.push("### Wrap-up".to_string());
        lines.extend(wrap_up.iter().map(|q| format!("- Q: {}", q)));

        lines.join("\n")
    }
}

#[async_trait]
impl TextGenerator for DeterministicFallbackGenerator {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(&self, prompt: &str) -> String {
        self.synthesize(prompt)
    }
}
