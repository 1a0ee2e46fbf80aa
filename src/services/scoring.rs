//! Expert Scoring
//!
//! Ranks catalog experts against search criteria. Each signal adds to a score
//! that is clamped to 0..=100 and explained by a list of match reasons.

use std::collections::BTreeSet;

use expert_tool_core::keywords;

use crate::models::expert::{Expert, RankedExpert, SearchCriteria};

const INDUSTRY_WEIGHT: f64 = 25.0;
const INDUSTRY_MISMATCH_PENALTY: f64 = 12.0;
const FUNCTION_WEIGHT: f64 = 25.0;
const LEVEL_BONUS: f64 = 10.0;
const KEYWORD_WEIGHT: f64 = 30.0;
const COMPANY_SIGNAL_BONUS: f64 = 10.0;
const PROFILE_WEIGHT: f64 = 10.0;
const RATE_PENALTY: f64 = 10.0;

/// Reasons list at most this many overlapping keywords
const MAX_LISTED_TERMS: usize = 6;

fn token_set(text: &str) -> BTreeSet<String> {
    keywords(text).into_iter().collect()
}

fn fraction(hits: usize, total: usize) -> f64 {
    hits as f64 / total.max(1) as f64
}

fn join_limited<'a>(items: impl IntoIterator<Item = &'a String>, limit: usize) -> String {
    items
        .into_iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Score one expert. Returns the clamped score (one decimal) and the reasons.
pub fn score_expert(criteria: &SearchCriteria, expert: &Expert) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let industries: BTreeSet<&String> = criteria.industries.iter().collect();
    if !industries.is_empty() {
        let overlap: BTreeSet<&String> = expert
            .industry_tags
            .iter()
            .filter(|t| industries.contains(t))
            .collect();
        score += INDUSTRY_WEIGHT * fraction(overlap.len(), industries.len());
        if overlap.is_empty() {
            score -= INDUSTRY_MISMATCH_PENALTY;
            reasons.push("Industry mismatch: no overlap with requested industries.".to_string());
        } else {
            reasons.push(format!(
                "Industry match: {}.",
                join_limited(overlap, usize::MAX)
            ));
        }
    }

    let functions: BTreeSet<&String> = criteria.functions.iter().collect();
    if !functions.is_empty() {
        let overlap: BTreeSet<&String> = expert
            .function_tags
            .iter()
            .filter(|t| functions.contains(t))
            .collect();
        score += FUNCTION_WEIGHT * fraction(overlap.len(), functions.len());
        if !overlap.is_empty() {
            reasons.push(format!(
                "Function match: {}.",
                join_limited(overlap, usize::MAX)
            ));
        }
    }

    if criteria.levels.contains(&expert.role_level) {
        score += LEVEL_BONUS;
        reasons.push(format!("Role level match: {}.", expert.role_level));
    }

    let mut expert_tokens = token_set(&expert.expertise_summary);
    expert_tokens.extend(expert.topic_keywords.iter().map(|k| k.to_lowercase()));

    let free_tokens = token_set(&criteria.free_text);
    if !free_tokens.is_empty() {
        let overlap: Vec<&String> = free_tokens.intersection(&expert_tokens).collect();
        score += KEYWORD_WEIGHT * fraction(overlap.len(), free_tokens.len());
        if !overlap.is_empty() {
            reasons.push(format!(
                "Keyword overlap: {}.",
                join_limited(overlap, MAX_LISTED_TERMS)
            ));
        }

        let company = expert.company.to_lowercase();
        let hits: Vec<&String> = free_tokens
            .iter()
            .filter(|t| company.contains(t.as_str()))
            .collect();
        if !hits.is_empty() {
            score += COMPANY_SIGNAL_BONUS;
            reasons.push(format!("Company signal: {}.", join_limited(hits, 5)));
        }
    }

    let profile_tokens = token_set(&criteria.profile_text);
    if !profile_tokens.is_empty() {
        let overlap: Vec<&String> = profile_tokens.intersection(&expert_tokens).collect();
        score += PROFILE_WEIGHT * fraction(overlap.len(), profile_tokens.len());
        if !overlap.is_empty() {
            reasons.push(format!(
                "Profile match: {}.",
                join_limited(overlap, MAX_LISTED_TERMS)
            ));
        }
    }

    if expert.rate_per_hour > criteria.budget {
        let budget = criteria.budget.max(1) as f64;
        let over = ((expert.rate_per_hour - criteria.budget) as f64 / budget).min(1.0);
        score -= RATE_PENALTY * over;
        reasons.push("Rate above budget; slight penalty applied.".to_string());
    }

    let score = ((score * 10.0).round() / 10.0).clamp(0.0, 100.0);
    (score, reasons)
}

/// Score every expert and sort by descending score.
///
/// The sort is stable, so ties keep catalog order.
pub fn rank_experts(criteria: &SearchCriteria, experts: &[Expert]) -> Vec<RankedExpert> {
    let mut ranked: Vec<RankedExpert> = experts
        .iter()
        .map(|expert| {
            let (score, match_reasons) = score_expert(criteria, expert);
            RankedExpert {
                expert: expert.clone(),
                score,
                match_reasons,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
