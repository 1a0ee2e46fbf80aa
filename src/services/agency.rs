//! Agency Simulation
//!
//! Mock replies from expert networks, and the recommendation list that folds
//! those replies and past interview tags into the criteria ranking.

use std::collections::{BTreeSet, HashMap};

use crate::models::agency::{AgencyRecommendation, AgencyResponse};
use crate::models::expert::{Expert, RankedExpert};
use crate::models::interview::InterviewTags;
use crate::services::workflow::EmailStyle;
use crate::utils::error::AppResult;

/// Networks contacted when the caller selects none
pub const DEFAULT_NETWORKS: [&str; 3] = ["NEXUS", "PRIME", "ALIGN"];

/// Top-ranked experts shared out between agencies, two per agency
const CANDIDATE_POOL: usize = 6;

const REPLY_SUBJECT: &str = "Re: Expert recommendations";
const PRIMARY_FIT: &str = "Strong match on industry and function.";
const SECONDARY_FIT: &str = "Recent leadership experience with similar scope.";

const AGENCY_BONUS_PER_MENTION: f64 = 5.0;
const MAX_AGENCY_BONUS: f64 = 15.0;
const MAX_HISTORY_BONUS: f64 = 10.0;

const HISTORY_REASON: &str = "Aligned with past interview history tags.";
const DEFAULT_REASON: &str = "Matches core criteria.";

fn recommendation(expert: &Expert, fit_reason: &str) -> AgencyRecommendation {
    AgencyRecommendation {
        expert_id: expert.id.clone(),
        name: expert.name.clone(),
        fit_reason: fit_reason.to_string(),
        availability: expert.availability.clone(),
        rate_per_hour: expert.rate_per_hour,
    }
}

/// Simulate one reply per network from the ranked shortlist.
///
/// Network `i` proposes the experts ranked `2i` and `2i + 1`; networks stop
/// once the top six run out. Even-numbered networks write in the brand
/// layout, odd ones in the short layout. `draft` renders the email body for
/// the first candidate.
pub fn simulate_responses<F>(
    ranked: &[RankedExpert],
    networks: &[String],
    mut draft: F,
) -> AppResult<Vec<AgencyResponse>>
where
    F: FnMut(EmailStyle, &Expert) -> AppResult<String>,
{
    let top = &ranked[..ranked.len().min(CANDIDATE_POOL)];
    let mut names: Vec<&str> = networks
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        names = DEFAULT_NETWORKS.to_vec();
    }

    let mut responses = Vec::new();
    for (idx, network) in names.into_iter().enumerate() {
        let (Some(first), Some(second)) = (top.get(idx * 2), top.get(idx * 2 + 1)) else {
            break;
        };
        let style = if idx % 2 == 0 {
            EmailStyle::Brand
        } else {
            EmailStyle::Short
        };
        responses.push(AgencyResponse {
            agency_name: network.to_string(),
            email_subject: REPLY_SUBJECT.to_string(),
            email_body: draft(style, &first.expert)?,
            recommended_experts: vec![
                recommendation(&first.expert, PRIMARY_FIT),
                recommendation(&second.expert, SECONDARY_FIT),
            ],
        });
    }
    Ok(responses)
}

fn overlap<'a>(mine: impl IntoIterator<Item = &'a String>, theirs: &[String]) -> usize {
    let mine: BTreeSet<&String> = mine.into_iter().collect();
    theirs
        .iter()
        .collect::<BTreeSet<_>>()
        .intersection(&mine)
        .count()
}

/// Bonus for tags shared with past interviews, capped at 10.
///
/// Each history entry adds 2 per shared industry, 2 per shared function and
/// 1 per shared topic (case-insensitive).
pub fn history_bonus(expert: &Expert, history: &[InterviewTags]) -> f64 {
    let topics: Vec<String> = expert
        .topic_keywords
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    let bonus: usize = history
        .iter()
        .map(|tags| {
            let past_topics: Vec<String> = tags.topics.iter().map(|t| t.to_lowercase()).collect();
            2 * overlap(&expert.industry_tags, &tags.industries)
                + 2 * overlap(&expert.function_tags, &tags.functions)
                + overlap(&topics, &past_topics)
        })
        .sum();
    (bonus as f64).min(MAX_HISTORY_BONUS)
}

/// Merge the criteria ranking with agency mentions and interview history.
///
/// Every expert keeps its base score, gains 5 per agency mention (capped at
/// 15) and the history bonus, then the list is re-sorted by score with ties
/// in catalog order.
pub fn synthesize(
    experts: &[Expert],
    ranked: &[RankedExpert],
    responses: &[AgencyResponse],
    history: &[InterviewTags],
) -> Vec<RankedExpert> {
    let mut mentions: HashMap<&str, usize> = HashMap::new();
    let mut agency_reasons: HashMap<&str, Vec<String>> = HashMap::new();
    for response in responses {
        for rec in &response.recommended_experts {
            if rec.expert_id.trim().is_empty() {
                continue;
            }
            *mentions.entry(rec.expert_id.as_str()).or_default() += 1;
            agency_reasons
                .entry(rec.expert_id.as_str())
                .or_default()
                .push(format!("{}: {}", response.agency_name, rec.fit_reason));
        }
    }

    let base_scores: HashMap<&str, f64> = ranked
        .iter()
        .map(|r| (r.expert.id.as_str(), r.score))
        .collect();

    let mut compiled: Vec<RankedExpert> = experts
        .iter()
        .map(|expert| {
            let id = expert.id.as_str();
            let base = base_scores.get(id).copied().unwrap_or(0.0);
            let mention_count = mentions.get(id).copied().unwrap_or(0);
            let agency_bonus = (AGENCY_BONUS_PER_MENTION * mention_count as f64).min(MAX_AGENCY_BONUS);
            let past_bonus = history_bonus(expert, history);

            let mut match_reasons = Vec::new();
            if agency_bonus > 0.0 {
                match_reasons.push(format!("Agency recommendations: {}", mention_count));
                match_reasons.extend(agency_reasons.get(id).cloned().unwrap_or_default());
            }
            if past_bonus > 0.0 {
                match_reasons.push(HISTORY_REASON.to_string());
            }
            if match_reasons.is_empty() {
                match_reasons.push(DEFAULT_REASON.to_string());
            }

            let total = base + agency_bonus + past_bonus;
            RankedExpert {
                expert: expert.clone(),
                score: ((total * 10.0).round() / 10.0).clamp(0.0, 100.0),
                match_reasons,
            }
        })
        .collect();
    compiled.sort_by(|a, b| b.score.total_cmp(&a.score));
    compiled
}
