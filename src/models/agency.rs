//! Agency Models
//!
//! Simulated replies from expert networks and the candidates they put forward.

use serde::{Deserialize, Serialize};

/// One candidate an agency recommends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyRecommendation {
    pub expert_id: String,
    pub name: String,
    pub fit_reason: String,
    pub availability: Option<String>,
    pub rate_per_hour: u32,
}

/// An expert network's reply to an outreach request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyResponse {
    pub agency_name: String,
    pub email_subject: String,
    pub email_body: String,
    pub recommended_experts: Vec<AgencyRecommendation>,
}
