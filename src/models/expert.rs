//! Expert Models
//!
//! Mock expert profiles and the criteria used to rank them.

use serde::{Deserialize, Serialize};

/// An interview candidate from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub geography: String,
    pub years_experience: u32,
    pub industry_tags: Vec<String>,
    pub function_tags: Vec<String>,
    /// "C-suite" | "VP" | "Director" | "Manager"
    pub role_level: String,
    pub rate_per_hour: u32,
    pub languages: Vec<String>,
    pub topic_keywords: Vec<String>,
    pub expertise_summary: String,
    /// Free-text availability; `None` when the expert has not provided any
    pub availability: Option<String>,
    pub compliance_flags: Vec<String>,
}

impl Expert {
    /// "Title, Company" as shown on cards and emails
    pub fn headline(&self) -> String {
        format!("{}, {}", self.title, self.company)
    }

    /// Whether `needle` (already lowercased) occurs in title, company, or geography
    pub(crate) fn matches_filter(&self, needle: &str) -> bool {
        [&self.title, &self.company, &self.geography]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Search criteria for ranking experts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub free_text: String,
    /// Hourly budget in USD
    #[serde(default = "default_budget")]
    pub budget: u32,
    /// Pasted profile text used as an extra keyword signal
    #[serde(default)]
    pub profile_text: String,
}

fn default_budget() -> u32 {
    500
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            industries: Vec::new(),
            functions: Vec::new(),
            levels: Vec::new(),
            free_text: String::new(),
            budget: default_budget(),
            profile_text: String::new(),
        }
    }
}

/// An expert with its match score and the reasons behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedExpert {
    pub expert: Expert,
    /// 0.0 to 100.0, one decimal place
    pub score: f64,
    pub match_reasons: Vec<String>,
}
