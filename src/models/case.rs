//! Case Models

use serde::{Deserialize, Serialize};

/// Context record for a consulting engagement, keyed by case code
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Case {
    pub case_code: String,
    pub objective: String,
    pub scope: String,
    pub notes: String,
    #[serde(default)]
    pub industry: String,
}

impl Case {
    /// Create a case with the given code and objective
    pub fn new(case_code: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            case_code: case_code.into(),
            objective: objective.into(),
            ..Default::default()
        }
    }
}

/// Case code and display label from the mock catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_code: String,
    pub label: String,
}
