//! Expert Catalog
//!
//! Read-only mock roster of experts and case labels. Built once at startup and
//! shared by reference; nothing here performs I/O or mutates state.

use crate::models::case::CaseSummary;
use crate::models::expert::Expert;

/// Immutable catalog of experts and case labels, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ExpertCatalog {
    experts: Vec<Expert>,
    cases: Vec<CaseSummary>,
}

impl ExpertCatalog {
    /// Create a catalog from explicit data
    pub fn new(experts: Vec<Expert>, cases: Vec<CaseSummary>) -> Self {
        Self { experts, cases }
    }

    /// The built-in mock roster
    pub fn builtin() -> Self {
        Self::new(builtin_experts(), builtin_cases())
    }

    /// Experts whose title, company, or geography contains `filter`
    /// (case-insensitive). `None` or a blank filter returns every expert.
    ///
    /// A non-blank filter is matched as given, surrounding whitespace included.
    pub fn list_experts(&self, filter: Option<&str>) -> Vec<&Expert> {
        let needle = filter.filter(|f| !f.trim().is_empty());
        match needle {
            None => self.experts.iter().collect(),
            Some(needle) => {
                let needle = needle.to_lowercase();
                self.experts
                    .iter()
                    .filter(|e| e.matches_filter(&needle))
                    .collect()
            }
        }
    }

    /// All experts in insertion order
    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    /// Look up an expert by id
    pub fn get_expert(&self, id: &str) -> Option<&Expert> {
        self.experts.iter().find(|e| e.id == id)
    }

    /// Case codes and labels
    pub fn list_cases(&self) -> Vec<CaseSummary> {
        self.cases.clone()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn expert(
    id: &str,
    name: &str,
    title: &str,
    company: &str,
    geography: &str,
    years_experience: u32,
    industry_tags: &[&str],
    function_tags: &[&str],
    role_level: &str,
    rate_per_hour: u32,
    topic_keywords: &[&str],
    expertise_summary: &str,
    availability: Option<&str>,
) -> Expert {
    Expert {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        geography: geography.to_string(),
        years_experience,
        industry_tags: strings(industry_tags),
        function_tags: strings(function_tags),
        role_level: role_level.to_string(),
        rate_per_hour,
        languages: strings(&["English"]),
        topic_keywords: strings(topic_keywords),
        expertise_summary: expertise_summary.to_string(),
        availability: availability.map(str::to_string),
        compliance_flags: strings(&["No current employer topics", "No MNPI"]),
    }
}

fn builtin_experts() -> Vec<Expert> {
    let mut experts = vec![
        expert(
            "E1",
            "Dana Whitfield",
            "COO",
            "Acme",
            "North America",
            22,
            &["Industrial Manufacturing", "Automation"],
            &["Operations", "Supply Chain"],
            "C-suite",
            650,
            &["lean", "automation", "capex", "plant footprint"],
            "Ran global operations across 14 plants; led automation and footprint consolidation programs.",
            Some("Available this week, mornings ET"),
        ),
        expert(
            "E2",
            "Rahul Mehta",
            "VP Pricing",
            "Northwind SaaS",
            "Europe",
            14,
            &["Software / SaaS"],
            &["Pricing", "Commercial"],
            "VP",
            450,
            &["pricing", "packaging", "churn", "net revenue retention"],
            "Built usage-based pricing and packaging for a mid-market SaaS platform; owned renewal strategy.",
            Some("Available next week"),
        ),
        expert(
            "E3",
            "Sofia Alvarez",
            "Director of Clinical Operations",
            "Helix Health",
            "Latin America",
            17,
            &["Healthcare Providers"],
            &["Operations", "Clinical"],
            "Director",
            380,
            &["staffing", "reimbursement", "patient throughput"],
            "Managed clinical operations for a 12-hospital network; redesigned staffing and scheduling models.",
            None,
        ),
        expert(
            "E4",
            "Kenji Watanabe",
            "Head of Procurement",
            "Orion Semiconductors",
            "Asia Pacific",
            19,
            &["Semiconductors", "Electronics"],
            &["Procurement", "Supply Chain"],
            "VP",
            520,
            &["sourcing", "supplier risk", "wafer capacity"],
            "Led strategic sourcing for wafer capacity and supplier risk programs across APAC fabs.",
            Some("Available this week, evenings JST"),
        ),
        expert(
            "E5",
            "Amelia Clarke",
            "CFO",
            "Brightline Retail",
            "United Kingdom",
            24,
            &["Retail", "Consumer Goods"],
            &["Finance", "Strategy"],
            "C-suite",
            700,
            &["margin", "store economics", "working capital"],
            "Public-company CFO; led store portfolio review and working-capital release program.",
            Some("Available in two weeks"),
        ),
        expert(
            "E6",
            "Marcus Reed",
            "VP Logistics",
            "Acme Freight",
            "North America",
            16,
            &["Logistics", "Transportation"],
            &["Operations", "Logistics"],
            "VP",
            400,
            &["last mile", "network design", "carrier management"],
            "Designed a national last-mile network and renegotiated carrier portfolio.",
            Some("Available this week"),
        ),
        expert(
            "E7",
            "Ingrid Larsen",
            "Head of Strategy",
            "Fjord Energy",
            "Nordics",
            12,
            &["Energy", "Utilities"],
            &["Strategy", "Corporate Development"],
            "Director",
            420,
            &["renewables", "grid", "m&a"],
            "Ran strategy and M&A screening for an integrated utility's renewables portfolio.",
            None,
        ),
        expert(
            "E8",
            "Thomas Becker",
            "Plant Manager",
            "Vortex Automotive",
            "Europe",
            11,
            &["Automotive", "Industrial Manufacturing"],
            &["Operations", "Quality"],
            "Manager",
            300,
            &["oee", "quality", "shift scheduling"],
            "Ran a 1,200-person assembly plant; delivered OEE and quality improvements.",
            Some("Available this week"),
        ),
    ];
    experts[1].languages.push("German".to_string());
    experts[2].languages.push("Spanish".to_string());
    experts[3].languages.push("Japanese".to_string());
    experts
}

fn builtin_cases() -> Vec<CaseSummary> {
    [
        ("CASE-001", "Industrial automation market sizing"),
        ("CASE-002", "SaaS pricing and packaging review"),
        ("CASE-003", "Hospital network operations diagnostic"),
    ]
    .iter()
    .map(|(code, label)| CaseSummary {
        case_code: code.to_string(),
        label: label.to_string(),
    })
    .collect()
}
