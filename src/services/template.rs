//! Template Engine
//!
//! Named text templates with `{{placeholder}}` tokens. Templates are
//! registered while the engine is being built and are read-only afterwards.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::utils::error::{AppError, AppResult};

/// Built-in interview guide rendered by `generate_script`
pub const INTERVIEW_SCRIPT: &str = "interview_script";
/// Agency candidate write-up in the long "brand" layout
pub const AGENCY_BRAND: &str = "agency_brand";
/// Short agency reply asking to book a candidate
pub const AGENCY_SHORT: &str = "agency_short";
/// External outreach email loaded from disk
pub const OUTREACH_EMAIL: &str = "outreach_email";

const INTERVIEW_SCRIPT_TEXT: &str = "# Expert Interview Script: {{expert_name}}

**Expert:** {{expert_title}} at {{expert_company}} ({{expert_geography}}, {{expert_years}} years)
**Case:** {{case_code}}
**Objective:** {{objective}}
**Scope:** {{scope}}
**Case notes:** {{notes}}
**Format:** {{length_minutes}} minutes, {{tone}} tone, {{depth}}
**Focus:** {{focus}}

## 1) Filtering / Qualification (first 8-10 min)
- Q: Describe your direct responsibility as {{expert_title}} at {{expert_company}}.
- Q: What is the most recent project you led that relates to {{objective}}?
- Q: Which geographies and segments were in scope for that work?
- Q: What topics should we avoid given your current and former employers?
- Red flags to watch: lack of direct ownership, outdated experience, or compliance gaps.

## 2) Main Business Topics
- Q: How would you frame the key questions behind {{objective}}?
- Q: Which data sources or metrics would you rely on for {{scope}}?
- Q: Where do teams typically underestimate effort or risk in this area?
- Q: What trade-offs were most material when {{expert_company}} made similar decisions?
- Follow-up: Can you share an illustrative example and the key outcomes?

## 3) Wrap-up
- Q: What signals would change your view on {{objective}}?
- Q: Who else should we speak with to triangulate this topic?
- Compliance reminder: avoid confidential or MNPI details.
";

const AGENCY_BRAND_TEXT: &str = "BRAND - EXPERTS

{{expert_name}} - Candidate

Former {{expert_headline}}

BIOGRAPHY
Geo: {{geography}}

Credit: TBD

{{bio_paragraph}}

AVAILABILITY
{{availability}}

SCREENING QUESTIONS
1. Are you familiar with the market behind {{objective}}?

I can cover these on call.

2. Can you speak to major competitors in {{industry}}?

Can cover this briefly.

3. Can you discuss recent shifts in the industry?

Happy to provide more detail on call.
";

const AGENCY_SHORT_TEXT: &str = "Hello {{contact_name}},

Jumping in for the team on {{case_code}}. We have screened {{expert_name}}, former {{expert_headline}}, who is {{availability_short}}. Would you like to book them?

Also, checking in on your timeline for calls and any new priorities.

Profile: {{expert_name}} | {{expert_headline}}
Relevant experience: {{relevant_experience}}
Screened: Yes

Top highlights:
- {{highlight_1}}
- {{highlight_2}}
- {{highlight_3}}
";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

/// Distinct placeholder names in order of first appearance
fn extract_placeholders(content: &str) -> Vec<String> {
    let mut vars: Vec<String> = Vec::new();
    for caps in placeholder_regex().captures_iter(content) {
        let name = caps[1].to_string();
        if !vars.contains(&name) {
            vars.push(name);
        }
    }
    vars
}

/// Registry of named templates
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    templates: HashMap<String, String>,
}

impl TemplateEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine holding the built-in templates
    pub fn with_builtins() -> Self {
        let mut engine = Self::new();
        engine.register(INTERVIEW_SCRIPT, INTERVIEW_SCRIPT_TEXT);
        engine.register(AGENCY_BRAND, AGENCY_BRAND_TEXT);
        engine.register(AGENCY_SHORT, AGENCY_SHORT_TEXT);
        engine
    }

    /// Register (or replace) a template
    pub fn register(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.templates.insert(name.into(), content.into());
    }

    /// Read a text asset from disk and register it under `name`
    pub fn load_asset(&mut self, name: &str, path: &Path) -> AppResult<()> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(template = name, path = %path.display(), "Loaded template asset");
        self.register(name, content);
        Ok(())
    }

    /// Registered template names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether a template is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Distinct placeholders of a template in document order
    pub fn placeholders(&self, name: &str) -> AppResult<Vec<String>> {
        Ok(extract_placeholders(self.get(name)?))
    }

    /// Substitute every placeholder of template `name` from `bindings`.
    ///
    /// Fails on the first placeholder (in document order) with no binding.
    /// Bindings that the template does not use are ignored.
    pub fn render(&self, name: &str, bindings: &HashMap<String, String>) -> AppResult<String> {
        let content = self.get(name)?;

        if let Some(missing) = extract_placeholders(content)
            .into_iter()
            .find(|p| !bindings.contains_key(p))
        {
            return Err(AppError::MissingBinding {
                template: name.to_string(),
                placeholder: missing,
            });
        }

        let rendered = placeholder_regex().replace_all(content, |caps: &Captures| {
            bindings.get(&caps[1]).cloned().unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }

    fn get(&self, name: &str) -> AppResult<&str> {
        self.templates
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::TemplateNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let mut engine = TemplateEngine::new();
        engine.register("greet", "Hello {{name}}, welcome to {{place}}. Bye {{name}}.");
        let out = engine
            .render("greet", &bindings(&[("name", "Ada"), ("place", "Acme"), ("extra", "x")]))
            .unwrap();
        assert_eq!(out, "Hello Ada, welcome to Acme. Bye Ada.");
    }

    #[test]
    fn test_missing_binding_reports_first_placeholder() {
        let mut engine = TemplateEngine::new();
        engine.register("t", "{{a}} {{b}} {{c}}");
        let err = engine.render("t", &bindings(&[("a", "1")])).unwrap_err();
        match err {
            AppError::MissingBinding {
                template,
                placeholder,
            } => {
                assert_eq!(template, "t");
                assert_eq!(placeholder, "b");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::with_builtins();
        let err = engine.render("nope", &HashMap::new()).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound(name) if name == "nope"));
    }

    #[test]
    fn test_template_without_placeholders_renders_verbatim() {
        let mut engine = TemplateEngine::new();
        engine.register("plain", "No tokens here { single braces } stay.");
        assert_eq!(
            engine.render("plain", &HashMap::new()).unwrap(),
            "No tokens here { single braces } stay."
        );
    }

    #[test]
    fn test_builtins_registered() {
        let engine = TemplateEngine::with_builtins();
        assert_eq!(
            engine.names(),
            vec![AGENCY_BRAND, AGENCY_SHORT, INTERVIEW_SCRIPT]
        );
        let vars = engine.placeholders(INTERVIEW_SCRIPT).unwrap();
        for required in [
            "expert_title",
            "expert_company",
            "case_code",
            "objective",
            "length_minutes",
            "tone",
            "depth",
            "focus",
        ] {
            assert!(vars.contains(&required.to_string()), "missing {required}");
        }
        // Distinct, first-appearance order
        assert_eq!(vars[0], "expert_name");
        assert_eq!(vars.iter().filter(|v| *v == "expert_title").count(), 1);
    }

    #[test]
    fn test_load_asset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email.md");
        std::fs::write(&path, "Case {{case_code}}").unwrap();

        let mut engine = TemplateEngine::new();
        engine.load_asset(OUTREACH_EMAIL, &path).unwrap();
        assert!(engine.contains(OUTREACH_EMAIL));
        let out = engine
            .render(OUTREACH_EMAIL, &bindings(&[("case_code", "CASE-9")]))
            .unwrap();
        assert_eq!(out, "Case CASE-9");

        let missing = engine.load_asset("x", &dir.path().join("missing.md"));
        assert!(matches!(missing, Err(AppError::Io(_))));
    }
}
