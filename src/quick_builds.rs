//! Quick builds: hand-authored project templates
//!
//! A small catalog ships inside the binary; more templates can be imported
//! from JSON files into the journal.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::{Material, SkillLevel, ToolFilterResult};
use crate::tools::filter_tools_by_availability;

const BUILTIN_JSON: &str = include_str!("../data/quick_builds.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickBuild {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: SkillLevel,
    /// Display range, e.g. "2-3 hours"
    pub time: String,
    /// Display range, e.g. "$15-25"
    pub cost: String,
    pub category: String,
    pub materials: Vec<Material>,
    pub tools: Vec<String>,
    pub steps: Vec<QuickBuildStep>,
    #[serde(default)]
    pub safety_notes: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickBuildStep {
    pub step: usize,
    pub title: String,
    pub description: String,
    pub time: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRange {
    pub low: f64,
    pub high: f64,
}

/// A template file holds either one template or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    Many(Vec<QuickBuild>),
    One(Box<QuickBuild>),
}

impl QuickBuild {
    /// Structural checks a parsed template must pass before it is stored
    pub fn validate(&self) -> Result<(), PlannerError> {
        let invalid = |reason: &str| PlannerError::InvalidTemplate {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.steps.is_empty() {
            return Err(invalid("no steps"));
        }
        if self
            .steps
            .iter()
            .enumerate()
            .any(|(i, step)| step.step != i + 1)
        {
            return Err(invalid("steps must be numbered 1, 2, 3, ..."));
        }
        self.difficulty.ensure_recognized()?;
        Ok(())
    }

    /// Parse the `$low-high` cost label. `None` when the label has another shape.
    pub fn cost_range(&self) -> Result<Option<CostRange>, PlannerError> {
        let cost_re = Regex::new(r"^\$(\d+(?:\.\d+)?)\s*-\s*\$?(\d+(?:\.\d+)?)$")?;
        let Some(cap) = cost_re.captures(self.cost.trim()) else {
            return Ok(None);
        };
        let (Ok(low), Ok(high)) = (cap[1].parse::<f64>(), cap[2].parse::<f64>()) else {
            return Ok(None);
        };
        Ok(Some(CostRange { low, high }))
    }

    /// Check the template's tools against what the user owns.
    ///
    /// Template tool names are capitalized for display, so both sides are
    /// compared in lowercase.
    pub fn tool_readiness<S: AsRef<str>>(&self, owned: &[S]) -> ToolFilterResult {
        let required: Vec<String> = self.tools.iter().map(|t| t.to_lowercase()).collect();
        let owned: Vec<String> = owned.iter().map(|t| t.as_ref().to_lowercase()).collect();
        filter_tools_by_availability(&required, &owned)
    }
}

/// Optional narrowing for catalog listings
#[derive(Debug, Clone, Default)]
pub struct QuickBuildFilter {
    pub difficulty: Option<SkillLevel>,
    pub category: Option<String>,
}

impl QuickBuildFilter {
    pub fn matches(&self, build: &QuickBuild) -> bool {
        let difficulty_ok = self
            .difficulty
            .as_ref()
            .is_none_or(|d| *d == build.difficulty);
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| c.eq_ignore_ascii_case(&build.category));
        difficulty_ok && category_ok
    }
}

/// Parse a template document, validating every template in it
pub fn parse_templates(json: &str, origin: &str) -> Result<Vec<QuickBuild>, PlannerError> {
    let file: TemplateFile =
        serde_json::from_str(json).map_err(|source| PlannerError::Template {
            origin: origin.to_string(),
            source,
        })?;
    let builds = match file {
        TemplateFile::Many(builds) => builds,
        TemplateFile::One(build) => vec![*build],
    };
    for build in &builds {
        build.validate()?;
    }
    Ok(builds)
}

/// The catalog compiled into the binary
pub fn builtin() -> Result<Vec<QuickBuild>, PlannerError> {
    parse_templates(BUILTIN_JSON, "built-in catalog")
}

pub fn find<'a>(builds: &'a [QuickBuild], id: &str) -> Option<&'a QuickBuild> {
    builds.iter().find(|b| b.id == id)
}

/// Combine built-in and imported templates; an import replaces the
/// built-in template with the same id.
pub fn merge(builtin: Vec<QuickBuild>, imported: Vec<QuickBuild>) -> Vec<QuickBuild> {
    let mut merged: Vec<QuickBuild> = builtin
        .into_iter()
        .filter(|b| imported.iter().all(|i| i.id != b.id))
        .collect();
    merged.extend(imported);
    merged
}
