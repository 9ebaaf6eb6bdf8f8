//! Tool taxonomy and availability filtering
//!
//! Tools are grouped into categories of interchangeable primary and
//! alternative tools. A required tool the user lacks can be covered by any
//! tool on the other side of its category.

use crate::models::{ToolFilterResult, ToolSubstitution};

#[derive(Debug, Clone, Copy)]
pub struct ToolCategory {
    pub name: &'static str,
    pub primary: &'static [&'static str],
    pub alternatives: &'static [&'static str],
    pub essential: bool,
}

impl ToolCategory {
    /// The counterpart list for `tool`, or `None` if it is not in this category.
    fn counterparts(&self, tool: &str) -> Option<&'static [&'static str]> {
        if self.primary.contains(&tool) {
            Some(self.alternatives)
        } else if self.alternatives.contains(&tool) {
            Some(self.primary)
        } else {
            None
        }
    }
}

pub static TOOL_CATEGORIES: &[ToolCategory] = &[
    ToolCategory {
        name: "cutting",
        primary: &["circular saw", "table saw", "miter saw"],
        alternatives: &["hand saw", "jigsaw", "reciprocating saw"],
        essential: true,
    },
    ToolCategory {
        name: "drilling",
        primary: &["drill", "impact driver"],
        alternatives: &["manual screwdriver"],
        essential: true,
    },
    ToolCategory {
        name: "measuring",
        primary: &["measuring tape", "level", "square"],
        alternatives: &["ruler", "string"],
        essential: true,
    },
    ToolCategory {
        name: "sanding",
        primary: &["orbital sander", "belt sander"],
        alternatives: &["sandpaper", "sandpaper block"],
        essential: false,
    },
    ToolCategory {
        name: "clamping",
        primary: &["clamps", "bar clamps", "spring clamps"],
        alternatives: &["heavy objects", "rubber bands"],
        essential: false,
    },
    ToolCategory {
        name: "finishing",
        primary: &["paint brush", "foam brush", "spray gun"],
        alternatives: &["old t-shirt", "sponge"],
        essential: false,
    },
];

/// The category listing `tool` as primary or alternative
pub fn category_of(tool: &str) -> Option<&'static ToolCategory> {
    TOOL_CATEGORIES
        .iter()
        .find(|category| category.counterparts(tool).is_some())
}

/// Tools that can stand in for `tool`; empty when the tool is uncategorized
pub fn get_tool_alternatives(tool: &str) -> &'static [&'static str] {
    TOOL_CATEGORIES
        .iter()
        .find_map(|category| category.counterparts(tool))
        .unwrap_or(&[])
}

pub fn is_tool_essential(tool: &str) -> bool {
    category_of(tool).is_some_and(|category| category.essential)
}

/// Split `required` into tools the user has, tools they can substitute,
/// and tools they are missing. Input order is preserved in every bucket.
pub fn filter_tools_by_availability<R, A>(required: &[R], available: &[A]) -> ToolFilterResult
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    let has = |tool: &str| available.iter().any(|owned| owned.as_ref() == tool);
    let mut result = ToolFilterResult::default();

    for tool in required.iter().map(|tool| tool.as_ref()) {
        if has(tool) {
            result.available.push(tool.to_string());
            continue;
        }

        match get_tool_alternatives(tool).iter().find(|alt| has(**alt)) {
            Some(alternative) => result.alternatives.push(ToolSubstitution {
                required: tool.to_string(),
                alternative: alternative.to_string(),
            }),
            None => result.missing.push(tool.to_string()),
        }
    }

    result
}

/// Missing tools that block the build outright
pub fn essential_missing(result: &ToolFilterResult) -> Vec<&str> {
    result
        .missing
        .iter()
        .map(String::as_str)
        .filter(|tool| is_tool_essential(tool))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn substitutes_hand_saw_for_circular_saw() {
        let result = filter_tools_by_availability(&["circular saw"], &["hand saw"]);
        assert!(result.available.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(
            result.alternatives,
            vec![ToolSubstitution {
                required: "circular saw".into(),
                alternative: "hand saw".into(),
            }]
        );
    }

    #[test]
    fn router_has_no_alternatives() {
        let result = filter_tools_by_availability(&["router"], NONE);
        assert_eq!(result.missing, vec!["router"]);
        assert!(get_tool_alternatives("router").is_empty());
    }

    #[test]
    fn alternative_side_maps_back_to_primaries() {
        assert_eq!(
            get_tool_alternatives("sandpaper"),
            &["orbital sander", "belt sander"]
        );
        let result =
            filter_tools_by_availability(&["sandpaper"], &["belt sander", "orbital sander"]);
        assert_eq!(result.alternatives[0].alternative, "orbital sander");
    }

    #[test]
    fn essential_flags() {
        assert!(is_tool_essential("drill"));
        assert!(is_tool_essential("ruler"));
        assert!(!is_tool_essential("orbital sander"));
        assert!(!is_tool_essential("unknown-tool"));
    }

    #[test]
    fn every_tool_lands_in_one_bucket() {
        let required = ["drill", "circular saw", "router", "clamps", "pencil"];
        let owned = ["drill", "jigsaw", "heavy objects"];
        let result = filter_tools_by_availability(&required, &owned);

        assert_eq!(result.available, vec!["drill"]);
        assert_eq!(result.missing, vec!["router", "pencil"]);
        let substituted: Vec<_> = result.alternatives.iter().map(|a| a.required.as_str()).collect();
        assert_eq!(substituted, vec!["circular saw", "clamps"]);
        assert_eq!(
            result.available.len() + result.missing.len() + result.alternatives.len(),
            required.len()
        );
    }

    #[test]
    fn essential_missing_skips_optional_tools() {
        let result = filter_tools_by_availability(&["square", "belt sander", "router"], NONE);
        assert_eq!(essential_missing(&result), vec!["square"]);
    }

    #[test]
    fn each_tool_belongs_to_one_category() {
        let all: Vec<&str> = TOOL_CATEGORIES
            .iter()
            .flat_map(|c| c.primary.iter().chain(c.alternatives.iter()).copied())
            .collect();
        for (i, tool) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(tool), "{tool} listed twice");
        }
    }
}
