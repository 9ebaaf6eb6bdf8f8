//! Data models for build plan requests, generated plans and user builds

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Declares a request enumeration that never fails to parse.
///
/// Unknown text becomes `Unrecognized(raw)`, which the generator resolves
/// through its fallback tables instead of rejecting.
macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            /// Human-readable name of the option, used in error messages.
            pub const KIND: &'static str = $kind;

            /// Every recognized spelling, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Unrecognized(raw) => raw,
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }

            pub fn ensure_recognized(&self) -> Result<(), PlannerError> {
                match self {
                    $name::Unrecognized(raw) => Err(PlannerError::UnknownOption {
                        kind: Self::KIND,
                        value: raw.clone(),
                        expected: Self::NAMES.join(", "),
                    }),
                    _ => Ok(()),
                }
            }

            /// Parse, rejecting values outside the known set.
            pub fn parse_strict(value: &str) -> Result<Self, PlannerError> {
                let parsed = Self::from(value);
                parsed.ensure_recognized()?;
                Ok(parsed)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($text => $name::$variant,)+
                    other => $name::Unrecognized(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum! {
    /// Where the project will live
    SpaceType, "space type" {
        Room => "room",
        Wall => "wall",
        Corner => "corner",
        Balcony => "balcony",
        Garage => "garage",
        Other => "other",
    }
}

lenient_enum! {
    ProjectType, "project type" {
        Shelf => "shelf",
        Desk => "desk",
        Storage => "storage",
        Furniture => "furniture",
        Decor => "decor",
        Other => "other",
    }
}

lenient_enum! {
    ProjectSize, "project size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
        Custom => "custom",
    }
}

lenient_enum! {
    Style, "style" {
        Modern => "modern",
        Rustic => "rustic",
        Scandinavian => "scandinavian",
        Industrial => "industrial",
        Minimalist => "minimalist",
        Traditional => "traditional",
    }
}

lenient_enum! {
    SkillLevel, "skill level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

lenient_enum! {
    BudgetTier, "budget" {
        Budget => "budget",
        Moderate => "moderate",
        Premium => "premium",
    }
}

/// Space dimensions in feet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlanRequest {
    pub space_type: SpaceType,
    pub dimensions: Dimensions,
    pub project_type: ProjectType,
    pub project_size: ProjectSize,
    pub style: Style,
    pub skill_level: SkillLevel,
    pub budget: BudgetTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default)]
    pub available_tools: Vec<String>,
}

/// One shopping-list line. `quantity` is display text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub item: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildStep {
    pub step_number: usize,
    pub description: String,
    pub tools: Vec<String>,
    pub time_estimate: String,
    pub safety_warnings: Vec<String>,
}

/// A generated plan. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub id: String,
    pub project_name: String,
    pub difficulty: SkillLevel,
    pub estimated_time: String,
    pub estimated_cost: i64,
    pub materials: Vec<Material>,
    pub tools: Vec<String>,
    pub steps: Vec<BuildStep>,
    pub safety_notes: Vec<String>,
    pub style: Style,
    pub skill_level: SkillLevel,
    pub space_type: SpaceType,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSubstitution {
    pub required: String,
    pub alternative: String,
}

/// Partition of a required tool list against a user's inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFilterResult {
    pub available: Vec<String>,
    pub missing: Vec<String>,
    pub alternatives: Vec<ToolSubstitution>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStatus {
    Planned,
    InProgress,
    Completed,
    Abandoned,
}

impl BuildStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildStatus::Planned => "planned",
            BuildStatus::InProgress => "in-progress",
            BuildStatus::Completed => "completed",
            BuildStatus::Abandoned => "abandoned",
        }
    }

    /// Builds only move forward: planned, in progress, then completed or
    /// abandoned.
    pub fn can_move_to(self, next: BuildStatus) -> bool {
        matches!(
            (self, next),
            (BuildStatus::Planned, BuildStatus::InProgress)
                | (BuildStatus::InProgress, BuildStatus::Completed)
                | (BuildStatus::InProgress, BuildStatus::Abandoned)
        )
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(BuildStatus::Planned),
            "in-progress" => Ok(BuildStatus::InProgress),
            "completed" => Ok(BuildStatus::Completed),
            "abandoned" => Ok(BuildStatus::Abandoned),
            other => Err(PlannerError::UnknownStatus(other.to_string())),
        }
    }
}

/// A user's attempt at building a saved plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBuild {
    pub id: String,
    pub plan_id: String,
    pub status: BuildStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub actual_cost: Option<f64>,
    pub actual_time: Option<String>,
    pub rating: Option<u8>,
    pub review: Option<String>,
}

impl UserBuild {
    pub fn new(id: String, plan_id: String) -> Self {
        Self {
            id,
            plan_id,
            status: BuildStatus::Planned,
            start_date: None,
            completion_date: None,
            notes: None,
            actual_cost: None,
            actual_time: None,
            rating: None,
            review: None,
        }
    }

    /// Move to `next`, stamping the start or completion date on the way.
    pub fn transition(&mut self, next: BuildStatus, at: DateTime<Utc>) -> Result<(), PlannerError> {
        if !self.status.can_move_to(next) {
            return Err(PlannerError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        match next {
            BuildStatus::InProgress => self.start_date = Some(at),
            BuildStatus::Completed => self.completion_date = Some(at),
            BuildStatus::Planned | BuildStatus::Abandoned => {}
        }
        self.status = next;
        Ok(())
    }

    pub fn rate(&mut self, rating: u8, review: Option<String>) -> Result<(), PlannerError> {
        if !(1..=5).contains(&rating) {
            return Err(PlannerError::RatingOutOfRange(rating));
        }
        self.rating = Some(rating);
        if review.is_some() {
            self.review = review;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_are_kept_verbatim() {
        let skill = SkillLevel::from("expert");
        assert_eq!(skill, SkillLevel::Unrecognized("expert".to_string()));
        assert_eq!(skill.as_str(), "expert");
        assert!(!skill.is_recognized());
        assert_eq!(ProjectType::from("other"), ProjectType::Other);
    }

    #[test]
    fn strict_parse_lists_expected_values() {
        let err = BudgetTier::parse_strict("lavish").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown budget \"lavish\"; expected one of: budget, moderate, premium"
        );
        assert_eq!(BudgetTier::parse_strict("premium").unwrap(), BudgetTier::Premium);
    }

    #[test]
    fn request_enums_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ProjectSize::Large).unwrap();
        assert_eq!(json, "\"large\"");
        let back: ProjectSize = serde_json::from_str("\"huge\"").unwrap();
        assert_eq!(back, ProjectSize::Unrecognized("huge".to_string()));
    }

    #[test]
    fn build_lifecycle_stamps_dates() {
        let mut build = UserBuild::new("b1".into(), "p1".into());
        let t0 = Utc::now();
        build.transition(BuildStatus::InProgress, t0).unwrap();
        assert_eq!(build.start_date, Some(t0));
        build.transition(BuildStatus::Completed, t0).unwrap();
        assert_eq!(build.completion_date, Some(t0));
        assert_eq!(build.status, BuildStatus::Completed);
    }

    #[test]
    fn abandoned_build_cannot_restart() {
        let mut build = UserBuild::new("b1".into(), "p1".into());
        assert!(build.transition(BuildStatus::Completed, Utc::now()).is_err());
        build.transition(BuildStatus::InProgress, Utc::now()).unwrap();
        build.transition(BuildStatus::Abandoned, Utc::now()).unwrap();
        let err = build
            .transition(BuildStatus::InProgress, Utc::now())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot move a build from abandoned to in-progress"
        );
    }

    #[test]
    fn planned_build_must_start_before_ending() {
        let mut build = UserBuild::new("b1".into(), "p1".into());
        let err = build
            .transition(BuildStatus::Abandoned, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidTransition {
                from: BuildStatus::Planned,
                to: BuildStatus::Abandoned,
            }
        ));
        assert_eq!(build.status, BuildStatus::Planned);
    }

    #[test]
    fn only_forward_moves_are_allowed() {
        use crate::models::BuildStatus::*;
        let all = [Planned, InProgress, Completed, Abandoned];
        let allowed = [
            (Planned, InProgress),
            (InProgress, Completed),
            (InProgress, Abandoned),
        ];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_move_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn rating_is_bounded() {
        let mut build = UserBuild::new("b1".into(), "p1".into());
        assert!(build.rate(0, None).is_err());
        assert!(build.rate(6, None).is_err());
        build.rate(4, Some("sturdy".into())).unwrap();
        assert_eq!(build.rating, Some(4));
        assert_eq!(build.review.as_deref(), Some("sturdy"));
    }
}
