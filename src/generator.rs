//! Build plan generation
//!
//! Maps a request onto canned materials, tools and steps. Prices come from
//! the material catalog scaled by size and budget; everything else is
//! literal template data. Generation never fails: unknown options resolve
//! through the fallback tables below.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::MaterialCatalog;
use crate::fallback::Lookup;
use crate::models::{
    BudgetTier, BuildPlan, BuildPlanRequest, BuildStep, Material, ProjectSize, ProjectType,
    SkillLevel, Style,
};

/// Whole-name fallback for project types outside the known set
pub const UNKNOWN_PROJECT_NAME: &str = "Custom Build Project";

pub const SAFETY_NOTES: &[&str] = &[
    "Always wear appropriate safety equipment",
    "Work in a well-ventilated area",
    "Follow all tool manufacturer instructions",
    "Check local building codes if applicable",
    "Ensure proper workspace lighting",
];

static SIZE_ADJECTIVES: Lookup<ProjectSize, &str> = Lookup::new(
    &[
        (ProjectSize::Small, "Compact"),
        (ProjectSize::Medium, "Standard"),
        (ProjectSize::Large, "Spacious"),
        (ProjectSize::Custom, "Custom"),
    ],
    "Standard",
);

/// How a project type turns into a plan name
#[derive(Debug, Clone, Copy, PartialEq)]
enum NameTemplate {
    /// Prefixed with style and size adjective
    Styled(&'static str),
    /// Used as the whole name
    Whole(&'static str),
}

static PROJECT_NAMES: Lookup<ProjectType, NameTemplate> = Lookup::new(
    &[
        (ProjectType::Shelf, NameTemplate::Styled("Floating Shelf")),
        (ProjectType::Desk, NameTemplate::Styled("Work Desk")),
        (ProjectType::Storage, NameTemplate::Styled("Storage Unit")),
        (ProjectType::Furniture, NameTemplate::Styled("Custom Furniture")),
        (ProjectType::Decor, NameTemplate::Styled("Home Decor")),
        (ProjectType::Other, NameTemplate::Styled("Custom Project")),
    ],
    NameTemplate::Whole(UNKNOWN_PROJECT_NAME),
);

static SIZE_MULTIPLIERS: Lookup<ProjectSize, f64> = Lookup::new(
    &[
        (ProjectSize::Small, 0.6),
        (ProjectSize::Medium, 1.0),
        (ProjectSize::Large, 1.8),
        (ProjectSize::Custom, 1.2),
    ],
    1.0,
);

static BUDGET_MULTIPLIERS: Lookup<BudgetTier, f64> = Lookup::new(
    &[
        (BudgetTier::Budget, 0.8),
        (BudgetTier::Moderate, 1.0),
        (BudgetTier::Premium, 1.4),
    ],
    1.0,
);

type MaterialTemplate = &'static [(&'static str, &'static str)];

type MaterialTable = Lookup<ProjectType, MaterialTemplate>;

static BASE_MATERIALS: MaterialTable = MaterialTable::new(
    &[
        (
            ProjectType::Shelf,
            &[
                ("2x4 pine board", "2 pieces"),
                ("1x6 pine board", "1 piece"),
                ("Wood screws (2.5\")", "16 pieces"),
                ("Wood glue", "1 bottle"),
                ("Sandpaper (assorted)", "1 pack"),
                ("Wood stain (quart)", "1 quart"),
            ],
        ),
        (
            ProjectType::Desk,
            &[
                ("2x4 pine board", "4 pieces"),
                ("Plywood sheet (4x8)", "1 sheet"),
                ("Wood screws (2.5\")", "24 pieces"),
                ("Wood glue", "1 bottle"),
                ("Sandpaper (assorted)", "1 pack"),
                ("Polyurethane (quart)", "1 quart"),
            ],
        ),
        (
            ProjectType::Storage,
            &[
                ("2x4 pine board", "6 pieces"),
                ("Plywood sheet (4x8)", "2 sheets"),
                ("Wood screws (2.5\")", "32 pieces"),
                ("Drawer slides", "2 pairs"),
                ("Cabinet handles", "4 pieces"),
                ("Wood glue", "1 bottle"),
                ("Sandpaper (assorted)", "1 pack"),
                ("Paint (gallon)", "1 gallon"),
            ],
        ),
    ],
    &[
        ("2x4 pine board", "3 pieces"),
        ("Wood screws (2.5\")", "20 pieces"),
        ("Wood glue", "1 bottle"),
        ("Sandpaper (assorted)", "1 pack"),
        ("Wood stain (quart)", "1 quart"),
    ],
);

const BASIC_TOOLS: &[&str] = &[
    "drill",
    "measuring tape",
    "level",
    "pencil",
    "circular saw",
    "screwdriver",
    "sandpaper",
];

const INTERMEDIATE_TOOLS: &[&str] = &[
    "drill",
    "measuring tape",
    "level",
    "pencil",
    "circular saw",
    "screwdriver",
    "sandpaper",
    "clamps",
    "chisel",
    "router",
    "orbital sander",
];

const ADVANCED_TOOLS: &[&str] = &[
    "drill",
    "measuring tape",
    "level",
    "pencil",
    "circular saw",
    "screwdriver",
    "sandpaper",
    "clamps",
    "chisel",
    "router",
    "orbital sander",
    "table saw",
    "planer",
    "jointer",
    "dovetail jig",
    "biscuit joiner",
];

static TOOL_TIERS: Lookup<SkillLevel, &[&str]> = Lookup::new(
    &[
        (SkillLevel::Beginner, BASIC_TOOLS),
        (SkillLevel::Intermediate, INTERMEDIATE_TOOLS),
        (SkillLevel::Advanced, ADVANCED_TOOLS),
    ],
    BASIC_TOOLS,
);

static TIME_ESTIMATES: Lookup<(ProjectSize, SkillLevel), &str> = Lookup::new(
    &[
        ((ProjectSize::Small, SkillLevel::Beginner), "1-2 hours"),
        ((ProjectSize::Small, SkillLevel::Intermediate), "1-3 hours"),
        ((ProjectSize::Small, SkillLevel::Advanced), "2-4 hours"),
        ((ProjectSize::Medium, SkillLevel::Beginner), "2-4 hours"),
        ((ProjectSize::Medium, SkillLevel::Intermediate), "3-6 hours"),
        ((ProjectSize::Medium, SkillLevel::Advanced), "4-8 hours"),
        ((ProjectSize::Large, SkillLevel::Beginner), "4-6 hours"),
        ((ProjectSize::Large, SkillLevel::Intermediate), "6-10 hours"),
        ((ProjectSize::Large, SkillLevel::Advanced), "8-12 hours"),
        ((ProjectSize::Custom, SkillLevel::Beginner), "3-5 hours"),
        ((ProjectSize::Custom, SkillLevel::Intermediate), "5-8 hours"),
        ((ProjectSize::Custom, SkillLevel::Advanced), "6-10 hours"),
    ],
    "2-4 hours",
);

struct StepTemplate {
    description: &'static str,
    tools: &'static [&'static str],
    time_estimate: &'static str,
    safety_warnings: &'static [&'static str],
}

impl StepTemplate {
    fn to_step(&self, step_number: usize) -> BuildStep {
        BuildStep {
            step_number,
            description: self.description.to_string(),
            tools: to_strings(self.tools),
            time_estimate: self.time_estimate.to_string(),
            safety_warnings: to_strings(self.safety_warnings),
        }
    }
}

static BASE_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        description: "Measure and mark the project location",
        tools: &["measuring tape", "pencil", "level"],
        time_estimate: "15 minutes",
        safety_warnings: &["Wear safety glasses", "Check for obstacles"],
    },
    StepTemplate {
        description: "Cut materials to size",
        tools: &["circular saw", "measuring tape"],
        time_estimate: "30 minutes",
        safety_warnings: &["Wear safety glasses", "Use proper cutting techniques"],
    },
    StepTemplate {
        description: "Assemble the project",
        tools: &["drill", "screwdriver"],
        time_estimate: "45 minutes",
        safety_warnings: &["Ensure proper alignment", "Use appropriate screws"],
    },
    StepTemplate {
        description: "Finish and install",
        tools: &["sandpaper", "paint brush"],
        time_estimate: "30 minutes",
        safety_warnings: &["Work in well-ventilated area", "Follow finish instructions"],
    },
];

static JOINERY_STEP: StepTemplate = StepTemplate {
    description: "Create joinery and fine details",
    tools: &["chisel", "router", "clamps"],
    time_estimate: "60 minutes",
    safety_warnings: &["Use sharp tools carefully", "Secure workpiece properly"],
};

static SUPPORT_STEP: StepTemplate = StepTemplate {
    description: "Create support structure for larger project",
    tools: &["clamps", "level", "measuring tape"],
    time_estimate: "45 minutes",
    safety_warnings: &["Ensure proper support", "Check for level"],
};

/// Conditional steps go in after cutting, before assembly.
const CONDITIONAL_STEP_INDEX: usize = 2;

/// Source of plan ids and timestamps
pub trait PlanStamp {
    fn plan_id(&self) -> String;
    fn now(&self) -> DateTime<Utc>;
}

/// Random v4 ids and the wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStamp;

impl PlanStamp for SystemStamp {
    fn plan_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generate a plan using the built-in catalog, a random id and the current time
pub fn generate_plan(request: &BuildPlanRequest) -> BuildPlan {
    generate_plan_with(request, &MaterialCatalog::builtin(), &SystemStamp)
}

pub fn generate_plan_with(
    request: &BuildPlanRequest,
    catalog: &MaterialCatalog<'_>,
    stamp: &impl PlanStamp,
) -> BuildPlan {
    let materials = build_materials(
        &request.project_type,
        &request.project_size,
        &request.budget,
        catalog,
    );
    let estimated_cost = total_cost(&materials);
    let now = stamp.now();

    let plan = BuildPlan {
        id: stamp.plan_id(),
        project_name: project_name(&request.style, &request.project_size, &request.project_type),
        difficulty: request.skill_level.clone(),
        estimated_time: estimate_time(&request.project_size, &request.skill_level).to_string(),
        estimated_cost,
        materials,
        tools: tools_for(&request.skill_level),
        steps: build_steps(&request.project_size, &request.skill_level),
        safety_notes: to_strings(SAFETY_NOTES),
        style: request.style.clone(),
        skill_level: request.skill_level.clone(),
        space_type: request.space_type.clone(),
        dimensions: request.dimensions,
        constraints: request.constraints.clone(),
        created_at: now,
        updated_at: now,
    };

    debug!(
        plan_id = %plan.id,
        project = %plan.project_name,
        cost = plan.estimated_cost,
        steps = plan.steps.len(),
        "generated build plan"
    );
    plan
}

/// `"{Style} {Adjective} {Noun}"`, or [`UNKNOWN_PROJECT_NAME`] for an
/// unrecognized project type
pub fn project_name(style: &Style, size: &ProjectSize, project_type: &ProjectType) -> String {
    match PROJECT_NAMES.resolve(project_type) {
        NameTemplate::Styled(noun) => format!(
            "{} {} {}",
            title_case(style.as_str()),
            SIZE_ADJECTIVES.resolve(size),
            noun
        ),
        NameTemplate::Whole(name) => name.to_string(),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn size_multiplier(size: &ProjectSize) -> f64 {
    SIZE_MULTIPLIERS.resolve(size)
}

pub fn budget_multiplier(budget: &BudgetTier) -> f64 {
    BUDGET_MULTIPLIERS.resolve(budget)
}

/// Price the base material list for `project_type`.
///
/// Prices scale by size then budget. Premium budgets swap pine for the oak
/// variant when the catalog carries one; the oak price is scaled by size
/// only.
pub fn build_materials(
    project_type: &ProjectType,
    size: &ProjectSize,
    budget: &BudgetTier,
    catalog: &MaterialCatalog<'_>,
) -> Vec<Material> {
    let size_mult = size_multiplier(size);
    let budget_mult = budget_multiplier(budget);

    BASE_MATERIALS
        .resolve(project_type)
        .iter()
        .map(|&(item, quantity)| {
            let entry = catalog.lookup(item);
            let mut name = item.to_string();
            let mut price = entry.map_or(0.0, |e| e.unit_price * size_mult * budget_mult);

            if *budget == BudgetTier::Premium && item.contains("pine") {
                let hardwood = item.replace("pine", "oak");
                if let Some(oak) = catalog.lookup(&hardwood) {
                    price = oak.unit_price * size_mult;
                    name = hardwood;
                }
            }

            Material {
                item: name,
                quantity: quantity.to_string(),
                price: Some(round_cents(price)),
                store: entry.map(|e| e.store.to_string()),
                affiliate_link: entry.map(|e| e.affiliate_link.to_string()),
                product_name: entry.map(|e| e.display_name.to_string()),
            }
        })
        .collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of material prices, rounded to whole currency units
pub fn total_cost(materials: &[Material]) -> i64 {
    let sum: f64 = materials.iter().filter_map(|m| m.price).sum();
    sum.round() as i64
}

/// Cumulative tool tiers; unrecognized levels get the basic set
pub fn tools_for(skill: &SkillLevel) -> Vec<String> {
    to_strings(TOOL_TIERS.resolve(skill))
}

/// The four-step skeleton plus conditional steps, numbered from 1.
///
/// Both conditional steps sit between cutting and assembly. When a large
/// project is built at advanced level, joinery comes before the support
/// structure.
pub fn build_steps(size: &ProjectSize, skill: &SkillLevel) -> Vec<BuildStep> {
    let mut inserted = Vec::new();
    if *skill == SkillLevel::Advanced {
        inserted.push(&JOINERY_STEP);
    }
    if *size == ProjectSize::Large {
        inserted.push(&SUPPORT_STEP);
    }

    let (before, after) = BASE_STEPS.split_at(CONDITIONAL_STEP_INDEX);
    before
        .iter()
        .chain(inserted)
        .chain(after)
        .enumerate()
        .map(|(index, template)| template.to_step(index + 1))
        .collect()
}

pub fn estimate_time(size: &ProjectSize, skill: &SkillLevel) -> &'static str {
    TIME_ESTIMATES.resolve(&(size.clone(), skill.clone()))
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
