use chrono::{DateTime, TimeZone, Utc};

use diy_planner::catalog::MaterialCatalog;
use diy_planner::models::{
    BudgetTier, BuildPlanRequest, Dimensions, ProjectSize, ProjectType, SkillLevel, SpaceType,
    Style,
};
use diy_planner::{PlanStamp, filter_tools_by_availability, generate_plan, generate_plan_with};

struct FixedStamp;

impl PlanStamp for FixedStamp {
    fn plan_id(&self) -> String {
        "plan-0001".to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }
}

fn request(size: ProjectSize, skill: SkillLevel, budget: BudgetTier) -> BuildPlanRequest {
    BuildPlanRequest {
        space_type: SpaceType::Room,
        dimensions: Dimensions {
            width: 8.0,
            length: 10.0,
            height: Some(8.0),
        },
        project_type: ProjectType::Shelf,
        project_size: size,
        style: Style::Modern,
        skill_level: skill,
        budget,
        materials: None,
        constraints: Some("rental apartment".to_string()),
        available_tools: Vec::new(),
    }
}

#[test]
fn demo_shelf_plan() {
    diy_planner::logging::init_test();
    let plan = generate_plan(&request(
        ProjectSize::Medium,
        SkillLevel::Beginner,
        BudgetTier::Moderate,
    ));

    assert_eq!(plan.project_name, "Modern Standard Floating Shelf");
    assert_eq!(plan.difficulty, SkillLevel::Beginner);
    assert_eq!(plan.estimated_time, "2-4 hours");
    assert_eq!(plan.estimated_cost, 56);
    assert_eq!(plan.materials.len(), 6);
    assert_eq!(plan.tools.len(), 7);
    assert_eq!(plan.steps.len(), 4);
    assert_eq!(plan.safety_notes.len(), 5);
    assert_eq!(plan.constraints.as_deref(), Some("rental apartment"));
    assert_eq!(plan.created_at, plan.updated_at);
}

#[test]
fn same_request_and_stamp_give_same_plan() {
    let req = request(ProjectSize::Large, SkillLevel::Advanced, BudgetTier::Premium);
    let catalog = MaterialCatalog::builtin();
    let a = generate_plan_with(&req, &catalog, &FixedStamp);
    let b = generate_plan_with(&req, &catalog, &FixedStamp);
    assert_eq!(a, b);
    assert_eq!(a.id, "plan-0001");
}

#[test]
fn random_ids_differ() {
    let req = request(ProjectSize::Small, SkillLevel::Beginner, BudgetTier::Budget);
    assert_ne!(generate_plan(&req).id, generate_plan(&req).id);
}

#[test]
fn cost_is_rounded_sum_for_every_combination() {
    let sizes = [
        ProjectSize::Small,
        ProjectSize::Medium,
        ProjectSize::Large,
        ProjectSize::Custom,
        ProjectSize::from("huge"),
    ];
    let budgets = [
        BudgetTier::Budget,
        BudgetTier::Moderate,
        BudgetTier::Premium,
        BudgetTier::from("lavish"),
    ];
    let catalog = MaterialCatalog::builtin();

    for size in &sizes {
        for budget in &budgets {
            let req = request(size.clone(), SkillLevel::Intermediate, budget.clone());
            let plan = generate_plan_with(&req, &catalog, &FixedStamp);
            let sum: f64 = plan.materials.iter().filter_map(|m| m.price).sum();
            assert_eq!(plan.estimated_cost, sum.round() as i64, "{size} / {budget}");
        }
    }
}

#[test]
fn steps_are_numbered_contiguously() {
    let catalog = MaterialCatalog::builtin();
    for size in [ProjectSize::Small, ProjectSize::Large] {
        for skill in [SkillLevel::Beginner, SkillLevel::Advanced] {
            let req = request(size.clone(), skill.clone(), BudgetTier::Moderate);
            let plan = generate_plan_with(&req, &catalog, &FixedStamp);
            let numbers: Vec<usize> = plan.steps.iter().map(|s| s.step_number).collect();
            let expected: Vec<usize> = (1..=plan.steps.len()).collect();
            assert_eq!(numbers, expected);
        }
    }
}

#[test]
fn unknown_options_degrade_to_fallbacks() {
    let mut req = request(
        ProjectSize::from("giant"),
        SkillLevel::from("expert"),
        BudgetTier::from("lavish"),
    );
    req.project_type = ProjectType::from("spaceship");

    let plan = generate_plan_with(&req, &MaterialCatalog::builtin(), &FixedStamp);
    assert_eq!(plan.project_name, "Custom Build Project");
    assert_eq!(plan.estimated_time, "2-4 hours");
    assert_eq!(plan.tools.len(), 7);
    assert_eq!(plan.materials.len(), 5);
    assert_eq!(plan.steps.len(), 4);
}

#[test]
fn beginner_with_basic_kit_is_ready() {
    let plan = generate_plan(&request(
        ProjectSize::Medium,
        SkillLevel::Beginner,
        BudgetTier::Moderate,
    ));
    let owned = [
        "drill",
        "measuring tape",
        "ruler",
        "pencil",
        "hand saw",
        "screwdriver",
        "orbital sander",
    ];
    let readiness = filter_tools_by_availability(&plan.tools, &owned);
    assert!(readiness.missing.is_empty());
    assert_eq!(readiness.alternatives.len(), 3);
}

#[test]
fn plan_survives_json() {
    let plan = generate_plan_with(
        &request(ProjectSize::Large, SkillLevel::Advanced, BudgetTier::Budget),
        &MaterialCatalog::builtin(),
        &FixedStamp,
    );
    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"skill_level\":\"advanced\""));
    let back: diy_planner::models::BuildPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
}
