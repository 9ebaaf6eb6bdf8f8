//! Plain-text rendering for the command line

use std::fmt;

use crate::db::PlanSummary;
use crate::models::{BuildPlan, Dimensions, Material, ToolFilterResult, UserBuild};
use crate::quick_builds::QuickBuild;
use crate::tools::essential_missing;
use crate::units;

fn format_material(material: &Material) -> String {
    let mut line = format!("{} ({})", material.item, material.quantity);
    if let Some(price) = material.price {
        line.push_str(&format!(" ${price:.2}"));
    }
    if let Some(store) = &material.store {
        line.push_str(&format!(" @ {store}"));
    }
    line
}

/// Space dimensions as `W x L x H ft`, or rounded centimetres when `metric`
pub fn format_dimensions(dimensions: &Dimensions, metric: bool) -> String {
    let (format, unit): (fn(f64) -> String, &str) = if metric {
        (units::format_cm, "cm")
    } else {
        (units::format_feet, "ft")
    };

    let mut parts = vec![format(dimensions.width), format(dimensions.length)];
    if let Some(height) = dimensions.height {
        parts.push(format(height));
    }
    format!("{} {unit}", parts.join(" x "))
}

/// Plan rendering with the space shown in centimetres
pub struct MetricPlan<'a>(pub &'a BuildPlan);

impl fmt::Display for MetricPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plan(f, self.0, true)
    }
}

impl fmt::Display for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plan(f, self, false)
    }
}

fn write_plan(f: &mut fmt::Formatter<'_>, plan: &BuildPlan, metric: bool) -> fmt::Result {
    writeln!(f, "=== {} ===", plan.project_name)?;
    writeln!(f, "Plan ID:    {}", plan.id)?;
    writeln!(f, "Difficulty: {}", plan.difficulty)?;
    writeln!(f, "Time:       {}", plan.estimated_time)?;
    writeln!(f, "Cost:       ${}", plan.estimated_cost)?;
    writeln!(
        f,
        "Space:      {} {}",
        plan.space_type,
        format_dimensions(&plan.dimensions, metric)
    )?;
    if let Some(constraints) = &plan.constraints {
        writeln!(f, "Notes:      {constraints}")?;
    }
    writeln!(f)?;

    writeln!(f, "Materials:")?;
    for material in &plan.materials {
        writeln!(f, "  - {}", format_material(material))?;
    }
    writeln!(f)?;

    writeln!(f, "Tools: {}", plan.tools.join(", "))?;
    writeln!(f)?;

    writeln!(f, "Steps:")?;
    for step in &plan.steps {
        writeln!(
            f,
            "  {}. {} [{}]",
            step.step_number, step.description, step.time_estimate
        )?;
        if !step.tools.is_empty() {
            writeln!(f, "     tools: {}", step.tools.join(", "))?;
        }
        for warning in &step.safety_warnings {
            writeln!(f, "     ! {warning}")?;
        }
    }
    writeln!(f)?;

    writeln!(f, "Safety:")?;
    for note in &plan.safety_notes {
        writeln!(f, "  * {note}")?;
    }
    Ok(())
}

impl fmt::Display for ToolFilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tool readiness:")?;
        if !self.available.is_empty() {
            writeln!(f, "  Have:      {}", self.available.join(", "))?;
        }
        for sub in &self.alternatives {
            writeln!(f, "  Substitute: {} for {}", sub.alternative, sub.required)?;
        }
        if !self.missing.is_empty() {
            writeln!(f, "  Missing:   {}", self.missing.join(", "))?;
        }
        let essential = essential_missing(self);
        if !essential.is_empty() {
            writeln!(f, "  Essential tools missing: {}", essential.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for QuickBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ({}) ===", self.name, self.id)?;
        writeln!(f, "{}", self.description)?;
        writeln!(
            f,
            "Difficulty: {}  Time: {}  Cost: {}  Category: {}",
            self.difficulty, self.time, self.cost, self.category
        )?;
        writeln!(f)?;

        writeln!(f, "Materials:")?;
        for material in &self.materials {
            writeln!(f, "  - {}", format_material(material))?;
        }
        writeln!(f, "Tools: {}", self.tools.join(", "))?;
        writeln!(f)?;

        writeln!(f, "Steps:")?;
        for step in &self.steps {
            writeln!(f, "  {}. {} [{}]", step.step, step.title, step.time)?;
            writeln!(f, "     {}", step.description)?;
        }

        if !self.safety_notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Safety:")?;
            for note in &self.safety_notes {
                writeln!(f, "  * {note}")?;
            }
        }
        if !self.tips.is_empty() {
            writeln!(f)?;
            writeln!(f, "Tips:")?;
            for tip in &self.tips {
                writeln!(f, "  * {tip}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for UserBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build {} of plan {}", self.id, self.plan_id)?;
        writeln!(f, "  Status: {}", self.status)?;
        if let Some(start) = self.start_date {
            writeln!(f, "  Started: {}", start.format("%Y-%m-%d %H:%M"))?;
        }
        if let Some(done) = self.completion_date {
            writeln!(f, "  Completed: {}", done.format("%Y-%m-%d %H:%M"))?;
        }
        if let Some(cost) = self.actual_cost {
            writeln!(f, "  Actual cost: ${cost:.2}")?;
        }
        if let Some(time) = &self.actual_time {
            writeln!(f, "  Actual time: {time}")?;
        }
        if let Some(rating) = self.rating {
            writeln!(f, "  Rating: {rating}/5")?;
        }
        if let Some(review) = &self.review {
            writeln!(f, "  Review: {review}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "  Notes: {notes}")?;
        }
        Ok(())
    }
}

/// Table of saved plans
pub fn format_plan_list(plans: &[PlanSummary]) -> String {
    let mut out = format!("{:<38} {:<40} {:>6}\n", "ID", "Project", "Cost");
    out.push_str(&"-".repeat(86));
    out.push('\n');
    for plan in plans {
        out.push_str(&format!(
            "{:<38} {:<40} {:>6}\n",
            plan.id,
            plan.project_name,
            format!("${}", plan.estimated_cost)
        ));
    }
    out
}

/// One line per quick build
pub fn format_quick_build_list(builds: &[QuickBuild]) -> String {
    builds
        .iter()
        .map(|b| {
            format!(
                "{:<18} {:<24} {:<13} {:<10} {}\n",
                b.id, b.name, b.difficulty, b.category, b.cost
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToolSubstitution;

    #[test]
    fn readiness_flags_essential_gaps() {
        let result = ToolFilterResult {
            available: vec!["clamps".into()],
            missing: vec!["drill".into(), "router".into()],
            alternatives: vec![ToolSubstitution {
                required: "circular saw".into(),
                alternative: "hand saw".into(),
            }],
        };
        let text = result.to_string();
        assert!(text.contains("Substitute: hand saw for circular saw"));
        assert!(text.contains("Missing:   drill, router"));
        assert!(text.contains("Essential tools missing: drill\n"));
    }

    #[test]
    fn material_line_includes_price_and_store() {
        let material = Material {
            item: "Wood glue".into(),
            quantity: "1 bottle".into(),
            price: Some(8.0),
            store: Some("Amazon".into()),
            affiliate_link: None,
            product_name: None,
        };
        assert_eq!(
            format_material(&material),
            "Wood glue (1 bottle) $8.00 @ Amazon"
        );
    }

    #[test]
    fn dimensions_use_mixed_fractions() {
        let dims = Dimensions {
            width: 2.5,
            length: 4.0,
            height: Some(7.75),
        };
        assert_eq!(format_dimensions(&dims, false), "2 1/2 x 4 x 7 3/4 ft");

        let flat = Dimensions {
            width: 2.0,
            length: 3.0,
            height: None,
        };
        assert_eq!(format_dimensions(&flat, true), "61 x 91 cm");
    }

    #[test]
    fn formatted_dimensions_parse_back() {
        let dims = Dimensions {
            width: 5.125,
            length: 10.0,
            height: Some(8.0),
        };
        let text = format_dimensions(&dims, false);
        let parsed = units::parse_dimensions(text.trim_end_matches(" ft")).unwrap();
        assert_eq!(parsed, dims);
    }
}
