//! Feet measurements and request validation
//!
//! Accepts the measurement forms people actually type: `5`, `5.25`, `1/2`
//! and mixed numbers like `5 1/2`.

use regex::Regex;

use crate::error::PlannerError;
use crate::models::{BuildPlanRequest, Dimensions};

pub const CM_PER_FOOT: f64 = 30.48;

/// Smallest accepted width, length or height
pub const MIN_FEET: f64 = 0.1;

pub fn feet_to_cm(feet: f64) -> f64 {
    feet * CM_PER_FOOT
}

pub fn cm_to_feet(cm: f64) -> f64 {
    cm / CM_PER_FOOT
}

/// Parse a feet measurement
pub fn parse_feet(input: &str) -> Result<f64, PlannerError> {
    let value = input.trim();
    let invalid = || PlannerError::InvalidFeet {
        input: input.to_string(),
    };

    // Pattern: 5 1/2
    let mixed_re = Regex::new(r"^(\d+)\s+(\d+)/(\d+)$")?;
    if let Some(cap) = mixed_re.captures(value) {
        let whole: f64 = cap[1].parse().map_err(|_| invalid())?;
        return Ok(whole + ratio(&cap[2], &cap[3]).ok_or_else(invalid)?);
    }

    // Pattern: 1/2
    let fraction_re = Regex::new(r"^(\d+)/(\d+)$")?;
    if let Some(cap) = fraction_re.captures(value) {
        return ratio(&cap[1], &cap[2]).ok_or_else(invalid);
    }

    // Pattern: 5 or 5.25
    let decimal_re = Regex::new(r"^\d+(\.\d+)?$")?;
    if decimal_re.is_match(value) {
        return value.parse().map_err(|_| invalid());
    }

    Err(invalid())
}

fn ratio(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: u32 = numerator.parse().ok()?;
    let denominator: u32 = denominator.parse().ok()?;
    if denominator == 0 {
        return None;
    }
    Some(f64::from(numerator) / f64::from(denominator))
}

/// Parse `WIDTHxLENGTH` or `WIDTHxLENGTHxHEIGHT`, each part in feet
pub fn parse_dimensions(input: &str) -> Result<Dimensions, PlannerError> {
    let parts: Vec<&str> = input.split(['x', 'X', '×']).map(str::trim).collect();

    let feet = |part: &str| {
        parse_feet(part).map_err(|_| PlannerError::InvalidDimensions {
            input: input.to_string(),
        })
    };

    match parts.as_slice() {
        [width, length] => Ok(Dimensions {
            width: feet(width)?,
            length: feet(length)?,
            height: None,
        }),
        [width, length, height] => Ok(Dimensions {
            width: feet(width)?,
            length: feet(length)?,
            height: Some(feet(height)?),
        }),
        _ => Err(PlannerError::InvalidDimensions {
            input: input.to_string(),
        }),
    }
}

/// Parse dimensions given in centimetres and convert them to feet
pub fn parse_metric_dimensions(input: &str) -> Result<Dimensions, PlannerError> {
    let cm = parse_dimensions(input)?;
    Ok(Dimensions {
        width: cm_to_feet(cm.width),
        length: cm_to_feet(cm.length),
        height: cm.height.map(cm_to_feet),
    })
}

/// Eighths shown as fractions when formatting feet
const FRACTIONS: &[(f64, &str)] = &[
    (0.125, "1/8"),
    (0.25, "1/4"),
    (0.375, "3/8"),
    (0.5, "1/2"),
    (0.625, "5/8"),
    (0.75, "3/4"),
    (0.875, "7/8"),
];

/// Format feet the way [`parse_feet`] reads them: `5`, `1/2`, `5 1/2`,
/// or two decimals when the value is not a whole number of eighths.
pub fn format_feet(feet: f64) -> String {
    const EPSILON: f64 = 1e-9;

    let whole = feet.floor();
    let fraction = feet - whole;
    if fraction < EPSILON {
        return format!("{whole}");
    }
    if 1.0 - fraction < EPSILON {
        return format!("{}", whole + 1.0);
    }
    match FRACTIONS.iter().find(|(value, _)| (fraction - value).abs() < EPSILON) {
        Some((_, text)) if whole == 0.0 => text.to_string(),
        Some((_, text)) => format!("{whole} {text}"),
        None => format!("{feet:.2}"),
    }
}

/// Centimetres rounded to whole numbers
pub fn format_cm(feet: f64) -> String {
    format!("{}", feet_to_cm(feet).round())
}

fn check_min(field: &'static str, value: f64) -> Result<(), PlannerError> {
    // NaN fails this comparison too
    if value >= MIN_FEET {
        Ok(())
    } else {
        Err(PlannerError::TooSmall {
            field,
            value,
            min: MIN_FEET,
        })
    }
}

pub fn validate_dimensions(dimensions: &Dimensions) -> Result<(), PlannerError> {
    check_min("width", dimensions.width)?;
    check_min("length", dimensions.length)?;
    if let Some(height) = dimensions.height {
        check_min("height", height)?;
    }
    Ok(())
}

/// Reject requests the generator should never see: undersized dimensions
/// or options outside the known sets.
pub fn validate_request(request: &BuildPlanRequest) -> Result<(), PlannerError> {
    validate_dimensions(&request.dimensions)?;

    request.space_type.ensure_recognized()?;
    request.project_type.ensure_recognized()?;
    request.project_size.ensure_recognized()?;
    request.style.ensure_recognized()?;
    request.skill_level.ensure_recognized()?;
    request.budget.ensure_recognized()?;
    Ok(())
}

/// Fill in the height when the user left it out
pub fn with_default_height(dimensions: Dimensions, default_height: f64) -> Dimensions {
    Dimensions {
        height: dimensions.height.or(Some(default_height)),
        ..dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, ProjectSize, ProjectType, SkillLevel, SpaceType, Style};

    fn dims(width: f64, length: f64, height: Option<f64>) -> Dimensions {
        Dimensions {
            width,
            length,
            height,
        }
    }

    #[test]
    fn parses_feet_forms() {
        assert_eq!(parse_feet("5").unwrap(), 5.0);
        assert_eq!(parse_feet(" 5.25 ").unwrap(), 5.25);
        assert_eq!(parse_feet("1/2").unwrap(), 0.5);
        assert_eq!(parse_feet("5 1/2").unwrap(), 5.5);
    }

    #[test]
    fn rejects_malformed_feet() {
        for bad in ["", "abc", "-3", "1/0", "5 1/0", "1.", "2 ft"] {
            assert!(parse_feet(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn converts_units() {
        assert!((feet_to_cm(2.0) - 60.96).abs() < 1e-9);
        assert!((cm_to_feet(30.48) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parses_dimension_triples() {
        let parsed = parse_dimensions("8x10x8").unwrap();
        assert_eq!(parsed, dims(8.0, 10.0, Some(8.0)));

        let parsed = parse_dimensions("2 1/2 x 4").unwrap();
        assert_eq!(parsed, dims(2.5, 4.0, None));

        assert!(parse_dimensions("8").is_err());
        assert!(parse_dimensions("8x10x8x2").is_err());
        assert!(parse_dimensions("8xwide").is_err());
    }

    #[test]
    fn minimum_dimension_is_a_tenth_of_a_foot() {
        let ok = dims(0.1, 3.0, None);
        assert!(validate_dimensions(&ok).is_ok());

        let thin = dims(0.05, 3.0, None);
        let err = validate_dimensions(&thin).unwrap_err();
        assert_eq!(
            err.to_string(),
            "width must be at least 0.1 feet (got 0.05)"
        );

        let flat = dims(2.0, 3.0, Some(0.0));
        assert!(validate_dimensions(&flat).is_err());

        let nan = dims(f64::NAN, 3.0, None);
        assert!(validate_dimensions(&nan).is_err());
    }

    #[test]
    fn request_validation_rejects_unknown_options() {
        let mut request = BuildPlanRequest {
            space_type: SpaceType::Wall,
            dimensions: dims(4.0, 1.0, None),
            project_type: ProjectType::Shelf,
            project_size: ProjectSize::Small,
            style: Style::Rustic,
            skill_level: SkillLevel::Beginner,
            budget: BudgetTier::Budget,
            materials: None,
            constraints: None,
            available_tools: Vec::new(),
        };
        assert!(validate_request(&request).is_ok());

        request.skill_level = SkillLevel::from("expert");
        let err = validate_request(&request).unwrap_err();
        assert!(err.to_string().starts_with("unknown skill level \"expert\""));
    }

    #[test]
    fn default_height_only_fills_gaps() {
        let open = dims(4.0, 2.0, None);
        assert_eq!(with_default_height(open, 8.0).height, Some(8.0));

        let set = dims(4.0, 2.0, Some(3.0));
        assert_eq!(with_default_height(set, 8.0).height, Some(3.0));
    }

    #[test]
    fn metric_dimensions_convert_to_feet() {
        let parsed = parse_metric_dimensions("60.96 x 91.44").unwrap();
        assert!((parsed.width - 2.0).abs() < 1e-9);
        assert!((parsed.length - 3.0).abs() < 1e-9);
        assert_eq!(parsed.height, None);

        let tall = parse_metric_dimensions("100x200x243.84").unwrap();
        assert!((tall.height.unwrap() - 8.0).abs() < 1e-9);

        assert!(parse_metric_dimensions("100").is_err());
    }

    #[test]
    fn tiny_metric_sizes_fail_validation() {
        let parsed = parse_metric_dimensions("2x100").unwrap();
        assert!(validate_dimensions(&parsed).is_err());
    }

    #[test]
    fn formats_feet_as_mixed_numbers() {
        assert_eq!(format_feet(8.0), "8");
        assert_eq!(format_feet(2.5), "2 1/2");
        assert_eq!(format_feet(0.75), "3/4");
        assert_eq!(format_feet(5.125), "5 1/8");
        assert_eq!(format_feet(3.3), "3.30");
    }

    #[test]
    fn formatted_feet_parse_back() {
        for value in [0.25, 1.0, 2.5, 6.875, 10.375] {
            assert_eq!(parse_feet(&format_feet(value)).unwrap(), value);
        }
    }

    #[test]
    fn formats_centimetres() {
        assert_eq!(format_cm(8.0), "244");
        assert_eq!(format_cm(2.0), "61");
    }
}
