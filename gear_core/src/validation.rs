//! # Validation
//!
//! Advisory checks on single gears and gear pairs. Unlike
//! [`GearParameters::validate`], these functions never fail: they report
//! every issue found, including soft warnings, so a front end can show
//! them all at once.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::params::GearParameters;
//! use gear_core::validation::{validate_gear_params, Severity};
//!
//! let issues = validate_gear_params(&GearParameters::new("small", 2.0, 8));
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].severity, Severity::Warning);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gears::{Gear, ANGLE_SUM_TOLERANCE_DEG, MODULE_TOLERANCE_MM, PRESSURE_ANGLE_TOLERANCE_DEG};
use crate::params::{GearParameters, MAX_HELIX_ANGLE_DEG, PRESSURE_ANGLE_RANGE_DEG};
use crate::standards::gear_math::MIN_TEETH_WITHOUT_SHIFT;

/// Below this tooth count a gear is flagged for likely interference
pub const INTERFERENCE_WARNING_TEETH: u32 = 12;

/// Undercut-free minimum for the legacy 14.5° system, matched exactly
const UNDERCUT_MIN_TEETH_14_5: u32 = 32;

/// Minimum tooth count free of undercut, keyed by whole-degree pressure angle
const UNDERCUT_MIN_TEETH: [(f64, u32); 2] = [(20.0, 18), (25.0, 12)];

/// Fallback when the pressure angle is not in the table
const UNDERCUT_DEFAULT_MIN_TEETH: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterferenceCheck {
    pub interferes: bool,
    pub message: String,
}

// ============================================================================
// Single gear
// ============================================================================

/// Every issue with `params`, errors first in field order, then warnings.
pub fn validate_gear_params(params: &GearParameters) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !(params.module > 0.0 && params.module.is_finite()) {
        issues.push(ValidationIssue::error("Module must be positive and finite"));
    }
    if params.teeth < 1 {
        issues.push(ValidationIssue::error("Number of teeth must be at least 1"));
    } else if params.teeth < INTERFERENCE_WARNING_TEETH {
        issues.push(ValidationIssue::warning(format!(
            "{} teeth may cause interference (fewer than {})",
            params.teeth, INTERFERENCE_WARNING_TEETH
        )));
    }

    let (pa_min, pa_max) = PRESSURE_ANGLE_RANGE_DEG;
    if !(pa_min..=pa_max).contains(&params.pressure_angle) {
        issues.push(ValidationIssue::error(format!(
            "Pressure angle {}° outside {}°-{}°",
            params.pressure_angle, pa_min, pa_max
        )));
    }
    if !(params.helix_angle.abs() <= MAX_HELIX_ANGLE_DEG) {
        issues.push(ValidationIssue::error(format!(
            "Helix angle {}° exceeds ±{}°",
            params.helix_angle, MAX_HELIX_ANGLE_DEG
        )));
    }

    issues.sort_by_key(|i| i.severity == Severity::Warning);
    issues
}

/// Interference check for a gear cut without profile shift.
pub fn check_interference(gear: &Gear) -> InterferenceCheck {
    let params = gear.params();
    if params.teeth < MIN_TEETH_WITHOUT_SHIFT && params.profile_shift == 0.0 {
        InterferenceCheck {
            interferes: true,
            message: format!(
                "{} teeth without profile shift interferes (minimum {})",
                params.teeth, MIN_TEETH_WITHOUT_SHIFT
            ),
        }
    } else {
        InterferenceCheck {
            interferes: false,
            message: "No interference detected".to_string(),
        }
    }
}

/// Minimum undercut-free tooth count at `pressure_angle_deg`.
///
/// 14.5° matches only exactly; other angles are rounded to the nearest
/// degree before the table lookup.
pub fn min_teeth_for_undercut(pressure_angle_deg: f64) -> u32 {
    if pressure_angle_deg == 14.5 {
        return UNDERCUT_MIN_TEETH_14_5;
    }
    let key = pressure_angle_deg.round();
    UNDERCUT_MIN_TEETH
        .iter()
        .find(|&&(pa, _)| pa == key)
        .map(|&(_, z)| z)
        .unwrap_or(UNDERCUT_DEFAULT_MIN_TEETH)
}

/// True when `gear` has fewer teeth than the undercut-free minimum.
pub fn check_undercut(gear: &Gear) -> bool {
    gear.params().teeth < min_teeth_for_undercut(gear.params().pressure_angle)
}

// ============================================================================
// Pairs
// ============================================================================

/// Every rule `a` and `b` violate as a meshing pair. Never fails.
pub fn validate_mesh_pair(a: &Gear, b: &Gear) -> Vec<ValidationIssue> {
    let (pa, pb) = (a.params(), b.params());
    let mut issues = Vec::new();

    if (pa.module - pb.module).abs() > MODULE_TOLERANCE_MM {
        issues.push(ValidationIssue::error(format!(
            "Module mismatch: {} vs {}",
            pa.module, pb.module
        )));
    }
    if (pa.pressure_angle - pb.pressure_angle).abs() > PRESSURE_ANGLE_TOLERANCE_DEG {
        issues.push(ValidationIssue::error(format!(
            "Pressure angle mismatch: {}° vs {}°",
            pa.pressure_angle, pb.pressure_angle
        )));
    }
    if pa.helix_angle != 0.0 || pb.helix_angle != 0.0 {
        let sum = pa.helix_angle + pb.helix_angle;
        if sum.abs() > ANGLE_SUM_TOLERANCE_DEG {
            issues.push(ValidationIssue::error(format!(
                "Helix angles must be opposite for parallel shafts (sum {}°)",
                sum
            )));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spur(teeth: u32) -> Gear {
        Gear::spur(GearParameters::new("G", 2.0, teeth)).unwrap()
    }

    #[test]
    fn test_valid_params_have_no_issues() {
        assert!(validate_gear_params(&GearParameters::new("ok", 2.0, 20)).is_empty());
    }

    #[test]
    fn test_all_issues_reported() {
        let params = GearParameters::new("bad", -1.0, 5)
            .with_pressure_angle(30.0)
            .with_helix_angle(50.0);
        let issues = validate_gear_params(&params);
        assert_eq!(issues.len(), 4);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
        assert_eq!(issues.last().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn test_zero_teeth_is_error_not_warning() {
        let issues = validate_gear_params(&GearParameters::new("z0", 2.0, 0));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_interference() {
        // Auto profile shift clears the interference of a small spur gear
        assert!(!check_interference(&spur(12)).interferes);

        let unshifted = Gear::helical(GearParameters::new("H", 2.0, 12).with_helix_angle(10.0)).unwrap();
        let check = check_interference(&unshifted);
        assert!(check.interferes);
        assert!(check.message.contains("12"));

        assert!(!check_interference(&spur(20)).interferes);
    }

    #[test]
    fn test_undercut_table() {
        assert_eq!(min_teeth_for_undercut(14.5), 32);
        assert_eq!(min_teeth_for_undercut(20.0), 18);
        assert_eq!(min_teeth_for_undercut(20.2), 18);
        assert_eq!(min_teeth_for_undercut(25.0), 12);
        assert_eq!(min_teeth_for_undercut(22.5), 17);

        assert!(check_undercut(&spur(17)));
        assert!(!check_undercut(&spur(18)));
    }

    #[test]
    fn test_undercut_rounds_to_whole_degrees() {
        assert_eq!(min_teeth_for_undercut(20.3), 18);
        assert_eq!(min_teeth_for_undercut(19.7), 18);
        assert_eq!(min_teeth_for_undercut(24.6), 12);
        assert_eq!(min_teeth_for_undercut(20.6), 17);
        assert_eq!(min_teeth_for_undercut(14.6), 17);
    }

    #[test]
    fn test_mesh_pair_issues() {
        let a = spur(20);
        let b = Gear::spur(GearParameters::new("B", 3.0, 40).with_pressure_angle(25.0)).unwrap();
        assert_eq!(validate_mesh_pair(&a, &b).len(), 2);
        assert!(validate_mesh_pair(&a, &spur(40)).is_empty());

        let h1 = Gear::helical(GearParameters::new("H1", 2.0, 20).with_helix_angle(15.0)).unwrap();
        let h2 = Gear::helical(GearParameters::new("H2", 2.0, 40).with_helix_angle(15.0)).unwrap();
        let issues = validate_mesh_pair(&h1, &h2);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("opposite"));
    }
}
