//! # Gear Parameters
//!
//! The design parameters of a single gear. A `GearParameters` value is plain
//! data: it is validated when a [`Gear`](crate::gears::Gear) is built from it
//! and never used to derive geometry before that.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "Pinion",
//!   "module": 2.0,
//!   "teeth": 20,
//!   "pressure_angle": 20.0,
//!   "face_width": 10.0
//! }
//! ```
//!
//! Fields left out take the defaults listed on each field. Variant-specific
//! fields (`pitch_angle`, `shaft_angle`, `mate_teeth`, `leads`,
//! `worm_diameter`) are optional and resolved once by the variant that uses
//! them.

use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult, ParameterViolation};

/// Accepted pressure angle range in degrees
pub const PRESSURE_ANGLE_RANGE_DEG: (f64, f64) = (14.0, 25.0);

/// Accepted helix angle magnitude in degrees
pub const MAX_HELIX_ANGLE_DEG: f64 = 45.0;

/// Explicit bevel pitch angles must lie in [0, this) degrees
pub const MAX_PITCH_ANGLE_DEG: f64 = 90.0;

fn positive_finite(x: f64) -> bool {
    x > 0.0 && x.is_finite()
}

fn default_pressure_angle() -> f64 {
    20.0
}

fn default_face_width() -> f64 {
    10.0
}

fn default_material() -> String {
    "steel".to_string()
}

/// Design parameters for one gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearParameters {
    /// User label (e.g. "Pinion", "Ring")
    pub name: String,

    /// Normal module in mm
    pub module: f64,

    /// Tooth count (thread starts are carried separately in `leads` for worms)
    pub teeth: u32,

    /// Normal pressure angle in degrees (default 20)
    #[serde(default = "default_pressure_angle")]
    pub pressure_angle: f64,

    /// Helix angle in degrees, signed by hand (default 0)
    #[serde(default)]
    pub helix_angle: f64,

    /// Profile-shift coefficient x (default 0)
    #[serde(default)]
    pub profile_shift: f64,

    /// Backlash in mm (default 0)
    #[serde(default)]
    pub backlash: f64,

    /// Face width in mm (default 10)
    #[serde(default = "default_face_width")]
    pub face_width: f64,

    /// Material tag (default "steel")
    #[serde(default = "default_material")]
    pub material: String,

    /// Bevel: pitch cone angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_angle: Option<f64>,

    /// Bevel: shaft angle in degrees (90 when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaft_angle: Option<f64>,

    /// Bevel: tooth count of the mating gear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mate_teeth: Option<u32>,

    /// Worm: number of thread starts (1 when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leads: Option<u32>,

    /// Worm: reference diameter in mm (10 × module when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worm_diameter: Option<f64>,
}

impl GearParameters {
    /// Create parameters with every optional field at its default.
    ///
    /// ```rust
    /// use gear_core::params::GearParameters;
    ///
    /// let params = GearParameters::new("Pinion", 2.0, 20).with_face_width(12.0);
    /// assert_eq!(params.pressure_angle, 20.0);
    /// assert_eq!(params.face_width, 12.0);
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new(name: impl Into<String>, module: f64, teeth: u32) -> Self {
        GearParameters {
            name: name.into(),
            module,
            teeth,
            pressure_angle: default_pressure_angle(),
            helix_angle: 0.0,
            profile_shift: 0.0,
            backlash: 0.0,
            face_width: default_face_width(),
            material: default_material(),
            pitch_angle: None,
            shaft_angle: None,
            mate_teeth: None,
            leads: None,
            worm_diameter: None,
        }
    }

    pub fn with_pressure_angle(mut self, deg: f64) -> Self {
        self.pressure_angle = deg;
        self
    }

    pub fn with_helix_angle(mut self, deg: f64) -> Self {
        self.helix_angle = deg;
        self
    }

    pub fn with_profile_shift(mut self, x: f64) -> Self {
        self.profile_shift = x;
        self
    }

    pub fn with_backlash(mut self, mm: f64) -> Self {
        self.backlash = mm;
        self
    }

    pub fn with_face_width(mut self, mm: f64) -> Self {
        self.face_width = mm;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_pitch_angle(mut self, deg: f64) -> Self {
        self.pitch_angle = Some(deg);
        self
    }

    pub fn with_shaft_angle(mut self, deg: f64) -> Self {
        self.shaft_angle = Some(deg);
        self
    }

    pub fn with_mate_teeth(mut self, teeth: u32) -> Self {
        self.mate_teeth = Some(teeth);
        self
    }

    pub fn with_leads(mut self, leads: u32) -> Self {
        self.leads = Some(leads);
        self
    }

    pub fn with_worm_diameter(mut self, mm: f64) -> Self {
        self.worm_diameter = Some(mm);
        self
    }

    /// Every fatal rule this parameter set violates, in field order.
    pub fn violations(&self) -> Vec<ParameterViolation> {
        let mut out = Vec::new();
        let mut push = |field: &str, value: String, reason: &str| {
            out.push(ParameterViolation {
                field: field.to_string(),
                value,
                reason: reason.to_string(),
            });
        };

        // NaN fails every comparison, so it is rejected too
        if !positive_finite(self.module) {
            push("module", self.module.to_string(), "Module must be positive and finite");
        }
        if self.teeth < 1 {
            push("teeth", self.teeth.to_string(), "Tooth count must be at least 1");
        }
        let (pa_min, pa_max) = PRESSURE_ANGLE_RANGE_DEG;
        if !(pa_min..=pa_max).contains(&self.pressure_angle) {
            push(
                "pressure_angle",
                self.pressure_angle.to_string(),
                "Pressure angle must be between 14° and 25°",
            );
        }
        if !(self.helix_angle.abs() <= MAX_HELIX_ANGLE_DEG) {
            push(
                "helix_angle",
                self.helix_angle.to_string(),
                "Helix angle must be between -45° and 45°",
            );
        }
        if !positive_finite(self.face_width) {
            push("face_width", self.face_width.to_string(), "Face width must be positive and finite");
        }
        if let Some(delta) = self.pitch_angle {
            if !(0.0..MAX_PITCH_ANGLE_DEG).contains(&delta) {
                push(
                    "pitch_angle",
                    delta.to_string(),
                    "Pitch angle must be at least 0° and below 90°",
                );
            }
        }
        if let Some(leads) = self.leads {
            if leads < 1 {
                push("leads", leads.to_string(), "Worm needs at least one thread start");
            }
        }
        if let Some(mate) = self.mate_teeth {
            if mate < 1 {
                push("mate_teeth", mate.to_string(), "Mate tooth count must be at least 1");
            }
        }
        if let Some(dw) = self.worm_diameter {
            if !positive_finite(dw) {
                push("worm_diameter", dw.to_string(), "Worm diameter must be positive and finite");
            }
        }
        out
    }

    /// Validate, collecting every violated rule.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All rules satisfied
    /// * `Err(GearError::InvalidParameters)` - One entry per violated rule
    pub fn validate(&self) -> GearResult<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(GearError::InvalidParameters { violations })
        }
    }

    /// Validate, stopping at the first violated rule. Used at construction.
    pub fn validate_strict(&self) -> GearResult<()> {
        match self.violations().into_iter().next() {
            None => Ok(()),
            Some(v) => Err(GearError::InvalidParameter {
                field: v.field,
                value: v.value,
                reason: v.reason,
            }),
        }
    }
}

/// Field-by-field overrides applied by the factory before construction.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    pub name: Option<String>,
    pub module: Option<f64>,
    pub teeth: Option<u32>,
    pub pressure_angle: Option<f64>,
    pub helix_angle: Option<f64>,
    pub profile_shift: Option<f64>,
    pub backlash: Option<f64>,
    pub face_width: Option<f64>,
    pub material: Option<String>,
    pub pitch_angle: Option<f64>,
    pub shaft_angle: Option<f64>,
    pub mate_teeth: Option<u32>,
    pub leads: Option<u32>,
    pub worm_diameter: Option<f64>,
}

impl ParameterOverrides {
    pub fn is_empty(&self) -> bool {
        *self == ParameterOverrides::default()
    }

    /// Return `params` with every set override written over it.
    pub fn apply(&self, mut params: GearParameters) -> GearParameters {
        if let Some(name) = &self.name {
            params.name = name.clone();
        }
        if let Some(v) = self.module {
            params.module = v;
        }
        if let Some(v) = self.teeth {
            params.teeth = v;
        }
        if let Some(v) = self.pressure_angle {
            params.pressure_angle = v;
        }
        if let Some(v) = self.helix_angle {
            params.helix_angle = v;
        }
        if let Some(v) = self.profile_shift {
            params.profile_shift = v;
        }
        if let Some(v) = self.backlash {
            params.backlash = v;
        }
        if let Some(v) = self.face_width {
            params.face_width = v;
        }
        if let Some(material) = &self.material {
            params.material = material.clone();
        }
        if self.pitch_angle.is_some() {
            params.pitch_angle = self.pitch_angle;
        }
        if self.shaft_angle.is_some() {
            params.shaft_angle = self.shaft_angle;
        }
        if self.mate_teeth.is_some() {
            params.mate_teeth = self.mate_teeth;
        }
        if self.leads.is_some() {
            params.leads = self.leads;
        }
        if self.worm_diameter.is_some() {
            params.worm_diameter = self.worm_diameter;
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let params: GearParameters =
            serde_json::from_str(r#"{ "name": "G", "module": 2.0, "teeth": 20 }"#).unwrap();
        assert_eq!(params.pressure_angle, 20.0);
        assert_eq!(params.helix_angle, 0.0);
        assert_eq!(params.face_width, 10.0);
        assert_eq!(params.material, "steel");
        assert!(params.pitch_angle.is_none());
        assert!(params.leads.is_none());
    }

    #[test]
    fn test_validate_collects_every_violation() {
        let params = GearParameters::new("Bad", 0.0, 0).with_pressure_angle(30.0);
        match params.validate() {
            Err(GearError::InvalidParameters { violations }) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["module", "teeth", "pressure_angle"]);
            }
            other => panic!("expected InvalidParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_strict_stops_at_first() {
        let params = GearParameters::new("Bad", -1.0, 0);
        match params.validate_strict() {
            Err(GearError::InvalidParameter { field, value, .. }) => {
                assert_eq!(field, "module");
                assert_eq!(value, "-1");
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_pressure_angle_bounds_inclusive() {
        assert!(GearParameters::new("A", 1.0, 20).with_pressure_angle(14.0).validate().is_ok());
        assert!(GearParameters::new("B", 1.0, 20).with_pressure_angle(25.0).validate().is_ok());
        assert!(GearParameters::new("C", 1.0, 20).with_pressure_angle(13.9).validate().is_err());
    }

    #[test]
    fn test_nan_module_rejected() {
        assert!(GearParameters::new("NaN", f64::NAN, 20).validate().is_err());
    }

    #[test]
    fn test_infinite_lengths_rejected() {
        assert!(GearParameters::new("Inf", f64::INFINITY, 20).validate().is_err());
        let wide = GearParameters::new("Wide", 2.0, 20).with_face_width(f64::INFINITY);
        match wide.validate_strict() {
            Err(GearError::InvalidParameter { field, .. }) => assert_eq!(field, "face_width"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_pitch_angle_range() {
        let with_delta = |delta: f64| GearParameters::new("B", 2.0, 24).with_pitch_angle(delta);
        assert!(with_delta(0.0).validate().is_ok());
        assert!(with_delta(89.9).validate().is_ok());
        for bad in [90.0, 120.0, -5.0, f64::NAN] {
            match with_delta(bad).validate() {
                Err(GearError::InvalidParameters { violations }) => {
                    assert_eq!(violations.len(), 1);
                    assert_eq!(violations[0].field, "pitch_angle");
                }
                other => panic!("expected pitch_angle violation for {}, got {:?}", bad, other),
            }
        }
        // Absent pitch angle is resolved by the bevel variant
        assert!(GearParameters::new("B", 2.0, 24).validate().is_ok());
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = ParameterOverrides {
            teeth: Some(40),
            pitch_angle: Some(30.0),
            ..Default::default()
        };
        let params = overrides.apply(GearParameters::new("G", 2.0, 20));
        assert_eq!(params.teeth, 40);
        assert_eq!(params.pitch_angle, Some(30.0));
        assert_eq!(params.module, 2.0);
        assert!(ParameterOverrides::default().is_empty());
        assert!(!overrides.is_empty());
    }
}
