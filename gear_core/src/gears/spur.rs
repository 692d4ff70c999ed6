//! # Spur Gear
//!
//! Straight-toothed cylindrical gear with an involute flank.
//!
//! ## Geometry
//!
//! - d = m z, d_a = d + 2m, d_f = d − 2.5m
//! - d_b = d cos α
//! - p = π m
//!
//! Gears with fewer than 17 teeth and no profile shift get
//! x = (17 − z) / 17 at construction.

use glam::DVec2;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::{base_path_contact_ratio, Gear, GearInfo, MeshDetail, MeshResult};
use crate::errors::GearResult;
use crate::params::GearParameters;
use crate::profiles::InvoluteProfile;
use crate::standards::gear_math;

/// Roll-angle range sampled for one flank, in degrees
pub const FLANK_ROLL_RANGE_DEG: (f64, f64) = (0.0, 60.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpurGeometry {
    pub base_diameter: f64,
    pub circular_pitch: f64,
    /// 1.4 + z / 100
    pub contact_ratio_estimate: f64,
    pub profile: InvoluteProfile,
}

/// Fill in the profile shift of a low-tooth-count gear left at 0.
///
/// Returns true when a shift was applied.
pub(crate) fn apply_auto_profile_shift(params: &mut GearParameters) -> bool {
    if params.teeth >= gear_math::MIN_TEETH_WITHOUT_SHIFT || params.profile_shift != 0.0 {
        return false;
    }
    params.profile_shift = gear_math::profile_shift_coefficient(params.teeth);
    debug!(
        name = %params.name,
        teeth = params.teeth,
        profile_shift = params.profile_shift,
        "profile shift applied"
    );
    true
}

/// Standalone contact-ratio estimate for a spur gear of `teeth` teeth.
pub fn contact_ratio_estimate(teeth: u32) -> f64 {
    1.4 + f64::from(teeth) / 100.0
}

impl SpurGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let pitch_diameter = params.module * f64::from(params.teeth);
        SpurGeometry {
            base_diameter: gear_math::base_diameter(pitch_diameter, params.pressure_angle),
            circular_pitch: gear_math::normal_pitch(params.module),
            contact_ratio_estimate: contact_ratio_estimate(params.teeth),
            profile: InvoluteProfile::new(params.pressure_angle),
        }
    }

    /// Involute flank from the base circle, `num_points` samples.
    pub fn tooth_points(&self, num_points: usize) -> Vec<DVec2> {
        let (start, end) = FLANK_ROLL_RANGE_DEG;
        self.profile
            .generate_points(self.base_diameter / 2.0, start, end, num_points)
    }

    pub(crate) fn mesh(&self, gear: &Gear, partner: &Gear) -> GearResult<MeshResult> {
        let d1 = gear.finite(gear.pitch_diameter(), "pitch diameter")?;
        let d2 = partner.finite(partner.pitch_diameter(), "pitch diameter")?;
        let center_distance = gear_math::center_distance(d1, d2);
        let transverse = base_path_contact_ratio(gear, partner, center_distance)?;

        Ok(MeshResult::new(
            center_distance,
            transverse,
            MeshDetail::Spur {
                transverse_contact_ratio: transverse,
            },
        ))
    }

    pub(crate) fn extend_info(&self, params: &GearParameters, info: &mut GearInfo) {
        info.insert("base_diameter".into(), json!(self.base_diameter));
        info.insert("circular_pitch".into(), json!(self.circular_pitch));
        info.insert("contact_ratio".into(), json!(self.contact_ratio_estimate));
        info.insert("profile_shift".into(), json!(params.profile_shift));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gears::GearKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_pitch_diameter_is_module_times_teeth() {
        for (m, z) in [(1.0, 17), (2.0, 20), (2.5, 33), (0.8, 101)] {
            let g = Gear::spur(GearParameters::new("g", m, z)).unwrap();
            assert_eq!(g.pitch_diameter().mm(), Some(m * f64::from(z)));
        }
    }

    #[test]
    fn test_reference_pair_contact_ratio() {
        let a = Gear::spur(GearParameters::new("A", 2.0, 20)).unwrap();
        let b = Gear::spur(GearParameters::new("B", 2.0, 40)).unwrap();
        let mesh = a.mesh_with(&b).unwrap();
        assert_eq!(mesh.center_distance, 60.0);
        assert_relative_eq!(mesh.contact_ratio, 1.64, epsilon = 0.02);
        assert!(matches!(mesh.detail, MeshDetail::Spur { .. }));
    }

    #[test]
    fn test_auto_profile_shift() {
        let g = Gear::spur(GearParameters::new("small", 2.0, 12)).unwrap();
        assert_relative_eq!(g.params().profile_shift, 5.0 / 17.0, epsilon = 1e-12);

        let explicit = Gear::spur(GearParameters::new("small", 2.0, 12).with_profile_shift(0.2)).unwrap();
        assert_eq!(explicit.params().profile_shift, 0.2);

        let large = Gear::spur(GearParameters::new("large", 2.0, 17)).unwrap();
        assert_eq!(large.params().profile_shift, 0.0);
    }

    #[test]
    fn test_tooth_points_start_on_base_circle() {
        let g = Gear::spur(GearParameters::new("A", 2.0, 20)).unwrap();
        let pts = g.tooth_points(32).unwrap();
        assert_eq!(pts.len(), 32);
        let GearKind::Spur(s) = g.kind() else { panic!("not spur") };
        assert_relative_eq!(pts[0].length(), s.base_diameter / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_info_keys() {
        let info = Gear::spur(GearParameters::new("A", 2.0, 20)).unwrap().get_info();
        assert_eq!(info["circular_pitch"], json!(std::f64::consts::PI * 2.0));
        assert_eq!(info["profile_shift"], json!(0.0));
        assert_relative_eq!(info["contact_ratio"].as_f64().unwrap(), 1.6, epsilon = 1e-12);
        assert!(info.contains_key("base_diameter"));
    }
}
