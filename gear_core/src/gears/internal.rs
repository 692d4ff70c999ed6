//! # Internal Gear
//!
//! Ring gear with teeth cut on the inside. Tooth heights point inwards, so
//! the circle ordering inverts: root Ø > pitch Ø > outside (tip) Ø.
//!
//! ## Contact ratio
//!
//! The mesh reuses the external base-path formula with the pair's
//! sum-of-radii center distance, then clamps a negative result to zero.
//! This is a known approximation: no internal-mesh path of contact is
//! derived. The unclamped value is kept in [`MeshDetail::Internal`].

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::{base_path_contact_ratio, Gear, GearInfo, MeshDetail, MeshResult};
use crate::errors::{GearResult, MeshConstraint};
use crate::params::GearParameters;
use crate::profiles::InvoluteProfile;
use crate::standards::gear_math;

/// Ring gears below this tooth count get a profile shift by default
pub const MIN_TEETH_WITHOUT_SHIFT: u32 = 32;

/// Profile shift applied to small ring gears
pub const DEFAULT_PROFILE_SHIFT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternalGeometry {
    pub base_diameter: f64,
    /// Smallest pinion that clears the ring; `None` when no pinion does
    pub min_pinion_teeth: Option<f64>,
    pub profile: InvoluteProfile,
}

pub(crate) fn apply_auto_profile_shift(params: &mut GearParameters) -> bool {
    if params.teeth >= MIN_TEETH_WITHOUT_SHIFT || params.profile_shift != 0.0 {
        return false;
    }
    params.profile_shift = DEFAULT_PROFILE_SHIFT;
    debug!(
        name = %params.name,
        teeth = params.teeth,
        profile_shift = params.profile_shift,
        "profile shift applied"
    );
    true
}

/// Minimum pinion tooth count for a ring of `teeth` at `pressure_angle_deg`.
///
/// z1_min = 2 z sin²α / (z sin²α − 2); `None` when the denominator is not
/// positive.
pub fn min_pinion_teeth(teeth: u32, pressure_angle_deg: f64) -> Option<f64> {
    let sin2 = pressure_angle_deg.to_radians().sin().powi(2);
    let z = f64::from(teeth);
    let denominator = z * sin2 - 2.0;
    if denominator <= 0.0 {
        return None;
    }
    Some(2.0 * z * sin2 / denominator)
}

impl InternalGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let pitch_diameter = params.module * f64::from(params.teeth);
        InternalGeometry {
            base_diameter: gear_math::base_diameter(pitch_diameter, params.pressure_angle),
            min_pinion_teeth: min_pinion_teeth(params.teeth, params.pressure_angle),
            profile: InvoluteProfile::new(params.pressure_angle),
        }
    }

    /// True when a pinion of `pinion_teeth` would interfere with this ring.
    pub fn check_interference(&self, pinion_teeth: u32) -> bool {
        match self.min_pinion_teeth {
            Some(min) => f64::from(pinion_teeth) < min,
            None => true,
        }
    }

    pub(crate) fn mesh(&self, ring: &Gear, pinion: &Gear) -> GearResult<MeshResult> {
        let internal_teeth = ring.params().teeth;
        let partner_teeth = pinion.params().teeth;
        if partner_teeth >= internal_teeth {
            return Err(ring.mesh_error(
                pinion,
                MeshConstraint::ToothCountOrder {
                    internal_teeth,
                    partner_teeth,
                },
            ));
        }

        let big = ring.finite(ring.pitch_diameter(), "pitch diameter")?;
        let small = pinion.finite(pinion.pitch_diameter(), "pitch diameter")?;
        let center_distance = (big - small) / 2.0;

        let unclamped = base_path_contact_ratio(ring, pinion, gear_math::center_distance(big, small))?;

        Ok(MeshResult::new(
            center_distance,
            unclamped,
            MeshDetail::Internal {
                unclamped_contact_ratio: unclamped,
            },
        ))
    }

    pub(crate) fn extend_info(&self, info: &mut GearInfo) {
        info.insert("base_diameter".into(), json!(self.base_diameter));
        info.insert("min_pinion_teeth".into(), json!(self.min_pinion_teeth));
        info.insert("is_internal".into(), json!(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GearError;
    use crate::gears::GearKind;

    fn ring(teeth: u32) -> Gear {
        Gear::internal(GearParameters::new("Ring", 2.0, teeth)).unwrap()
    }

    #[test]
    fn test_inverted_circle_order() {
        let r = ring(60);
        assert!(r.root_diameter() > r.pitch_diameter());
        assert!(r.pitch_diameter() > r.outside_diameter());
        assert_eq!(r.outside_diameter().mm(), Some(116.0));
        assert_eq!(r.root_diameter().mm(), Some(125.0));
    }

    #[test]
    fn test_pinion_must_be_smaller() {
        let r = ring(40);
        let p = Gear::spur(GearParameters::new("P", 2.0, 40)).unwrap();
        let err = r.mesh_with(&p).unwrap_err();
        match err {
            GearError::MeshIncompatible {
                constraint: MeshConstraint::ToothCountOrder { internal_teeth, partner_teeth },
                ..
            } => {
                assert_eq!(internal_teeth, 40);
                assert_eq!(partner_teeth, 40);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_contact_ratio_clamped_approximation() {
        // Known simplification: the external base-path form is reused for an
        // internal pair. Whatever it yields, the reported value is >= 0 and
        // equals max(0, unclamped).
        let r = ring(60);
        let p = Gear::spur(GearParameters::new("P", 2.0, 20)).unwrap();
        let mesh = r.mesh_with(&p).unwrap();
        assert_eq!(mesh.center_distance, 40.0);
        let MeshDetail::Internal { unclamped_contact_ratio } = mesh.detail else { panic!("wrong detail") };
        assert!(mesh.contact_ratio >= 0.0);
        assert_eq!(mesh.contact_ratio, unclamped_contact_ratio.max(0.0));
    }

    #[test]
    fn test_auto_profile_shift() {
        assert_eq!(ring(30).params().profile_shift, DEFAULT_PROFILE_SHIFT);
        assert_eq!(ring(40).params().profile_shift, 0.0);
        let explicit = Gear::internal(GearParameters::new("R", 2.0, 30).with_profile_shift(0.3)).unwrap();
        assert_eq!(explicit.params().profile_shift, 0.3);
    }

    #[test]
    fn test_pinion_interference() {
        let r = ring(60);
        let GearKind::Internal(geom) = r.kind() else { panic!("not internal") };
        let min = geom.min_pinion_teeth.unwrap();
        assert!((min - 2.797).abs() < 1e-3);
        assert!(geom.check_interference(2));
        assert!(!geom.check_interference(20));
        // z sin²α ≤ 2: no pinion clears
        assert_eq!(min_pinion_teeth(10, 20.0), None);
        let small = ring(10);
        let GearKind::Internal(g) = small.kind() else { panic!("not internal") };
        assert!(g.check_interference(5));
    }
}
