//! # Bevel Gear
//!
//! Straight bevel gear on intersecting shafts. Diameters are taken at the
//! outer (heel) end of the teeth.
//!
//! ## Pitch angle
//!
//! Resolved once at construction:
//! 1. the explicit `pitch_angle`, else
//! 2. atan(z / z_mate) when `mate_teeth` is given, else
//! 3. 45°.
//!
//! A pair meshes when both gears share a shaft angle (90° unless set) and
//! δ1 + δ2 equals it.

use serde::Serialize;
use serde_json::json;

use super::{Gear, GearInfo, GearKind, MeshDetail, MeshResult, ANGLE_SUM_TOLERANCE_DEG};
use crate::errors::{GearResult, MeshConstraint};
use crate::params::GearParameters;
use crate::standards::iso53;
use crate::units::Extent;

pub const DEFAULT_SHAFT_ANGLE_DEG: f64 = 90.0;
pub const DEFAULT_PITCH_ANGLE_DEG: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BevelGeometry {
    pub pitch_angle: f64,
    pub shaft_angle: f64,
    /// Σ − δ
    pub back_angle: f64,
    pub mean_pitch_radius: f64,
    /// Apex to outer pitch circle; unbounded for δ = 0
    pub cone_distance: Extent,
    pub face_angle: f64,
    pub root_angle: f64,
}

/// Pitch cone angle in degrees for `params`.
pub fn resolve_pitch_angle(params: &GearParameters) -> f64 {
    match (params.pitch_angle, params.mate_teeth) {
        (Some(delta), _) => delta,
        (None, Some(mate)) => (f64::from(params.teeth) / f64::from(mate)).atan().to_degrees(),
        (None, None) => DEFAULT_PITCH_ANGLE_DEG,
    }
}

impl BevelGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let pitch_angle = resolve_pitch_angle(params);
        let shaft_angle = params.shaft_angle.unwrap_or(DEFAULT_SHAFT_ANGLE_DEG);
        let delta = pitch_angle.to_radians();
        let pitch_diameter = params.module * f64::from(params.teeth);

        let sin_delta = delta.sin();
        let cone_distance = if sin_delta > 0.0 {
            Extent::Finite(pitch_diameter / (2.0 * sin_delta))
        } else {
            Extent::Unbounded
        };

        // Addendum/dedendum angles vanish on an unbounded cone.
        let (addendum_angle, dedendum_angle) = match cone_distance {
            Extent::Finite(r) => (
                (iso53::addendum(params.module) / r).atan().to_degrees(),
                (iso53::dedendum(params.module) / r).atan().to_degrees(),
            ),
            Extent::Unbounded => (0.0, 0.0),
        };

        BevelGeometry {
            pitch_angle,
            shaft_angle,
            back_angle: shaft_angle - pitch_angle,
            mean_pitch_radius: pitch_diameter / 2.0 * delta.cos(),
            cone_distance,
            face_angle: pitch_angle + addendum_angle,
            root_angle: pitch_angle - dedendum_angle,
        }
    }

    pub(crate) fn mesh(&self, gear: &Gear, partner: &Gear) -> GearResult<MeshResult> {
        let GearKind::Bevel(other) = partner.kind() else {
            return Err(gear.mesh_error(
                partner,
                MeshConstraint::WrongPartnerType {
                    expected: vec!["bevel".to_string()],
                },
            ));
        };

        if (self.shaft_angle - other.shaft_angle).abs() > ANGLE_SUM_TOLERANCE_DEG {
            return Err(gear.mesh_error(
                partner,
                MeshConstraint::ShaftAngleMismatch {
                    shaft_angle_deg: self.shaft_angle,
                    partner_shaft_angle_deg: other.shaft_angle,
                },
            ));
        }

        let sum = self.pitch_angle + other.pitch_angle;
        if (sum - self.shaft_angle).abs() > ANGLE_SUM_TOLERANCE_DEG {
            return Err(gear.mesh_error(
                partner,
                MeshConstraint::PitchAngleSum {
                    sum_deg: sum,
                    shaft_angle_deg: self.shaft_angle,
                },
            ));
        }

        let (Extent::Finite(r1), Extent::Finite(r2)) = (self.cone_distance, other.cone_distance) else {
            return Err(gear.mesh_error(partner, MeshConstraint::UnboundedConeDistance));
        };

        let min_teeth = gear.params().teeth.min(partner.params().teeth);
        let contact_ratio = 1.2 + 0.02 * f64::from(min_teeth);

        Ok(MeshResult::new(
            (r1 + r2) / 2.0,
            contact_ratio,
            MeshDetail::Bevel {
                shaft_angle: self.shaft_angle,
            },
        ))
    }

    pub(crate) fn extend_info(&self, info: &mut GearInfo) {
        info.insert("pitch_angle".into(), json!(self.pitch_angle));
        info.insert("shaft_angle".into(), json!(self.shaft_angle));
        info.insert("back_angle".into(), json!(self.back_angle));
        info.insert("cone_distance".into(), self.cone_distance.into());
        info.insert("mean_pitch_radius".into(), json!(self.mean_pitch_radius));
        info.insert("face_angle".into(), json!(self.face_angle));
        info.insert("root_angle".into(), json!(self.root_angle));
    }
}
