//! # Helical Gear
//!
//! Cylindrical gear with teeth inclined at the helix angle β. The pitch
//! circle uses the transverse module m_t = m_n / cos β; a pair meshes on
//! parallel shafts only when the hands are opposite (β1 + β2 ≈ 0).

use std::f64::consts::PI;

use serde::Serialize;
use serde_json::json;

use super::{base_path_contact_ratio, Gear, GearInfo, MeshDetail, MeshResult, ANGLE_SUM_TOLERANCE_DEG};
use crate::errors::{GearResult, MeshConstraint};
use crate::params::GearParameters;
use crate::profiles::InvoluteProfile;
use crate::standards::{gear_math, iso21771};
use crate::units::Extent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelicalGeometry {
    pub helix_angle: f64,
    pub transverse_module: f64,
    /// Degrees
    pub transverse_pressure_angle: f64,
    pub axial_pitch: Extent,
    pub normal_pitch: f64,
    /// Axial advance of one tooth over a full turn, π d / tan β
    pub lead: Extent,
    /// Virtual spur tooth count z / cos³ β
    pub equivalent_teeth: f64,
    pub overlap_ratio: f64,
    /// 1.4 + z / 100 + ε_β
    pub contact_ratio_estimate: f64,
    pub profile: InvoluteProfile,
}

impl HelicalGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let beta = params.helix_angle;
        let transverse_module = iso21771::transverse_module(params.module, beta);
        let pitch_diameter = transverse_module * f64::from(params.teeth);
        let overlap_ratio = iso21771::overlap_ratio(params.face_width, beta, params.module);

        HelicalGeometry {
            helix_angle: beta,
            transverse_module,
            transverse_pressure_angle: iso21771::transverse_pressure_angle(params.pressure_angle, beta),
            axial_pitch: iso21771::axial_pitch(params.module, beta),
            normal_pitch: gear_math::normal_pitch(params.module),
            lead: Extent::ratio(PI * pitch_diameter, beta.to_radians().tan()),
            equivalent_teeth: iso21771::equivalent_spur_gear_teeth(params.teeth, beta),
            overlap_ratio,
            contact_ratio_estimate: super::spur::contact_ratio_estimate(params.teeth) + overlap_ratio,
            profile: InvoluteProfile::new(params.pressure_angle),
        }
    }

    pub(crate) fn mesh(&self, gear: &Gear, partner: &Gear) -> GearResult<MeshResult> {
        let sum = gear.params().helix_angle + partner.params().helix_angle;
        if sum.abs() > ANGLE_SUM_TOLERANCE_DEG {
            return Err(gear.mesh_error(partner, MeshConstraint::HelixAngleSum { sum_deg: sum }));
        }

        let d1 = gear.finite(gear.pitch_diameter(), "pitch diameter")?;
        let d2 = partner.finite(partner.pitch_diameter(), "pitch diameter")?;
        let center_distance = gear_math::center_distance(d1, d2);

        let transverse = base_path_contact_ratio(gear, partner, center_distance)?;
        let total = iso21771::total_contact_ratio(transverse, self.overlap_ratio);

        Ok(MeshResult::new(
            center_distance,
            total,
            MeshDetail::Helical {
                transverse_contact_ratio: transverse,
                overlap_ratio: self.overlap_ratio,
            },
        ))
    }

    pub(crate) fn extend_info(&self, params: &GearParameters, info: &mut GearInfo) {
        info.insert("transverse_module".into(), json!(self.transverse_module));
        info.insert("axial_pitch".into(), self.axial_pitch.into());
        info.insert("normal_pitch".into(), json!(self.normal_pitch));
        info.insert("transverse_pressure_angle".into(), json!(self.transverse_pressure_angle));
        info.insert("helix_angle".into(), json!(params.helix_angle));
        info.insert("lead".into(), self.lead.into());
        info.insert("equivalent_teeth".into(), json!(self.equivalent_teeth));
        info.insert("overlap_ratio".into(), json!(self.overlap_ratio));
        info.insert("contact_ratio".into(), json!(self.contact_ratio_estimate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GearError;
    use crate::gears::GearKind;
    use approx::assert_relative_eq;

    fn helical(name: &str, teeth: u32, beta: f64) -> Gear {
        Gear::helical(GearParameters::new(name, 2.0, teeth).with_helix_angle(beta).with_face_width(20.0)).unwrap()
    }

    #[test]
    fn test_pitch_uses_transverse_module() {
        let g = helical("H", 20, 30.0);
        let d = g.pitch_diameter().mm().unwrap();
        assert_relative_eq!(d, 40.0 / 30f64.to_radians().cos(), epsilon = 1e-12);
        assert!(g.outside_diameter() > g.pitch_diameter());
        assert!(g.pitch_diameter() > g.root_diameter());
    }

    #[test]
    fn test_zero_helix_axial_pitch_and_lead_unbounded() {
        let g = helical("H", 20, 0.0);
        let GearKind::Helical(h) = g.kind() else { panic!("not helical") };
        assert!(h.axial_pitch.is_unbounded());
        assert!(h.lead.is_unbounded());
        assert_eq!(g.get_info()["lead"], json!("unbounded"));
    }

    #[test]
    fn test_opposite_hands_mesh() {
        let a = helical("A", 20, 15.0);
        let b = helical("B", 40, -15.0);
        let mesh = a.mesh_with(&b).unwrap();
        let MeshDetail::Helical { transverse_contact_ratio, overlap_ratio } = mesh.detail else {
            panic!("wrong detail")
        };
        assert!(overlap_ratio > 0.0);
        assert_relative_eq!(mesh.contact_ratio, transverse_contact_ratio + overlap_ratio, epsilon = 1e-12);
    }

    #[test]
    fn test_left_hand_driver_reports_same_overlap() {
        let a = helical("A", 20, -15.0);
        let b = helical("B", 40, 15.0);
        let right = helical("R", 20, 15.0);
        let mesh = a.mesh_with(&b).unwrap();
        let MeshDetail::Helical { overlap_ratio, .. } = mesh.detail else { panic!("wrong detail") };
        let GearKind::Helical(h) = right.kind() else { panic!("not helical") };
        assert_relative_eq!(overlap_ratio, h.overlap_ratio, epsilon = 1e-12);
    }

    #[test]
    fn test_same_hand_rejected() {
        let a = helical("A", 20, 15.0);
        let b = helical("B", 40, 15.0);
        let err = a.mesh_with(&b).unwrap_err();
        match err {
            GearError::MeshIncompatible { constraint: MeshConstraint::HelixAngleSum { sum_deg }, .. } => {
                assert_relative_eq!(sum_deg, 30.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_helix_sum_tolerance() {
        let a = helical("A", 20, 15.0);
        let b = helical("B", 40, -15.05);
        assert!(a.mesh_with(&b).is_ok());
    }
}
