//! # Worm
//!
//! Threaded worm driving a worm wheel (modelled as a spur gear). The worm's
//! pitch circle is its reference diameter d_w, not m z; `teeth` is ignored
//! for geometry and `leads` counts the thread starts.

use std::f64::consts::PI;

use serde::Serialize;
use serde_json::json;

use super::{Gear, GearInfo, MeshDetail, MeshResult};
use crate::errors::GearResult;
use crate::params::GearParameters;

/// Reference diameter in modules when none is given
pub const DEFAULT_DIAMETER_FACTOR: f64 = 10.0;

/// Friction coefficient used by [`WormGeometry::default_efficiency`]
pub const DEFAULT_FRICTION_COEFFICIENT: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WormGeometry {
    pub leads: u32,
    pub worm_diameter: f64,
    /// π m
    pub axial_pitch: f64,
    /// leads × axial pitch
    pub lead: f64,
    /// Degrees
    pub lead_angle: f64,
}

impl WormGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let leads = params.leads.unwrap_or(1);
        let worm_diameter = params
            .worm_diameter
            .unwrap_or(params.module * DEFAULT_DIAMETER_FACTOR);
        let axial_pitch = PI * params.module;
        let lead = f64::from(leads) * axial_pitch;

        WormGeometry {
            leads,
            worm_diameter,
            axial_pitch,
            lead,
            lead_angle: (lead / (PI * worm_diameter)).atan().to_degrees(),
        }
    }

    /// Sliding velocity at the pitch line for a worm speed of `rpm`.
    ///
    /// v_s = (π d_w n / 60) / cos γ, in mm/s for d_w in mm.
    pub fn sliding_velocity(&self, rpm: f64) -> f64 {
        let pitch_line_velocity = PI * self.worm_diameter * rpm / 60.0;
        pitch_line_velocity / self.lead_angle.to_radians().cos()
    }

    /// Mesh efficiency with the worm driving, clamped to [0, 1].
    pub fn efficiency(&self, friction_coefficient: f64) -> f64 {
        let gamma = self.lead_angle.to_radians();
        let mu = friction_coefficient;
        let eta = (gamma.cos() - mu * gamma.tan()) / (gamma.cos() + mu / gamma.tan());
        eta.clamp(0.0, 1.0)
    }

    pub fn default_efficiency(&self) -> f64 {
        self.efficiency(DEFAULT_FRICTION_COEFFICIENT)
    }

    /// Speed reduction against a wheel of `wheel_teeth` teeth
    pub fn reduction_ratio(&self, wheel_teeth: u32) -> f64 {
        f64::from(wheel_teeth) / f64::from(self.leads)
    }

    pub(crate) fn mesh(&self, _worm: &Gear, wheel: &Gear) -> GearResult<MeshResult> {
        let d2 = wheel.finite(wheel.pitch_diameter(), "pitch diameter")?;
        let reduction_ratio = self.reduction_ratio(wheel.params().teeth);

        Ok(MeshResult::new(
            (self.worm_diameter + d2) / 2.0,
            reduction_ratio,
            MeshDetail::Worm {
                reduction_ratio,
                lead_angle: self.lead_angle,
            },
        ))
    }

    pub(crate) fn extend_info(&self, info: &mut GearInfo) {
        info.insert("leads".into(), json!(self.leads));
        info.insert("worm_diameter".into(), json!(self.worm_diameter));
        info.insert("axial_pitch".into(), json!(self.axial_pitch));
        info.insert("lead".into(), json!(self.lead));
        info.insert("lead_angle".into(), json!(self.lead_angle));
        info.insert("efficiency".into(), json!(self.default_efficiency()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gears::GearKind;
    use approx::assert_relative_eq;

    fn worm(params: GearParameters) -> (Gear, WormGeometry) {
        let gear = Gear::worm(params).unwrap();
        let GearKind::Worm(w) = gear.kind().clone() else { panic!("not worm") };
        (gear, w)
    }

    #[test]
    fn test_reduction_ratio_reference() {
        let (w, _) = worm(GearParameters::new("W", 2.0, 1).with_leads(1));
        let wheel = Gear::spur(GearParameters::new("Wheel", 2.0, 20)).unwrap();
        let mesh = w.mesh_with(&wheel).unwrap();
        assert_eq!(mesh.contact_ratio, 20.0);
        assert_eq!(mesh.center_distance, 30.0);
        assert!(matches!(mesh.detail, MeshDetail::Worm { reduction_ratio, .. } if reduction_ratio == 20.0));
    }

    #[test]
    fn test_defaults_and_diameters() {
        let (gear, w) = worm(GearParameters::new("W", 2.0, 1));
        assert_eq!(w.leads, 1);
        assert_eq!(w.worm_diameter, 20.0);
        assert_eq!(gear.pitch_diameter().mm(), Some(20.0));
        assert_eq!(gear.outside_diameter().mm(), Some(24.0));
        assert_eq!(gear.root_diameter().mm(), Some(15.0));
        // tan γ = π m / (π d_w) = 0.1
        assert_relative_eq!(w.lead_angle, 0.1f64.atan().to_degrees(), epsilon = 1e-12);
    }

    #[test]
    fn test_multi_start_worm() {
        let (w, geom) = worm(GearParameters::new("W", 2.0, 1).with_leads(2).with_worm_diameter(30.0));
        assert_relative_eq!(geom.lead, 4.0 * PI, epsilon = 1e-12);
        let wheel = Gear::spur(GearParameters::new("Wheel", 2.0, 40)).unwrap();
        assert_eq!(w.mesh_with(&wheel).unwrap().contact_ratio, 20.0);
    }

    #[test]
    fn test_efficiency_clamped() {
        let (_, w) = worm(GearParameters::new("W", 2.0, 1));
        let eta = w.default_efficiency();
        assert!(eta > 0.0 && eta < 1.0);
        assert_eq!(w.efficiency(10.0), 0.0);
        assert!(w.efficiency(0.0) <= 1.0);
    }

    #[test]
    fn test_sliding_velocity() {
        let (_, w) = worm(GearParameters::new("W", 2.0, 1));
        let v = w.sliding_velocity(60.0);
        assert_relative_eq!(v, PI * 20.0 / w.lead_angle.to_radians().cos(), epsilon = 1e-9);
    }
}
