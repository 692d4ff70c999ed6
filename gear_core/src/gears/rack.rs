//! # Rack
//!
//! A gear of unbounded radius: the pitch circle degenerates to a straight
//! pitch line, so every diameter is [`Extent::Unbounded`](crate::units::Extent).
//! The rack meshes with a spur pinion and reuses the pinion's own
//! contact-ratio estimate.

use std::f64::consts::PI;

use glam::DVec2;
use serde::Serialize;
use serde_json::json;

use super::{Gear, GearInfo, MeshDetail, MeshResult};
use crate::errors::GearResult;
use crate::params::GearParameters;
use crate::standards::iso53;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RackGeometry {
    /// h_a + h_f = 2.25 m
    pub tooth_height: f64,
    /// π m / 2 on the pitch line
    pub tooth_thickness: f64,
    pub circular_pitch: f64,
    /// Height of the pitch line above the rack datum
    pub pitch_line_height: f64,
    /// One trapezoidal tooth, counter-clockwise from the root left corner
    pub tooth_profile: [DVec2; 4],
}

impl RackGeometry {
    pub fn new(params: &GearParameters) -> Self {
        let m = params.module;
        let pitch = PI * m;
        let addendum = iso53::addendum(m);
        let dedendum = iso53::dedendum(m);
        let thickness = pitch / 2.0;
        let flank = addendum * params.pressure_angle.to_radians().tan();
        let left = -pitch / 4.0;

        RackGeometry {
            tooth_height: addendum + dedendum,
            tooth_thickness: thickness,
            circular_pitch: pitch,
            pitch_line_height: 0.0,
            tooth_profile: [
                DVec2::new(left, -dedendum),
                DVec2::new(left + thickness, -dedendum),
                DVec2::new(left + thickness + flank, addendum),
                DVec2::new(left - flank, addendum),
            ],
        }
    }

    pub(crate) fn mesh(&self, _rack: &Gear, pinion: &Gear) -> GearResult<MeshResult> {
        let d = pinion.finite(pinion.pitch_diameter(), "pitch diameter")?;
        let pinion_ratio = pinion.contact_ratio_estimate().unwrap_or(0.0);

        Ok(MeshResult::new(
            d / 2.0,
            pinion_ratio,
            MeshDetail::Rack {
                pinion_contact_ratio: pinion_ratio,
            },
        ))
    }

    pub(crate) fn extend_info(&self, info: &mut GearInfo) {
        info.insert("tooth_height".into(), json!(self.tooth_height));
        info.insert("tooth_thickness".into(), json!(self.tooth_thickness));
        info.insert("circular_pitch".into(), json!(self.circular_pitch));
    }
}
