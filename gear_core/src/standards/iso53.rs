//! # ISO 53:1998 - Standard Basic Rack Tooth Profile
//!
//! Reference tooth proportions for cylindrical involute gears. Every gear
//! variant takes its addendum and dedendum from here.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Addendum coefficient h_aP*
pub const HA_STAR: f64 = 1.0;
/// Dedendum coefficient h_fP*
pub const HF_STAR: f64 = 1.25;
/// Bottom clearance coefficient c_P*
pub const C_STAR: f64 = 0.25;

/// Fillet radius variants of the basic rack (Table 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RackProfile {
    #[default]
    Standard,
    FullFillet,
    Reduced,
}

impl RackProfile {
    /// Fillet radius coefficient ρ_fP*
    pub fn radius_coefficient(self) -> f64 {
        match self {
            RackProfile::Standard => 0.38,
            RackProfile::FullFillet => 0.3,
            RackProfile::Reduced => 0.25,
        }
    }
}

/// Addendum h_a = h_aP* × m
#[inline]
pub fn addendum(module: f64) -> f64 {
    HA_STAR * module
}

/// Dedendum h_f = h_fP* × m
#[inline]
pub fn dedendum(module: f64) -> f64 {
    HF_STAR * module
}

/// Bottom clearance c = c_P* × m
#[inline]
pub fn clearance(module: f64) -> f64 {
    C_STAR * module
}

/// Tip fillet radius for the given profile
pub fn tip_radius(module: f64, profile: RackProfile) -> f64 {
    profile.radius_coefficient() * module
}

/// Root fillet radius for the given profile
pub fn root_radius(module: f64, profile: RackProfile) -> f64 {
    profile.radius_coefficient() * module
}

/// Dimensions of the basic rack for one module and pressure angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicRackProfile {
    pub module: f64,
    pub pressure_angle: f64,
    pub addendum: f64,
    pub dedendum: f64,
    pub tip_radius: f64,
    pub root_radius: f64,
    pub clearance: f64,
    /// Tooth thickness on the datum line, π m / 2
    pub tooth_thickness: f64,
    /// Space width on the datum line, π m / 2
    pub space_width: f64,
}

/// Build the basic rack profile.
///
/// ```rust
/// use gear_core::standards::iso53::{basic_rack_profile, RackProfile};
///
/// let rack = basic_rack_profile(2.0, 20.0, RackProfile::Standard);
/// assert_eq!(rack.addendum, 2.0);
/// assert_eq!(rack.dedendum, 2.5);
/// assert!((rack.tooth_thickness - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn basic_rack_profile(module: f64, pressure_angle: f64, profile: RackProfile) -> BasicRackProfile {
    BasicRackProfile {
        module,
        pressure_angle,
        addendum: addendum(module),
        dedendum: dedendum(module),
        tip_radius: tip_radius(module, profile),
        root_radius: root_radius(module, profile),
        clearance: clearance(module),
        tooth_thickness: PI * module / 2.0,
        space_width: PI * module / 2.0,
    }
}
