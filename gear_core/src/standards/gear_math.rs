//! # General Gear Formulas
//!
//! Closed-form relations shared by every gear variant: base circle, pitches,
//! center distance, the base-path contact ratio and a Lewis bending estimate.
//!
//! ## Notation
//!
//! - `m` = Normal module (mm)
//! - `z` = Tooth count
//! - `α` = Pressure angle
//! - `β` = Helix angle
//! - `d` = Pitch diameter, `d_b` = Base diameter, `d_a` = Tip diameter
//! - `a` = Center distance
//! - `p_b` = Base pitch
//!
//! ## References
//!
//! - ISO 21771:2007, Sections 4–5 (cylindrical gear geometry)
//! - Lewis, "Investigation of the strength of gear teeth" (1892)

use std::f64::consts::PI;

use crate::units::Extent;

/// Tooth count below which a standard 20° gear needs profile shift
pub const MIN_TEETH_WITHOUT_SHIFT: u32 = 17;

/// Calculate the base circle diameter.
///
/// # Formula
/// d_b = d × cos α
///
/// # Example
/// ```rust
/// use gear_core::standards::gear_math::base_diameter;
///
/// let db = base_diameter(40.0, 20.0);
/// assert!((db - 37.5877).abs() < 1e-4);
/// ```
#[inline]
pub fn base_diameter(pitch_diameter: f64, pressure_angle_deg: f64) -> f64 {
    pitch_diameter * pressure_angle_deg.to_radians().cos()
}

/// Calculate the transverse (apparent) module of a helical gear.
///
/// # Formula
/// m_t = m_n / cos β
#[inline]
pub fn transverse_module(normal_module: f64, helix_angle_deg: f64) -> f64 {
    if helix_angle_deg == 0.0 {
        return normal_module;
    }
    normal_module / helix_angle_deg.to_radians().cos()
}

/// Calculate the axial pitch of a helical gear.
///
/// # Formula
/// p_x = π m / tan β
///
/// # Returns
/// `Extent::Unbounded` for a spur gear (β = 0)
pub fn axial_pitch(module: f64, helix_angle_deg: f64) -> Extent {
    if helix_angle_deg == 0.0 {
        return Extent::Unbounded;
    }
    Extent::ratio(PI * module, helix_angle_deg.to_radians().tan())
}

/// Normal pitch p_n = π m
#[inline]
pub fn normal_pitch(module: f64) -> f64 {
    PI * module
}

/// Base pitch p_b = π m cos α
#[inline]
pub fn base_pitch(module: f64, pressure_angle_deg: f64) -> f64 {
    PI * module * pressure_angle_deg.to_radians().cos()
}

/// Center distance of an external pair, a = (d1 + d2) / 2
#[inline]
pub fn center_distance(pitch_diameter_1: f64, pitch_diameter_2: f64) -> f64 {
    (pitch_diameter_1 + pitch_diameter_2) / 2.0
}

/// Calculate the transverse contact ratio from the length of the path of contact.
///
/// ```text
///   g_α = √(r_a1² − r_b1²) + √(r_a2² − r_b2²) − a sin α
///   ε_α = g_α / p_b
/// ```
///
/// # Arguments
/// * `base_radius_1`, `base_radius_2` - Base circle radii (mm)
/// * `tip_radius_1`, `tip_radius_2` - Tip circle radii (mm)
/// * `center_distance` - Center distance a (mm)
/// * `pressure_angle_deg` - Working pressure angle α
/// * `base_pitch` - Base pitch p_b (mm)
///
/// # Returns
/// ε_α, or 0 when the base pitch is 0. A tip radius inside its base circle
/// contributes no path length. The result is not clamped.
///
/// # Example
/// ```rust
/// use gear_core::standards::gear_math::{base_pitch, contact_ratio_base_path};
///
/// // m = 2, z = 20 / 40, α = 20°
/// let a20 = 20f64.to_radians().cos();
/// let eps = contact_ratio_base_path(
///     20.0 * a20, 40.0 * a20, 22.0, 42.0, 60.0, 20.0, base_pitch(2.0, 20.0),
/// );
/// assert!((eps - 1.64).abs() < 0.02);
/// ```
pub fn contact_ratio_base_path(
    base_radius_1: f64,
    base_radius_2: f64,
    tip_radius_1: f64,
    tip_radius_2: f64,
    center_distance: f64,
    pressure_angle_deg: f64,
    base_pitch: f64,
) -> f64 {
    if base_pitch == 0.0 {
        return 0.0;
    }
    let approach = (tip_radius_1.powi(2) - base_radius_1.powi(2)).max(0.0).sqrt();
    let recess = (tip_radius_2.powi(2) - base_radius_2.powi(2)).max(0.0).sqrt();
    let path = approach + recess - center_distance * pressure_angle_deg.to_radians().sin();
    path / base_pitch
}

/// Profile-shift coefficient that avoids interference on small gears.
///
/// # Formula (simplified)
/// x = (17 − z) / 17 for z < 17, else 0
pub fn profile_shift_coefficient(teeth: u32) -> f64 {
    if teeth >= MIN_TEETH_WITHOUT_SHIFT {
        return 0.0;
    }
    f64::from(MIN_TEETH_WITHOUT_SHIFT - teeth) / f64::from(MIN_TEETH_WITHOUT_SHIFT)
}

/// Simplified Lewis bending stress estimate.
///
/// # Formula
/// - F_t = 2T / (m z)
/// - σ = k × F_t / (b m)
///
/// # Arguments
/// * `torque_nmm` - Torque on the gear (N·mm)
/// * `module` - Module (mm)
/// * `face_width` - Face width b (mm)
/// * `teeth` - Tooth count z
/// * `factor` - Combined form/service factor k
///
/// # Returns
/// Bending stress in N/mm² (MPa). Not a strength certification.
pub fn bending_stress(torque_nmm: f64, module: f64, face_width: f64, teeth: u32, factor: f64) -> f64 {
    let tangential_force = 2.0 * torque_nmm / (module * f64::from(teeth));
    factor * tangential_force / (face_width * module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_diameter_zero_angle_is_pitch() {
        assert_eq!(base_diameter(40.0, 0.0), 40.0);
    }

    #[test]
    fn test_transverse_module() {
        assert_eq!(transverse_module(2.0, 0.0), 2.0);
        let mt = transverse_module(2.0, 30.0);
        assert!((mt - 2.309_401).abs() < 1e-6);
    }

    #[test]
    fn test_axial_pitch_spur_unbounded() {
        assert_eq!(axial_pitch(2.0, 0.0), Extent::Unbounded);
        let px = axial_pitch(2.0, 45.0).mm().unwrap();
        assert!((px - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_contact_ratio_zero_base_pitch() {
        assert_eq!(contact_ratio_base_path(10.0, 20.0, 11.0, 21.0, 30.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn test_contact_ratio_reference_pair() {
        let c = 20f64.to_radians().cos();
        let eps = contact_ratio_base_path(
            20.0 * c,
            40.0 * c,
            22.0,
            42.0,
            60.0,
            20.0,
            base_pitch(2.0, 20.0),
        );
        assert!((eps - 1.635).abs() < 0.005, "eps = {}", eps);
    }

    #[test]
    fn test_profile_shift_coefficient() {
        assert_eq!(profile_shift_coefficient(17), 0.0);
        assert_eq!(profile_shift_coefficient(30), 0.0);
        assert!((profile_shift_coefficient(14) - 3.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_bending_stress() {
        // T = 20 000 N·mm, m = 2, z = 20 → F_t = 1000 N; b = 10 → σ = 50 MPa
        let sigma = bending_stress(20_000.0, 2.0, 10.0, 20, 1.0);
        assert!((sigma - 50.0).abs() < 1e-9);
    }
}
