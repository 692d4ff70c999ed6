//! # ISO 21771:2007 - Helical Gear Relations
//!
//! Transverse/normal conversions and the overlap ratio for cylindrical
//! involute gears with helical teeth.
//!
//! ## Notation
//!
//! - `m_n` = Normal module, `m_t` = Transverse module
//! - `α_n` = Normal pressure angle, `α_t` = Transverse pressure angle
//! - `β` = Helix angle at the reference cylinder
//! - `b` = Face width
//! - `ε_α` = Transverse contact ratio, `ε_β` = Overlap ratio, `ε_γ` = Total

use std::f64::consts::PI;

use super::gear_math;
use crate::units::Extent;

/// Transverse pressure angle in degrees.
///
/// # Formula (Eq. 1)
/// α_t = atan(tan α_n / cos β)
///
/// # Example
/// ```rust
/// use gear_core::standards::iso21771::transverse_pressure_angle;
///
/// assert!((transverse_pressure_angle(20.0, 0.0) - 20.0).abs() < 1e-12);
/// assert!((transverse_pressure_angle(20.0, 30.0) - 22.796).abs() < 1e-3);
/// ```
pub fn transverse_pressure_angle(normal_pressure_angle_deg: f64, helix_angle_deg: f64) -> f64 {
    let alpha_n = normal_pressure_angle_deg.to_radians();
    let beta = helix_angle_deg.to_radians();
    (alpha_n.tan() / beta.cos()).atan().to_degrees()
}

/// Transverse module m_t = m_n / cos β (Eq. 2)
#[inline]
pub fn transverse_module(normal_module: f64, helix_angle_deg: f64) -> f64 {
    gear_math::transverse_module(normal_module, helix_angle_deg)
}

/// Axial pitch p_x = π m_n / tan β (Eq. 3); unbounded for β = 0.
#[inline]
pub fn axial_pitch(normal_module: f64, helix_angle_deg: f64) -> Extent {
    gear_math::axial_pitch(normal_module, helix_angle_deg)
}

/// Overlap ratio.
///
/// # Formula (Eq. 4)
/// ε_β = b tan|β| / (π m_n)
///
/// The magnitude of β is used so a left-hand gear reports the same overlap
/// as its right-hand mate.
pub fn overlap_ratio(face_width: f64, helix_angle_deg: f64, normal_module: f64) -> f64 {
    face_width * helix_angle_deg.abs().to_radians().tan() / (PI * normal_module)
}

/// Total contact ratio ε_γ = ε_α + ε_β (Eq. 5)
#[inline]
pub fn total_contact_ratio(transverse_contact_ratio: f64, overlap_ratio: f64) -> f64 {
    transverse_contact_ratio + overlap_ratio
}

/// Face width needed for a desired overlap ratio.
///
/// # Formula
/// b_min = ε_β π m_n / tan β
///
/// # Returns
/// `Extent::Unbounded` for β = 0 (no face width gives overlap)
pub fn minimum_face_width(helix_angle_deg: f64, normal_module: f64, desired_overlap: f64) -> Extent {
    Extent::ratio(
        desired_overlap * PI * normal_module,
        helix_angle_deg.abs().to_radians().tan(),
    )
}

/// Virtual (equivalent spur) tooth count z_n = z / cos³ β, used for strength
/// and undercut checks of helical gears.
pub fn equivalent_spur_gear_teeth(actual_teeth: u32, helix_angle_deg: f64) -> f64 {
    f64::from(actual_teeth) / helix_angle_deg.to_radians().cos().powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_ratio_sign_independent() {
        let right = overlap_ratio(20.0, 15.0, 2.0);
        let left = overlap_ratio(20.0, -15.0, 2.0);
        assert_eq!(right, left);
        // 20 × tan 15° / (2π) = 0.8529
        assert!((right - 0.8529).abs() < 1e-4);
    }

    #[test]
    fn test_minimum_face_width() {
        assert_eq!(minimum_face_width(0.0, 2.0, 1.0), Extent::Unbounded);
        let b = minimum_face_width(45.0, 2.0, 1.0).mm().unwrap();
        assert!((b - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_equivalent_teeth() {
        assert_eq!(equivalent_spur_gear_teeth(20, 0.0), 20.0);
        let zn = equivalent_spur_gear_teeth(20, 30.0);
        assert!((zn - 30.792).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_relations() {
        assert_eq!(transverse_module(2.0, 0.0), 2.0);
        assert!((transverse_module(2.0, 60.0) - 4.0).abs() < 1e-12);
        assert_eq!(axial_pitch(3.0, 0.0), Extent::Unbounded);
        let px = axial_pitch(3.0, 45.0).mm().unwrap();
        assert!((px - 3.0 * PI).abs() < 1e-9);
    }
}
