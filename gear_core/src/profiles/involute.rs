//! # Involute Profile
//!
//! The involute of a circle with base radius `r_b`, parameterised by the roll
//! angle θ:
//!
//! ```text
//!   x = r_b (cos θ + θ sin θ)
//!   y = r_b (sin θ − θ cos θ)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gear_core::profiles::InvoluteProfile;
//!
//! let profile = InvoluteProfile::new(20.0);
//! let pts = profile.generate_points(18.79, 0.0, 60.0, 50);
//! assert_eq!(pts.len(), 50);
//! // θ = 0 starts on the base circle
//! assert!((pts[0].x - 18.79).abs() < 1e-12);
//! assert!(pts[0].y.abs() < 1e-12);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sample_curve;

/// Involute function inv α = tan α − α (radians)
#[inline]
pub fn involute_function(alpha_rad: f64) -> f64 {
    alpha_rad.tan() - alpha_rad
}

/// Involute flank generator for one pressure angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoluteProfile {
    /// Pressure angle at the pitch circle in degrees
    pub pressure_angle: f64,
}

impl Default for InvoluteProfile {
    fn default() -> Self {
        InvoluteProfile { pressure_angle: 20.0 }
    }
}

impl InvoluteProfile {
    pub fn new(pressure_angle: f64) -> Self {
        InvoluteProfile { pressure_angle }
    }

    /// Point on the involute at roll angle `theta` (radians).
    #[inline]
    pub fn point_at(base_radius: f64, theta: f64) -> DVec2 {
        let (sin, cos) = theta.sin_cos();
        DVec2::new(
            base_radius * (cos + theta * sin),
            base_radius * (sin - theta * cos),
        )
    }

    /// Lazily sample `num_points` roll angles evenly over
    /// `[start_angle, end_angle]` (degrees, endpoints included).
    ///
    /// The returned iterator is `Clone`, so the sequence can be replayed.
    pub fn samples(
        &self,
        base_radius: f64,
        start_angle: f64,
        end_angle: f64,
        num_points: usize,
    ) -> impl Iterator<Item = DVec2> + Clone {
        sample_curve(
            start_angle.to_radians(),
            end_angle.to_radians(),
            num_points,
            move |theta| Self::point_at(base_radius, theta),
        )
    }

    /// Collect [`samples`](Self::samples) into a vector.
    pub fn generate_points(
        &self,
        base_radius: f64,
        start_angle: f64,
        end_angle: f64,
        num_points: usize,
    ) -> Vec<DVec2> {
        self.samples(base_radius, start_angle, end_angle, num_points).collect()
    }

    /// Pressure angle in degrees on the circle of `radius`.
    ///
    /// Returns 0 at or inside the base circle.
    pub fn pressure_angle_at_radius(&self, base_radius: f64, radius: f64) -> f64 {
        if radius <= base_radius {
            return 0.0;
        }
        (base_radius / radius).acos().to_degrees()
    }

    /// Tooth thickness on the circle of `radius`.
    ///
    /// # Formula
    /// s_r = r (s / r_p + 2 (inv α − inv α_r))
    ///
    /// # Arguments
    /// * `base_radius` - Base circle radius
    /// * `pitch_radius` - Pitch circle radius
    /// * `thickness_at_pitch` - Tooth thickness s on the pitch circle
    /// * `radius` - Radius to evaluate
    ///
    /// # Returns
    /// Thickness in mm, 0 inside the base circle. Past the pointed-tip radius
    /// the value goes negative; callers decide how to treat that.
    pub fn thickness_at_radius(
        &self,
        base_radius: f64,
        pitch_radius: f64,
        thickness_at_pitch: f64,
        radius: f64,
    ) -> f64 {
        if radius < base_radius {
            return 0.0;
        }
        let inv_alpha = involute_function(self.pressure_angle.to_radians());
        let alpha_r = (base_radius / radius).acos();
        let inv_alpha_r = involute_function(alpha_r);
        radius * (thickness_at_pitch / pitch_radius + 2.0 * (inv_alpha - inv_alpha_r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_points_leave_base_circle() {
        let profile = InvoluteProfile::default();
        let pts = profile.generate_points(10.0, 0.0, 60.0, 20);
        let radii: Vec<f64> = pts.iter().map(|p| p.length()).collect();
        assert_relative_eq!(radii[0], 10.0, epsilon = 1e-12);
        assert!(radii.windows(2).all(|w| w[1] > w[0]));
        // r(θ) = r_b √(1 + θ²)
        let theta = 60f64.to_radians();
        assert_relative_eq!(radii[19], 10.0 * (1.0 + theta * theta).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_samples_are_restartable() {
        let profile = InvoluteProfile::new(20.0);
        let it = profile.samples(5.0, 0.0, 45.0, 7);
        let first: Vec<DVec2> = it.clone().collect();
        let second: Vec<DVec2> = it.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn test_degenerate_point_counts() {
        let profile = InvoluteProfile::default();
        assert!(profile.generate_points(10.0, 0.0, 60.0, 0).is_empty());
        let one = profile.generate_points(10.0, 0.0, 60.0, 1);
        assert_eq!(one, vec![DVec2::new(10.0, 0.0)]);
    }

    #[test]
    fn test_pressure_angle_at_radius() {
        let profile = InvoluteProfile::default();
        assert_eq!(profile.pressure_angle_at_radius(10.0, 9.0), 0.0);
        assert_eq!(profile.pressure_angle_at_radius(10.0, 10.0), 0.0);
        let rb = 20.0 * 20f64.to_radians().cos();
        assert_relative_eq!(profile.pressure_angle_at_radius(rb, 20.0), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_thickness_at_pitch_radius_is_input() {
        let profile = InvoluteProfile::default();
        let rp = 20.0;
        let rb = rp * 20f64.to_radians().cos();
        let s = std::f64::consts::PI;
        assert_relative_eq!(profile.thickness_at_radius(rb, rp, s, rp), s, epsilon = 1e-9);
        assert_eq!(profile.thickness_at_radius(rb, rp, s, rb - 0.1), 0.0);
        // Teeth narrow toward the tip
        assert!(profile.thickness_at_radius(rb, rp, s, 22.0) < s);
    }
}
