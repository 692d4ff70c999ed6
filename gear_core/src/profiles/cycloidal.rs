//! # Cycloidal Profile
//!
//! Flanks traced by a point on a circle rolling around the pitch circle:
//! outside it (epicycloid, addendum flank) or inside it (hypocycloid,
//! dedendum flank). Used by clock and instrument gearing.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sample_curve;

/// Which side of the pitch circle the generating circle rolls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycloidKind {
    #[default]
    Epicycloid,
    Hypocycloid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycloidalProfile {
    /// Rolling circle radius as a fraction of the pitch radius
    pub rolling_circle_ratio: f64,
    pub kind: CycloidKind,
}

impl Default for CycloidalProfile {
    fn default() -> Self {
        CycloidalProfile {
            rolling_circle_ratio: 0.5,
            kind: CycloidKind::Epicycloid,
        }
    }
}

impl CycloidalProfile {
    pub fn new(rolling_circle_ratio: f64, kind: CycloidKind) -> Self {
        CycloidalProfile { rolling_circle_ratio, kind }
    }

    /// Rolling radius for `pitch_radius` unless one is given explicitly.
    pub fn rolling_radius(&self, pitch_radius: f64, rolling_radius: Option<f64>) -> f64 {
        rolling_radius.unwrap_or(pitch_radius * self.rolling_circle_ratio)
    }

    /// Point on the curve at angle `theta` (radians) around the pitch circle.
    pub fn point_at(kind: CycloidKind, pitch_radius: f64, rolling_radius: f64, theta: f64) -> DVec2 {
        match kind {
            CycloidKind::Epicycloid => {
                let sum = pitch_radius + rolling_radius;
                let k = sum * theta / rolling_radius;
                DVec2::new(
                    sum * theta.cos() - rolling_radius * k.cos(),
                    sum * theta.sin() - rolling_radius * k.sin(),
                )
            }
            CycloidKind::Hypocycloid => {
                let diff = pitch_radius - rolling_radius;
                let k = diff * theta / rolling_radius;
                DVec2::new(
                    diff * theta.cos() + rolling_radius * k.cos(),
                    diff * theta.sin() - rolling_radius * k.sin(),
                )
            }
        }
    }

    /// Lazily sample `num_points` angles over one revolution `[0, 2π]`.
    pub fn samples(
        &self,
        pitch_radius: f64,
        rolling_radius: Option<f64>,
        num_points: usize,
    ) -> impl Iterator<Item = DVec2> + Clone {
        let kind = self.kind;
        let r = self.rolling_radius(pitch_radius, rolling_radius);
        sample_curve(0.0, TAU, num_points, move |theta| {
            Self::point_at(kind, pitch_radius, r, theta)
        })
    }

    pub fn generate_points(&self, pitch_radius: f64, rolling_radius: Option<f64>, num_points: usize) -> Vec<DVec2> {
        self.samples(pitch_radius, rolling_radius, num_points).collect()
    }

    /// Radius of curvature at rolling angle `angle` (radians): 4 r |sin(θ/2)|
    pub fn curvature_radius(&self, rolling_radius: f64, angle: f64) -> f64 {
        4.0 * rolling_radius * (angle / 2.0).sin().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_epicycloid_starts_on_pitch_circle() {
        let profile = CycloidalProfile::default();
        let pts = profile.generate_points(20.0, None, 100);
        assert_eq!(pts.len(), 100);
        assert_relative_eq!(pts[0].x, 20.0, epsilon = 1e-12);
        assert_relative_eq!(pts[0].y, 0.0, epsilon = 1e-12);
        // Cusps touch the pitch circle, the arc peaks at R + 2r
        let max_r = pts.iter().map(|p| p.length()).fold(0.0, f64::max);
        assert!(max_r <= 40.0 + 1e-9);
        assert!(pts.iter().all(|p| p.length() >= 20.0 - 1e-9));
    }

    #[test]
    fn test_hypocycloid_stays_inside() {
        let profile = CycloidalProfile::new(0.25, CycloidKind::Hypocycloid);
        let pts = profile.generate_points(20.0, None, 64);
        assert_relative_eq!(pts[0].x, 20.0, epsilon = 1e-12);
        assert!(pts.iter().all(|p| p.length() <= 20.0 + 1e-9));
    }

    #[test]
    fn test_explicit_rolling_radius() {
        let profile = CycloidalProfile::default();
        assert_eq!(profile.rolling_radius(20.0, None), 10.0);
        assert_eq!(profile.rolling_radius(20.0, Some(3.0)), 3.0);
    }

    #[test]
    fn test_curvature_radius() {
        let profile = CycloidalProfile::default();
        assert_eq!(profile.curvature_radius(5.0, 0.0), 0.0);
        assert_relative_eq!(profile.curvature_radius(5.0, std::f64::consts::PI), 20.0, epsilon = 1e-12);
    }
}
