//! # Tooth Profile Generators
//!
//! Pure curve samplers used to build tooth outlines. Every generator yields
//! its points as a restartable (`Clone`) iterator of [`DVec2`]; the
//! `generate_points` helpers collect the same sequence into a `Vec`.
//!
//! ## Modules
//!
//! - [`involute`] - Involute of a circle, the standard ISO flank form
//! - [`cycloidal`] - Epicycloid and hypocycloid flanks for special gearing

pub mod cycloidal;
pub mod involute;

use glam::DVec2;

pub use cycloidal::{CycloidKind, CycloidalProfile};
pub use involute::InvoluteProfile;

/// `n` evenly spaced values over `[start, end]`, both endpoints included.
///
/// `n = 1` yields only `start`; `n = 0` yields nothing.
///
/// ```rust
/// use gear_core::profiles::Linspace;
///
/// let v: Vec<f64> = Linspace::new(0.0, 1.0, 5).collect();
/// assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    count: usize,
    index: usize,
}

impl Linspace {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };
        Linspace { start, end, step, count, index: 0 }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index;
        self.index += 1;
        // Land exactly on the end point instead of accumulating rounding.
        if i + 1 == self.count && self.count > 1 {
            Some(self.end)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Linspace {}

/// Sample a parametric curve at `n` evenly spaced parameter values.
pub(crate) fn sample_curve<F>(start: f64, end: f64, n: usize, curve: F) -> impl Iterator<Item = DVec2> + Clone
where
    F: Fn(f64) -> DVec2 + Clone,
{
    Linspace::new(start, end, n).map(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_edge_counts() {
        assert_eq!(Linspace::new(2.0, 5.0, 0).count(), 0);
        assert_eq!(Linspace::new(2.0, 5.0, 1).collect::<Vec<_>>(), vec![2.0]);
        assert_eq!(Linspace::new(2.0, 5.0, 2).collect::<Vec<_>>(), vec![2.0, 5.0]);
    }

    #[test]
    fn test_linspace_exact_size() {
        let it = Linspace::new(0.0, 10.0, 11);
        assert_eq!(it.len(), 11);
        let last = it.last().unwrap();
        assert_eq!(last, 10.0);
    }
}
