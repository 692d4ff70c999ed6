//! # Unit Types
//!
//! Lengths are millimetres throughout; angles are stored in degrees on the
//! parameter model and converted to radians only inside formulas.
//!
//! ## Unbounded dimensions
//!
//! A rack has no finite pitch circle and a bevel gear with a zero pitch angle
//! has no finite cone distance. Rather than letting `f64::INFINITY` leak into
//! later arithmetic, such values are modelled explicitly with [`Extent`].
//!
//! ## Example
//!
//! ```rust
//! use gear_core::units::Extent;
//!
//! let d = Extent::Finite(40.0);
//! assert_eq!(d.mm(), Some(40.0));
//! assert!(Extent::Unbounded > d);
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

/// A length in millimetres that may be unbounded.
///
/// Ordering places every finite value below `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Extent {
    /// Finite length in millimetres
    Finite(f64),
    /// No finite value (rack pitch line, zero pitch-angle cone)
    Unbounded,
}

impl Extent {
    /// Finite value in millimetres, `None` when unbounded
    pub fn mm(self) -> Option<f64> {
        match self {
            Extent::Finite(v) => Some(v),
            Extent::Unbounded => None,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Extent::Unbounded)
    }

    /// Apply `f` to a finite value; unbounded stays unbounded.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Extent {
        match self {
            Extent::Finite(v) => Extent::Finite(f(v)),
            Extent::Unbounded => Extent::Unbounded,
        }
    }

    /// `numerator / denominator`, unbounded when the denominator is zero or
    /// the quotient is not finite.
    pub fn ratio(numerator: f64, denominator: f64) -> Extent {
        if denominator == 0.0 {
            return Extent::Unbounded;
        }
        let q = numerator / denominator;
        if q.is_finite() {
            Extent::Finite(q)
        } else {
            Extent::Unbounded
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Finite(v) => write!(f, "{:.3} mm", v),
            Extent::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Finite values serialize as plain numbers, unbounded as the string `"unbounded"`.
impl Serialize for Extent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Extent::Finite(v) => serializer.serialize_f64(*v),
            Extent::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

impl From<Extent> for serde_json::Value {
    fn from(extent: Extent) -> Self {
        match extent {
            Extent::Finite(v) => serde_json::Value::from(v),
            Extent::Unbounded => serde_json::Value::from("unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_ordering() {
        assert!(Extent::Finite(1e12) < Extent::Unbounded);
        assert!(Extent::Finite(44.0) > Extent::Finite(40.0));
    }

    #[test]
    fn test_extent_ratio_guards_zero() {
        assert_eq!(Extent::ratio(48.0, 0.0), Extent::Unbounded);
        assert_eq!(Extent::ratio(48.0, 2.0), Extent::Finite(24.0));
    }

    #[test]
    fn test_extent_serialization() {
        assert_eq!(serde_json::to_string(&Extent::Finite(40.0)).unwrap(), "40.0");
        assert_eq!(serde_json::to_string(&Extent::Unbounded).unwrap(), "\"unbounded\"");
    }
}
