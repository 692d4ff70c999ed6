//! # Error Types
//!
//! Structured error types for gear_core. Every variant carries enough context
//! to reconstruct the failing rule, so a front end can present it (or several
//! of them at once) without parsing message strings.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::errors::{GearError, GearResult};
//!
//! fn check_module(module: f64) -> GearResult<()> {
//!     if module <= 0.0 {
//!         return Err(GearError::invalid_parameter(
//!             "module",
//!             module.to_string(),
//!             "Module must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_module(-1.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gear_core operations
pub type GearResult<T> = Result<T, GearError>;

/// A single violated parameter rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterViolation {
    /// Parameter field name (e.g. "module", "pressure_angle")
    pub field: String,
    /// Offending value as text
    pub value: String,
    /// Rule that was violated
    pub reason: String,
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' = {}: {}", self.field, self.value, self.reason)
    }
}

/// The specific rule that prevents two gears from meshing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule")]
pub enum MeshConstraint {
    /// Partner is not one of the types this variant meshes with
    WrongPartnerType { expected: Vec<String> },
    /// Modules differ by more than 1e-3 mm
    ModuleMismatch { module: f64, partner_module: f64 },
    /// Pressure angles differ by more than 0.1°
    PressureAngleMismatch { pressure_angle: f64, partner_pressure_angle: f64 },
    /// Helix angles of a helical pair do not cancel out
    HelixAngleSum { sum_deg: f64 },
    /// Bevel gears were designed for different shaft angles
    ShaftAngleMismatch { shaft_angle_deg: f64, partner_shaft_angle_deg: f64 },
    /// Pitch angles of a bevel pair do not add up to the shaft angle
    PitchAngleSum { sum_deg: f64, shaft_angle_deg: f64 },
    /// Pinion of an internal pair must have fewer teeth than the ring
    ToothCountOrder { internal_teeth: u32, partner_teeth: u32 },
    /// A zero pitch angle leaves the bevel cone distance unbounded
    UnboundedConeDistance,
}

impl fmt::Display for MeshConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshConstraint::WrongPartnerType { expected } => {
                write!(f, "partner must be one of [{}]", expected.join(", "))
            }
            MeshConstraint::ModuleMismatch { module, partner_module } => {
                write!(f, "module mismatch ({} mm vs {} mm)", module, partner_module)
            }
            MeshConstraint::PressureAngleMismatch {
                pressure_angle,
                partner_pressure_angle,
            } => write!(
                f,
                "pressure angle mismatch ({}° vs {}°)",
                pressure_angle, partner_pressure_angle
            ),
            MeshConstraint::HelixAngleSum { sum_deg } => {
                write!(f, "helix angles must be opposite (sum is {:.3}°)", sum_deg)
            }
            MeshConstraint::ShaftAngleMismatch {
                shaft_angle_deg,
                partner_shaft_angle_deg,
            } => write!(
                f,
                "shaft angle mismatch ({}° vs {}°)",
                shaft_angle_deg, partner_shaft_angle_deg
            ),
            MeshConstraint::PitchAngleSum {
                sum_deg,
                shaft_angle_deg,
            } => write!(
                f,
                "pitch angles must sum to the {}° shaft angle (sum is {:.3}°)",
                shaft_angle_deg, sum_deg
            ),
            MeshConstraint::ToothCountOrder {
                internal_teeth,
                partner_teeth,
            } => write!(
                f,
                "pinion must have fewer teeth than the internal gear ({} >= {})",
                partner_teeth, internal_teeth
            ),
            MeshConstraint::UnboundedConeDistance => {
                write!(f, "cone distance is unbounded for a zero pitch angle")
            }
        }
    }
}

/// Structured error type for gear operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GearError {
    /// A single parameter value is invalid (strict, first-error validation)
    #[error("Invalid parameter '{field}': {value} - {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    /// Every violated parameter rule, collected in one pass
    #[error("Invalid gear parameters: {}", join_violations(.violations))]
    InvalidParameters { violations: Vec<ParameterViolation> },

    /// Gear type name not present in the registry
    #[error("Unsupported gear type '{requested}'. Available types: [{}]", .available.join(", "))]
    UnsupportedType {
        requested: String,
        available: Vec<String>,
    },

    /// Two gears cannot mesh
    #[error("{gear_type} gear cannot mesh with {partner_type} gear: {constraint}")]
    MeshIncompatible {
        gear_type: String,
        partner_type: String,
        constraint: MeshConstraint,
    },

    /// Planetary gearset invariant violated
    #[error("Assembly condition not met: {reason}")]
    AssemblyCondition { reason: String },

    /// Operation needs a finite dimension that is unbounded for this gear
    #[error("Unbounded geometry: {quantity} of {gear_type} gear is unbounded")]
    UnboundedGeometry { gear_type: String, quantity: String },

    /// An argument outside the parameter model is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file written by an incompatible version
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

fn join_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl GearError {
    /// Create an InvalidParameter error
    pub fn invalid_parameter(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GearError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GearError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MeshIncompatible error
    pub fn mesh_incompatible(
        gear_type: impl Into<String>,
        partner_type: impl Into<String>,
        constraint: MeshConstraint,
    ) -> Self {
        GearError::MeshIncompatible {
            gear_type: gear_type.into(),
            partner_type: partner_type.into(),
            constraint,
        }
    }

    /// Create an AssemblyCondition error
    pub fn assembly_condition(reason: impl Into<String>) -> Self {
        GearError::AssemblyCondition {
            reason: reason.into(),
        }
    }

    /// Create an UnboundedGeometry error
    pub fn unbounded(gear_type: impl Into<String>, quantity: impl Into<String>) -> Self {
        GearError::UnboundedGeometry {
            gear_type: gear_type.into(),
            quantity: quantity.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GearError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        GearError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for I/O failures, as opposed to geometry or parameter errors
    pub fn is_io(&self) -> bool {
        matches!(self, GearError::FileError { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GearError::InvalidParameter { .. } => "INVALID_PARAMETER",
            GearError::InvalidParameters { .. } => "INVALID_PARAMETERS",
            GearError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            GearError::MeshIncompatible { .. } => "MESH_INCOMPATIBLE",
            GearError::AssemblyCondition { .. } => "ASSEMBLY_CONDITION",
            GearError::UnboundedGeometry { .. } => "UNBOUNDED_GEOMETRY",
            GearError::InvalidInput { .. } => "INVALID_INPUT",
            GearError::FileError { .. } => "FILE_ERROR",
            GearError::SerializationError { .. } => "SERIALIZATION_ERROR",
            GearError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for GearError {
    fn from(e: serde_json::Error) -> Self {
        GearError::serialization(e.to_string())
    }
}
