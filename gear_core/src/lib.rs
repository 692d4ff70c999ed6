//! # gear_core - Gear Geometry & Meshing Kernel
//!
//! `gear_core` computes the parametric geometry of spur, helical, bevel,
//! worm, rack and internal gears (plus planetary assemblies) following
//! ISO 21771 / ISO 53 conventions, checks gear pairs for meshing, and
//! writes the result as binary STL or STEP.
//!
//! ## Design Philosophy
//!
//! - **Validated once**: parameters are checked before any geometry exists
//! - **Immutable gears**: geometry is derived at construction, then read-only
//! - **JSON-First**: parameters, results, info maps and errors serialize
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use gear_core::{Gear, GearParameters};
//!
//! let pinion = Gear::spur(GearParameters::new("Pinion", 2.0, 20)).unwrap();
//! let wheel = Gear::spur(GearParameters::new("Wheel", 2.0, 40)).unwrap();
//!
//! let mesh = pinion.mesh_with(&wheel).unwrap();
//! assert_eq!(mesh.center_distance, 60.0);
//!
//! let info = serde_json::to_string_pretty(&pinion.get_info()).unwrap();
//! assert!(info.contains("\"pitch_diameter\": 40.0"));
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Gear parameters and overrides
//! - [`gears`] - Gear variants, meshing and planetary sets
//! - [`profiles`] - Involute and cycloidal tooth profiles
//! - [`standards`] - Gear math, ISO formulas and the formula registry
//! - [`validation`] - Interference, undercut and pair checks
//! - [`factory`] - Gear registry and configuration documents
//! - [`export`] - STL and STEP writers
//! - [`jobs`] - Export job records
//! - [`settings`] - Kernel settings and atomic file writes
//! - [`units`] - Possibly-unbounded lengths
//! - [`errors`] - Structured error types

pub mod errors;
pub mod export;
pub mod factory;
pub mod gears;
pub mod jobs;
pub mod params;
pub mod profiles;
pub mod settings;
pub mod standards;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use errors::{GearError, GearResult};
pub use factory::GearRegistry;
pub use gears::{Gear, GearType, MeshResult};
pub use params::GearParameters;
