//! # Gear Standards Library
//!
//! Pure formulas used by every gear variant. Keeping them in one place makes
//! each one checkable against its standard in isolation.
//!
//! ## Modules
//!
//! - [`gear_math`] - Circles, pitches, center distance, contact ratio, Lewis stress
//! - [`iso21771`] - Helical gear relations (transverse quantities, overlap)
//! - [`iso53`] - Basic rack tooth proportions
//! - [`registry`] - Formula metadata and the markdown reference generator
//!
//! ## Conventions
//!
//! - Lengths in millimetres
//! - Angles passed in degrees, converted to radians internally
//! - Quantities that can be infinite return [`Extent`](crate::units::Extent)

pub mod gear_math;
pub mod iso21771;
pub mod iso53;
pub mod registry;

pub use gear_math::{
    base_diameter,
    base_pitch,
    bending_stress,
    center_distance,
    contact_ratio_base_path,
    normal_pitch,
    profile_shift_coefficient,
};

pub use iso53::{basic_rack_profile, BasicRackProfile, RackProfile};

pub use registry::{
    Formula,
    FormulaCategory,
    FormulaMetadata,
    StandardReference,
    Variable,
    ALL_FORMULAS,
    generate_formulas_markdown,
};
