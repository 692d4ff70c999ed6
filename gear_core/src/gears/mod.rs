//! # Gear Variants
//!
//! A [`Gear`] owns its [`GearParameters`] and a [`GearKind`] carrying the
//! variant's derived geometry. Everything is computed once in [`Gear::new`];
//! afterwards a gear is read-only.
//!
//! ## Variants
//!
//! | Type | Pitch Ø | Meshes with |
//! |------|---------|-------------|
//! | [`spur`] | m z | spur |
//! | [`helical`] | m z / cos β | helical of opposite hand |
//! | [`bevel`] | m z | bevel, pitch angles summing to the shaft angle |
//! | [`worm`] | d_w | spur (worm wheel) |
//! | [`rack`] | unbounded | spur pinion |
//! | [`internal`] | m z | smaller spur pinion |
//!
//! [`planetary`] composes borrowed gears into a sun/planet/ring set.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::gears::{Gear, GearType};
//! use gear_core::params::GearParameters;
//!
//! let pinion = Gear::new(GearType::Spur, GearParameters::new("Pinion", 2.0, 20)).unwrap();
//! let wheel = Gear::new(GearType::Spur, GearParameters::new("Wheel", 2.0, 40)).unwrap();
//!
//! let mesh = pinion.mesh_with(&wheel).unwrap();
//! assert_eq!(mesh.center_distance, 60.0);
//! assert!((mesh.contact_ratio - 1.64).abs() < 0.02);
//! ```

pub mod bevel;
pub mod helical;
pub mod internal;
pub mod planetary;
pub mod rack;
pub mod spur;
pub mod worm;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::{GearError, GearResult, MeshConstraint};
use crate::params::GearParameters;
use crate::standards::{gear_math, iso53};
use crate::units::Extent;

pub use bevel::BevelGeometry;
pub use helical::HelicalGeometry;
pub use internal::InternalGeometry;
pub use planetary::{PlanetaryGearset, PlanetaryMember, PlanetaryRatios};
pub use rack::RackGeometry;
pub use spur::SpurGeometry;
pub use worm::WormGeometry;

/// Modules of a meshing pair may differ by at most this much (mm)
pub const MODULE_TOLERANCE_MM: f64 = 1e-3;

/// Pressure angles of a meshing pair may differ by at most this much (deg)
pub const PRESSURE_ANGLE_TOLERANCE_DEG: f64 = 0.1;

/// Tolerance on helix-angle and pitch-angle sums (deg)
pub const ANGLE_SUM_TOLERANCE_DEG: f64 = 0.1;

/// Flattened attribute map returned by [`Gear::get_info`]
pub type GearInfo = BTreeMap<String, serde_json::Value>;

// ============================================================================
// Gear Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GearType {
    Spur,
    Helical,
    Bevel,
    Worm,
    Rack,
    Internal,
}

impl GearType {
    pub const ALL: [GearType; 6] = [
        GearType::Spur,
        GearType::Helical,
        GearType::Bevel,
        GearType::Worm,
        GearType::Rack,
        GearType::Internal,
    ];

    /// Lower-case registry name
    pub fn name(self) -> &'static str {
        match self {
            GearType::Spur => "spur",
            GearType::Helical => "helical",
            GearType::Bevel => "bevel",
            GearType::Worm => "worm",
            GearType::Rack => "rack",
            GearType::Internal => "internal",
        }
    }

    /// Display label used in info maps (e.g. "SpurGear")
    pub fn label(self) -> &'static str {
        match self {
            GearType::Spur => "SpurGear",
            GearType::Helical => "HelicalGear",
            GearType::Bevel => "BevelGear",
            GearType::Worm => "WormGear",
            GearType::Rack => "RackGear",
            GearType::Internal => "InternalGear",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<GearType> {
        let name = name.trim();
        GearType::ALL.into_iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GearType {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GearType::parse(s).ok_or_else(|| GearError::UnsupportedType {
            requested: s.to_string(),
            available: GearType::ALL.iter().map(|t| t.name().to_string()).collect(),
        })
    }
}

// ============================================================================
// Common Geometry
// ============================================================================

/// Circle diameters and tooth heights shared by every variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GearGeometry {
    pub pitch_diameter: Extent,
    pub outside_diameter: Extent,
    pub root_diameter: Extent,
    pub addendum: f64,
    pub dedendum: f64,
}

impl GearGeometry {
    /// Derive tip and root circles from the pitch circle.
    ///
    /// `flank_scale` multiplies the radial tooth heights: 1 for external
    /// cylindrical gears, cos δ for bevel gears, −1 for internal gears.
    pub fn from_pitch(pitch_diameter: Extent, module: f64, flank_scale: f64) -> Self {
        let addendum = iso53::addendum(module);
        let dedendum = iso53::dedendum(module);
        GearGeometry {
            pitch_diameter,
            outside_diameter: pitch_diameter.map(|d| d + 2.0 * addendum * flank_scale),
            root_diameter: pitch_diameter.map(|d| d - 2.0 * dedendum * flank_scale),
            addendum,
            dedendum,
        }
    }
}

// ============================================================================
// Mesh Result
// ============================================================================

/// Variant-specific breakdown of a mesh calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshDetail {
    Spur {
        transverse_contact_ratio: f64,
    },
    Helical {
        transverse_contact_ratio: f64,
        overlap_ratio: f64,
    },
    Bevel {
        shaft_angle: f64,
    },
    /// For a worm pair `MeshResult::contact_ratio` carries the reduction ratio.
    Worm {
        reduction_ratio: f64,
        lead_angle: f64,
    },
    Rack {
        pinion_contact_ratio: f64,
    },
    /// External base-path formula applied to an internal pair, before clamping.
    Internal {
        unclamped_contact_ratio: f64,
    },
}

/// Outcome of [`Gear::mesh_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshResult {
    /// Center distance in mm
    pub center_distance: f64,
    /// Contact ratio, never negative
    pub contact_ratio: f64,
    pub detail: MeshDetail,
}

impl MeshResult {
    /// Build a result, clamping a negative contact ratio to 0.
    pub fn new(center_distance: f64, contact_ratio: f64, detail: MeshDetail) -> Self {
        MeshResult {
            center_distance,
            contact_ratio: contact_ratio.max(0.0),
            detail,
        }
    }
}

// ============================================================================
// Gear Kind
// ============================================================================

/// Variant tag plus the geometry only that variant has.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GearKind {
    Spur(SpurGeometry),
    Helical(HelicalGeometry),
    Bevel(BevelGeometry),
    Worm(WormGeometry),
    Rack(RackGeometry),
    Internal(InternalGeometry),
}

impl GearKind {
    pub fn gear_type(&self) -> GearType {
        match self {
            GearKind::Spur(_) => GearType::Spur,
            GearKind::Helical(_) => GearType::Helical,
            GearKind::Bevel(_) => GearType::Bevel,
            GearKind::Worm(_) => GearType::Worm,
            GearKind::Rack(_) => GearType::Rack,
            GearKind::Internal(_) => GearType::Internal,
        }
    }

    /// Partner types this variant can mesh with
    pub fn accepted_partners(&self) -> &'static [GearType] {
        match self {
            GearKind::Helical(_) => &[GearType::Helical],
            GearKind::Bevel(_) => &[GearType::Bevel],
            GearKind::Spur(_) | GearKind::Worm(_) | GearKind::Rack(_) | GearKind::Internal(_) => &[GearType::Spur],
        }
    }

    fn pitch_diameter(&self, params: &GearParameters) -> Extent {
        let z = f64::from(params.teeth);
        match self {
            GearKind::Spur(_) | GearKind::Bevel(_) | GearKind::Internal(_) => Extent::Finite(params.module * z),
            GearKind::Helical(h) => Extent::Finite(h.transverse_module * z),
            GearKind::Worm(w) => Extent::Finite(w.worm_diameter),
            GearKind::Rack(_) => Extent::Unbounded,
        }
    }

    fn flank_scale(&self) -> f64 {
        match self {
            GearKind::Bevel(b) => b.pitch_angle.to_radians().cos(),
            GearKind::Internal(_) => -1.0,
            _ => 1.0,
        }
    }

    fn circles(&self, params: &GearParameters) -> GearGeometry {
        GearGeometry::from_pitch(self.pitch_diameter(params), params.module, self.flank_scale())
    }
}

// ============================================================================
// Gear
// ============================================================================

/// A validated gear with its derived geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gear {
    params: GearParameters,
    geometry: GearGeometry,
    kind: GearKind,
}

impl Gear {
    /// Validate `params` and compute the geometry of a `gear_type` gear.
    ///
    /// Spur gears with fewer than 17 teeth and internal gears with fewer
    /// than 32 get a profile shift when none was given.
    ///
    /// # Errors
    /// `InvalidParameter` for the first rule `params` violates.
    pub fn new(gear_type: GearType, params: GearParameters) -> GearResult<Self> {
        params.validate_strict()?;
        let mut params = params;

        let kind = match gear_type {
            GearType::Spur => {
                spur::apply_auto_profile_shift(&mut params);
                GearKind::Spur(SpurGeometry::new(&params))
            }
            GearType::Helical => GearKind::Helical(HelicalGeometry::new(&params)),
            GearType::Bevel => GearKind::Bevel(BevelGeometry::new(&params)),
            GearType::Worm => GearKind::Worm(WormGeometry::new(&params)),
            GearType::Rack => GearKind::Rack(RackGeometry::new(&params)),
            GearType::Internal => {
                internal::apply_auto_profile_shift(&mut params);
                GearKind::Internal(InternalGeometry::new(&params))
            }
        };
        let geometry = kind.circles(&params);

        debug!(
            gear_type = gear_type.name(),
            name = %params.name,
            module = params.module,
            teeth = params.teeth,
            pitch_diameter = %geometry.pitch_diameter,
            "gear constructed"
        );

        Ok(Gear { params, geometry, kind })
    }

    pub fn spur(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Spur, params)
    }

    pub fn helical(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Helical, params)
    }

    pub fn bevel(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Bevel, params)
    }

    pub fn worm(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Worm, params)
    }

    pub fn rack(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Rack, params)
    }

    pub fn internal(params: GearParameters) -> GearResult<Self> {
        Gear::new(GearType::Internal, params)
    }

    pub fn params(&self) -> &GearParameters {
        &self.params
    }

    pub fn geometry(&self) -> &GearGeometry {
        &self.geometry
    }

    pub fn kind(&self) -> &GearKind {
        &self.kind
    }

    pub fn gear_type(&self) -> GearType {
        self.kind.gear_type()
    }

    pub fn pitch_diameter(&self) -> Extent {
        self.geometry.pitch_diameter
    }

    pub fn outside_diameter(&self) -> Extent {
        self.geometry.outside_diameter
    }

    pub fn root_diameter(&self) -> Extent {
        self.geometry.root_diameter
    }

    /// Finite value of `extent`, or `UnboundedGeometry` naming `quantity`.
    pub fn finite(&self, extent: Extent, quantity: &str) -> GearResult<f64> {
        extent
            .mm()
            .ok_or_else(|| GearError::unbounded(self.gear_type().name(), quantity))
    }

    /// Standalone contact-ratio estimate, for variants that define one.
    pub fn contact_ratio_estimate(&self) -> Option<f64> {
        match &self.kind {
            GearKind::Spur(s) => Some(s.contact_ratio_estimate),
            GearKind::Helical(h) => Some(h.contact_ratio_estimate),
            _ => None,
        }
    }

    /// Outline points of one tooth, for variants that generate them.
    ///
    /// Spur gears sample their involute flank at `num_points` roll angles;
    /// racks return their fixed trapezoid and ignore `num_points`.
    pub fn tooth_points(&self, num_points: usize) -> Option<Vec<DVec2>> {
        match &self.kind {
            GearKind::Spur(s) => Some(s.tooth_points(num_points)),
            GearKind::Rack(r) => Some(r.tooth_profile.to_vec()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Meshing
    // ------------------------------------------------------------------------

    /// Compute center distance and contact ratio against `other`.
    ///
    /// Checks run in order: partner type, module, pressure angle, then the
    /// variant's own constraint. The first failure is returned.
    pub fn mesh_with(&self, other: &Gear) -> GearResult<MeshResult> {
        let result = self.check_common_mesh_rules(other).and_then(|()| match &self.kind {
            GearKind::Spur(s) => s.mesh(self, other),
            GearKind::Helical(h) => h.mesh(self, other),
            GearKind::Bevel(b) => b.mesh(self, other),
            GearKind::Worm(w) => w.mesh(self, other),
            GearKind::Rack(r) => r.mesh(self, other),
            GearKind::Internal(i) => i.mesh(self, other),
        });

        if let Err(err) = &result {
            warn!(
                gear = %self.params.name,
                partner = %other.params.name,
                error = %err,
                "mesh rejected"
            );
        }
        result
    }

    fn check_common_mesh_rules(&self, other: &Gear) -> GearResult<()> {
        let accepted = self.kind.accepted_partners();
        if !accepted.contains(&other.gear_type()) {
            return Err(self.mesh_error(
                other,
                MeshConstraint::WrongPartnerType {
                    expected: accepted.iter().map(|t| t.name().to_string()).collect(),
                },
            ));
        }
        if (self.params.module - other.params.module).abs() > MODULE_TOLERANCE_MM {
            return Err(self.mesh_error(
                other,
                MeshConstraint::ModuleMismatch {
                    module: self.params.module,
                    partner_module: other.params.module,
                },
            ));
        }
        if (self.params.pressure_angle - other.params.pressure_angle).abs() > PRESSURE_ANGLE_TOLERANCE_DEG {
            return Err(self.mesh_error(
                other,
                MeshConstraint::PressureAngleMismatch {
                    pressure_angle: self.params.pressure_angle,
                    partner_pressure_angle: other.params.pressure_angle,
                },
            ));
        }
        Ok(())
    }

    pub(crate) fn mesh_error(&self, other: &Gear, constraint: MeshConstraint) -> GearError {
        GearError::mesh_incompatible(self.gear_type().name(), other.gear_type().name(), constraint)
    }

    // ------------------------------------------------------------------------
    // Info
    // ------------------------------------------------------------------------

    /// Flattened attribute map for front ends.
    ///
    /// Unbounded lengths appear as the string `"unbounded"`.
    pub fn get_info(&self) -> GearInfo {
        let mut info = GearInfo::new();
        info.insert("name".into(), json!(self.params.name));
        info.insert("type".into(), json!(self.gear_type().label()));
        info.insert("module".into(), json!(self.params.module));
        info.insert("teeth".into(), json!(self.params.teeth));
        info.insert("pitch_diameter".into(), self.geometry.pitch_diameter.into());
        info.insert("outside_diameter".into(), self.geometry.outside_diameter.into());
        info.insert("root_diameter".into(), self.geometry.root_diameter.into());
        info.insert("addendum".into(), json!(self.geometry.addendum));
        info.insert("dedendum".into(), json!(self.geometry.dedendum));
        info.insert("face_width".into(), json!(self.params.face_width));

        match &self.kind {
            GearKind::Spur(s) => s.extend_info(&self.params, &mut info),
            GearKind::Helical(h) => h.extend_info(&self.params, &mut info),
            GearKind::Bevel(b) => b.extend_info(&mut info),
            GearKind::Worm(w) => w.extend_info(&mut info),
            GearKind::Rack(r) => r.extend_info(&mut info),
            GearKind::Internal(i) => i.extend_info(&mut info),
        }

        info.insert("gear_type".into(), json!(self.gear_type().name()));
        info
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}': m={}, z={}, d={}",
            self.gear_type().label(),
            self.params.name,
            self.params.module,
            self.params.teeth,
            self.geometry.pitch_diameter
        )
    }
}

/// Base-path contact ratio of `gear` driving `partner` at `center_distance`.
///
/// Uses the driving gear's module and pressure angle for the base pitch.
pub(crate) fn base_path_contact_ratio(gear: &Gear, partner: &Gear, center_distance: f64) -> GearResult<f64> {
    let alpha = gear.params.pressure_angle;
    let d1 = gear.finite(gear.geometry.pitch_diameter, "pitch diameter")?;
    let d2 = partner.finite(partner.geometry.pitch_diameter, "pitch diameter")?;
    let da1 = gear.finite(gear.geometry.outside_diameter, "outside diameter")?;
    let da2 = partner.finite(partner.geometry.outside_diameter, "outside diameter")?;

    Ok(gear_math::contact_ratio_base_path(
        gear_math::base_diameter(d1, alpha) / 2.0,
        gear_math::base_diameter(d2, alpha) / 2.0,
        da1 / 2.0,
        da2 / 2.0,
        center_distance,
        alpha,
        gear_math::base_pitch(gear.params.module, alpha),
    ))
}
