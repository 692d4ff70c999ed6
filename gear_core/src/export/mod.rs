//! # Export Pipeline
//!
//! Serializes gears into CAD exchange formats:
//!
//! - [`stl`] - binary STL, a triangulated extrusion of the gear outline
//! - [`step`] - ISO 10303-21 text, a pitch-circle extrusion
//!
//! Both write through [`write_atomic`](crate::settings::write_atomic), so a
//! failed export never leaves a half-written target. I/O failures surface
//! as `FileError`; geometry that cannot be exported (an unbounded rack
//! pitch circle in STEP) surfaces as `UnboundedGeometry` before any file is
//! touched.

pub mod step;
pub mod stl;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{GearError, GearResult};
use crate::gears::{Gear, GearType};
use crate::settings::KernelSettings;
use crate::validation;

pub use step::{export_gear as export_step, export_mesh_pair as export_step_pair, StepValue};
pub use stl::{export_gear as export_stl, export_mesh_pair as export_stl_pair, Face};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Step,
    Stl,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Step => "step",
            ExportFormat::Stl => "stl",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" | "stp" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            _ => Err(GearError::invalid_input("format", s, "Expected 'step' or 'stl'")),
        }
    }
}

/// Export `gear` to `path` in `format`, using `settings` for resolution and
/// header fields.
pub fn export(gear: &Gear, path: &Path, format: ExportFormat, settings: &KernelSettings) -> GearResult<()> {
    match format {
        ExportFormat::Stl => stl::export_gear(gear, path, settings.stl_resolution).map(|_| ()),
        ExportFormat::Step => step::export_gear_with_header(gear, path, &settings.step_header),
    }
}

/// Log a warning for exported tooth geometry that would be undercut.
///
/// Racks and worms are skipped: their `teeth` does not describe a wheel.
pub(crate) fn warn_if_undercut(gear: &Gear) {
    if matches!(gear.gear_type(), GearType::Rack | GearType::Worm) {
        return;
    }
    if validation::check_undercut(gear) {
        warn!(
            gear = %gear.params().name,
            teeth = gear.params().teeth,
            min_teeth = validation::min_teeth_for_undercut(gear.params().pressure_angle),
            "exporting undercut geometry"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("STL".parse::<ExportFormat>().unwrap(), ExportFormat::Stl);
        assert_eq!("stp".parse::<ExportFormat>().unwrap(), ExportFormat::Step);
        assert!("obj".parse::<ExportFormat>().is_err());
        assert_eq!(serde_json::to_string(&ExportFormat::Step).unwrap(), "\"step\"");
    }
}
