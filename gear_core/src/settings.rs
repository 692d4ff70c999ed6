//! # Kernel Settings
//!
//! Defaults the exporters and worm calculations read, stored as a JSON
//! document. Missing fields take their defaults, so a settings file only
//! needs the values it changes.
//!
//! Files are written atomically: the document goes to a `.tmp` sibling
//! first, is synced to disk, then renamed over the target.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gear_core::settings::KernelSettings;
//! use std::path::Path;
//!
//! let mut settings = KernelSettings::default();
//! settings.stl_resolution = 128;
//! settings.save(Path::new("gear_kernel.json"))?;
//!
//! let loaded = KernelSettings::load(Path::new("gear_kernel.json"))?;
//! assert_eq!(loaded.stl_resolution, 128);
//! # Ok::<(), gear_core::errors::GearError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::errors::{GearError, GearResult};
use crate::gears::worm::DEFAULT_FRICTION_COEFFICIENT;
use crate::gears::{Gear, GearKind};

/// Current settings schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Outline samples per gear when exporting STL
pub const DEFAULT_STL_RESOLUTION: usize = crate::export::stl::DEFAULT_RESOLUTION;

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_stl_resolution() -> usize {
    DEFAULT_STL_RESOLUTION
}

fn default_friction() -> f64 {
    DEFAULT_FRICTION_COEFFICIENT
}

/// Fields written into the STEP `HEADER` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepHeader {
    pub description: String,
    pub file_name: String,
    pub author: String,
    pub organization: String,
    pub schema: String,
}

impl Default for StepHeader {
    fn default() -> Self {
        StepHeader {
            description: "Gear Model".to_string(),
            file_name: "gear_model".to_string(),
            author: "Engineer".to_string(),
            organization: "Company".to_string(),
            schema: "CONFIG_CONTROL_DESIGN".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSettings {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Outline samples per gear for STL export
    #[serde(default = "default_stl_resolution")]
    pub stl_resolution: usize,

    #[serde(default)]
    pub step_header: StepHeader,

    /// Friction coefficient μ for worm efficiency
    #[serde(default = "default_friction")]
    pub worm_friction: f64,
}

impl Default for KernelSettings {
    fn default() -> Self {
        KernelSettings {
            schema_version: default_schema_version(),
            stl_resolution: DEFAULT_STL_RESOLUTION,
            step_header: StepHeader::default(),
            worm_friction: DEFAULT_FRICTION_COEFFICIENT,
        }
    }
}

impl KernelSettings {
    /// Load settings from `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(KernelSettings)` - Parsed settings, defaults filled in
    /// * `Err(GearError::VersionMismatch)` - Written by an incompatible version
    /// * `Err(GearError::SerializationError)` - Invalid JSON
    /// * `Err(GearError::FileError)` - I/O error
    pub fn load(path: &Path) -> GearResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GearError::file_error("read", path.display().to_string(), e.to_string()))?;

        let settings: KernelSettings = serde_json::from_str(&contents).map_err(|e| {
            GearError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;

        validate_version(&settings.schema_version)?;
        Ok(settings)
    }

    /// Save settings to `path` atomically.
    pub fn save(&self, path: &Path) -> GearResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())
    }

    /// Efficiency of `gear` at the configured friction, for worms only.
    pub fn worm_efficiency(&self, gear: &Gear) -> Option<f64> {
        match gear.kind() {
            GearKind::Worm(w) => Some(w.efficiency(self.worm_friction)),
            _ => None,
        }
    }
}

/// Write `bytes` to `path` via a synced temp file and a rename.
///
/// The temp file is removed when the rename fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> GearResult<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        GearError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        GearError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        GearError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        GearError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Check that a settings file version is compatible with [`SCHEMA_VERSION`].
///
/// Major versions must match; within 0.x a newer minor is rejected.
pub fn validate_version(file_version: &str) -> GearResult<()> {
    let mismatch = || GearError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version.trim()).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }
    Ok(())
}
