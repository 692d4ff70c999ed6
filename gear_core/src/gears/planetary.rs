//! # Planetary Gearset
//!
//! Sun, planets and ring composed into an epicyclic train. The set borrows
//! its member gears; it never owns or mutates them.
//!
//! ## Ratios
//!
//! | Fixed | Input | Output | Ratio |
//! |-------|-------|--------|-------|
//! | ring | sun | carrier | 1 + z_r / z_s |
//! | sun | ring | carrier | 1 + z_s / z_r |
//! | carrier | sun | ring | −z_r / z_s |
//! | carrier | ring | sun | −z_s / z_r |
//!
//! ## Assembly
//!
//! Construction requires at least one planet, equal modules across every
//! member and (z_s + z_r) divisible by the planet count, so that the
//! planets can be spaced evenly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Gear, GearInfo, MODULE_TOLERANCE_MM};
use crate::errors::{GearError, GearResult};
use crate::units::Extent;

/// A member of the train that can be held, driven or taken off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetaryMember {
    Sun,
    Ring,
    Carrier,
}

impl PlanetaryMember {
    pub fn name(self) -> &'static str {
        match self {
            PlanetaryMember::Sun => "sun",
            PlanetaryMember::Ring => "ring",
            PlanetaryMember::Carrier => "carrier",
        }
    }
}

impl fmt::Display for PlanetaryMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetaryMember {
    type Err = GearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" => Ok(PlanetaryMember::Sun),
            "ring" => Ok(PlanetaryMember::Ring),
            "carrier" => Ok(PlanetaryMember::Carrier),
            _ => Err(GearError::invalid_input("member", s, "Expected sun, ring or carrier")),
        }
    }
}

/// Every standard speed ratio of the train.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryRatios {
    /// Ring held, sun in, carrier out
    pub fixed_ring: f64,
    /// Sun held, ring in, carrier out
    pub fixed_sun: f64,
    /// Carrier held, sun in, ring out
    pub fixed_carrier: f64,
    /// Planet speed over sun speed with the carrier held
    pub planet_sun: f64,
    /// Ring speed over planet speed with the carrier held
    pub ring_planet: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PlanetaryGearset<'a> {
    sun: &'a Gear,
    ring: &'a Gear,
    planets: &'a [Gear],
    num_planets: u32,
}

impl<'a> PlanetaryGearset<'a> {
    /// Assemble a gearset, checking the assembly conditions.
    ///
    /// # Errors
    /// `AssemblyCondition` when there are no planets, the planet count is
    /// zero, the modules differ or the planets cannot be spaced evenly.
    pub fn new(sun: &'a Gear, ring: &'a Gear, planets: &'a [Gear], num_planets: u32) -> GearResult<Self> {
        if planets.is_empty() {
            return Err(GearError::assembly_condition("At least one planet gear is required"));
        }
        if num_planets < 1 {
            return Err(GearError::assembly_condition("Planet count must be at least 1"));
        }

        let module = sun.params().module;
        let members = std::iter::once(ring).chain(planets.iter());
        for gear in members {
            if (gear.params().module - module).abs() > MODULE_TOLERANCE_MM {
                return Err(GearError::assembly_condition(format!(
                    "Module of '{}' ({}) differs from sun module ({})",
                    gear.params().name,
                    gear.params().module,
                    module
                )));
            }
        }

        let tooth_sum = u64::from(sun.params().teeth) + u64::from(ring.params().teeth);
        if tooth_sum % u64::from(num_planets) != 0 {
            return Err(GearError::assembly_condition(format!(
                "Sun + ring teeth ({}) not divisible by {} planets",
                tooth_sum, num_planets
            )));
        }

        Ok(PlanetaryGearset {
            sun,
            ring,
            planets,
            num_planets,
        })
    }

    pub fn sun(&self) -> &'a Gear {
        self.sun
    }

    pub fn ring(&self) -> &'a Gear {
        self.ring
    }

    pub fn planets(&self) -> &'a [Gear] {
        self.planets
    }

    pub fn num_planets(&self) -> u32 {
        self.num_planets
    }

    fn teeth(&self) -> (f64, f64, f64) {
        (
            f64::from(self.sun.params().teeth),
            f64::from(self.planets[0].params().teeth),
            f64::from(self.ring.params().teeth),
        )
    }

    /// All standard ratios, from tooth counts alone.
    pub fn ratios(&self) -> PlanetaryRatios {
        let (zs, zp, zr) = self.teeth();
        PlanetaryRatios {
            fixed_ring: 1.0 + zr / zs,
            fixed_sun: 1.0 + zs / zr,
            fixed_carrier: -zr / zs,
            planet_sun: -zs / zp,
            ring_planet: -zp / zr,
        }
    }

    /// Speed ratio for one holding arrangement.
    ///
    /// # Errors
    /// `InvalidInput` for a combination with no defined ratio.
    pub fn ratio(&self, fixed: PlanetaryMember, input: PlanetaryMember, output: PlanetaryMember) -> GearResult<f64> {
        use PlanetaryMember::*;

        let r = self.ratios();
        match (fixed, input, output) {
            (Ring, Sun, Carrier) => Ok(r.fixed_ring),
            (Sun, Ring, Carrier) => Ok(r.fixed_sun),
            (Carrier, Sun, Ring) => Ok(r.fixed_carrier),
            (Carrier, Ring, Sun) => Ok(1.0 / r.fixed_carrier),
            _ => Err(GearError::invalid_input(
                "configuration",
                format!("fixed={}, input={}, output={}", fixed, input, output),
                "Unsupported planetary configuration",
            )),
        }
    }

    /// Sun-to-planet center distance, (d_s + d_p) / 2.
    pub fn center_distance(&self) -> GearResult<f64> {
        let planet = &self.planets[0];
        let ds = self.sun.finite(self.sun.pitch_diameter(), "pitch diameter")?;
        let dp = planet.finite(planet.pitch_diameter(), "pitch diameter")?;
        Ok((ds + dp) / 2.0)
    }

    /// Clear inside diameter of the ring (its root circle).
    pub fn ring_inside_diameter(&self) -> Extent {
        self.ring.root_diameter()
    }

    /// True when z_r = z_s + 2 z_p.
    pub fn is_concentric(&self) -> bool {
        let zs = u64::from(self.sun.params().teeth);
        let zp = u64::from(self.planets[0].params().teeth);
        u64::from(self.ring.params().teeth) == zs + 2 * zp
    }

    pub fn get_info(&self) -> GearResult<GearInfo> {
        let ratios = self.ratios();
        let mut info = GearInfo::new();
        info.insert("type".into(), json!("PlanetaryGearset"));
        info.insert("sun_teeth".into(), json!(self.sun.params().teeth));
        info.insert("planet_teeth".into(), json!(self.planets[0].params().teeth));
        info.insert("ring_teeth".into(), json!(self.ring.params().teeth));
        info.insert("num_planets".into(), json!(self.num_planets));
        info.insert("module".into(), json!(self.sun.params().module));
        info.insert("ratio_fixed_ring".into(), json!(ratios.fixed_ring));
        info.insert("ratio_fixed_sun".into(), json!(ratios.fixed_sun));
        info.insert("ratio_fixed_carrier".into(), json!(ratios.fixed_carrier));
        info.insert("center_distance".into(), json!(self.center_distance()?));
        info.insert("ring_inside_diameter".into(), self.ring_inside_diameter().into());
        info.insert("is_concentric".into(), json!(self.is_concentric()));
        // Construction already enforced it
        info.insert("assembly_condition_met".into(), json!(true));
        Ok(info)
    }
}
