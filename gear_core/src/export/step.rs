//! # STEP Export
//!
//! Writes an ISO 10303-21 exchange file describing each gear as its pitch
//! circle extruded along +z by the face width.
//!
//! ## Entity graph (per gear)
//!
//! ```text
//! #1 CARTESIAN_POINT        origin of the gear axis
//! #2 DIRECTION              axis (+z)
//! #3 DIRECTION              reference direction (+x)
//! #4 DIRECTION              +y
//! #5 AXIS2_PLACEMENT_3D     (#1, #2, #3)
//! #6 CIRCLE                 (#5, pitch radius)
//! #7 EXTRUDED_AREA_SOLID    (#6, #2, face width)
//! ```
//!
//! Ids are sequential across the file, so a pair export numbers the second
//! gear's entities #8-#14.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use glam::DVec3;
use tracing::info;

use crate::errors::GearResult;
use crate::gears::Gear;
use crate::settings::{write_atomic, StepHeader};

/// A single entity parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    /// Quoted string
    Str(String),
    /// Reference to entity `#n`
    Ref(usize),
    /// Real number in shortest round-trip form
    Real(f64),
    /// Parenthesized, comma-joined list
    List(Vec<StepValue>),
}

impl StepValue {
    fn point(v: DVec3) -> StepValue {
        StepValue::List(vec![StepValue::Real(v.x), StepValue::Real(v.y), StepValue::Real(v.z)])
    }

    fn empty_label() -> StepValue {
        StepValue::Str(String::new())
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepValue::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
            StepValue::Ref(id) => write!(f, "#{}", id),
            StepValue::Real(v) => write!(f, "{:?}", v),
            StepValue::List(items) => {
                f.write_str("(")?;
                write_joined(f, items)?;
                f.write_str(")")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[StepValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// One `#n = TYPE(params);` line.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEntity {
    pub id: usize,
    pub entity_type: &'static str,
    pub params: Vec<StepValue>,
}

impl fmt::Display for StepEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} = {}(", self.id, self.entity_type)?;
        write_joined(f, &self.params)?;
        f.write_str(");")
    }
}

/// Accumulates entities with sequential ids.
#[derive(Debug, Default)]
pub struct StepDocument {
    entities: Vec<StepEntity>,
}

impl StepDocument {
    pub fn new() -> Self {
        StepDocument::default()
    }

    /// Append an entity and return its id.
    pub fn add(&mut self, entity_type: &'static str, params: Vec<StepValue>) -> usize {
        let id = self.entities.len() + 1;
        self.entities.push(StepEntity { id, entity_type, params });
        id
    }

    pub fn entities(&self) -> &[StepEntity] {
        &self.entities
    }

    /// Add a circle of `radius` at `origin` extruded along +z by `depth`.
    ///
    /// Returns the id of the solid.
    pub fn add_extruded_circle(&mut self, origin: DVec3, radius: f64, depth: f64) -> usize {
        let label = StepValue::empty_label;
        let point = self.add("CARTESIAN_POINT", vec![label(), StepValue::point(origin)]);
        let axis = self.add("DIRECTION", vec![label(), StepValue::point(DVec3::Z)]);
        let ref_dir = self.add("DIRECTION", vec![label(), StepValue::point(DVec3::X)]);
        self.add("DIRECTION", vec![label(), StepValue::point(DVec3::Y)]);
        let placement = self.add(
            "AXIS2_PLACEMENT_3D",
            vec![label(), StepValue::Ref(point), StepValue::Ref(axis), StepValue::Ref(ref_dir)],
        );
        let circle = self.add(
            "CIRCLE",
            vec![label(), StepValue::Ref(placement), StepValue::Real(radius)],
        );
        self.add(
            "EXTRUDED_AREA_SOLID",
            vec![label(), StepValue::Ref(circle), StepValue::Ref(axis), StepValue::Real(depth)],
        )
    }

    /// Full exchange-file text with a header stamped at `timestamp`.
    pub fn render(&self, header: &StepHeader, timestamp: DateTime<Utc>) -> String {
        let mut out = header_section(header, timestamp);
        out.push_str("DATA;\n");
        for entity in &self.entities {
            out.push_str(&entity.to_string());
            out.push('\n');
        }
        out.push_str("ENDSEC;\n");
        out.push_str("END-ISO-10303-21;\n");
        out
    }
}

/// `ISO-10303-21;` through the `HEADER` section's `ENDSEC;`.
pub fn header_section(header: &StepHeader, timestamp: DateTime<Utc>) -> String {
    let text = |s: &str| StepValue::Str(s.to_string());
    let list = |s: &str| StepValue::List(vec![text(s)]);
    let date = timestamp.format("%Y-%m-%dT%H:%M:%S").to_string();

    format!(
        "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION({},{});\nFILE_NAME({},{},{},{},'','','');\nFILE_SCHEMA({});\nENDSEC;\n",
        list(header.description.as_str()),
        text("2;1"),
        text(header.file_name.as_str()),
        text(date.as_str()),
        list(header.author.as_str()),
        list(header.organization.as_str()),
        list(header.schema.as_str()),
    )
}

fn add_gear(doc: &mut StepDocument, gear: &Gear, origin: DVec3) -> GearResult<usize> {
    let radius = gear.finite(gear.pitch_diameter(), "pitch diameter")? / 2.0;
    Ok(doc.add_extruded_circle(origin, radius, gear.params().face_width))
}

/// STEP text for `gear`.
///
/// # Errors
/// `UnboundedGeometry` for a gear without a finite pitch circle.
pub fn gear_to_step(gear: &Gear, header: &StepHeader, timestamp: DateTime<Utc>) -> GearResult<String> {
    let mut doc = StepDocument::new();
    add_gear(&mut doc, gear, DVec3::ZERO)?;
    Ok(doc.render(header, timestamp))
}

/// STEP text for a meshing pair, the partner placed at the center distance
/// along +x.
pub fn mesh_pair_to_step(
    gear: &Gear,
    partner: &Gear,
    header: &StepHeader,
    timestamp: DateTime<Utc>,
) -> GearResult<String> {
    let mesh = gear.mesh_with(partner)?;
    let mut doc = StepDocument::new();
    add_gear(&mut doc, gear, DVec3::ZERO)?;
    add_gear(&mut doc, partner, DVec3::new(mesh.center_distance, 0.0, 0.0))?;
    Ok(doc.render(header, timestamp))
}

/// Export `gear` to `path` with the default header fields.
pub fn export_gear(gear: &Gear, path: &Path) -> GearResult<()> {
    export_gear_with_header(gear, path, &StepHeader::default())
}

pub fn export_gear_with_header(gear: &Gear, path: &Path, header: &StepHeader) -> GearResult<()> {
    let text = gear_to_step(gear, header, Utc::now())?;
    super::warn_if_undercut(gear);
    write_atomic(path, text.as_bytes())?;
    info!(gear = %gear.params().name, path = %path.display(), "step exported");
    Ok(())
}

/// Export a meshing pair to `path` with the default header fields.
pub fn export_mesh_pair(gear: &Gear, partner: &Gear, path: &Path) -> GearResult<()> {
    let text = mesh_pair_to_step(gear, partner, &StepHeader::default(), Utc::now())?;
    super::warn_if_undercut(gear);
    super::warn_if_undercut(partner);
    write_atomic(path, text.as_bytes())?;
    info!(
        gear = %gear.params().name,
        partner = %partner.params().name,
        path = %path.display(),
        "step pair exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GearParameters;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    fn spur(name: &str, teeth: u32) -> Gear {
        Gear::spur(GearParameters::new(name, 2.0, teeth).with_face_width(12.0)).unwrap()
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(StepValue::Real(24.0).to_string(), "24.0");
        assert_eq!(StepValue::Real(0.1).to_string(), "0.1");
        assert_eq!(StepValue::Ref(5).to_string(), "#5");
        assert_eq!(StepValue::Str("it's".into()).to_string(), "'it''s'");
        let list = StepValue::List(vec![StepValue::Real(1.0), StepValue::Ref(2)]);
        assert_eq!(list.to_string(), "(1.0,#2)");
    }

    #[test]
    fn test_header() {
        let header = header_section(&StepHeader::default(), stamp());
        assert!(header.starts_with("ISO-10303-21;\nHEADER;\n"));
        assert!(header.contains("FILE_DESCRIPTION(('Gear Model'),'2;1');"));
        assert!(header.contains("FILE_NAME('gear_model','2024-03-01T12:30:00',('Engineer'),('Company'),'','','');"));
        assert!(header.contains("\nFILE_SCHEMA(('CONFIG_CONTROL_DESIGN'));\nENDSEC;"));
        assert!(!header.contains("((("));
        assert!(header.ends_with("ENDSEC;\n"));
    }

    #[test]
    fn test_single_gear_entities() {
        let text = gear_to_step(&spur("P", 24), &StepHeader::default(), stamp()).unwrap();
        assert!(text.contains("DATA;\n#1 = CARTESIAN_POINT('',(0.0,0.0,0.0));\n"));
        assert!(text.contains("#2 = DIRECTION('',(0.0,0.0,1.0));"));
        assert!(text.contains("#5 = AXIS2_PLACEMENT_3D('',#1,#2,#3);"));
        assert!(text.contains("#6 = CIRCLE('',#5,24.0);"));
        assert!(text.contains("#7 = EXTRUDED_AREA_SOLID('',#6,#2,12.0);"));
        assert!(!text.contains("#8 ="));
        assert!(text.ends_with("ENDSEC;\nEND-ISO-10303-21;\n"));
    }

    #[test]
    fn test_pair_places_partner_at_center_distance() {
        let text = mesh_pair_to_step(&spur("P", 20), &spur("W", 40), &StepHeader::default(), stamp()).unwrap();
        assert!(text.contains("#8 = CARTESIAN_POINT('',(60.0,0.0,0.0));"));
        assert!(text.contains("#13 = CIRCLE('',#12,40.0);"));
        assert!(text.contains("#14 = EXTRUDED_AREA_SOLID('',#13,#9,12.0);"));
    }

    #[test]
    fn test_rack_is_unbounded() {
        let rack = Gear::rack(GearParameters::new("R", 2.0, 20)).unwrap();
        let err = gear_to_step(&rack, &StepHeader::default(), stamp()).unwrap_err();
        assert_eq!(err.error_code(), "UNBOUNDED_GEOMETRY");
    }

    #[test]
    fn test_custom_header_fields() {
        let header = StepHeader {
            author: "J. Drafter".into(),
            organization: "Gearworks".into(),
            ..StepHeader::default()
        };
        let text = gear_to_step(&spur("P", 20), &header, stamp()).unwrap();
        assert!(text.contains("('J. Drafter'),('Gearworks')"));
    }
}
