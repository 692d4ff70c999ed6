//! # STL Export
//!
//! The gear outline is extruded from z = 0 to z = face width and
//! triangulated as four faces per outline point:
//!
//! - bottom: fan from the axis at z = 0
//! - top: fan from the axis at z = face width, wound the other way
//! - two side faces joining the segment's low and high edges
//!
//! The outline is the variant's own tooth points where it has them (spur
//! involute flank, rack trapezoid), otherwise the pitch circle.
//!
//! ## Binary layout
//!
//! ```text
//! [80 bytes]  header, tag padded with spaces
//! [u32 LE]    face count
//! per face:
//!   [3 × f32 LE] normal
//!   [9 × f32 LE] vertices
//!   [u16 LE]     attribute byte count (0)
//! ```

use std::f64::consts::TAU;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use glam::{DVec2, DVec3};
use serde::Serialize;
use tracing::info;

use crate::errors::{GearError, GearResult};
use crate::gears::Gear;
use crate::settings::write_atomic;

/// Text at the start of every header written here
pub const HEADER_TAG: &[u8] = b"Binary STL - Gear Model";

pub const HEADER_SIZE: usize = 80;

/// Bytes per face record
pub const FACE_RECORD_SIZE: usize = 50;

/// Outline samples when none is configured
pub const DEFAULT_RESOLUTION: usize = 64;

/// One triangle with its unit normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Face {
    pub normal: DVec3,
    pub vertices: [DVec3; 3],
}

impl Face {
    /// Build a face, deriving the normal from the winding of `a`, `b`, `c`.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let n = (b - a).cross(c - a);
        let len = n.length();
        let normal = if len > f64::EPSILON { n / len } else { DVec3::ZERO };
        Face {
            normal,
            vertices: [a, b, c],
        }
    }

    fn translated(self, offset: DVec3) -> Self {
        Face {
            normal: self.normal,
            vertices: self.vertices.map(|v| v + offset),
        }
    }
}

/// Closed 2D outline of `gear` with `resolution` samples where sampled.
///
/// # Errors
/// `UnboundedGeometry` when the gear has no tooth points and no finite
/// pitch circle.
pub fn outline(gear: &Gear, resolution: usize) -> GearResult<Vec<DVec2>> {
    if let Some(points) = gear.tooth_points(resolution) {
        return Ok(points);
    }
    let radius = gear.finite(gear.pitch_diameter(), "pitch diameter")? / 2.0;
    let n = resolution as f64;
    Ok((0..resolution)
        .map(|i| DVec2::from_angle(TAU * i as f64 / n) * radius)
        .collect())
}

/// Triangulate the extruded outline of `gear`.
pub fn gear_to_faces(gear: &Gear, resolution: usize) -> GearResult<Vec<Face>> {
    check_resolution(resolution)?;
    let points = outline(gear, resolution)?;
    let height = gear.params().face_width;
    let n = points.len();

    let bottom_center = DVec3::ZERO;
    let top_center = DVec3::new(0.0, 0.0, height);
    let mut faces = Vec::with_capacity(4 * n);

    for i in 0..n {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p1_low = p1.extend(0.0);
        let p2_low = p2.extend(0.0);
        let p1_high = p1.extend(height);
        let p2_high = p2.extend(height);

        faces.push(Face::new(p1_low, p2_low, bottom_center));
        faces.push(Face::new(p2_high, p1_high, top_center));
        faces.push(Face::new(p1_low, p1_high, p2_low));
        faces.push(Face::new(p2_low, p1_high, p2_high));
    }
    Ok(faces)
}

fn check_resolution(resolution: usize) -> GearResult<()> {
    if resolution < 3 {
        return Err(GearError::invalid_input(
            "resolution",
            resolution.to_string(),
            "At least 3 outline samples are required",
        ));
    }
    Ok(())
}

/// Write `faces` as binary STL to `writer`.
pub fn write_binary_stl<W: Write>(faces: &[Face], mut writer: W) -> io::Result<()> {
    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TAG.len()].copy_from_slice(HEADER_TAG);
    writer.write_all(&header)?;

    let face_count = u32::try_from(faces.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many faces for STL"))?;
    writer.write_all(&face_count.to_le_bytes())?;

    for face in faces {
        write_vector(&mut writer, face.normal)?;
        for v in face.vertices {
            write_vector(&mut writer, v)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

fn write_vector<W: Write>(writer: &mut W, v: DVec3) -> io::Result<()> {
    writer.write_all(&(v.x as f32).to_le_bytes())?;
    writer.write_all(&(v.y as f32).to_le_bytes())?;
    writer.write_all(&(v.z as f32).to_le_bytes())
}

fn write_faces(faces: &[Face], path: &Path) -> GearResult<usize> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + 4 + faces.len() * FACE_RECORD_SIZE);
    write_binary_stl(faces, &mut bytes)
        .map_err(|e| GearError::file_error("encode stl", path.display().to_string(), e.to_string()))?;
    write_atomic(path, &bytes)?;
    Ok(faces.len())
}

/// Export `gear` to a binary STL file at `path`.
///
/// # Returns
/// Number of faces written.
pub fn export_gear(gear: &Gear, path: &Path, resolution: usize) -> GearResult<usize> {
    let faces = gear_to_faces(gear, resolution)?;
    super::warn_if_undercut(gear);
    let count = write_faces(&faces, path)?;
    info!(gear = %gear.params().name, faces = count, path = %path.display(), "stl exported");
    Ok(count)
}

/// Export a meshing pair, the second gear placed at the center distance
/// along +x.
///
/// # Errors
/// `MeshIncompatible` when the gears cannot mesh.
pub fn export_mesh_pair(gear: &Gear, partner: &Gear, path: &Path, resolution: usize) -> GearResult<usize> {
    let mesh = gear.mesh_with(partner)?;
    let offset = DVec3::new(mesh.center_distance, 0.0, 0.0);

    let mut faces = gear_to_faces(gear, resolution)?;
    faces.extend(gear_to_faces(partner, resolution)?.into_iter().map(|f| f.translated(offset)));
    super::warn_if_undercut(gear);
    super::warn_if_undercut(partner);

    let count = write_faces(&faces, path)?;
    info!(
        gear = %gear.params().name,
        partner = %partner.params().name,
        faces = count,
        path = %path.display(),
        "stl pair exported"
    );
    Ok(count)
}

/// Face count recorded in the header of the binary STL at `path`.
pub fn read_face_count(path: &Path) -> GearResult<u32> {
    let bytes = fs::read(path).map_err(|e| GearError::file_error("read", path.display().to_string(), e.to_string()))?;
    let count_bytes: [u8; 4] = bytes
        .get(HEADER_SIZE..HEADER_SIZE + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            GearError::file_error("read", path.display().to_string(), "file shorter than an STL header")
        })?;
    Ok(u32::from_le_bytes(count_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GearParameters;

    fn spur() -> Gear {
        Gear::spur(GearParameters::new("P", 2.0, 20)).unwrap()
    }

    #[test]
    fn test_four_faces_per_outline_point() {
        let faces = gear_to_faces(&spur(), 32).unwrap();
        assert_eq!(faces.len(), 128);

        let helical = Gear::helical(GearParameters::new("H", 2.0, 20).with_helix_angle(10.0)).unwrap();
        assert_eq!(gear_to_faces(&helical, 48).unwrap().len(), 192);

        let rack = Gear::rack(GearParameters::new("R", 2.0, 20)).unwrap();
        assert_eq!(gear_to_faces(&rack, 64).unwrap().len(), 16);
    }

    #[test]
    fn test_face_normals() {
        let up = Face::new(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert_eq!(up.normal, DVec3::Z);
        let degenerate = Face::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0);
        assert_eq!(degenerate.normal, DVec3::ZERO);
    }

    #[test]
    fn test_pitch_circle_outline() {
        let worm = Gear::worm(GearParameters::new("W", 2.0, 1)).unwrap();
        let points = outline(&worm, 16).unwrap();
        assert_eq!(points.len(), 16);
        for p in points {
            assert!((p.length() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_binary_layout() {
        let faces = gear_to_faces(&spur(), 8).unwrap();
        let mut buf = Vec::new();
        write_binary_stl(&faces, &mut buf).unwrap();

        assert_eq!(&buf[..HEADER_TAG.len()], HEADER_TAG);
        assert!(buf[HEADER_TAG.len()..HEADER_SIZE].iter().all(|&b| b == b' '));
        assert_eq!(u32::from_le_bytes([buf[80], buf[81], buf[82], buf[83]]), 32);
        assert_eq!(buf.len(), HEADER_SIZE + 4 + 32 * FACE_RECORD_SIZE);
    }

    #[test]
    fn test_low_resolution_rejected() {
        let err = gear_to_faces(&spur(), 2).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
