//! Reference geometry and meshing behaviour across gear variants.

use approx::assert_relative_eq;
use gear_core::errors::MeshConstraint;
use gear_core::gears::{MeshDetail, PlanetaryGearset, PlanetaryMember};
use gear_core::units::Extent;
use gear_core::validation::{check_undercut, validate_gear_params, validate_mesh_pair};
use gear_core::{Gear, GearError, GearParameters, GearRegistry, GearType};
use serde_json::json;

fn spur(name: &str, teeth: u32) -> Gear {
    Gear::spur(GearParameters::new(name, 2.0, teeth)).unwrap()
}

#[test]
fn spur_pitch_diameter_is_module_times_teeth() {
    for (module, teeth) in [(1.0, 17), (2.0, 20), (2.5, 33), (0.8, 120)] {
        let gear = Gear::spur(GearParameters::new("G", module, teeth)).unwrap();
        assert_eq!(gear.pitch_diameter(), Extent::Finite(module * f64::from(teeth)));
    }
}

#[test]
fn spur_reference_dimensions() {
    let gear = spur("Pinion", 20);
    assert_eq!(gear.pitch_diameter().mm(), Some(40.0));
    assert_eq!(gear.geometry().addendum, 2.0);
    assert_eq!(gear.geometry().dedendum, 2.5);
    assert_eq!(gear.outside_diameter().mm(), Some(44.0));
    assert_eq!(gear.root_diameter().mm(), Some(35.0));
}

#[test]
fn circle_ordering_by_variant() {
    let external = [
        spur("S", 20),
        Gear::helical(GearParameters::new("H", 2.0, 20).with_helix_angle(20.0)).unwrap(),
        Gear::bevel(GearParameters::new("B", 2.0, 20).with_mate_teeth(30)).unwrap(),
        Gear::worm(GearParameters::new("W", 2.0, 1)).unwrap(),
    ];
    for gear in &external {
        assert!(gear.outside_diameter() > gear.pitch_diameter(), "{}", gear);
        assert!(gear.pitch_diameter() > gear.root_diameter(), "{}", gear);
    }

    let ring = Gear::internal(GearParameters::new("R", 2.0, 60)).unwrap();
    assert!(ring.outside_diameter() < ring.pitch_diameter());
    assert!(ring.pitch_diameter() < ring.root_diameter());
}

#[test]
fn spur_pair_reference_mesh() {
    let pinion = spur("Pinion", 20);
    let wheel = spur("Wheel", 40);
    let mesh = pinion.mesh_with(&wheel).unwrap();
    assert_eq!(mesh.center_distance, 60.0);
    assert!(mesh.contact_ratio.is_finite() && mesh.contact_ratio > 0.0);
    assert_relative_eq!(mesh.contact_ratio, 1.64, epsilon = 0.02);
    assert!(matches!(mesh.detail, MeshDetail::Spur { .. }));
}

#[test]
fn spur_pairs_have_positive_contact_ratio() {
    for (z1, z2) in [(17, 17), (20, 60), (25, 31), (40, 100)] {
        let mesh = spur("A", z1).mesh_with(&spur("B", z2)).unwrap();
        assert!(mesh.contact_ratio.is_finite());
        assert!(mesh.contact_ratio > 0.0, "{}/{}", z1, z2);
    }
}

#[test]
fn worm_reduction_ratio_is_exact() {
    let worm = Gear::worm(GearParameters::new("Worm", 2.0, 1).with_leads(1)).unwrap();
    let wheel = spur("Wheel", 20);
    let mesh = worm.mesh_with(&wheel).unwrap();
    assert_eq!(mesh.contact_ratio, 20.0);
}

#[test]
fn bevel_cone_distance_reference() {
    let bevel = Gear::bevel(
        GearParameters::new("Bevel", 2.0, 24)
            .with_pitch_angle(45.0)
            .with_face_width(12.0),
    )
    .unwrap();
    let info = bevel.get_info();
    assert_relative_eq!(info["cone_distance"].as_f64().unwrap(), 33.94, epsilon = 0.1);
}

#[test]
fn internal_mesh_requires_fewer_partner_teeth() {
    let ring = Gear::internal(GearParameters::new("Ring", 2.0, 40)).unwrap();
    for teeth in [40, 41, 80] {
        let err = ring.mesh_with(&spur("P", teeth)).unwrap_err();
        assert!(matches!(
            err,
            GearError::MeshIncompatible { constraint: MeshConstraint::ToothCountOrder { .. }, .. }
        ));
    }
    let mesh = ring.mesh_with(&spur("P", 39)).unwrap();
    assert_eq!(mesh.center_distance, 1.0);
}

#[test]
fn internal_contact_ratio_never_negative() {
    // The base-path formula is an approximation for internal pairs; the
    // reported value is clamped at zero.
    for (zi, zp) in [(30, 12), (48, 18), (60, 20), (100, 25)] {
        let ring = Gear::internal(GearParameters::new("R", 2.0, zi)).unwrap();
        let mesh = ring.mesh_with(&spur("P", zp)).unwrap();
        assert!(mesh.contact_ratio >= 0.0);
    }
}

#[test]
fn rack_has_no_finite_pitch_circle() {
    let rack = Gear::rack(GearParameters::new("Rack", 2.0, 30)).unwrap();
    assert!(rack.pitch_diameter().is_unbounded());
    assert_eq!(rack.get_info()["pitch_diameter"], json!("unbounded"));

    let mesh = rack.mesh_with(&spur("P", 20)).unwrap();
    assert_eq!(mesh.center_distance, 20.0);
}

#[test]
fn pressure_angle_mismatch_reported_after_module() {
    let a = spur("A", 20);
    let b = Gear::spur(GearParameters::new("B", 2.0, 40).with_pressure_angle(14.5)).unwrap();
    let err = a.mesh_with(&b).unwrap_err();
    assert_eq!(err.error_code(), "MESH_INCOMPATIBLE");
    assert!(err.to_string().contains("spur gear cannot mesh with spur gear"));

    // The advisory pair check reports the same issue without failing
    assert_eq!(validate_mesh_pair(&a, &b).len(), 1);
}

#[test]
fn registry_builds_every_builtin_type() {
    let registry = GearRegistry::with_builtin_types();
    for gear_type in GearType::ALL {
        let config = json!({
            "type": gear_type.name(),
            "params": {"name": gear_type.label(), "module": 2.0, "teeth": 40},
        });
        let gear = registry.from_config(&config).unwrap();
        assert_eq!(gear.gear_type(), gear_type);
        assert_eq!(gear.get_info()["type"], json!(gear_type.label()));
    }
}

#[test]
fn invalid_parameters_never_construct() {
    let params = GearParameters::new("bad", 2.0, 20).with_pressure_angle(30.0);
    assert!(params.validate().is_err());
    assert!(Gear::spur(params.clone()).is_err());
    assert!(!validate_gear_params(&params).is_empty());
}

#[test]
fn undercut_follows_pressure_angle() {
    let low = Gear::helical(GearParameters::new("L", 2.0, 20).with_pressure_angle(14.5)).unwrap();
    let high = Gear::helical(GearParameters::new("H", 2.0, 20).with_pressure_angle(25.0)).unwrap();
    assert!(check_undercut(&low));
    assert!(!check_undercut(&high));
}

#[test]
fn planetary_train_from_registry_gears() {
    let registry = GearRegistry::with_builtin_types();
    let sun = registry.from_config(&json!({"name": "Sun", "module": 1.5, "teeth": 24})).unwrap();
    let ring = registry
        .from_config(&json!({"type": "internal", "name": "Ring", "module": 1.5, "teeth": 72}))
        .unwrap();
    let planets: Vec<Gear> = (0..4)
        .map(|i| Gear::spur(GearParameters::new(format!("Planet {}", i), 1.5, 24)).unwrap())
        .collect();

    let set = PlanetaryGearset::new(&sun, &ring, &planets, 4).unwrap();
    assert!(set.is_concentric());
    assert_eq!(set.ratio(PlanetaryMember::Ring, PlanetaryMember::Sun, PlanetaryMember::Carrier).unwrap(), 4.0);
    assert_eq!(set.center_distance().unwrap(), 36.0);
    assert_eq!(set.ring_inside_diameter(), ring.root_diameter());

    let err = PlanetaryGearset::new(&sun, &ring, &planets, 5).unwrap_err();
    assert_eq!(err.error_code(), "ASSEMBLY_CONDITION");
}
