//! # Formula Registry
//!
//! Every closed-form relation the kernel evaluates, with the metadata needed
//! to audit it: plain-text formula, standard reference, variable table and
//! the function that implements it.
//!
//! ## Usage
//!
//! ```rust
//! use gear_core::standards::registry::{Formula, FormulaCategory};
//!
//! let meta = Formula::BaseDiameter.metadata();
//! assert_eq!(meta.category, FormulaCategory::CircleDiameters);
//! println!("{} ({})", meta.formula_plain, meta.reference.citation());
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Standard References
// ============================================================================

/// Source a formula is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardReference {
    /// ISO 21771:2007 - Cylindrical involute gears and gear pairs
    Iso21771 { section: &'static str },
    /// ISO 53:1998 - Standard basic rack tooth profile
    Iso53 { clause: &'static str },
    /// ISO 23509:2016 - Bevel and hypoid gear geometry
    Iso23509 { section: &'static str },
    /// ISO 1122-1 - Vocabulary of gear terms (worm gearing)
    Iso1122 { entry: &'static str },
    /// Lewis bending formula (1892)
    Lewis,
    /// Rigid-body kinematics (no specific standard)
    Kinematics,
}

impl StandardReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            StandardReference::Iso21771 { section } => format!("ISO 21771:2007 Section {}", section),
            StandardReference::Iso53 { clause } => format!("ISO 53:1998 Clause {}", clause),
            StandardReference::Iso23509 { section } => format!("ISO 23509:2016 Section {}", section),
            StandardReference::Iso1122 { entry } => format!("ISO 1122-1 Entry {}", entry),
            StandardReference::Lewis => "Lewis (1892)".to_string(),
            StandardReference::Kinematics => "Gear Train Kinematics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            StandardReference::Iso21771 { .. } => "ISO 21771",
            StandardReference::Iso53 { .. } => "ISO 53",
            StandardReference::Iso23509 { .. } => "ISO 23509",
            StandardReference::Iso1122 { .. } => "ISO 1122",
            StandardReference::Lewis => "Lewis",
            StandardReference::Kinematics => "Kinematics",
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Pitch, base, tip and root circles
    CircleDiameters,
    /// Circular, normal, base and axial pitch
    Pitches,
    /// Basic rack proportions
    ToothProportions,
    /// Transverse/normal conversions for helical gears
    HelicalRelations,
    /// Contact and overlap ratios
    ContactRatios,
    /// Cone geometry of bevel gears
    BevelGeometry,
    /// Worm thread geometry and efficiency
    WormGeometry,
    /// Speed ratios of gear trains
    Kinematics,
    /// Strength estimates
    Strength,
}

impl FormulaCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::CircleDiameters => "Circle Diameters",
            FormulaCategory::Pitches => "Pitches",
            FormulaCategory::ToothProportions => "Tooth Proportions",
            FormulaCategory::HelicalRelations => "Helical Relations",
            FormulaCategory::ContactRatios => "Contact Ratios",
            FormulaCategory::BevelGeometry => "Bevel Geometry",
            FormulaCategory::WormGeometry => "Worm Geometry",
            FormulaCategory::Kinematics => "Kinematics",
            FormulaCategory::Strength => "Strength",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::ToothProportions => 1,
            FormulaCategory::CircleDiameters => 2,
            FormulaCategory::Pitches => 3,
            FormulaCategory::HelicalRelations => 4,
            FormulaCategory::ContactRatios => 5,
            FormulaCategory::BevelGeometry => 6,
            FormulaCategory::WormGeometry => 7,
            FormulaCategory::Kinematics => 8,
            FormulaCategory::Strength => 9,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name (e.g., "Base Circle Diameter")
    pub name: &'static str,
    /// What the formula calculates
    pub description: &'static str,
    /// Plain-text formula
    pub formula_plain: &'static str,
    pub reference: StandardReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: FormulaCategory,
    /// Source file of the implementation, relative to `gear_core/src`
    pub source_module: &'static str,
    /// Function implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Every formula used by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    // -------------------------------------------------------------------------
    // Basic rack
    // -------------------------------------------------------------------------
    /// h_a = 1.0 m, h_f = 1.25 m
    BasicRackProportions,
    /// ρ_f = ρ* m
    FilletRadius,

    // -------------------------------------------------------------------------
    // Circles
    // -------------------------------------------------------------------------
    /// d = m z
    PitchDiameter,
    /// d_b = d cos α
    BaseDiameter,
    /// d_a = d + 2 h_a
    TipDiameter,
    /// d_f = d - 2 h_f
    RootDiameter,

    // -------------------------------------------------------------------------
    // Pitches
    // -------------------------------------------------------------------------
    /// p = π m
    NormalPitch,
    /// p_b = π m cos α
    BasePitch,
    /// p_x = π m / tan β
    AxialPitch,

    // -------------------------------------------------------------------------
    // Helical
    // -------------------------------------------------------------------------
    /// m_t = m_n / cos β
    TransverseModule,
    /// α_t = atan(tan α_n / cos β)
    TransversePressureAngle,
    /// z_n = z / cos³ β
    EquivalentTeeth,

    // -------------------------------------------------------------------------
    // Contact
    // -------------------------------------------------------------------------
    /// a = (d1 + d2) / 2
    CenterDistance,
    /// ε_α = g_α / p_b
    TransverseContactRatio,
    /// ε_β = b tan|β| / (π m)
    OverlapRatio,
    /// x = (17 - z) / 17
    ProfileShiftCoefficient,

    // -------------------------------------------------------------------------
    // Bevel
    // -------------------------------------------------------------------------
    /// δ = atan(z1 / z2)
    BevelPitchAngle,
    /// R = d / (2 sin δ)
    ConeDistance,

    // -------------------------------------------------------------------------
    // Worm
    // -------------------------------------------------------------------------
    /// γ = atan(p_z / (π d_w))
    WormLeadAngle,
    /// η = (cos γ - μ tan γ) / (cos γ + μ / tan γ)
    WormEfficiency,

    // -------------------------------------------------------------------------
    // Kinematics
    // -------------------------------------------------------------------------
    /// i = 1 + z_r / z_s
    PlanetaryFixedRingRatio,
    /// z_r = z_s + 2 z_p
    PlanetaryConcentricity,

    // -------------------------------------------------------------------------
    // Strength
    // -------------------------------------------------------------------------
    /// σ = k F_t / (b m)
    LewisBendingStress,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::BasicRackProportions => FormulaMetadata {
                name: "Basic Rack Proportions",
                description: "Addendum, dedendum and bottom clearance of the standard basic rack",
                formula_plain: "h_a = 1.0 m, h_f = 1.25 m, c = 0.25 m",
                reference: StandardReference::Iso53 { clause: "4" },
                variables: vec![
                    Variable::new("m", "Module", "mm"),
                    Variable::new("h_a", "Addendum", "mm"),
                    Variable::new("h_f", "Dedendum", "mm"),
                    Variable::new("c", "Bottom clearance", "mm"),
                ],
                assumptions: vec!["Full-depth teeth"],
                category: FormulaCategory::ToothProportions,
                source_module: "standards/iso53.rs",
                source_function: "basic_rack_profile",
            },

            Formula::FilletRadius => FormulaMetadata {
                name: "Basic Rack Fillet Radius",
                description: "Root/tip fillet radius of the basic rack by profile variant",
                formula_plain: "rho_f = rho* m (rho* = 0.38 standard, 0.3 full fillet, 0.25 reduced)",
                reference: StandardReference::Iso53 { clause: "Table 1" },
                variables: vec![
                    Variable::new("rho*", "Fillet radius coefficient", "-"),
                    Variable::new("m", "Module", "mm"),
                ],
                assumptions: vec![],
                category: FormulaCategory::ToothProportions,
                source_module: "standards/iso53.rs",
                source_function: "root_radius",
            },

            Formula::PitchDiameter => FormulaMetadata {
                name: "Pitch Diameter",
                description: "Reference circle diameter; helical gears use the transverse module",
                formula_plain: "d = m_t z",
                reference: StandardReference::Iso21771 { section: "4.3" },
                variables: vec![
                    Variable::new("m_t", "Transverse module (m for spur)", "mm"),
                    Variable::new("z", "Tooth count", "-"),
                ],
                assumptions: vec![],
                category: FormulaCategory::CircleDiameters,
                source_module: "gears/mod.rs",
                source_function: "GearGeometry::from_pitch",
            },

            Formula::BaseDiameter => FormulaMetadata {
                name: "Base Circle Diameter",
                description: "Circle the involute is unwound from",
                formula_plain: "d_b = d cos(alpha)",
                reference: StandardReference::Iso21771 { section: "4.4" },
                variables: vec![
                    Variable::new("d", "Pitch diameter", "mm"),
                    Variable::new("alpha", "Pressure angle", "deg"),
                ],
                assumptions: vec![],
                category: FormulaCategory::CircleDiameters,
                source_module: "standards/gear_math.rs",
                source_function: "base_diameter",
            },

            Formula::TipDiameter => FormulaMetadata {
                name: "Tip Diameter",
                description: "Outside diameter; internal gears subtract the addendum",
                formula_plain: "d_a = d + 2 h_a (internal: d_a = d - 2 h_a)",
                reference: StandardReference::Iso21771 { section: "4.5" },
                variables: vec![
                    Variable::new("d", "Pitch diameter", "mm"),
                    Variable::new("h_a", "Addendum", "mm"),
                ],
                assumptions: vec!["Bevel gears scale h_a by cos(delta)"],
                category: FormulaCategory::CircleDiameters,
                source_module: "gears/mod.rs",
                source_function: "GearGeometry::from_pitch",
            },

            Formula::RootDiameter => FormulaMetadata {
                name: "Root Diameter",
                description: "Root circle diameter; internal gears add the dedendum",
                formula_plain: "d_f = d - 2 h_f (internal: d_f = d + 2 h_f)",
                reference: StandardReference::Iso21771 { section: "4.5" },
                variables: vec![
                    Variable::new("d", "Pitch diameter", "mm"),
                    Variable::new("h_f", "Dedendum", "mm"),
                ],
                assumptions: vec!["Bevel gears scale h_f by cos(delta)"],
                category: FormulaCategory::CircleDiameters,
                source_module: "gears/mod.rs",
                source_function: "GearGeometry::from_pitch",
            },

            Formula::NormalPitch => FormulaMetadata {
                name: "Normal Pitch",
                description: "Circular pitch measured normal to the tooth",
                formula_plain: "p_n = pi m",
                reference: StandardReference::Iso21771 { section: "4.6" },
                variables: vec![Variable::new("m", "Normal module", "mm")],
                assumptions: vec![],
                category: FormulaCategory::Pitches,
                source_module: "standards/gear_math.rs",
                source_function: "normal_pitch",
            },

            Formula::BasePitch => FormulaMetadata {
                name: "Base Pitch",
                description: "Pitch measured along the line of action",
                formula_plain: "p_b = pi m cos(alpha)",
                reference: StandardReference::Iso21771 { section: "4.6" },
                variables: vec![
                    Variable::new("m", "Module", "mm"),
                    Variable::new("alpha", "Pressure angle", "deg"),
                ],
                assumptions: vec!["Uses the module of the driving gear"],
                category: FormulaCategory::Pitches,
                source_module: "standards/gear_math.rs",
                source_function: "base_pitch",
            },

            Formula::AxialPitch => FormulaMetadata {
                name: "Axial Pitch",
                description: "Distance between adjacent teeth along the gear axis",
                formula_plain: "p_x = pi m / tan(beta)",
                reference: StandardReference::Iso21771 { section: "4.7" },
                variables: vec![
                    Variable::new("m", "Normal module", "mm"),
                    Variable::new("beta", "Helix angle", "deg"),
                ],
                assumptions: vec!["Unbounded for beta = 0"],
                category: FormulaCategory::Pitches,
                source_module: "standards/iso21771.rs",
                source_function: "axial_pitch",
            },

            Formula::TransverseModule => FormulaMetadata {
                name: "Transverse Module",
                description: "Module in the plane of rotation of a helical gear",
                formula_plain: "m_t = m_n / cos(beta)",
                reference: StandardReference::Iso21771 { section: "4.2" },
                variables: vec![
                    Variable::new("m_n", "Normal module", "mm"),
                    Variable::new("beta", "Helix angle", "deg"),
                ],
                assumptions: vec![],
                category: FormulaCategory::HelicalRelations,
                source_module: "standards/iso21771.rs",
                source_function: "transverse_module",
            },

            Formula::TransversePressureAngle => FormulaMetadata {
                name: "Transverse Pressure Angle",
                description: "Pressure angle in the plane of rotation of a helical gear",
                formula_plain: "alpha_t = atan(tan(alpha_n) / cos(beta))",
                reference: StandardReference::Iso21771 { section: "4.2" },
                variables: vec![
                    Variable::new("alpha_n", "Normal pressure angle", "deg"),
                    Variable::new("beta", "Helix angle", "deg"),
                ],
                assumptions: vec![],
                category: FormulaCategory::HelicalRelations,
                source_module: "standards/iso21771.rs",
                source_function: "transverse_pressure_angle",
            },

            Formula::EquivalentTeeth => FormulaMetadata {
                name: "Equivalent Tooth Count",
                description: "Tooth count of the virtual spur gear in the normal section",
                formula_plain: "z_n = z / cos^3(beta)",
                reference: StandardReference::Iso21771 { section: "4.9" },
                variables: vec![
                    Variable::new("z", "Actual tooth count", "-"),
                    Variable::new("beta", "Helix angle", "deg"),
                ],
                assumptions: vec![],
                category: FormulaCategory::HelicalRelations,
                source_module: "standards/iso21771.rs",
                source_function: "equivalent_spur_gear_teeth",
            },

            Formula::CenterDistance => FormulaMetadata {
                name: "Center Distance",
                description: "Distance between the axes of an external pair",
                formula_plain: "a = (d1 + d2) / 2",
                reference: StandardReference::Iso21771 { section: "5.1" },
                variables: vec![
                    Variable::new("d1", "Pitch diameter of gear 1", "mm"),
                    Variable::new("d2", "Pitch diameter of gear 2", "mm"),
                ],
                assumptions: vec!["Zero profile shift", "Internal pairs use (D - d) / 2"],
                category: FormulaCategory::ContactRatios,
                source_module: "standards/gear_math.rs",
                source_function: "center_distance",
            },

            Formula::TransverseContactRatio => FormulaMetadata {
                name: "Transverse Contact Ratio",
                description: "Average number of tooth pairs in contact, from the length of the path of contact",
                formula_plain: "eps_a = (sqrt(ra1^2 - rb1^2) + sqrt(ra2^2 - rb2^2) - a sin(alpha)) / p_b",
                reference: StandardReference::Iso21771 { section: "5.4" },
                variables: vec![
                    Variable::new("ra", "Tip radius", "mm"),
                    Variable::new("rb", "Base radius", "mm"),
                    Variable::new("a", "Center distance", "mm"),
                    Variable::new("p_b", "Base pitch", "mm"),
                ],
                assumptions: vec![
                    "Negative radicands contribute zero",
                    "Internal pairs reuse the external form, clamped at zero",
                ],
                category: FormulaCategory::ContactRatios,
                source_module: "standards/gear_math.rs",
                source_function: "contact_ratio_base_path",
            },

            Formula::OverlapRatio => FormulaMetadata {
                name: "Overlap Ratio",
                description: "Additional contact from the helix across the face width",
                formula_plain: "eps_b = b tan(|beta|) / (pi m)",
                reference: StandardReference::Iso21771 { section: "5.5" },
                variables: vec![
                    Variable::new("b", "Face width", "mm"),
                    Variable::new("beta", "Helix angle", "deg"),
                    Variable::new("m", "Normal module", "mm"),
                ],
                assumptions: vec![],
                category: FormulaCategory::ContactRatios,
                source_module: "standards/iso21771.rs",
                source_function: "overlap_ratio",
            },

            Formula::ProfileShiftCoefficient => FormulaMetadata {
                name: "Profile Shift Coefficient",
                description: "Shift that avoids undercut on gears with few teeth",
                formula_plain: "x = (17 - z) / 17 for z < 17",
                reference: StandardReference::Iso21771 { section: "4.8" },
                variables: vec![Variable::new("z", "Tooth count", "-")],
                assumptions: vec!["Simplified rule for alpha = 20 deg"],
                category: FormulaCategory::ContactRatios,
                source_module: "standards/gear_math.rs",
                source_function: "profile_shift_coefficient",
            },

            Formula::BevelPitchAngle => FormulaMetadata {
                name: "Bevel Pitch Angle",
                description: "Pitch cone angle from the tooth counts of the pair",
                formula_plain: "delta = atan(z / z_mate)",
                reference: StandardReference::Iso23509 { section: "5.2" },
                variables: vec![
                    Variable::new("z", "Tooth count", "-"),
                    Variable::new("z_mate", "Tooth count of mating gear", "-"),
                ],
                assumptions: vec!["90 deg shaft angle", "45 deg when the mate is unknown"],
                category: FormulaCategory::BevelGeometry,
                source_module: "gears/bevel.rs",
                source_function: "resolve_pitch_angle",
            },

            Formula::ConeDistance => FormulaMetadata {
                name: "Outer Cone Distance",
                description: "Distance from cone apex to the outer pitch circle",
                formula_plain: "R = d / (2 sin(delta))",
                reference: StandardReference::Iso23509 { section: "5.3" },
                variables: vec![
                    Variable::new("d", "Pitch diameter", "mm"),
                    Variable::new("delta", "Pitch angle", "deg"),
                ],
                assumptions: vec!["Unbounded when sin(delta) <= 0"],
                category: FormulaCategory::BevelGeometry,
                source_module: "gears/bevel.rs",
                source_function: "BevelGeometry::new",
            },

            Formula::WormLeadAngle => FormulaMetadata {
                name: "Worm Lead Angle",
                description: "Angle of the thread helix measured from the plane of rotation",
                formula_plain: "gamma = atan(leads pi m / (pi d_w))",
                reference: StandardReference::Iso1122 { entry: "3.2.11" },
                variables: vec![
                    Variable::new("leads", "Thread starts", "-"),
                    Variable::new("m", "Axial module", "mm"),
                    Variable::new("d_w", "Worm reference diameter", "mm"),
                ],
                assumptions: vec![],
                category: FormulaCategory::WormGeometry,
                source_module: "gears/worm.rs",
                source_function: "WormGeometry::new",
            },

            Formula::WormEfficiency => FormulaMetadata {
                name: "Worm Efficiency",
                description: "Mesh efficiency with the worm driving",
                formula_plain: "eta = (cos(gamma) - mu tan(gamma)) / (cos(gamma) + mu / tan(gamma))",
                reference: StandardReference::Iso1122 { entry: "3.4" },
                variables: vec![
                    Variable::new("gamma", "Lead angle", "deg"),
                    Variable::new("mu", "Coefficient of friction", "-"),
                ],
                assumptions: vec!["Clamped to [0, 1]", "Friction default 0.05"],
                category: FormulaCategory::WormGeometry,
                source_module: "gears/worm.rs",
                source_function: "WormGeometry::efficiency",
            },

            Formula::PlanetaryFixedRingRatio => FormulaMetadata {
                name: "Planetary Ratio (Ring Fixed)",
                description: "Sun-to-carrier reduction with the ring held",
                formula_plain: "i = 1 + z_r / z_s",
                reference: StandardReference::Kinematics,
                variables: vec![
                    Variable::new("z_r", "Ring tooth count", "-"),
                    Variable::new("z_s", "Sun tooth count", "-"),
                ],
                assumptions: vec!["Willis equation with one member fixed"],
                category: FormulaCategory::Kinematics,
                source_module: "gears/planetary.rs",
                source_function: "PlanetaryGearset::ratios",
            },

            Formula::PlanetaryConcentricity => FormulaMetadata {
                name: "Planetary Concentricity",
                description: "Tooth counts that put sun and ring on a common axis",
                formula_plain: "z_r = z_s + 2 z_p",
                reference: StandardReference::Kinematics,
                variables: vec![
                    Variable::new("z_r", "Ring tooth count", "-"),
                    Variable::new("z_s", "Sun tooth count", "-"),
                    Variable::new("z_p", "Planet tooth count", "-"),
                ],
                assumptions: vec!["Zero profile shift", "Reported, not enforced"],
                category: FormulaCategory::Kinematics,
                source_module: "gears/planetary.rs",
                source_function: "PlanetaryGearset::is_concentric",
            },

            Formula::LewisBendingStress => FormulaMetadata {
                name: "Lewis Bending Stress",
                description: "Simplified tooth root bending stress",
                formula_plain: "F_t = 2T / (m z), sigma = k F_t / (b m)",
                reference: StandardReference::Lewis,
                variables: vec![
                    Variable::new("T", "Torque", "N mm"),
                    Variable::new("m", "Module", "mm"),
                    Variable::new("z", "Tooth count", "-"),
                    Variable::new("b", "Face width", "mm"),
                    Variable::new("k", "Form/service factor", "-"),
                ],
                assumptions: vec!["Estimate only, not a strength rating"],
                category: FormulaCategory::Strength,
                source_module: "standards/gear_math.rs",
                source_function: "bending_stress",
            },
        }
    }

    /// All formulas in a category
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().category == category)
            .copied()
            .collect()
    }

    /// Categories that contain at least one formula, in document order
    pub fn all_categories() -> Vec<FormulaCategory> {
        use FormulaCategory::*;
        let mut cats: Vec<FormulaCategory> = vec![
            CircleDiameters,
            Pitches,
            ToothProportions,
            HelicalRelations,
            ContactRatios,
            BevelGeometry,
            WormGeometry,
            Kinematics,
            Strength,
        ]
        .into_iter()
        .filter(|c| ALL_FORMULAS.iter().any(|f| f.metadata().category == *c))
        .collect();
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::BasicRackProportions,
    Formula::FilletRadius,
    Formula::PitchDiameter,
    Formula::BaseDiameter,
    Formula::TipDiameter,
    Formula::RootDiameter,
    Formula::NormalPitch,
    Formula::BasePitch,
    Formula::AxialPitch,
    Formula::TransverseModule,
    Formula::TransversePressureAngle,
    Formula::EquivalentTeeth,
    Formula::CenterDistance,
    Formula::TransverseContactRatio,
    Formula::OverlapRatio,
    Formula::ProfileShiftCoefficient,
    Formula::BevelPitchAngle,
    Formula::ConeDistance,
    Formula::WormLeadAngle,
    Formula::WormEfficiency,
    Formula::PlanetaryFixedRingRatio,
    Formula::PlanetaryConcentricity,
    Formula::LewisBendingStress,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the formula reference document.
///
/// ```rust
/// use gear_core::standards::registry::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("Gear Kernel Formula Reference"));
/// assert!(markdown.contains("## Contact Ratios"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Gear Kernel Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every closed-form relation evaluated by `gear_core`, grouped by topic. Each
entry lists its formula, standard reference, source location and assumptions.

## Conventions

| Quantity | Unit |
|----------|------|
| Lengths, module | mm |
| Angles | degrees at the API, radians inside formulas |
| Unbounded lengths | reported as `"unbounded"` |

---

"#,
    );

    let categories = Formula::all_categories();

    for category in &categories {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in Formula::in_category(*category) {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formulas_have_metadata() {
        assert_eq!(ALL_FORMULAS.len(), 23);
        for f in ALL_FORMULAS {
            let meta = f.metadata();
            assert!(!meta.name.is_empty(), "{:?} has no name", f);
            assert!(!meta.formula_plain.is_empty(), "{:?} has no formula", f);
            assert!(!meta.variables.is_empty(), "{:?} has no variables", f);
            assert!(!meta.source_function.is_empty(), "{:?} missing source_function", f);
        }
    }

    #[test]
    fn test_citation() {
        let r = StandardReference::Iso21771 { section: "5.4" };
        assert_eq!(r.citation(), "ISO 21771:2007 Section 5.4");
        assert_eq!(StandardReference::Lewis.short_form(), "Lewis");
    }

    #[test]
    fn test_categories_sorted_and_populated() {
        let cats = Formula::all_categories();
        assert_eq!(cats.len(), 9);
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
        assert_eq!(cats[0], FormulaCategory::ToothProportions);
    }

    #[test]
    fn test_generate_formulas_markdown() {
        let md = generate_formulas_markdown();
        assert!(md.contains("# Gear Kernel Formula Reference"));
        assert!(md.contains("### Transverse Contact Ratio"));
        assert!(md.contains("`d_b = d cos(alpha)`"));
        assert!(md.contains("ISO 53:1998"));
        assert!(md.contains("standards/gear_math.rs"));
        assert!(md.contains("**Total Formulas:** 23"));
        assert!(md.contains("**Categories:** 9"));
    }
}
