//! # Gear Factory
//!
//! [`GearRegistry`] maps lower-case type names to constructors. The registry
//! is an ordinary value owned by the caller: build it once, then share it
//! by reference.
//!
//! ## Configuration documents
//!
//! [`GearRegistry::from_config`] accepts either a flat document
//!
//! ```json
//! { "type": "helical", "name": "H", "module": 2.0, "teeth": 20, "helix_angle": 15 }
//! ```
//!
//! or one with a nested `params` object. Keys beside `params` (other than
//! `type`) override keys inside it. `type` defaults to `"spur"`.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::factory::GearRegistry;
//!
//! let registry = GearRegistry::with_builtin_types();
//! let gear = registry
//!     .from_config_str(r#"{"type": "spur", "params": {"name": "P", "module": 2, "teeth": 20}}"#)
//!     .unwrap();
//! assert_eq!(gear.pitch_diameter().mm(), Some(40.0));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{GearError, GearResult};
use crate::gears::{Gear, GearType};
use crate::params::{GearParameters, ParameterOverrides};

/// Constructor registered under a type name
pub type GearConstructor = fn(GearParameters) -> GearResult<Gear>;

/// Type name used when a configuration document has none
pub const DEFAULT_GEAR_TYPE: &str = "spur";

#[derive(Debug, Clone, Default)]
pub struct GearRegistry {
    constructors: BTreeMap<String, GearConstructor>,
}

impl GearRegistry {
    /// An empty registry
    pub fn new() -> Self {
        GearRegistry::default()
    }

    /// A registry holding the six built-in variants.
    pub fn with_builtin_types() -> Self {
        let mut registry = GearRegistry::new();
        registry.register(GearType::Spur.name(), Gear::spur);
        registry.register(GearType::Helical.name(), Gear::helical);
        registry.register(GearType::Bevel.name(), Gear::bevel);
        registry.register(GearType::Worm.name(), Gear::worm);
        registry.register(GearType::Rack.name(), Gear::rack);
        registry.register(GearType::Internal.name(), Gear::internal);
        registry
    }

    /// Register `constructor` under `name` (case-insensitive), replacing any
    /// previous entry.
    pub fn register(&mut self, name: &str, constructor: GearConstructor) {
        self.constructors.insert(name.trim().to_ascii_lowercase(), constructor);
    }

    /// Registered type names in sorted order
    pub fn available_types(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    fn lookup(&self, gear_type: &str) -> GearResult<GearConstructor> {
        self.constructors
            .get(&gear_type.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| GearError::UnsupportedType {
                requested: gear_type.to_string(),
                available: self.available_types(),
            })
    }

    /// Build a `gear_type` gear from `params` with `overrides` applied.
    ///
    /// # Errors
    /// `UnsupportedType` for an unknown name, otherwise whatever the
    /// constructor returns.
    pub fn create(
        &self,
        gear_type: &str,
        params: GearParameters,
        overrides: &ParameterOverrides,
    ) -> GearResult<Gear> {
        let constructor = self.lookup(gear_type)?;
        let params = if overrides.is_empty() {
            params
        } else {
            overrides.apply(params)
        };
        debug!(gear_type, name = %params.name, "creating gear");
        constructor(params)
    }

    /// Build a gear from a JSON configuration document.
    ///
    /// # Errors
    /// * `InvalidInput` - document is not an object, or its parameters do
    ///   not deserialize
    /// * `UnsupportedType` - unknown `type`
    pub fn from_config(&self, config: &Value) -> GearResult<Gear> {
        let Value::Object(doc) = config else {
            return Err(GearError::invalid_input(
                "config",
                config.to_string(),
                "Configuration must be a JSON object",
            ));
        };

        let gear_type = match doc.get("type") {
            None => DEFAULT_GEAR_TYPE,
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(GearError::invalid_input("type", other.to_string(), "Type must be a string"));
            }
        };
        // Unknown types fail before the parameters are read
        self.lookup(gear_type)?;

        let mut merged = match doc.get("params") {
            Some(Value::Object(nested)) => nested.clone(),
            Some(other) => {
                return Err(GearError::invalid_input("params", other.to_string(), "Params must be an object"));
            }
            None => Map::new(),
        };
        for (key, value) in doc {
            if key != "type" && key != "params" {
                merged.insert(key.clone(), value.clone());
            }
        }

        let params: GearParameters = serde_json::from_value(Value::Object(merged))
            .map_err(|e| GearError::invalid_input("params", gear_type, e.to_string()))?;

        self.create(gear_type, params, &ParameterOverrides::default())
    }

    /// Parse `text` as JSON and delegate to [`GearRegistry::from_config`].
    pub fn from_config_str(&self, text: &str) -> GearResult<Gear> {
        let config: Value = serde_json::from_str(text)?;
        self.from_config(&config)
    }
}
