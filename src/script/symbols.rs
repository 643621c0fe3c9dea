use std::collections::BTreeMap;

use crate::foundation::error::{KeysceneError, KeysceneResult};

/// Name of the built-in material used when a shape names none.
pub const DEFAULT_MATERIAL: &str = ".white";

/// Reflectance coefficients of one colour channel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Reflectance {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
}

impl Reflectance {
    pub const fn new(ambient: f64, diffuse: f64, specular: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }
}

/// Per-channel reflectance, as declared by a `constants` entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    pub red: Reflectance,
    pub green: Reflectance,
    pub blue: Reflectance,
}

impl Material {
    pub const WHITE: Self = Self {
        red: Reflectance::new(0.2, 0.5, 0.5),
        green: Reflectance::new(0.2, 0.5, 0.5),
        blue: Reflectance::new(0.2, 0.5, 0.5),
    };
}

/// Material name -> coefficients. Always contains [`DEFAULT_MATERIAL`].
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolTable {
    materials: BTreeMap<String, Material>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut materials = BTreeMap::new();
        materials.insert(DEFAULT_MATERIAL.to_string(), Material::WHITE);
        Self { materials }
    }

    /// Insert or replace a material. Redefining [`DEFAULT_MATERIAL`] is allowed.
    pub fn define(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Resolve a shape's material reference, falling back to the default when it names none.
    pub fn resolve(&self, name: Option<&str>) -> KeysceneResult<&Material> {
        let name = name.unwrap_or(DEFAULT_MATERIAL);
        self.get(name)
            .ok_or_else(|| KeysceneError::lookup(format!("unknown material '{name}'")))
    }
}
