//! Sheet materials
//!
//! The engine only needs two facts about a material: the name printed on the
//! cutting list and its thickness. [`MaterialCatalog::lookup`] always answers,
//! falling back to a built-in entry for unknown keys.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique catalog key such as `ldsp_18`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialKey(pub String);

impl MaterialKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MaterialKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What a sheet is normally used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Panel,
    Back,
    Front,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => write!(f, "Panel"),
            Self::Back => write!(f, "Back"),
            Self::Front => write!(f, "Front"),
        }
    }
}

pub const CHIPBOARD: &str = "Chipboard";
pub const HARDBOARD: &str = "Hardboard";
pub const MDF: &str = "MDF";
pub const PLYWOOD: &str = "Plywood";
pub const SOLID_WOOD: &str = "Solid wood";
pub const WORKTOP: &str = "Worktop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub key: MaterialKey,
    /// Name used on the cutting list.
    pub name: String,
    /// Thickness in mm.
    pub thickness: f64,
    pub kind: MaterialKind,
}

impl Material {
    pub fn new(key: impl Into<MaterialKey>, name: &str, thickness: f64, kind: MaterialKind) -> Self {
        Self {
            key: key.into(),
            name: name.to_string(),
            thickness,
            kind,
        }
    }
}

impl From<String> for MaterialKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}mm", self.name, self.thickness)
    }
}

/// Nominal sheet size in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
}

impl SheetSize {
    pub fn area(&self) -> f64 {
        self.width * self.height / 1_000_000.0
    }
}

/// Collection of materials by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    materials: HashMap<MaterialKey, Material>,
    fallback: Material,
}

impl MaterialCatalog {
    /// Empty catalog; every lookup resolves to the fallback.
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            fallback: Material::new("ldsp_16", CHIPBOARD, 16.0, MaterialKind::Panel),
        }
    }

    /// Catalog with the stock chipboard, hardboard, MDF and plywood sheets.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (key, name, thickness, kind) in [
            ("ldsp_16", CHIPBOARD, 16.0, MaterialKind::Panel),
            ("ldsp_18", CHIPBOARD, 18.0, MaterialKind::Panel),
            ("ldsp_22", CHIPBOARD, 22.0, MaterialKind::Panel),
            ("dvp_3", HARDBOARD, 3.0, MaterialKind::Back),
            ("dvp_4", HARDBOARD, 4.0, MaterialKind::Back),
            ("dvp_6", HARDBOARD, 6.0, MaterialKind::Back),
            ("mdf_16", MDF, 16.0, MaterialKind::Front),
            ("mdf_18", MDF, 18.0, MaterialKind::Front),
            ("mdf_19", MDF, 19.0, MaterialKind::Front),
            ("plywood_10", PLYWOOD, 10.0, MaterialKind::Panel),
            ("plywood_15", PLYWOOD, 15.0, MaterialKind::Panel),
            ("plywood_18", PLYWOOD, 18.0, MaterialKind::Panel),
        ] {
            catalog.add_material(Material::new(key, name, thickness, kind));
        }
        catalog
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.key.clone(), material);
    }

    pub fn get(&self, key: &str) -> Option<&Material> {
        self.materials.get(&MaterialKey::new(key))
    }

    /// Resolve `key`, falling back to the default entry when it is unknown.
    pub fn lookup(&self, key: &str) -> &Material {
        match self.get(key) {
            Some(material) => material,
            None => {
                tracing::debug!("unknown material '{}', using {}", key, self.fallback);
                &self.fallback
            }
        }
    }

    pub fn fallback(&self) -> &Material {
        &self.fallback
    }

    pub fn materials_of_kind(&self, kind: MaterialKind) -> Vec<&Material> {
        let mut found: Vec<&Material> = self.materials.values().filter(|m| m.kind == kind).collect();
        found.sort_by(|a, b| a.key.cmp(&b.key));
        found
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stock sheet size for a material display name.
pub fn sheet_size(material_name: &str) -> SheetSize {
    let (width, height) = match material_name {
        CHIPBOARD => (2800.0, 2070.0),
        HARDBOARD => (2745.0, 1700.0),
        MDF => (2800.0, 2070.0),
        PLYWOOD => (1525.0, 1525.0),
        _ => (2500.0, 1250.0),
    };
    SheetSize { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.len(), 12);

        let mdf = catalog.lookup("mdf_19");
        assert_eq!(mdf.name, "MDF");
        assert_eq!(mdf.thickness, 19.0);
        assert_eq!(catalog.materials_of_kind(MaterialKind::Back).len(), 3);
    }

    #[test]
    fn test_lookup_falls_back() {
        let catalog = MaterialCatalog::standard();
        assert!(catalog.get("oak_40").is_none());

        let fallback = catalog.lookup("oak_40");
        assert_eq!(fallback.name, CHIPBOARD);
        assert_eq!(fallback.thickness, 16.0);
    }

    #[test]
    fn test_sheet_sizes() {
        assert_eq!(sheet_size(HARDBOARD).width, 2745.0);
        assert_eq!(sheet_size(PLYWOOD).height, 1525.0);
        assert_eq!(sheet_size("Glass").width, 2500.0);
        assert!((sheet_size(CHIPBOARD).area() - 5.796).abs() < 1e-9);
    }
}
