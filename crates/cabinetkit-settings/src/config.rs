//! Build configuration
//!
//! Defaults every build reads: panel thicknesses, gaps, support heights and
//! the catalog keys for each part family. A [`BuildConfig`] is passed
//! explicitly into a build; nothing here is global.

use cabinetkit_core::materials::{Material, MaterialCatalog, MaterialKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Edge banding thickness by edge visibility, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeBandingDefaults {
    /// Front edges of carcass panels.
    pub front: f64,
    /// Edges of facades.
    pub visible: f64,
    /// Edges nobody sees.
    pub hidden: f64,
}

impl Default for EdgeBandingDefaults {
    fn default() -> Self {
        Self {
            front: 2.0,
            visible: 0.4,
            hidden: 0.0,
        }
    }
}

/// Catalog keys used for each family of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDefaults {
    pub carcass: String,
    pub back: String,
    pub facade: String,
    pub drawer_box: String,
    pub drawer_bottom: String,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        Self {
            carcass: "ldsp_18".to_string(),
            back: "dvp_4".to_string(),
            facade: "ldsp_16".to_string(),
            drawer_box: "plywood_10".to_string(),
            drawer_bottom: "dvp_4".to_string(),
        }
    }
}

/// Defaults read at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Carcass panel thickness.
    pub material_thickness: f64,
    /// Back panel thickness.
    pub back_thickness: f64,
    /// Default cabinet depth.
    pub depth: f64,
    pub legs_height: f64,
    pub plinth_height: f64,
    /// Set-back of the plinth board from the front edge.
    pub plinth_inset: f64,
    /// Soft-close slides unless a drawer says otherwise.
    pub soft_close: bool,
    pub edge_banding: EdgeBandingDefaults,
    /// Reveal between adjacent facades.
    pub facade_gap: f64,
    /// Saw kerf allowance.
    pub cut_gap: f64,
    pub shelf_inset: f64,
    /// Frame door stile/rail thickness.
    pub frame_thickness: f64,
    /// Clearance between a drawer box and the back panel.
    pub drawer_back_gap: f64,
    /// Rail width when stretchers replace a solid top.
    pub stretcher_width: f64,
    pub materials: MaterialDefaults,
    /// Extra catalog entries, added on top of the standard sheets.
    pub custom_materials: Vec<Material>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            material_thickness: 18.0,
            back_thickness: 4.0,
            depth: 400.0,
            legs_height: 100.0,
            plinth_height: 100.0,
            plinth_inset: 50.0,
            soft_close: true,
            edge_banding: EdgeBandingDefaults::default(),
            facade_gap: 3.0,
            cut_gap: 4.0,
            shelf_inset: 2.0,
            frame_thickness: 20.0,
            drawer_back_gap: 20.0,
            stretcher_width: 100.0,
            materials: MaterialDefaults::default(),
            custom_materials: Vec::new(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat(
                    "Config file must be .json or .toml".to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded build config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(SettingsError::UnsupportedFormat(
                    "Config file must be .json or .toml".to_string(),
                ))
            }
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Default location: `<config dir>/cabinetkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("cabinetkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("No configuration directory on this platform".to_string())
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("material_thickness", self.material_thickness),
            ("back_thickness", self.back_thickness),
            ("depth", self.depth),
            ("frame_thickness", self.frame_thickness),
            ("stretcher_width", self.stretcher_width),
        ];
        for (key, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)));
            }
        }

        let non_negative = [
            ("legs_height", self.legs_height),
            ("plinth_height", self.plinth_height),
            ("plinth_inset", self.plinth_inset),
            ("facade_gap", self.facade_gap),
            ("cut_gap", self.cut_gap),
            ("shelf_inset", self.shelf_inset),
            ("drawer_back_gap", self.drawer_back_gap),
            ("edge_banding.front", self.edge_banding.front),
            ("edge_banding.visible", self.edge_banding.visible),
            ("edge_banding.hidden", self.edge_banding.hidden),
        ];
        for (key, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::invalid(key, format!("must be >= 0, got {}", value)));
            }
        }

        if self.facade_gap >= self.material_thickness * 2.0 {
            return Err(SettingsError::invalid(
                "facade_gap",
                "must be smaller than two panel thicknesses",
            ));
        }

        for material in &self.custom_materials {
            if !(material.thickness > 0.0) {
                return Err(SettingsError::invalid(
                    "custom_materials",
                    format!("'{}' has non-positive thickness", material.key),
                ));
            }
        }

        Ok(())
    }

    /// Switch the carcass sheet to a catalog panel (e.g. `ldsp_22`).
    pub fn set_material(&mut self, key: &str) -> SettingsResult<()> {
        let catalog = self.material_catalog();
        let material = catalog
            .get(key)
            .ok_or_else(|| SettingsError::invalid("materials.carcass", format!("unknown material '{}'", key)))?;

        if material.kind != MaterialKind::Panel {
            return Err(SettingsError::invalid(
                "materials.carcass",
                format!("'{}' is a {} sheet, not a panel", key, material.kind),
            ));
        }

        self.material_thickness = material.thickness;
        self.materials.carcass = key.to_string();
        Ok(())
    }

    /// Standard catalog plus any custom entries.
    pub fn material_catalog(&self) -> MaterialCatalog {
        let mut catalog = MaterialCatalog::standard();
        for material in &self.custom_materials {
            catalog.add_material(material.clone());
        }
        catalog
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.material_thickness, 18.0);
        assert_eq!(config.back_thickness, 4.0);
        assert_eq!(config.facade_gap, 3.0);
        assert_eq!(config.frame_thickness, 20.0);
        assert_eq!(config.edge_banding.visible, 0.4);
        assert!(config.soft_close);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BuildConfig::default();
        config.material_thickness = 0.0;
        assert!(config.validate().is_err());

        let mut config = BuildConfig::default();
        config.facade_gap = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "facade_gap"
        ));
    }

    #[test]
    fn test_set_material() {
        let mut config = BuildConfig::default();
        config.set_material("ldsp_22").unwrap();
        assert_eq!(config.material_thickness, 22.0);
        assert_eq!(config.materials.carcass, "ldsp_22");

        assert!(config.set_material("dvp_4").is_err());
        assert!(config.set_material("granite").is_err());
        assert_eq!(config.material_thickness, 22.0);
    }

    #[test]
    fn test_custom_materials_extend_catalog() {
        let mut config = BuildConfig::default();
        config
            .custom_materials
            .push(Material::new("oak_20", "Oak", 20.0, MaterialKind::Panel));

        let catalog = config.material_catalog();
        assert_eq!(catalog.lookup("oak_20").name, "Oak");
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BuildConfig = toml::from_str("facade_gap = 2.0\n[edge_banding]\nfront = 1.0\n").unwrap();
        assert_eq!(config.facade_gap, 2.0);
        assert_eq!(config.edge_banding.front, 1.0);
        assert_eq!(config.edge_banding.visible, 0.4);
        assert_eq!(config.material_thickness, 18.0);
    }
}
