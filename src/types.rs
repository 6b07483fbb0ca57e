//! Design files and what building one produces

use anyhow::{bail, Context as _};
use cabinetkit_core::RecordingSink;
use cabinetkit_layout::{
    build_layout, Cabinet, CabinetSpec, Component, Kitchen, KitchenSpec, OpenableKind, Report,
    Wardrobe, WardrobeSpec,
};
use cabinetkit_settings::BuildConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level design document, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Design {
    Cabinet(CabinetSpec),
    Wardrobe(WardrobeSpec),
    Kitchen(KitchenSpec),
}

impl Design {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse design")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read design {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("In design {}", path.display()))
    }

    /// Component tree described by this design.
    pub fn component(&self, config: &BuildConfig) -> Box<dyn Component> {
        match self {
            Self::Cabinet(spec) => Box::new(Cabinet::from_spec(spec, config)),
            Self::Wardrobe(spec) => Box::new(Wardrobe::from_spec(spec, config)),
            Self::Kitchen(spec) => Box::new(Kitchen::from_spec(spec, config)),
        }
    }
}

/// Result of building a design, as printed by the command line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub panels: usize,
    pub drawers: usize,
    pub doors: usize,
    pub report: Report,
}

/// Validate and build `design`, refusing it if validation finds problems.
pub fn build_design(design: &Design, config: &BuildConfig) -> anyhow::Result<BuildSummary> {
    let mut component = design.component(config);

    let problems = component.validate();
    if !problems.is_empty() {
        let lines: Vec<String> = problems.iter().map(|p| format!("  - {}", p)).collect();
        bail!(
            "Design '{}' is not buildable:\n{}",
            component.name(),
            lines.join("\n")
        );
    }

    let mut sink = RecordingSink::new();
    let outcome = build_layout(component.as_mut(), &mut sink, config)
        .with_context(|| format!("Failed to build '{}'", component.name()))?;

    Ok(BuildSummary {
        panels: sink.panel_count(),
        drawers: outcome.registry.count_of(OpenableKind::Drawer),
        doors: outcome.registry.count_of(OpenableKind::Door),
        report: Report::from_component(component.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_kind_tag() {
        let design = Design::from_json(r#"{ "kind": "cabinet", "width": 600, "height": 720 }"#).unwrap();
        assert!(matches!(design, Design::Cabinet(ref spec) if spec.width == 600.0));

        let err = Design::from_json(r#"{ "kind": "bookcase", "width": 600 }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_design_is_refused() {
        let design = Design::from_json(
            r#"{ "kind": "cabinet", "width": 600, "height": 400, "drawers": { "heights": [{ "height": 300 }, { "height": 300 }] } }"#,
        )
        .unwrap();
        let err = build_design(&design, &BuildConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not buildable"));
    }
}
