//! Build session
//!
//! Everything one build needs besides the component tree: the geometry
//! sink, the configuration, the resolved material catalog and the registry
//! of openable parts emitted so far.

use cabinetkit_core::{GeometrySink, GroupHandle, MaterialCatalog, PanelHandle, PanelPlacement};
use cabinetkit_settings::BuildConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What kind of part a registry entry points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenableKind {
    Drawer,
    Door,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenableEntry {
    pub name: String,
    pub kind: OpenableKind,
}

/// Map from emitted group to the drawer or door that owns it.
///
/// Hosts use it to go from a picked group back to something they can open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenableRegistry {
    entries: HashMap<GroupHandle, OpenableEntry>,
}

impl OpenableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, group: GroupHandle, name: &str, kind: OpenableKind) {
        self.entries.insert(
            group,
            OpenableEntry {
                name: name.to_string(),
                kind,
            },
        );
    }

    pub fn get(&self, group: GroupHandle) -> Option<&OpenableEntry> {
        self.entries.get(&group)
    }

    pub fn contains(&self, group: GroupHandle) -> bool {
        self.entries.contains_key(&group)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_of(&self, kind: OpenableKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupHandle, &OpenableEntry)> {
        self.entries.iter()
    }
}

pub struct BuildSession<'a> {
    sink: &'a mut dyn GeometrySink,
    config: &'a BuildConfig,
    catalog: MaterialCatalog,
    registry: OpenableRegistry,
}

impl<'a> BuildSession<'a> {
    pub fn new(sink: &'a mut dyn GeometrySink, config: &'a BuildConfig) -> Self {
        Self {
            sink,
            catalog: config.material_catalog(),
            config,
            registry: OpenableRegistry::new(),
        }
    }

    pub fn config(&self) -> &'a BuildConfig {
        self.config
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &OpenableRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OpenableRegistry {
        &mut self.registry
    }

    pub fn create_group(&mut self, parent: Option<GroupHandle>, name: &str) -> GroupHandle {
        self.sink.create_group(parent, name)
    }

    pub fn place(&mut self, parent: Option<GroupHandle>, panel: &PanelPlacement) -> PanelHandle {
        panel.emit(&mut *self.sink, parent)
    }

    /// Display name of the material configured under `key`.
    pub fn material_name(&self, key: &str) -> String {
        self.catalog.lookup(key).name.clone()
    }

    pub fn into_registry(self) -> OpenableRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinetkit_core::RecordingSink;
    use nalgebra::Point3;

    #[test]
    fn test_registry_register_and_clear() {
        let mut registry = OpenableRegistry::new();
        let a = GroupHandle::new();
        let b = GroupHandle::new();
        registry.register(a, "Base drawer 1", OpenableKind::Drawer);
        registry.register(b, "Base door 1", OpenableKind::Door);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).map(|e| e.kind), Some(OpenableKind::Drawer));
        assert_eq!(registry.count_of(OpenableKind::Door), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.contains(a));
    }

    #[test]
    fn test_session_forwards_to_sink() {
        let mut sink = RecordingSink::new();
        let config = BuildConfig::default();
        {
            let mut session = BuildSession::new(&mut sink, &config);
            let group = session.create_group(None, "Cabinet");
            let panel = PanelPlacement::horizontal("Shelf", Point3::origin(), 100.0, 100.0, 18.0);
            session.place(Some(group), &panel);
            assert_eq!(session.material_name("dvp_4"), "Hardboard");
        }
        assert_eq!(sink.groups().len(), 1);
        assert_eq!(sink.panel_count(), 1);
    }
}
