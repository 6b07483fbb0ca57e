//! Geometry sink boundary
//!
//! The engine never draws anything. It creates named groups and places
//! panels through [`GeometrySink`]; the handles it gets back are opaque and
//! only ever passed down as the parent of further geometry.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::panel::{Bounds, PanelPlacement};

/// Opaque handle to a group created by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupHandle(Uuid);

impl GroupHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for GroupHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group:{}", self.0)
    }
}

/// Opaque handle to a placed panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelHandle(Uuid);

impl PanelHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for PanelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Where geometry goes.
pub trait GeometrySink {
    /// Create a named group under `parent` (`None` = root).
    fn create_group(&mut self, parent: Option<GroupHandle>, name: &str) -> GroupHandle;

    /// Place one panel under `parent`.
    fn place_panel(&mut self, parent: Option<GroupHandle>, panel: &PanelPlacement) -> PanelHandle;
}

/// Sink that discards geometry. Useful when only the cut list is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl GeometrySink for NullSink {
    fn create_group(&mut self, _parent: Option<GroupHandle>, _name: &str) -> GroupHandle {
        GroupHandle::new()
    }

    fn place_panel(&mut self, _parent: Option<GroupHandle>, _panel: &PanelPlacement) -> PanelHandle {
        PanelHandle::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedGroup {
    pub handle: GroupHandle,
    pub parent: Option<GroupHandle>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedPanel {
    pub handle: PanelHandle,
    pub parent: Option<GroupHandle>,
    pub placement: PanelPlacement,
}

/// In-memory sink keeping every command in emission order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecordingSink {
    groups: Vec<RecordedGroup>,
    panels: Vec<RecordedPanel>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[RecordedGroup] {
        &self.groups
    }

    pub fn panels(&self) -> &[RecordedPanel] {
        &self.panels
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// First group with the given name.
    pub fn group_named(&self, name: &str) -> Option<&RecordedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group(&self, handle: GroupHandle) -> Option<&RecordedGroup> {
        self.groups.iter().find(|g| g.handle == handle)
    }

    pub fn panels_labelled(&self, label: &str) -> Vec<&RecordedPanel> {
        self.panels.iter().filter(|p| p.placement.label == label).collect()
    }

    /// Panels placed directly in `group` or in any group nested below it.
    pub fn panels_under(&self, group: GroupHandle) -> Vec<&RecordedPanel> {
        self.panels
            .iter()
            .filter(|p| p.parent.is_some_and(|parent| self.is_within(parent, group)))
            .collect()
    }

    /// Union of the bounds of every panel under `group`.
    pub fn bounds_under(&self, group: GroupHandle) -> Option<Bounds> {
        self.panels_under(group)
            .into_iter()
            .map(|p| p.placement.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.panels.clear();
    }

    fn is_within(&self, mut current: GroupHandle, ancestor: GroupHandle) -> bool {
        // Group parents always precede their children, so this walk terminates.
        loop {
            if current == ancestor {
                return true;
            }
            match self.group(current).and_then(|g| g.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl GeometrySink for RecordingSink {
    fn create_group(&mut self, parent: Option<GroupHandle>, name: &str) -> GroupHandle {
        let handle = GroupHandle::new();
        self.groups.push(RecordedGroup {
            handle,
            parent,
            name: name.to_string(),
        });
        handle
    }

    fn place_panel(&mut self, parent: Option<GroupHandle>, panel: &PanelPlacement) -> PanelHandle {
        let handle = PanelHandle::new();
        self.panels.push(RecordedPanel {
            handle,
            parent,
            placement: panel.clone(),
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_recording_sink_nesting() {
        let mut sink = RecordingSink::new();
        let root = sink.create_group(None, "Kitchen");
        let cab = sink.create_group(Some(root), "Sink unit");
        let other = sink.create_group(None, "Elsewhere");

        let shelf = PanelPlacement::horizontal("Shelf", Point3::origin(), 500.0, 300.0, 18.0);
        sink.place_panel(Some(cab), &shelf);
        sink.place_panel(Some(other), &shelf);

        assert_eq!(sink.panels_under(root).len(), 1);
        assert_eq!(sink.panels_under(cab).len(), 1);
        assert_eq!(sink.panels_labelled("Shelf").len(), 2);
        assert_eq!(sink.group_named("Sink unit").map(|g| g.parent), Some(Some(root)));

        let bounds = sink.bounds_under(root).unwrap();
        assert_eq!(bounds.max, Point3::new(500.0, 300.0, 18.0));
    }

    #[test]
    fn test_null_sink_hands_out_distinct_handles() {
        let mut sink = NullSink;
        let a = sink.create_group(None, "a");
        let b = sink.create_group(None, "b");
        assert_ne!(a, b);
    }
}
