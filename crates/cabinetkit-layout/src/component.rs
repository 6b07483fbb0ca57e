//! Component lifecycle
//!
//! `build(context)` creates a group for the component under the context's
//! parent, builds the component's own geometry, then recurses into its
//! children with the group as their new parent. Cut and hardware records are
//! collected bottom-up by concatenation.
//!
//! Building is not idempotent: building the same component twice emits its
//! geometry again and duplicates its records.

use cabinetkit_core::{Context, CutItem, GroupHandle, HardwareItem, LayoutError, LayoutResult};
use nalgebra::{Isometry3, Vector3};
use tracing::{debug, warn};

use crate::session::{BuildSession, OpenableKind};

/// State shared by every component.
#[derive(Debug, Clone, Default)]
pub struct ComponentBase {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    context: Option<Context>,
    group: Option<GroupHandle>,
    cut_items: Vec<CutItem>,
    hardware_items: Vec<HardwareItem>,
    builds: u32,
}

impl ComponentBase {
    pub fn new(name: impl Into<String>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    /// Record a cut panel, owned by this component unless it already names an owner.
    pub fn add_cut(&mut self, mut item: CutItem) {
        if item.owner.is_none() {
            item.owner = Some(self.name.clone());
        }
        self.cut_items.push(item);
    }

    pub fn add_cuts(&mut self, items: impl IntoIterator<Item = CutItem>) {
        for item in items {
            self.add_cut(item);
        }
    }

    pub fn add_hardware(&mut self, mut item: HardwareItem) {
        if item.owner.is_none() {
            item.owner = Some(self.name.clone());
        }
        self.hardware_items.push(item);
    }

    pub fn add_hardware_items(&mut self, items: impl IntoIterator<Item = HardwareItem>) {
        for item in items {
            self.add_hardware(item);
        }
    }

    pub fn cut_items(&self) -> &[CutItem] {
        &self.cut_items
    }

    pub fn hardware_items(&self) -> &[HardwareItem] {
        &self.hardware_items
    }

    /// Context the component was last built in (its own group as parent).
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn group(&self) -> Option<GroupHandle> {
        self.group
    }

    pub fn is_built(&self) -> bool {
        self.builds > 0
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }

    /// Envelope checks every component shares.
    pub fn validate(&self) -> Vec<LayoutError> {
        let mut errors = Vec::new();
        for (label, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !(value > 0.0) {
                errors.push(LayoutError::invalid_dimensions(
                    &self.name,
                    format!("{} must be > 0, got {}", label, value),
                ));
            }
        }
        errors
    }

    fn mark_built(&mut self, context: Context, group: GroupHandle) {
        self.context = Some(context);
        self.group = Some(group);
        self.builds += 1;
    }
}

pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    /// Emit this component's own panels. `ctx` already points at its group.
    fn build_geometry(&mut self, _ctx: &Context, _session: &mut BuildSession<'_>) -> LayoutResult<()> {
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Component> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        Vec::new()
    }

    /// Build every child in this component's context.
    fn build_children(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<()> {
        for child in self.children_mut() {
            child.build(ctx, session)?;
        }
        Ok(())
    }

    fn build(&mut self, ctx: &Context, session: &mut BuildSession<'_>) -> LayoutResult<GroupHandle> {
        if self.base().is_built() {
            warn!(
                "'{}' is being built again; its geometry and records will be duplicated",
                self.name()
            );
        }

        let group = session.create_group(ctx.parent(), &self.base().name);
        let ctx = ctx.with_parent(group);
        self.base_mut().mark_built(ctx, group);
        debug!(
            "Building '{}' at ({}, {}, {})",
            self.name(),
            ctx.x(),
            ctx.y(),
            ctx.z()
        );

        self.build_geometry(&ctx, session)?;
        self.build_children(&ctx, session)?;
        Ok(group)
    }

    /// Own cut items followed by every child's, depth first.
    fn all_cut_items(&self) -> Vec<CutItem> {
        let mut items = self.base().cut_items().to_vec();
        for child in self.children() {
            items.extend(child.all_cut_items());
        }
        items
    }

    fn all_hardware_items(&self) -> Vec<HardwareItem> {
        let mut items = self.base().hardware_items().to_vec();
        for child in self.children() {
            items.extend(child.all_hardware_items());
        }
        items
    }

    /// Problems that would make a build produce degenerate geometry.
    fn validate(&self) -> Vec<LayoutError> {
        self.base().validate()
    }

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// A part with an open/closed state: drawers slide, doors swing.
///
/// Opening only changes the part's own transform; its records are untouched.
pub trait Openable {
    fn kind(&self) -> OpenableKind;

    /// Open by `amount` (mm for drawers, degrees for doors); `None` means fully.
    fn open(&mut self, amount: Option<f64>);

    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// Placement of the part's group relative to its closed position.
    fn transform(&self) -> Isometry3<f64>;

    /// Group the part was built into.
    fn group(&self) -> Option<GroupHandle>;

    fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open(None);
        }
    }
}
