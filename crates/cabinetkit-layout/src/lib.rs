//! # CabinetKit Layout
//!
//! Turns a configured component tree into panel placements and part
//! records.
//!
//! A build is one top-down pass. Each component resolves its own interior
//! from its panel thickness and support, emits its panels into a
//! [`GeometrySink`](cabinetkit_core::GeometrySink), then builds its children
//! in contexts offset from its own. Cut and hardware records are collected
//! bottom up afterwards.
//!
//! ```no_run
//! use cabinetkit_core::RecordingSink;
//! use cabinetkit_layout::{build_layout, Cabinet, SectionSpec};
//! use cabinetkit_settings::BuildConfig;
//!
//! let mut cabinet = Cabinet::new(800.0, 720.0, 560.0)
//!     .legs(100.0)
//!     .sections(&[SectionSpec::percent(40.0), SectionSpec::percent(60.0)])
//!     .shelf(300.0)
//!     .doors(2);
//!
//! let mut sink = RecordingSink::new();
//! let outcome = build_layout(&mut cabinet, &mut sink, &BuildConfig::default())?;
//! println!("{} panels, {} doors", sink.panel_count(), outcome.registry.len());
//! # Ok::<(), cabinetkit_core::LayoutError>(())
//! ```

pub mod builders;
pub mod cabinet;
pub mod column;
pub mod component;
pub mod distribute;
pub mod parts;
pub mod presets;
pub mod report;
pub mod session;
pub mod support;

pub use builders::{
    DoorsSpec, DrawerOptions, DrawerRowSpec, DrawerSpec, DrawerStack, RowColumns, SectionSpec,
    ShelfSpec, SkipPart, StretcherMode,
};
pub use cabinet::{Cabinet, CabinetSpec, Envelope, StretcherSpec};
pub use column::{Column, ColumnSpec};
pub use component::{Component, ComponentBase, Openable};
pub use distribute::{available_between, even_split, proportional_split};
pub use parts::{Countertop, Door, DoorStyle, Drawer, FrameOptions, HingeSide, SlideKind};
pub use presets::{CountertopSpec, Kitchen, KitchenSpec, RowSupport, Wardrobe, WardrobeSpec};
pub use report::{CutGroup, CutList, HardwareGroup, HardwareList, MaterialSummary, Report};
pub use session::{BuildSession, OpenableEntry, OpenableKind, OpenableRegistry};
pub use support::Support;

use cabinetkit_core::{Context, GeometrySink, GroupHandle, LayoutResult};
use cabinetkit_settings::BuildConfig;
use tracing::{info, warn};

/// What a finished build hands back besides the records on the tree.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Group the root component was built into.
    pub root: GroupHandle,
    /// Drawers and doors emitted during this build, by group.
    pub registry: OpenableRegistry,
}

/// Build `component` at the origin into `sink`.
///
/// Validation problems are logged but do not stop the build; call
/// [`Component::validate`] first to refuse them.
pub fn build_layout(
    component: &mut dyn Component,
    sink: &mut dyn GeometrySink,
    config: &BuildConfig,
) -> LayoutResult<BuildOutcome> {
    for problem in component.validate() {
        warn!("{}", problem);
    }

    let mut session = BuildSession::new(sink, config);
    session.registry_mut().clear();
    let root = component.build(&Context::new(), &mut session)?;
    let registry = session.into_registry();

    info!(
        "Built '{}': {} openable parts",
        component.name(),
        registry.len()
    );
    Ok(BuildOutcome { root, registry })
}
