//! # CabinetKit Core
//!
//! Value types shared by every CabinetKit crate: the immutable build
//! [`Context`], the [`GeometrySink`] boundary and panel primitive, the part
//! records that make up cut and hardware lists, and the material catalog.

pub mod context;
pub mod cut_item;
pub mod error;
pub mod hardware_item;
pub mod materials;
pub mod panel;
pub mod sink;

pub use context::{Context, Rotation};
pub use cut_item::{CutGroupKey, CutItem, EdgeBanding};
pub use error::{ensure_positive, LayoutError, LayoutResult};
pub use hardware_item::{HardwareGroupKey, HardwareItem, HardwareKind};
pub use materials::{sheet_size, Material, MaterialCatalog, MaterialKey, MaterialKind, SheetSize};
pub use panel::{Bounds, Orientation, PanelPlacement};
pub use sink::{
    GeometrySink, GroupHandle, NullSink, PanelHandle, RecordedGroup, RecordedPanel, RecordingSink,
};
