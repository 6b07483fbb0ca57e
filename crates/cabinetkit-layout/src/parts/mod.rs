//! Physical parts that size themselves from an opening

pub mod countertop;
pub mod door;
pub mod drawer;
pub mod drawer_box;
pub mod slide;

pub use countertop::Countertop;
pub use door::{Door, DoorParams, DoorStyle, FrameOptions, HingeSide};
pub use drawer::{Drawer, DrawerParams};
pub use drawer_box::DrawerBox;
pub use slide::{Extension, Slide, SlideKind};
