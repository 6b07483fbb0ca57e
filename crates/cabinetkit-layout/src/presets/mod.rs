//! Ready-made arrangements of columns and cabinets

pub mod kitchen;
pub mod wardrobe;

pub use kitchen::{CountertopSpec, Kitchen, KitchenSpec, LowerRowSpec, RowSupport, UpperRowSpec};
pub use wardrobe::{Wardrobe, WardrobeSpec};
