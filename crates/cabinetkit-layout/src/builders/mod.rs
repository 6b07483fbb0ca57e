//! Feature builders
//!
//! Each builder takes the resolved [`Carcass`] envelope of one assembly and
//! turns one furniture feature into panel placements and records. The
//! assembly runs them in a fixed order: body, sections, shelves, drawers,
//! drawer rows, doors.

pub mod body;
pub mod door;
pub mod drawer;
pub mod drawer_row;
pub mod section;
pub mod shelf;

pub use body::{BodyBuilder, StretcherMode, Stretchers};
pub use door::{DoorBuilder, DoorsSpec};
pub use drawer::{DrawerBuilder, DrawerOptions, DrawerSpec, DrawerStack};
pub use drawer_row::{stacked_rows_height, DrawerRowBuilder, DrawerRowSpec, RowColumns};
pub use section::{resolve_sections, SectionBuilder, SectionSpec};
pub use shelf::{ShelfBuilder, ShelfSpec};

use cabinetkit_core::{CutItem, HardwareItem, LayoutError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::parts::{Door, Drawer};
use crate::support::Support;

/// Shell panels that can be left out of an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPart {
    Bottom,
    Top,
    Back,
    LeftSide,
    RightSide,
}

impl SkipPart {
    pub const ALL: [SkipPart; 5] = [
        Self::Bottom,
        Self::Top,
        Self::Back,
        Self::LeftSide,
        Self::RightSide,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Back => "back",
            Self::LeftSide => "left_side",
            Self::RightSide => "right_side",
        }
    }
}

impl fmt::Display for SkipPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SkipPart {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|part| part.token() == s)
            .ok_or_else(|| LayoutError::UnknownPart(s.to_string()))
    }
}

/// Interior of an assembly, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub inner_width: f64,
    pub inner_depth: f64,
    /// Gap between the inside faces of bottom and top.
    pub interior_height: f64,
    pub side_height: f64,
}

impl Envelope {
    pub fn resolve(
        width: f64,
        height: f64,
        depth: f64,
        thickness: f64,
        back_thickness: f64,
        support: &Support,
    ) -> Self {
        let side_height = height - support.side_height_reduction();
        let top_underside = support.side_start_z() + side_height - thickness;
        let bottom_top = support.bottom_z() + thickness;
        Self {
            inner_width: width - 2.0 * thickness,
            inner_depth: depth - back_thickness,
            interior_height: top_underside - bottom_top,
            side_height,
        }
    }
}

/// Resolved envelope of one assembly.
///
/// Everything derived from it is recomputed on demand since it depends on
/// the support and on which panels are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Carcass {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
    pub back_thickness: f64,
    pub support: Support,
    /// Effective skip set, `Top` included when stretchers replace it.
    pub skip: BTreeSet<SkipPart>,
    /// Display name of the carcass sheet.
    pub material: String,
    pub back_material: String,
    pub front_edge: f64,
}

impl Carcass {
    pub fn has_part(&self, part: SkipPart) -> bool {
        !self.skip.contains(&part)
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::resolve(
            self.width,
            self.height,
            self.depth,
            self.thickness,
            self.back_thickness,
            &self.support,
        )
    }

    pub fn side_height(&self) -> f64 {
        self.envelope().side_height
    }

    pub fn inner_width(&self) -> f64 {
        self.envelope().inner_width
    }

    pub fn inner_depth(&self) -> f64 {
        self.envelope().inner_depth
    }

    pub fn interior_height(&self) -> f64 {
        self.envelope().interior_height
    }

    /// Height above the origin where the interior starts.
    pub fn interior_base(&self) -> f64 {
        self.support.bottom_z() + self.thickness
    }

    /// A carcass sheet record owned by this assembly with its front edge banded.
    pub fn panel_cut(&self, name: impl Into<String>, length: f64, width: f64) -> CutItem {
        CutItem::new(name, length, width, self.thickness, self.material.clone())
            .owned_by(self.name.clone())
            .edge(self.front_edge, 0.0, 0.0, 0.0)
    }
}

/// Records and openable parts produced by one builder.
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub cut_items: Vec<CutItem>,
    pub hardware_items: Vec<HardwareItem>,
    pub drawers: Vec<Drawer>,
    pub doors: Vec<Door>,
}

impl BuildOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: BuildOutput) {
        self.cut_items.extend(other.cut_items);
        self.hardware_items.extend(other.hardware_items);
        self.drawers.extend(other.drawers);
        self.doors.extend(other.doors);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// 800×450×400 chipboard carcass on the given support.
    pub fn carcass(support: Support) -> Carcass {
        Carcass {
            name: "Cabinet".to_string(),
            width: 800.0,
            height: 450.0,
            depth: 400.0,
            thickness: 18.0,
            back_thickness: 4.0,
            support,
            skip: BTreeSet::new(),
            material: "Chipboard".to_string(),
            back_material: "Hardboard".to_string(),
            front_edge: 2.0,
        }
    }
}
