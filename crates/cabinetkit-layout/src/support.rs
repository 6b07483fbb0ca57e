//! Support strategies
//!
//! A support decides where "zero" is for everything built inside an
//! assembly: where the sides start, where the bottom panel sits and how much
//! shorter the sides are than the nominal height.
//!
//! | variant | side start | bottom | side reduction |
//! |---|---|---|---|
//! | Flush  | 0 | 0 | 0 |
//! | Plinth | 0 | h | 0 |
//! | Legs   | h | h | h |

use cabinetkit_core::{CutItem, EdgeBanding, HardwareItem, HardwareKind, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Legs per cabinet when the count is derived from the width.
pub fn leg_count_for_width(width: f64) -> u32 {
    if width > 800.0 {
        6
    } else {
        4
    }
}

fn default_leg_count() -> u32 {
    4
}

fn default_adjustable() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Support {
    /// Sides stand on the floor, bottom at floor level.
    #[default]
    Flush,
    /// Sides run to the floor, the bottom panel is raised by `height`.
    Plinth {
        height: f64,
        #[serde(default)]
        front_panel: bool,
    },
    /// The whole carcass is raised by `height`; legs are hardware only.
    Legs {
        height: f64,
        #[serde(default = "default_leg_count")]
        count: u32,
        #[serde(default = "default_adjustable")]
        adjustable: bool,
    },
}

impl Support {
    pub fn plinth(height: f64) -> Self {
        Self::Plinth {
            height,
            front_panel: false,
        }
    }

    pub fn plinth_with_front(height: f64) -> Self {
        Self::Plinth {
            height,
            front_panel: true,
        }
    }

    /// Four adjustable legs.
    pub fn legs(height: f64) -> Self {
        Self::Legs {
            height,
            count: default_leg_count(),
            adjustable: true,
        }
    }

    /// Adjustable legs, counted for a cabinet of `width`.
    pub fn legs_for_width(height: f64, width: f64) -> Self {
        Self::Legs {
            height,
            count: leg_count_for_width(width),
            adjustable: true,
        }
    }

    pub fn height(&self) -> f64 {
        match *self {
            Self::Flush => 0.0,
            Self::Plinth { height, .. } | Self::Legs { height, .. } => height,
        }
    }

    pub fn side_start_z(&self) -> f64 {
        match *self {
            Self::Flush | Self::Plinth { .. } => 0.0,
            Self::Legs { height, .. } => height,
        }
    }

    pub fn bottom_z(&self) -> f64 {
        match *self {
            Self::Flush => 0.0,
            Self::Plinth { height, .. } | Self::Legs { height, .. } => height,
        }
    }

    pub fn side_height_reduction(&self) -> f64 {
        match *self {
            Self::Flush | Self::Plinth { .. } => 0.0,
            Self::Legs { height, .. } => height,
        }
    }

    pub fn has_geometry(&self) -> bool {
        matches!(
            self,
            Self::Plinth {
                front_panel: true,
                ..
            }
        )
    }

    /// Plinth board between the sides, set back by `inset` from the front.
    ///
    /// `origin` is the assembly origin, `width` its outer width.
    pub fn geometry(
        &self,
        origin: Point3<f64>,
        width: f64,
        thickness: f64,
        inset: f64,
    ) -> Option<PanelPlacement> {
        match *self {
            Self::Plinth {
                height,
                front_panel: true,
            } => Some(PanelPlacement::back(
                "Plinth",
                Point3::new(origin.x + thickness, origin.y + inset, origin.z),
                width - 2.0 * thickness,
                height,
                thickness,
            )),
            _ => None,
        }
    }

    /// Cut records for the support geometry, if any.
    pub fn cut_items(
        &self,
        owner: &str,
        width: f64,
        thickness: f64,
        material: &str,
        front_edge: f64,
    ) -> Vec<CutItem> {
        if !self.has_geometry() {
            return Vec::new();
        }
        vec![CutItem::new(
            "Plinth",
            width - 2.0 * thickness,
            self.height(),
            thickness,
            material,
        )
        .owned_by(owner)
        .with_edges(EdgeBanding::front_only(front_edge))]
    }

    pub fn hardware(&self, owner: &str) -> Vec<HardwareItem> {
        match *self {
            Self::Legs {
                height,
                count,
                adjustable,
            } => {
                let name = if adjustable { "Adjustable leg" } else { "Leg" };
                vec![HardwareItem::new(HardwareKind::Leg, count)
                    .named(format!("{} {}mm", name, height))
                    .owned_by(owner)]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flush => write!(f, "flush"),
            Self::Plinth { height, .. } => write!(f, "plinth {}mm", height),
            Self::Legs { height, count, .. } => write!(f, "{} legs {}mm", count, height),
        }
    }
}
