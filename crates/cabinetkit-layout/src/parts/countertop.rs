//! Worktop spanning a row of lower cabinets

use cabinetkit_core::{materials::WORKTOP, CutItem, EdgeBanding, PanelPlacement};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THICKNESS: f64 = 38.0;
pub const DEFAULT_OVERHANG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countertop {
    pub width: f64,
    /// Full depth, overhang included.
    pub depth: f64,
    pub thickness: f64,
    /// How far the worktop reaches past the cabinet fronts.
    pub overhang: f64,
}

impl Countertop {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            thickness: DEFAULT_THICKNESS,
            overhang: DEFAULT_OVERHANG,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_overhang(mut self, overhang: f64) -> Self {
        self.overhang = overhang;
        self
    }

    /// Worktop resting at height `z` over cabinets whose fronts are at `y`.
    pub fn placement(&self, x: f64, y: f64, z: f64) -> PanelPlacement {
        PanelPlacement::horizontal(
            "Worktop",
            Point3::new(x, y - self.overhang, z),
            self.width,
            self.depth,
            self.thickness,
        )
    }

    pub fn cut_item(&self, owner: &str, front_edge: f64) -> CutItem {
        CutItem::new("Worktop", self.width, self.depth, self.thickness, WORKTOP)
            .owned_by(owner)
            .with_edges(EdgeBanding::front_only(front_edge))
    }
}
