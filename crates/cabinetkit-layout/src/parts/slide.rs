//! Drawer slides

use cabinetkit_core::{HardwareItem, HardwareKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slide lengths stocked, in mm.
pub const STANDARD_LENGTHS: [f64; 7] = [250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0];

/// Space kept free between the slide's rear end and the cabinet back.
pub const DEPTH_CLEARANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    #[default]
    BallBearing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    Full,
    Partial,
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// Longest standard length that fits `depth - clearance`, else the shortest one.
pub fn length_for_depth(depth: f64, clearance: f64) -> f64 {
    let target = depth - clearance;
    STANDARD_LENGTHS
        .iter()
        .copied()
        .filter(|&l| l <= target)
        .reduce(f64::max)
        .unwrap_or(STANDARD_LENGTHS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub kind: SlideKind,
    pub length: f64,
    /// Profile height.
    pub height: f64,
    /// Thickness per side.
    pub thickness: f64,
    pub extension: Extension,
    /// Rated load in kg.
    pub load_capacity: f64,
    pub soft_close: bool,
}

impl Slide {
    /// Full-extension ball-bearing slide of the given length.
    pub fn ball_bearing(length: f64, soft_close: bool) -> Self {
        Self {
            kind: SlideKind::BallBearing,
            length,
            height: 35.0,
            thickness: 13.0,
            extension: Extension::Full,
            load_capacity: 25.0,
            soft_close,
        }
    }

    /// Pick the slide for a cabinet of the given depth.
    pub fn for_depth(kind: SlideKind, depth: f64, soft_close: bool) -> Self {
        match kind {
            SlideKind::BallBearing => {
                Self::ball_bearing(length_for_depth(depth, DEPTH_CLEARANCE), soft_close)
            }
        }
    }

    /// How much narrower the drawer box is than its opening (both sides).
    pub fn width_reduction(&self) -> f64 {
        2.0 * self.thickness
    }

    pub fn hardware_name(&self) -> String {
        let mut name = match self.kind {
            SlideKind::BallBearing => "Ball-bearing slides".to_string(),
        };
        if self.soft_close {
            name.push_str(" (soft close)");
        }
        name
    }

    /// One pair of slides per drawer.
    pub fn hardware_item(&self, owner: &str) -> HardwareItem {
        HardwareItem::new(HardwareKind::Slide, 1)
            .named(self.hardware_name())
            .owned_by(owner)
            .with_spec("length", self.length)
            .with_spec("height", self.height)
            .with_spec("extension", self.extension)
            .with_spec("load_capacity", self.load_capacity)
    }
}
