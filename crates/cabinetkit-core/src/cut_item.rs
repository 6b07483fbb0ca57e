//! Cut items
//!
//! A [`CutItem`] is one panel destined for the cutting list. Length and width
//! are normalised on construction so that `length >= width`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Edge banding thickness per side, in mm. Zero means no banding.
///
/// Front and back run along the length, left and right along the width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeBanding {
    pub front: f64,
    pub back: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgeBanding {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all(thickness: f64) -> Self {
        Self {
            front: thickness,
            back: thickness,
            left: thickness,
            right: thickness,
        }
    }

    pub fn front_only(thickness: f64) -> Self {
        Self {
            front: thickness,
            ..Self::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.front <= 0.0 && self.back <= 0.0 && self.left <= 0.0 && self.right <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutItem {
    pub name: String,
    length: f64,
    width: f64,
    pub thickness: f64,
    pub material: String,
    /// Name of the component the panel belongs to.
    pub owner: Option<String>,
    pub quantity: u32,
    edges: EdgeBanding,
}

impl CutItem {
    pub fn new(
        name: impl Into<String>,
        length: f64,
        width: f64,
        thickness: f64,
        material: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            length: length.max(width),
            width: length.min(width),
            thickness,
            material: material.into(),
            owner: None,
            quantity: 1,
            edges: EdgeBanding::none(),
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set banding per side.
    pub fn edge(mut self, front: f64, back: f64, left: f64, right: f64) -> Self {
        self.edges = EdgeBanding {
            front,
            back,
            left,
            right,
        };
        self
    }

    pub fn edge_all(mut self, thickness: f64) -> Self {
        self.edges = EdgeBanding::all(thickness);
        self
    }

    pub fn with_edges(mut self, edges: EdgeBanding) -> Self {
        self.edges = edges;
        self
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn edges(&self) -> EdgeBanding {
        self.edges
    }

    /// Area in m².
    pub fn area(&self) -> f64 {
        self.length * self.width / 1_000_000.0
    }

    /// Total banded edge in metres.
    pub fn edge_length(&self) -> f64 {
        let mut total = 0.0;
        if self.edges.front > 0.0 {
            total += self.length;
        }
        if self.edges.back > 0.0 {
            total += self.length;
        }
        if self.edges.left > 0.0 {
            total += self.width;
        }
        if self.edges.right > 0.0 {
            total += self.width;
        }
        total / 1000.0
    }

    pub fn group_key(&self) -> CutGroupKey {
        CutGroupKey {
            owner: self.owner.clone(),
            name: self.name.clone(),
            length: self.length,
            width: self.width,
            thickness: self.thickness,
            material: self.material.clone(),
        }
    }
}

impl fmt::Display for CutItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}×{}×{} ({})",
            self.name, self.length, self.width, self.thickness, self.material
        )
    }
}

/// Identity used to tally identical panels: (owner, name, length, width, thickness, material).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutGroupKey {
    pub owner: Option<String>,
    pub name: String,
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    pub material: String,
}

impl CutGroupKey {
    // -0.0 and 0.0 must hash alike.
    fn bits(value: f64) -> u64 {
        if value == 0.0 {
            0
        } else {
            value.to_bits()
        }
    }
}

impl PartialEq for CutGroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.name == other.name
            && Self::bits(self.length) == Self::bits(other.length)
            && Self::bits(self.width) == Self::bits(other.width)
            && Self::bits(self.thickness) == Self::bits(other.thickness)
            && self.material == other.material
    }
}

impl Eq for CutGroupKey {}

impl Hash for CutGroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
        Self::bits(self.length).hash(state);
        Self::bits(self.width).hash(state);
        Self::bits(self.thickness).hash(state);
        self.material.hash(state);
    }
}
