//! Panel primitive
//!
//! Stateless placement routines. A panel is an axis-aligned slab described
//! by the corner nearest the origin, its extent along X/Y/Z and the axis its
//! thickness runs along. Positive extents always grow towards +X/+Y/+Z.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sink::{GeometrySink, GroupHandle, PanelHandle};

/// Plane a panel lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Lying in the XY plane: bottoms, tops, shelves, rails. Thickness along Z.
    Horizontal,
    /// Standing in the YZ plane: sides and partitions. Thickness along X.
    Side,
    /// Standing in the XZ plane: backs, facades, plinth boards. Thickness along Y.
    Back,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Side => write!(f, "side"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// True when `other` lies inside `self`, allowing `tolerance` on every face.
    pub fn contains(&self, other: &Bounds, tolerance: f64) -> bool {
        other.min.x >= self.min.x - tolerance
            && other.min.y >= self.min.y - tolerance
            && other.min.z >= self.min.z - tolerance
            && other.max.x <= self.max.x + tolerance
            && other.max.y <= self.max.y + tolerance
            && other.max.z <= self.max.z + tolerance
    }
}

/// One placement command handed to the geometry sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub label: String,
    pub origin: Point3<f64>,
    /// Size along world X, Y and Z.
    pub extent: Vector3<f64>,
    pub thickness: f64,
    pub orientation: Orientation,
}

impl PanelPlacement {
    /// Side panel: `height` along Z, `depth` along Y, `thickness` along X.
    pub fn side(
        label: impl Into<String>,
        origin: Point3<f64>,
        height: f64,
        depth: f64,
        thickness: f64,
    ) -> Self {
        Self {
            label: label.into(),
            origin,
            extent: Vector3::new(thickness, depth, height),
            thickness,
            orientation: Orientation::Side,
        }
    }

    /// Horizontal panel: `width` along X, `depth` along Y, `thickness` along Z.
    pub fn horizontal(
        label: impl Into<String>,
        origin: Point3<f64>,
        width: f64,
        depth: f64,
        thickness: f64,
    ) -> Self {
        Self {
            label: label.into(),
            origin,
            extent: Vector3::new(width, depth, thickness),
            thickness,
            orientation: Orientation::Horizontal,
        }
    }

    /// Back panel: `width` along X, `height` along Z, `thickness` along Y.
    pub fn back(
        label: impl Into<String>,
        origin: Point3<f64>,
        width: f64,
        height: f64,
        thickness: f64,
    ) -> Self {
        Self {
            label: label.into(),
            origin,
            extent: Vector3::new(width, thickness, height),
            thickness,
            orientation: Orientation::Back,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.origin, self.origin + self.extent)
    }

    /// Hand the placement to `sink` under `parent`.
    pub fn emit(&self, sink: &mut dyn GeometrySink, parent: Option<GroupHandle>) -> PanelHandle {
        sink.place_panel(parent, self)
    }
}

impl fmt::Display for PanelPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at ({:.1}, {:.1}, {:.1}) size {:.1}×{:.1}×{:.1}",
            self.label,
            self.orientation,
            self.origin.x,
            self.origin.y,
            self.origin.z,
            self.extent.x,
            self.extent.y,
            self.extent.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_panel_extent() {
        let p = PanelPlacement::side("Left side", Point3::new(0.0, 0.0, 100.0), 350.0, 396.0, 18.0);
        assert_eq!(p.extent, Vector3::new(18.0, 396.0, 350.0));
        assert_eq!(p.bounds().max, Point3::new(18.0, 396.0, 450.0));
        assert_eq!(p.orientation, Orientation::Side);
    }

    #[test]
    fn test_back_panel_extent() {
        let p = PanelPlacement::back("Back", Point3::new(0.0, 396.0, 0.0), 800.0, 450.0, 4.0);
        assert_eq!(p.extent, Vector3::new(800.0, 4.0, 450.0));
        assert_eq!(p.thickness, 4.0);
    }

    #[test]
    fn test_bounds_union_and_contains() {
        let a = Bounds::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0));
        let b = Bounds::new(Point3::new(5.0, -5.0, 0.0), Point3::new(20.0, 5.0, 5.0));
        let u = a.union(&b);

        assert_eq!(u.min, Point3::new(0.0, -5.0, 0.0));
        assert_eq!(u.max, Point3::new(20.0, 10.0, 10.0));
        assert!(u.contains(&a, 0.0));
        assert!(!a.contains(&b, 0.0));
        assert_eq!(u.size(), Vector3::new(20.0, 15.0, 10.0));
    }
}
