//! Build context
//!
//! A [`Context`] is the accumulated origin a component is built at, together
//! with the group its geometry goes into. Contexts are values: moving always
//! produces a new context via [`Context::offset`].

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LayoutError, LayoutResult};
use crate::sink::GroupHandle;

/// Rotation of an assembly about the vertical axis, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Parse a rotation in degrees. Only the four quarter turns are accepted.
    pub fn from_degrees(degrees: i32) -> LayoutResult<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(LayoutError::invalid_dimensions(
                "context",
                format!("rotation must be a multiple of 90 degrees, got {}", other),
            )),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Immutable origin and parent group for one build step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Context {
    x: f64,
    y: f64,
    z: f64,
    rotation: Rotation,
    parent: Option<GroupHandle>,
}

impl Context {
    /// Root context at the world origin with no parent group.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::default()
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Group new geometry is emitted into (`None` means the sink's root).
    pub fn parent(&self) -> Option<GroupHandle> {
        self.parent
    }

    /// Derive a child context moved by the given deltas.
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
            ..*self
        }
    }

    pub fn offset_by(&self, delta: Vector3<f64>) -> Self {
        self.offset(delta.x, delta.y, delta.z)
    }

    /// Same origin, geometry redirected into `group`.
    pub fn with_parent(&self, group: GroupHandle) -> Self {
        Self {
            parent: Some(group),
            ..*self
        }
    }

    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}
