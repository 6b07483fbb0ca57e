//! Hardware items (fittings with a quantity).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// Closed set of fitting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareKind {
    Hinge,
    Handle,
    Slide,
    Lift,
    Leg,
    ShelfSupport,
    Rod,
    Hook,
    Connector,
    Screw,
    Confirmat,
}

impl HardwareKind {
    pub const ALL: [HardwareKind; 11] = [
        Self::Hinge,
        Self::Handle,
        Self::Slide,
        Self::Lift,
        Self::Leg,
        Self::ShelfSupport,
        Self::Rod,
        Self::Hook,
        Self::Connector,
        Self::Screw,
        Self::Confirmat,
    ];

    /// Name used when an item is created without one.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hinge => "Hinge",
            Self::Handle => "Handle",
            Self::Slide => "Drawer slides",
            Self::Lift => "Lift",
            Self::Leg => "Leg",
            Self::ShelfSupport => "Shelf support",
            Self::Rod => "Hanging rod",
            Self::Hook => "Hook",
            Self::Connector => "Connector",
            Self::Screw => "Screw",
            Self::Confirmat => "Confirmat screw",
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Hinge => "hinge",
            Self::Handle => "handle",
            Self::Slide => "slide",
            Self::Lift => "lift",
            Self::Leg => "leg",
            Self::ShelfSupport => "shelf_support",
            Self::Rod => "rod",
            Self::Hook => "hook",
            Self::Connector => "connector",
            Self::Screw => "screw",
            Self::Confirmat => "confirmat",
        }
    }
}

impl fmt::Display for HardwareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for HardwareKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.token() == s)
            .ok_or_else(|| LayoutError::UnknownPart(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareItem {
    pub kind: HardwareKind,
    pub name: String,
    pub quantity: u32,
    pub owner: Option<String>,
    /// Free-form specification, ordered so grouping is stable.
    pub specs: BTreeMap<String, String>,
}

impl HardwareItem {
    pub fn new(kind: HardwareKind, quantity: u32) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            quantity,
            owner: None,
            specs: BTreeMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.specs.insert(key.into(), value.to_string());
        self
    }

    pub fn spec(&self, key: &str) -> Option<&str> {
        self.specs.get(key).map(String::as_str)
    }

    /// Name plus length, size and soft-close when the specs carry them.
    pub fn description(&self) -> String {
        let mut desc = self.name.clone();
        if let Some(length) = self.spec("length") {
            desc.push_str(&format!(" {}mm", length));
        }
        if let Some(size) = self.spec("size") {
            desc.push_str(&format!(" {}", size));
        }
        if self.spec("soft_close") == Some("true") {
            desc.push_str(" soft-close");
        }
        desc
    }

    pub fn group_key(&self) -> HardwareGroupKey {
        HardwareGroupKey {
            kind: self.kind,
            name: self.name.clone(),
            specs: self.specs.clone(),
        }
    }
}

impl fmt::Display for HardwareItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.description(), self.quantity)
    }
}

/// Identity used to tally fittings: (kind, name, specs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardwareGroupKey {
    pub kind: HardwareKind,
    pub name: String,
    pub specs: BTreeMap<String, String>,
}
