//! Error types for the layout engine.
//!
//! Configuration warnings (unknown skip tokens and the like) are not errors;
//! they are logged and ignored. Everything here aborts the build of the
//! component that raised it.

use thiserror::Error;

/// Errors that can occur while configuring or building a layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A component envelope is not usable (zero or negative extent).
    #[error("Invalid dimensions for '{component}': {reason}")]
    InvalidDimensions { component: String, reason: String },

    /// A derived part dimension came out zero or negative.
    #[error("Degenerate geometry in '{part}': {dimension} = {value}")]
    DegenerateGeometry {
        part: String,
        dimension: String,
        value: f64,
    },

    /// Something required to build a feature was never configured.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A material key was required to resolve and did not.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// A part token could not be recognised.
    #[error("Unknown part: {0}")]
    UnknownPart(String),

    /// A section width token could not be parsed or resolved.
    #[error("Invalid section '{spec}': {reason}")]
    InvalidSection { spec: String, reason: String },
}

impl LayoutError {
    pub fn degenerate(part: impl Into<String>, dimension: impl Into<String>, value: f64) -> Self {
        Self::DegenerateGeometry {
            part: part.into(),
            dimension: dimension.into(),
            value,
        }
    }

    pub fn invalid_dimensions(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            component: component.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Fail with [`LayoutError::DegenerateGeometry`] unless `value` is strictly positive.
pub fn ensure_positive(part: &str, dimension: &str, value: f64) -> LayoutResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::degenerate(part, dimension, value))
    }
}
