//! CabinetKit Settings Crate
//!
//! Build configuration: the defaults a layout build reads, loaded from and
//! saved to JSON or TOML.

pub mod config;
pub mod error;

pub use config::{BuildConfig, EdgeBandingDefaults, MaterialDefaults};
pub use error::{SettingsError, SettingsResult};
