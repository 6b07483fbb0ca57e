//! # CabinetKit
//!
//! A parametric furniture layout engine. A design (a cabinet, a wardrobe of
//! columns or a kitchen) is turned into exact panel placements plus the cut
//! list and hardware list needed to make it.
//!
//! ## Architecture
//!
//! CabinetKit is organized as a workspace with multiple crates:
//!
//! 1. **cabinetkit-core** - Build context, geometry sink, panels, part records, materials
//! 2. **cabinetkit-settings** - Build configuration loaded from JSON or TOML
//! 3. **cabinetkit-layout** - Components, supports, builders, presets and reports
//! 4. **cabinetkit** - This crate: design files, logging and the command line tool

pub mod types;

pub use cabinetkit_core::{
    Bounds, Context, CutItem, EdgeBanding, GeometrySink, GroupHandle, HardwareItem, HardwareKind,
    LayoutError, LayoutResult, Material, MaterialCatalog, NullSink, PanelPlacement, RecordingSink,
};
pub use cabinetkit_layout::{
    build_layout, BuildOutcome, Cabinet, CabinetSpec, Column, Component, CutList, HardwareList,
    Kitchen, KitchenSpec, Openable, OpenableKind, Report, Support, Wardrobe, WardrobeSpec,
};
pub use cabinetkit_settings::{BuildConfig, SettingsError};
pub use types::{build_design, BuildSummary, Design};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, leaving stdout to the report
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
