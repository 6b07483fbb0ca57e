use anyhow::Context as _;
use cabinetkit::{build_design, init_logging, BuildConfig, Design};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Lay out a cabinet, wardrobe or kitchen design
///
/// Prints the panel count, cut list and hardware list as JSON.
#[derive(Parser, Debug)]
#[command(name = "cabinetkit")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")"))]
#[command(about = "Parametric furniture layout", long_about = None)]
struct Cli {
    /// Design file (JSON)
    #[arg(value_name = "DESIGN")]
    design: PathBuf,

    /// Build configuration (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    let config = match &cli.config {
        Some(path) => BuildConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BuildConfig::default(),
    };

    let design = Design::load(&cli.design)?;
    let summary = build_design(&design, &config)?;
    info!(
        "{} panels, {} drawers, {} doors",
        summary.panels, summary.drawers, summary.doors
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
