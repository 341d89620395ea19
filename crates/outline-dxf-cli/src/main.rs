//! outline-dxf - board outline and mounting holes from Gerber/Excellon to DXF.
//!
//! Usage:
//!   outline-dxf [--min MM] [--max MM] [--dir PATH] [--output FILE]
//!
//! Looks for `*-Edge_Cuts.gbr` (or a Gerber declaring a profile function),
//! `*-PTH.drl` and `*-NPTH.drl` in the directory and writes
//! `<project>-outline-mounting-holes.dxf` next to them.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use outline_dxf::excellon::DEFAULT_MIN_DIAMETER_MM;
use outline_dxf::{convert, ConvertError, HoleFilter};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod discovery;
mod report;

/// Create a DXF with board outline and mounting holes from Gerber/Excellon files.
#[derive(Parser, Debug)]
#[command(name = "outline-dxf", version, about)]
struct Cli {
    /// Minimum drill diameter in mm to include as a mounting hole.
    #[arg(long = "min", value_name = "MM", default_value_t = DEFAULT_MIN_DIAMETER_MM)]
    min_hole_size: f64,

    /// Maximum drill diameter in mm to include as a mounting hole (default: no maximum).
    #[arg(long = "max", value_name = "MM")]
    max_hole_size: Option<f64>,

    /// Directory holding the Gerber and drill files.
    #[arg(long, value_name = "PATH", default_value = ".")]
    dir: PathBuf,

    /// Output file (default: derived from the outline file name).
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let filter = HoleFilter::new(cli.min_hole_size, cli.max_hole_size);
    if let Err(err) = filter.validate() {
        eprintln!("Error: {err}");
        return ExitCode::from(2);
    }

    match run(&cli, filter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, filter: HoleFilter) -> Result<()> {
    let inputs = discovery::discover(&cli.dir)?;
    info!(outline = %inputs.outline.display(), "using outline file");

    let outline_text = discovery::read_lossy(&inputs.outline)?;
    let drill_texts = inputs
        .drills()
        .map(discovery::read_lossy)
        .collect::<Result<Vec<String>, ConvertError>>()?;
    let drill_refs: Vec<&str> = drill_texts.iter().map(String::as_str).collect();

    let conversion = convert(&outline_text, &drill_refs, filter)
        .with_context(|| format!("Failed to convert {}", inputs.outline.display()))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| discovery::output_path(&inputs.outline));
    fs::write(&output, &conversion.document).map_err(|source| ConvertError::Io {
        path: output.clone(),
        source,
    })?;

    print!("{}", report::summary(&output, &conversion, filter));
    Ok(())
}
