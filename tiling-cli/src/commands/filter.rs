//! `tiling filter`: write only tiles whose mean intensity lies strictly
//! between two thresholds.

use std::path::PathBuf;

use clap::Args;
use tiling::config::ConfigFile;
use tiling::export::{TileWriter, WriteSummary};
use tiling::filter::{mean_intensity, FilterThresholds};
use tiling::Tiling;

use super::common::{GridArgs, OutputArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Source image
    pub source: PathBuf,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Lower mean threshold (exclusive)
    #[arg(long)]
    pub lower: Option<f64>,

    /// Upper mean threshold (exclusive)
    #[arg(long)]
    pub upper: Option<f64>,

    /// List passing tiles without writing them
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl FilterArgs {
    fn thresholds(&self, config: &ConfigFile) -> FilterThresholds {
        let defaults = config.filter_thresholds();
        FilterThresholds::new(
            self.lower.unwrap_or(defaults.lower),
            self.upper.unwrap_or(defaults.upper),
        )
    }
}

/// Run the filter command.
pub fn run(args: FilterArgs, config: &ConfigFile) -> Result<(), CliError> {
    let grid_config = args.grid.resolve(config)?;
    let thresholds = args.thresholds(config);

    let mut tiling = Tiling::new(grid_config);
    tiling.apply(args.source.as_path())?;
    let grid = tiling.bound()?;

    if args.list {
        let mut kept = 0;
        for (rect, image) in grid.filter_tiles(thresholds) {
            let mean = mean_intensity(&image).unwrap_or_default();
            println!("{}  mean {:.2}", rect, mean);
            kept += 1;
        }
        println!(
            "{} of {} tiles within ({}, {})",
            kept,
            grid.tile_count(),
            thresholds.lower,
            thresholds.upper
        );
        return Ok(());
    }

    let options = args.output.resolve(config);
    let writer = TileWriter::new(tiling.codec().as_ref(), &options, grid.source_name())?;
    let mut summary = WriteSummary::default();
    for (rect, image) in grid.filter_tiles(thresholds) {
        writer.write(&rect, &image, &mut summary)?;
    }

    println!(
        "Wrote {} of {} tiles ({} derivatives) to {}",
        summary.tiles_written,
        grid.tile_count(),
        summary.derivatives_written,
        options.target_dir.display()
    );
    Ok(())
}
