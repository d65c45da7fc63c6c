//! Argument groups and helpers shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use tiling::config::ConfigFile;
use tiling::{ColorMode, GridConfig, ImageDimensions, WriteOptions};

use crate::error::CliError;

/// Tile size and stride. Unset values come from the `[grid]` config section.
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Tile edge length in pixels
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Step between tile origins (defaults to the tile size)
    #[arg(long)]
    pub stride: Option<u32>,
}

impl GridArgs {
    /// Resolve the grid configuration. CLI takes precedence, then config.
    pub fn resolve(&self, config: &ConfigFile) -> Result<GridConfig, CliError> {
        let size = self.size.unwrap_or(config.grid.size);
        let stride = match (self.size, self.stride) {
            (_, Some(stride)) => Some(stride),
            // explicit size without stride: edge-to-edge
            (Some(_), None) => None,
            (None, None) => config.grid.stride,
        };
        Ok(GridConfig::new(size, stride)?)
    }
}

/// Target image size, taken from a reference image or given explicitly.
#[derive(Debug, Clone, Args)]
pub struct DimensionArgs {
    /// Reference image whose size defines the grid
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub like: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, requires = "width")]
    pub height: Option<u32>,
}

impl DimensionArgs {
    /// Image size, reading only the header of a reference image.
    pub fn dimensions(&self) -> Result<ImageDimensions, CliError> {
        match (&self.like, self.width, self.height) {
            (Some(path), _, _) => {
                let (width, height) = image::image_dimensions(path).map_err(|e| {
                    CliError::Args(format!("cannot read size of {}: {}", path.display(), e))
                })?;
                Ok(ImageDimensions::new(width, height))
            }
            (None, Some(width), Some(height)) => Ok(ImageDimensions::new(width, height)),
            _ => Err(CliError::Args(
                "either --like IMAGE or both --width and --height are required".to_string(),
            )),
        }
    }

    /// Placeholder image with the target size, used to bind a grid.
    pub fn placeholder(&self) -> Result<DynamicImage, CliError> {
        let dims = self.dimensions()?;
        Ok(DynamicImage::new_luma8(dims.width, dims.height))
    }
}

/// Canvas color mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CanvasMode {
    /// 8-bit grayscale
    L,
    /// 8-bit grayscale with alpha
    La,
    /// 8-bit RGB
    Rgb,
    /// 8-bit RGB with alpha
    Rgba,
}

impl From<CanvasMode> for ColorMode {
    fn from(mode: CanvasMode) -> Self {
        match mode {
            CanvasMode::L => ColorMode::L,
            CanvasMode::La => ColorMode::La,
            CanvasMode::Rgb => ColorMode::Rgb,
            CanvasMode::Rgba => ColorMode::Rgba,
        }
    }
}

/// Resolve the canvas mode from CLI args and config.
pub fn resolve_color_mode(cli_mode: Option<CanvasMode>, config: &ConfigFile) -> ColorMode {
    cli_mode
        .map(ColorMode::from)
        .unwrap_or(config.assemble.mode)
}

/// Output directory, prefix and format overrides.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory receiving tile files
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// File name prefix (defaults to the source file name)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Image format extension, e.g. png or jpg
    #[arg(long)]
    pub format: Option<String>,

    /// Also write copies rotated by 90, 180 and 270 degrees
    #[arg(long)]
    pub rotate: bool,

    /// Also write vertically and horizontally flipped copies
    #[arg(long)]
    pub flip: bool,
}

impl OutputArgs {
    /// Merge with the `[output]` config section. CLI takes precedence.
    pub fn resolve(&self, config: &ConfigFile) -> WriteOptions {
        let mut options = config.write_options();
        if let Some(out) = &self.out {
            options.target_dir = out.clone();
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = Some(prefix.clone());
        }
        if let Some(format) = &self.format {
            options.extension = format.trim_start_matches('.').to_string();
        }
        options.rotate |= self.rotate;
        options.flip |= self.flip;
        options
    }
}

/// Progress bar for a known number of tiles.
pub fn tile_progress(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let style =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} tiles ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
    progress.set_style(style);
    progress
}

/// Expand tile arguments: files pass through, directories become their
/// `*.<extension>` entries in sorted order.
pub fn expand_tile_paths(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>, CliError> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(glob_dir(input, extension)?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn glob_dir(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, CliError> {
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );
    let mut paths = glob::glob(&pattern)
        .map_err(|e| CliError::Glob(format!("{}: {}", pattern, e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::Glob(e.to_string()))?;
    paths.sort();
    Ok(paths)
}
