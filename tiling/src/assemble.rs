//! Reassembly of tiles into a single image.
//!
//! Tiles are pasted onto a blank canvas with the dimensions of the bound
//! source image. Each input says where it goes in one of three ways:
//!
//! | Input                  | Placement                                         |
//! |------------------------|---------------------------------------------------|
//! | `Identifier(path)`     | `x_<left>_y_<top>` parsed from the file name       |
//! | `Positioned(rect, img)`| `rect`'s top-left corner, taken as-is              |
//! | `Bare(img)`            | next rectangle of the canonical row-major order    |
//!
//! Identifiers naming a rotated or flipped derivative are skipped. Bare
//! images must therefore arrive sorted left-to-right, top-to-bottom.
//!
//! A paste never reaches past its cell: identifier tiles cover
//! `tile_size × tile_size` from their parsed corner, the others cover their
//! rectangle. Larger images are cropped to the cell, and whatever falls
//! outside the canvas (including negative identifier coordinates) is clipped.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use image::{imageops, DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::codec::ImageCodec;
use crate::error::TilingError;
use crate::grid::{BoundGrid, ImageDimensions, TileRect};
use crate::identifier::{parse_identifier, ParsedIdentifier};

/// Pixel layout of the assembled canvas.
///
/// Names follow the common `L` / `LA` / `RGB` / `RGBA` mode strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// 8-bit grayscale.
    L,
    /// 8-bit grayscale with alpha.
    La,
    /// 8-bit RGB.
    #[default]
    Rgb,
    /// 8-bit RGB with alpha.
    Rgba,
}

impl ColorMode {
    /// Allocate a zero-filled (black, fully transparent) canvas.
    pub fn blank_canvas(&self, dimensions: ImageDimensions) -> DynamicImage {
        let ImageDimensions { width, height } = dimensions;
        match self {
            ColorMode::L => DynamicImage::new_luma8(width, height),
            ColorMode::La => DynamicImage::new_luma_a8(width, height),
            ColorMode::Rgb => DynamicImage::new_rgb8(width, height),
            ColorMode::Rgba => DynamicImage::new_rgba8(width, height),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::L => "L",
            ColorMode::La => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(ColorMode::L),
            "LA" => Ok(ColorMode::La),
            "RGB" => Ok(ColorMode::Rgb),
            "RGBA" => Ok(ColorMode::Rgba),
            _ => Err(TilingError::InvalidConfig(format!(
                "unknown color mode '{}' (expected L, LA, RGB or RGBA)",
                s
            ))),
        }
    }
}

/// One tile handed to [`assemble`].
#[derive(Debug, Clone)]
pub enum TileInput {
    /// Path of a tile file whose name encodes its position.
    Identifier(PathBuf),
    /// Image with an explicit target rectangle.
    Positioned(TileRect, DynamicImage),
    /// Image without position; placed by traversal order.
    Bare(DynamicImage),
}

impl From<PathBuf> for TileInput {
    fn from(path: PathBuf) -> Self {
        TileInput::Identifier(path)
    }
}

impl From<&str> for TileInput {
    fn from(path: &str) -> Self {
        TileInput::Identifier(PathBuf::from(path))
    }
}

impl From<String> for TileInput {
    fn from(path: String) -> Self {
        TileInput::Identifier(PathBuf::from(path))
    }
}

impl From<(TileRect, DynamicImage)> for TileInput {
    fn from((rect, image): (TileRect, DynamicImage)) -> Self {
        TileInput::Positioned(rect, image)
    }
}

impl From<DynamicImage> for TileInput {
    fn from(image: DynamicImage) -> Self {
        TileInput::Bare(image)
    }
}

/// Result of an assembly run with placement counts.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub canvas: DynamicImage,
    /// Tiles pasted onto the canvas.
    pub placed: usize,
    /// Derivative identifiers that were skipped.
    pub skipped: usize,
}

/// Assemble tiles onto a canvas the size of the bound image.
///
/// Inputs are consumed once, in order; later tiles overwrite earlier ones
/// where they overlap. Pasting replaces pixels, is bounded to the tile's
/// cell and clips at the canvas edge.
///
/// # Errors
///
/// - `TilingError::Parse` if a non-derivative identifier lacks
///   `x_<left>_y_<top>`
/// - `TilingError::GridExhausted` if more bare images are given than the grid
///   has rectangles
/// - `TilingError::Codec` if an identifier's file cannot be decoded
///
/// Any error aborts the whole call.
///
/// # Example
///
/// ```
/// use image::DynamicImage;
/// use tiling::assemble::{assemble, ColorMode, TileInput};
/// use tiling::codec::FsCodec;
/// use tiling::grid::{BoundGrid, GridConfig};
///
/// let config = GridConfig::new(2, None).unwrap();
/// let grid = BoundGrid::new(config, DynamicImage::new_rgb8(4, 2), "");
///
/// let tiles = vec![
///     TileInput::Bare(DynamicImage::new_rgb8(2, 2)),
///     TileInput::Bare(DynamicImage::new_rgb8(2, 2)),
/// ];
/// let canvas = assemble(&grid, &FsCodec::new(), tiles, ColorMode::Rgb).unwrap();
/// assert_eq!((canvas.width(), canvas.height()), (4, 2));
/// ```
pub fn assemble<I>(
    grid: &BoundGrid,
    codec: &dyn ImageCodec,
    tiles: I,
    mode: ColorMode,
) -> Result<DynamicImage, TilingError>
where
    I: IntoIterator,
    I::Item: Into<TileInput>,
{
    assemble_detailed(grid, codec, tiles, mode).map(|assembly| assembly.canvas)
}

/// Like [`assemble`], also reporting how many tiles were placed and skipped.
pub fn assemble_detailed<I>(
    grid: &BoundGrid,
    codec: &dyn ImageCodec,
    tiles: I,
    mode: ColorMode,
) -> Result<Assembly, TilingError>
where
    I: IntoIterator,
    I::Item: Into<TileInput>,
{
    let tile_size = grid.config().tile_size();
    let mut canvas = mode.blank_canvas(grid.dimensions());
    let mut rects = grid.tile_rects();
    let mut placed = 0;
    let mut skipped = 0;

    for tile in tiles {
        match tile.into() {
            TileInput::Identifier(path) => match parse_identifier(&path)? {
                ParsedIdentifier::Derivative => {
                    debug!(path = %path.display(), "Skipping derivative tile");
                    skipped += 1;
                }
                ParsedIdentifier::Position { left, top } => {
                    let image = codec.decode(&path)?;
                    paste(&mut canvas, &image, left, top, (tile_size, tile_size));
                    placed += 1;
                }
            },
            TileInput::Positioned(rect, image) => {
                paste_at_rect(&mut canvas, &image, &rect);
                placed += 1;
            }
            TileInput::Bare(image) => {
                let rect = rects.next().ok_or(TilingError::GridExhausted {
                    available: grid.tile_count(),
                })?;
                paste_at_rect(&mut canvas, &image, &rect);
                placed += 1;
            }
        }
    }

    info!(
        dimensions = %grid.dimensions(),
        mode = %mode,
        placed,
        skipped,
        "Assembled tiles"
    );
    Ok(Assembly {
        canvas,
        placed,
        skipped,
    })
}

fn paste_at_rect(canvas: &mut DynamicImage, tile: &DynamicImage, rect: &TileRect) {
    paste(
        canvas,
        tile,
        i64::from(rect.left),
        i64::from(rect.top),
        (rect.width(), rect.height()),
    );
}

/// Paste `tile` with its top-left corner at `(left, top)`, limited to a
/// `cell` of `(width, height)` and clipped to the canvas.
fn paste(canvas: &mut DynamicImage, tile: &DynamicImage, left: i64, top: i64, cell: (u32, u32)) {
    let width = tile.width().min(cell.0);
    let height = tile.height().min(cell.1);
    let off_canvas = left >= i64::from(canvas.width())
        || top >= i64::from(canvas.height())
        || left.saturating_add(i64::from(width)) <= 0
        || top.saturating_add(i64::from(height)) <= 0;
    if off_canvas || width == 0 || height == 0 {
        return;
    }

    if (width, height) == tile.dimensions() {
        imageops::replace(canvas, tile, left, top);
    } else {
        imageops::replace(canvas, &tile.crop_imm(0, 0, width, height), left, top);
    }
}
