//! Writing tiles and their derivatives as image files.
//!
//! Every tile is written as `<prefix>_x_<left>_y_<top>.<ext>`. Optional
//! rotated and flipped copies are written next to it with the suffixes
//! described in [`crate::transform`]. The target directory is created when
//! missing; files already there are kept, and a file with the same name is
//! overwritten.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::codec::ImageCodec;
use crate::error::TilingError;
use crate::grid::{BoundGrid, TileRect};
use crate::identifier::TileIdentifier;
use crate::transform::{derivative_plan, Derivative};

/// Default directory for written tiles.
pub const DEFAULT_TARGET_DIR: &str = "tiles";

/// Default file extension (and therefore encoder) for written tiles.
pub const DEFAULT_EXTENSION: &str = "png";

/// Options for [`write_tiles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Directory receiving the tile files.
    pub target_dir: PathBuf,
    /// Also write copies rotated by 90, 180 and 270 degrees.
    pub rotate: bool,
    /// Also write vertically and horizontally flipped copies.
    pub flip: bool,
    /// File name prefix; `None` uses the source display name.
    pub prefix: Option<String>,
    /// File extension without the dot.
    pub extension: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            rotate: false,
            flip: false,
            prefix: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl WriteOptions {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Counts and paths of written files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Base tiles written.
    pub tiles_written: usize,
    /// Rotated/flipped copies written.
    pub derivatives_written: usize,
    /// Every written path, in write order.
    pub files: Vec<PathBuf>,
}

impl WriteSummary {
    /// Total number of files written.
    pub fn total(&self) -> usize {
        self.tiles_written + self.derivatives_written
    }
}

/// Writes individual tiles with a fixed prefix and derivative plan.
///
/// Construct one with [`TileWriter::new`], then feed it `(rect, image)`
/// pairs from any traversal (all tiles, filtered tiles, ...).
pub struct TileWriter<'a> {
    codec: &'a dyn ImageCodec,
    target_dir: &'a Path,
    extension: &'a str,
    prefix: String,
    plan: Vec<Derivative>,
}

impl<'a> TileWriter<'a> {
    /// Create a writer, creating the target directory if needed.
    ///
    /// `default_prefix` is used when `options.prefix` is `None`.
    pub fn new(
        codec: &'a dyn ImageCodec,
        options: &'a WriteOptions,
        default_prefix: &str,
    ) -> Result<Self, TilingError> {
        codec.ensure_dir(&options.target_dir)?;
        let prefix = options
            .prefix
            .clone()
            .unwrap_or_else(|| default_prefix.to_string());
        Ok(Self {
            codec,
            target_dir: &options.target_dir,
            extension: &options.extension,
            prefix,
            plan: derivative_plan(options.rotate, options.flip),
        })
    }

    /// Prefix applied to every file name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Write one tile and its derivatives, recording them in `summary`.
    pub fn write(
        &self,
        rect: &TileRect,
        image: &DynamicImage,
        summary: &mut WriteSummary,
    ) -> Result<(), TilingError> {
        let id = TileIdentifier::for_rect(self.prefix.as_str(), rect);

        let path = self.path_for(&id);
        self.codec.encode(image, &path)?;
        summary.files.push(path);
        summary.tiles_written += 1;

        for derivative in &self.plan {
            let path = self.path_for(&id.with_derivative(*derivative));
            self.codec.encode(&derivative.apply(image), &path)?;
            summary.files.push(path);
            summary.derivatives_written += 1;
        }

        debug!(tile = %id, derivatives = self.plan.len(), "Wrote tile");
        Ok(())
    }

    fn path_for(&self, id: &TileIdentifier) -> PathBuf {
        self.target_dir.join(id.file_name(self.extension))
    }
}

/// Write every tile of `grid` in row-major order.
///
/// # Errors
///
/// Returns `TilingError::Codec` if the directory cannot be created or a file
/// cannot be encoded. Files written before the failure are left in place.
pub fn write_tiles(
    grid: &BoundGrid,
    codec: &dyn ImageCodec,
    options: &WriteOptions,
) -> Result<WriteSummary, TilingError> {
    write_tiles_with_progress(grid, codec, options, |_| {})
}

/// Like [`write_tiles`], calling `on_tile` with the running tile count after
/// each base tile and its derivatives are written.
pub fn write_tiles_with_progress<F>(
    grid: &BoundGrid,
    codec: &dyn ImageCodec,
    options: &WriteOptions,
    mut on_tile: F,
) -> Result<WriteSummary, TilingError>
where
    F: FnMut(usize),
{
    let writer = TileWriter::new(codec, options, grid.source_name())?;
    let mut summary = WriteSummary::default();

    for (rect, image) in grid.tiles() {
        writer.write(&rect, &image, &mut summary)?;
        on_tile(summary.tiles_written);
    }

    info!(
        dir = %options.target_dir.display(),
        prefix = writer.prefix(),
        tiles = summary.tiles_written,
        derivatives = summary.derivatives_written,
        "Tiles written"
    );
    Ok(summary)
}
