//! Stateful tiling session.
//!
//! [`Tiling`] pairs a [`GridConfig`] with an [`ImageCodec`] and remembers the
//! last applied source. Traversal methods fail with
//! [`TilingError::NotApplied`] until [`Tiling::apply`] has bound an image.
//! Callers who prefer explicit state can keep the [`BoundGrid`] returned by
//! `apply` and call its methods directly.
//!
//! # Example
//!
//! ```
//! use image::DynamicImage;
//! use tiling::{GridConfig, TileSource, Tiling};
//!
//! let mut tiling = Tiling::new(GridConfig::new(100, None).unwrap());
//! assert!(tiling.tile_rects().is_err());
//!
//! tiling.apply(TileSource::Image(DynamicImage::new_rgb8(250, 200))).unwrap();
//! let rects: Vec<_> = tiling.tile_rects().unwrap().map(|r| r.as_tuple()).collect();
//! assert_eq!(rects[1], (100, 0, 200, 100));
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use tracing::info;

use crate::assemble::{assemble, ColorMode, TileInput};
use crate::codec::{FsCodec, ImageCodec};
use crate::error::TilingError;
use crate::export::{write_tiles, WriteOptions, WriteSummary};
use crate::filter::{FilterThresholds, FilteredTiles};
use crate::grid::{BoundGrid, GridConfig, TileImages, TileRects};

/// Image to be tiled.
#[derive(Debug, Clone)]
pub enum TileSource {
    /// Decoded image; its display name is empty.
    Image(DynamicImage),
    /// Image file decoded through the session's codec; its display name is
    /// the file name up to the first `.`.
    Path(PathBuf),
}

impl From<DynamicImage> for TileSource {
    fn from(image: DynamicImage) -> Self {
        TileSource::Image(image)
    }
}

impl From<PathBuf> for TileSource {
    fn from(path: PathBuf) -> Self {
        TileSource::Path(path)
    }
}

impl From<&Path> for TileSource {
    fn from(path: &Path) -> Self {
        TileSource::Path(path.to_path_buf())
    }
}

impl From<&str> for TileSource {
    fn from(path: &str) -> Self {
        TileSource::Path(PathBuf::from(path))
    }
}

/// Display name of a path source: the file name cut at its first `.`.
///
/// `scans/field.v2.png` yields `field`.
pub fn source_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// A tiling session.
pub struct Tiling {
    config: GridConfig,
    codec: Arc<dyn ImageCodec>,
    bound: Option<BoundGrid>,
}

impl Tiling {
    /// Create a session that reads and writes files with [`FsCodec`].
    pub fn new(config: GridConfig) -> Self {
        Self::with_codec(config, Arc::new(FsCodec::new()))
    }

    /// Create a session using a custom codec.
    pub fn with_codec(config: GridConfig, codec: Arc<dyn ImageCodec>) -> Self {
        Self {
            config,
            codec,
            bound: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn codec(&self) -> &Arc<dyn ImageCodec> {
        &self.codec
    }

    /// Bind a source image, replacing any previous binding.
    ///
    /// An image smaller than one tile is accepted; its grid is simply empty.
    ///
    /// # Errors
    ///
    /// Returns `TilingError::Codec` if a path source cannot be decoded. The
    /// previous binding is dropped in that case too.
    pub fn apply(&mut self, source: impl Into<TileSource>) -> Result<&BoundGrid, TilingError> {
        self.bound = None;
        let (image, name) = match source.into() {
            TileSource::Image(image) => (image, String::new()),
            TileSource::Path(path) => {
                let image = self.codec.decode(&path)?;
                (image, source_display_name(&path))
            }
        };

        let grid = BoundGrid::new(self.config, image, name);
        info!(
            source = grid.source_name(),
            dimensions = %grid.dimensions(),
            tile_size = self.config.tile_size(),
            stride = self.config.stride(),
            rows = grid.shape().rows,
            cols = grid.shape().cols,
            "Tiling applied"
        );
        Ok(self.bound.insert(grid))
    }

    /// The current binding.
    pub fn bound(&self) -> Result<&BoundGrid, TilingError> {
        self.bound.as_ref().ok_or(TilingError::NotApplied)
    }

    /// Whether a source has been applied.
    pub fn is_applied(&self) -> bool {
        self.bound.is_some()
    }

    /// Tile rectangles of the bound image in row-major order.
    pub fn tile_rects(&self) -> Result<TileRects, TilingError> {
        Ok(self.bound()?.tile_rects())
    }

    /// Tile crops of the bound image in row-major order.
    pub fn tile_images(&self) -> Result<TileImages<'_>, TilingError> {
        Ok(self.bound()?.tile_images())
    }

    /// `(rect, crop)` pairs whose mean sample value is strictly inside
    /// `thresholds`.
    pub fn filter_tiles(&self, thresholds: FilterThresholds) -> Result<FilteredTiles<'_>, TilingError> {
        Ok(self.bound()?.filter_tiles(thresholds))
    }

    /// Write all tiles (and requested derivatives) of the bound image.
    pub fn write_tiles(&self, options: &WriteOptions) -> Result<WriteSummary, TilingError> {
        write_tiles(self.bound()?, self.codec.as_ref(), options)
    }

    /// Assemble tiles onto a canvas the size of the bound image.
    pub fn assemble<I>(&self, tiles: I, mode: ColorMode) -> Result<DynamicImage, TilingError>
    where
        I: IntoIterator,
        I::Item: Into<TileInput>,
    {
        assemble(self.bound()?, self.codec.as_ref(), tiles, mode)
    }
}

impl std::fmt::Debug for Tiling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tiling")
            .field("config", &self.config)
            .field("bound", &self.bound.as_ref().map(|b| b.dimensions()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MemoryCodec;

    fn memory_session(size: u32, stride: Option<u32>) -> (Tiling, Arc<MemoryCodec>) {
        let codec = Arc::new(MemoryCodec::new());
        let tiling = Tiling::with_codec(GridConfig::new(size, stride).unwrap(), codec.clone());
        (tiling, codec)
    }

    #[test]
    fn test_traversals_fail_before_apply() {
        let (tiling, _) = memory_session(10, None);
        assert!(!tiling.is_applied());
        assert!(matches!(tiling.tile_rects(), Err(TilingError::NotApplied)));
        assert!(matches!(tiling.tile_images(), Err(TilingError::NotApplied)));
        assert!(matches!(
            tiling.filter_tiles(FilterThresholds::default()),
            Err(TilingError::NotApplied)
        ));
        assert!(matches!(
            tiling.write_tiles(&WriteOptions::default()),
            Err(TilingError::NotApplied)
        ));
        assert!(matches!(
            tiling.assemble(Vec::<TileInput>::new(), ColorMode::Rgb),
            Err(TilingError::NotApplied)
        ));
    }

    #[test]
    fn test_apply_image_has_empty_name() {
        let (mut tiling, _) = memory_session(10, None);
        let grid = tiling.apply(DynamicImage::new_rgb8(30, 20)).unwrap();
        assert_eq!(grid.source_name(), "");
        assert_eq!(grid.tile_count(), 6);
    }

    #[test]
    fn test_apply_path_uses_codec_and_stem() {
        let (mut tiling, codec) = memory_session(10, None);
        codec.insert("data/field.scan.png", DynamicImage::new_rgb8(20, 20));

        let grid = tiling.apply("data/field.scan.png").unwrap();
        assert_eq!(grid.source_name(), "field");
        assert_eq!(grid.tile_count(), 4);
    }

    #[test]
    fn test_apply_failure_clears_binding() {
        let (mut tiling, _) = memory_session(10, None);
        tiling.apply(DynamicImage::new_rgb8(30, 20)).unwrap();

        let result = tiling.apply("missing.png");
        assert!(matches!(result, Err(TilingError::Codec(_))));
        assert!(!tiling.is_applied());
    }

    #[test]
    fn test_reapply_replaces_shape() {
        let (mut tiling, _) = memory_session(10, None);
        tiling.apply(DynamicImage::new_rgb8(30, 20)).unwrap();
        tiling.apply(DynamicImage::new_rgb8(10, 10)).unwrap();
        assert_eq!(tiling.tile_rects().unwrap().count(), 1);
    }

    #[test]
    fn test_small_image_is_not_an_error() {
        let (mut tiling, _) = memory_session(100, Some(30));
        tiling.apply(DynamicImage::new_rgb8(50, 50)).unwrap();
        assert_eq!(tiling.tile_rects().unwrap().count(), 0);
        assert_eq!(tiling.bound().unwrap().shape().rows, -1);
    }

    #[test]
    fn test_write_then_assemble_through_session() {
        let (mut tiling, codec) = memory_session(5, None);
        let source = DynamicImage::ImageRgb8(image::RgbImage::from_fn(10, 10, |x, y| {
            image::Rgb([x as u8 * 20, y as u8 * 20, 100])
        }));
        tiling.apply(source.clone()).unwrap();
        tiling
            .write_tiles(&WriteOptions::new("tiles").with_rotate(true))
            .unwrap();

        let canvas = tiling.assemble(codec.paths(), ColorMode::Rgb).unwrap();
        assert_eq!(canvas.to_rgb8(), source.to_rgb8());
    }

    #[test]
    fn test_source_display_name() {
        assert_eq!(source_display_name(Path::new("a/b/photo.png")), "photo");
        assert_eq!(source_display_name(Path::new("photo.tar.gz")), "photo");
        assert_eq!(source_display_name(Path::new("noext")), "noext");
        assert_eq!(source_display_name(Path::new("")), "");
    }
}
