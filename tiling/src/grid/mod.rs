//! Grid engine: tile geometry for a bound source image.
//!
//! A [`GridConfig`] describes the tile size and stride. Binding it to an image
//! produces a [`BoundGrid`], an immutable value holding the source pixels,
//! the derived [`GridShape`] and the source display name. Every traversal
//! method returns a fresh iterator, so traversals can be restarted and run
//! side by side.
//!
//! ```text
//! width = 250, height = 200, tile = stride = 100
//!
//!   0        100       200  250
//! 0 ┌─────────┬─────────┬────┐
//!   │ (0, 0)  │ (100,0) │ ░░ │   ░ = dropped remainder
//! 100├─────────┼─────────┼────┤
//!   │ (0,100) │(100,100)│ ░░ │
//! 200└─────────┴─────────┴────┘
//! ```
//!
//! # Example
//!
//! ```
//! use image::DynamicImage;
//! use tiling::grid::{BoundGrid, GridConfig};
//!
//! let config = GridConfig::new(100, None).unwrap();
//! let grid = BoundGrid::new(config, DynamicImage::new_rgb8(250, 200), "");
//!
//! assert_eq!(grid.shape().rows, 2);
//! assert_eq!(grid.shape().cols, 2);
//! assert_eq!(grid.tile_rects().count(), 4);
//! ```

mod iter;
mod types;

pub use iter::{TileImages, TileRects, Tiles};
pub use types::{GridConfig, GridShape, ImageDimensions, TileRect};

pub(crate) use iter::crop;

use image::DynamicImage;

use crate::filter::{FilterThresholds, FilteredTiles};

/// Tile rectangles for an image of the given size, without any pixels.
pub fn tile_rects_for(config: &GridConfig, dimensions: ImageDimensions) -> TileRects {
    TileRects::new(config, &GridShape::compute(dimensions, config))
}

/// A grid configuration bound to a decoded source image.
#[derive(Debug, Clone)]
pub struct BoundGrid {
    config: GridConfig,
    dimensions: ImageDimensions,
    shape: GridShape,
    image: DynamicImage,
    source_name: String,
}

impl BoundGrid {
    /// Bind a grid configuration to an image.
    ///
    /// `source_name` is the display name used as the default prefix for
    /// written tile files.
    pub fn new(config: GridConfig, image: DynamicImage, source_name: impl Into<String>) -> Self {
        let dimensions = ImageDimensions::new(image.width(), image.height());
        let shape = GridShape::compute(dimensions, &config);
        Self {
            config,
            dimensions,
            shape,
            image,
            source_name: source_name.into(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of tiles in the grid.
    pub fn tile_count(&self) -> usize {
        self.shape.tile_count()
    }

    /// Display name of the source (file stem for path sources, empty for
    /// in-memory images).
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// The bound source image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Tile rectangles in row-major order.
    pub fn tile_rects(&self) -> TileRects {
        TileRects::new(&self.config, &self.shape)
    }

    /// Tile crops in row-major order.
    pub fn tile_images(&self) -> TileImages<'_> {
        TileImages::new(&self.image, self.tile_rects())
    }

    /// `(rect, crop)` pairs in row-major order.
    pub fn tiles(&self) -> Tiles<'_> {
        Tiles::new(&self.image, self.tile_rects())
    }

    /// Tiles whose mean sample value lies strictly between the thresholds.
    pub fn filter_tiles(&self, thresholds: FilterThresholds) -> FilteredTiles<'_> {
        FilteredTiles::new(self.tiles(), thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_bound_grid_accessors() {
        let config = GridConfig::new(100, None).unwrap();
        let grid = BoundGrid::new(config, gradient(250, 200), "photo");

        assert_eq!(grid.dimensions(), ImageDimensions::new(250, 200));
        assert_eq!(grid.shape(), GridShape { rows: 2, cols: 2 });
        assert_eq!(grid.tile_count(), 4);
        assert_eq!(grid.source_name(), "photo");
        assert_eq!(grid.config().tile_size(), 100);
    }

    #[test]
    fn test_traversals_are_restartable() {
        let config = GridConfig::new(30, Some(20)).unwrap();
        let grid = BoundGrid::new(config, gradient(100, 90), "");

        let first: Vec<_> = grid.tile_rects().collect();
        let second: Vec<_> = grid.tile_rects().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), grid.tile_count());
    }

    #[test]
    fn test_tile_images_match_source_pixels() {
        let config = GridConfig::new(10, None).unwrap();
        let source = gradient(30, 20);
        let grid = BoundGrid::new(config, source.clone(), "");

        for (rect, tile) in grid.tiles() {
            assert_eq!(tile.dimensions(), (10, 10));
            assert_eq!(
                tile.get_pixel(3, 7),
                source.get_pixel(rect.left + 3, rect.top + 7)
            );
        }
    }

    #[test]
    fn test_rects_and_images_share_order() {
        let config = GridConfig::new(8, Some(6)).unwrap();
        let grid = BoundGrid::new(config, gradient(40, 30), "");

        let pairs: Vec<_> = grid.tile_rects().zip(grid.tile_images()).collect();
        assert_eq!(pairs.len(), grid.tile_count());
        for (rect, tile) in pairs {
            assert_eq!(tile.get_pixel(0, 0), grid.image().get_pixel(rect.left, rect.top));
        }
    }

    #[test]
    fn test_small_image_yields_no_tiles() {
        let config = GridConfig::new(64, None).unwrap();
        let grid = BoundGrid::new(config, gradient(32, 32), "");
        assert!(grid.shape().is_empty());
        assert_eq!(grid.tile_rects().count(), 0);
        assert_eq!(grid.tile_images().count(), 0);
    }

    #[test]
    fn test_tile_rects_for_matches_bound_grid() {
        let config = GridConfig::new(30, Some(20)).unwrap();
        let grid = BoundGrid::new(config, gradient(90, 50), "");
        let unbound: Vec<_> = tile_rects_for(&config, ImageDimensions::new(90, 50)).collect();
        assert_eq!(unbound, grid.tile_rects().collect::<Vec<_>>());
        assert_eq!(unbound.len(), 8);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_rect_count_matches_shape(
                size in 1u32..40,
                stride in 1u32..40,
                width in 0u32..200,
                height in 0u32..200
            ) {
                let config = GridConfig::new(size, Some(stride)).unwrap();
                let shape = GridShape::compute(ImageDimensions::new(width, height), &config);
                let rects: Vec<_> = TileRects::new(&config, &shape).collect();

                let expected = if shape.rows > 0 && shape.cols > 0 {
                    (shape.rows * shape.cols) as usize
                } else {
                    0
                };
                prop_assert_eq!(rects.len(), expected);
            }

            #[test]
            fn test_rects_in_bounds(
                size in 1u32..40,
                stride in 1u32..40,
                width in 0u32..200,
                height in 0u32..200
            ) {
                let config = GridConfig::new(size, Some(stride)).unwrap();
                let dims = ImageDimensions::new(width, height);
                let shape = GridShape::compute(dims, &config);

                for rect in TileRects::new(&config, &shape) {
                    prop_assert!(rect.fits_within(dims), "{} exceeds {}", rect, dims);
                    prop_assert_eq!(rect.width(), size);
                    prop_assert_eq!(rect.height(), size);
                }
            }

            #[test]
            fn test_row_major_steps(
                size in 1u32..40,
                stride in 1u32..40,
                width in 0u32..200,
                height in 0u32..200
            ) {
                let config = GridConfig::new(size, Some(stride)).unwrap();
                let shape = GridShape::compute(ImageDimensions::new(width, height), &config);
                let rects: Vec<_> = TileRects::new(&config, &shape).collect();

                if let Some(first) = rects.first() {
                    prop_assert_eq!((first.left, first.top), (0, 0));
                }
                for pair in rects.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let same_row = b.top == a.top && b.left == a.left + stride;
                    let next_row = b.top == a.top + stride && b.left == 0;
                    prop_assert!(same_row || next_row, "{} -> {}", a, b);
                }
            }
        }
    }
}
