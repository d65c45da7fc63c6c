//! Grid geometry types.

use std::fmt;

use crate::error::TilingError;

/// Tile size and stride for a square tile grid.
///
/// The stride is the pixel distance between the origins of neighbouring
/// tiles. A stride smaller than the tile size produces overlapping tiles,
/// a larger stride leaves gaps between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    tile_size: u32,
    stride: u32,
}

impl GridConfig {
    /// Create a grid configuration.
    ///
    /// A missing or zero stride falls back to `tile_size` (edge-to-edge
    /// tiles).
    ///
    /// # Errors
    ///
    /// Returns `TilingError::InvalidConfig` if `tile_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use tiling::grid::GridConfig;
    ///
    /// let config = GridConfig::new(100, None).unwrap();
    /// assert_eq!(config.stride(), 100);
    ///
    /// let overlapping = GridConfig::new(100, Some(50)).unwrap();
    /// assert_eq!(overlapping.stride(), 50);
    /// ```
    pub fn new(tile_size: u32, stride: Option<u32>) -> Result<Self, TilingError> {
        if tile_size == 0 {
            return Err(TilingError::InvalidConfig(
                "tile size must be at least 1 pixel".to_string(),
            ));
        }
        let stride = match stride {
            Some(s) if s > 0 => s,
            _ => tile_size,
        };
        Ok(Self { tile_size, stride })
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Distance between neighbouring tile origins in pixels.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Whether neighbouring tiles share pixels.
    pub fn overlaps(&self) -> bool {
        self.stride < self.tile_size
    }
}

/// Pixel dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Number of tile rows and columns that fit an image.
///
/// Counts are signed: an image narrower or shorter than one tile yields a
/// non-positive count along that axis, which means the grid is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub rows: i64,
    pub cols: i64,
}

impl GridShape {
    /// Derive the grid shape for an image.
    ///
    /// `rows = floor((height - tile_size) / stride) + 1` and likewise for
    /// columns. Only tiles lying fully inside the image are counted.
    pub fn compute(dimensions: ImageDimensions, config: &GridConfig) -> Self {
        Self {
            rows: axis_count(dimensions.height, config),
            cols: axis_count(dimensions.width, config),
        }
    }

    /// Total number of tiles, treating non-positive axis counts as zero.
    pub fn tile_count(&self) -> usize {
        (self.rows.max(0) as usize) * (self.cols.max(0) as usize)
    }

    /// Whether the grid contains no tiles at all.
    pub fn is_empty(&self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }
}

fn axis_count(extent: u32, config: &GridConfig) -> i64 {
    let span = extent as i64 - config.tile_size() as i64;
    span.div_euclid(config.stride() as i64) + 1
}

/// A tile rectangle in pixel coordinates.
///
/// `right` and `bottom` are exclusive, so a tile of size `s` at `(l, t)`
/// covers `l..l + s` horizontally and `t..t + s` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    /// Create a square rectangle with its top-left corner at `(left, top)`.
    ///
    /// `right` and `bottom` saturate at `u32::MAX`.
    pub fn square(left: u32, top: u32, size: u32) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add(size),
            bottom: top.saturating_add(size),
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// `(left, top, right, bottom)` tuple.
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.left, self.top, self.right, self.bottom)
    }

    /// Whether the rectangle lies fully inside an image.
    pub fn fits_within(&self, dimensions: ImageDimensions) -> bool {
        self.right <= dimensions.width && self.bottom <= dimensions.height
    }
}

impl fmt::Display for TileRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_stride_to_tile_size() {
        let config = GridConfig::new(64, None).unwrap();
        assert_eq!(config.tile_size(), 64);
        assert_eq!(config.stride(), 64);
        assert!(!config.overlaps());
    }

    #[test]
    fn test_config_zero_stride_falls_back() {
        let config = GridConfig::new(64, Some(0)).unwrap();
        assert_eq!(config.stride(), 64);
    }

    #[test]
    fn test_config_overlapping_stride() {
        let config = GridConfig::new(64, Some(32)).unwrap();
        assert_eq!(config.stride(), 32);
        assert!(config.overlaps());
    }

    #[test]
    fn test_config_rejects_zero_tile_size() {
        let result = GridConfig::new(0, Some(10));
        assert!(matches!(result, Err(TilingError::InvalidConfig(_))));
    }

    #[test]
    fn test_shape_drops_partial_edge_tiles() {
        let config = GridConfig::new(100, None).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(250, 200), &config);
        assert_eq!(shape.rows, 2);
        assert_eq!(shape.cols, 2);
        assert_eq!(shape.tile_count(), 4);
    }

    #[test]
    fn test_shape_with_overlap() {
        // 0, 50, 100, 150 fit into a 250 px axis with 100 px tiles
        let config = GridConfig::new(100, Some(50)).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(250, 100), &config);
        assert_eq!(shape.cols, 4);
        assert_eq!(shape.rows, 1);
    }

    #[test]
    fn test_shape_image_smaller_than_tile() {
        let config = GridConfig::new(100, Some(30)).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(50, 50), &config);
        // floor(-50 / 30) + 1 = -2 + 1
        assert_eq!(shape.rows, -1);
        assert_eq!(shape.cols, -1);
        assert_eq!(shape.tile_count(), 0);
        assert!(shape.is_empty());
    }

    #[test]
    fn test_shape_one_axis_too_small() {
        let config = GridConfig::new(100, None).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(400, 99), &config);
        assert_eq!(shape.cols, 4);
        assert_eq!(shape.rows, 0);
        assert_eq!(shape.tile_count(), 0);
    }

    #[test]
    fn test_shape_zero_dimensions() {
        let config = GridConfig::new(1, None).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(0, 0), &config);
        assert_eq!(shape.rows, 0);
        assert_eq!(shape.cols, 0);
    }

    #[test]
    fn test_rect_square() {
        let rect = TileRect::square(100, 200, 50);
        assert_eq!(rect.as_tuple(), (100, 200, 150, 250));
        assert_eq!(rect.width(), 50);
        assert_eq!(rect.height(), 50);
    }

    #[test]
    fn test_rect_square_saturates() {
        let rect = TileRect::square(u32::MAX, u32::MAX - 1, 10);
        assert_eq!(rect.as_tuple(), (u32::MAX, u32::MAX - 1, u32::MAX, u32::MAX));
        assert_eq!(rect.width(), 0);
        assert_eq!(rect.height(), 1);
    }

    #[test]
    fn test_rect_fits_within() {
        let dims = ImageDimensions::new(200, 200);
        assert!(TileRect::square(100, 100, 100).fits_within(dims));
        assert!(!TileRect::square(150, 100, 100).fits_within(dims));
    }

    #[test]
    fn test_rect_display() {
        assert_eq!(TileRect::square(0, 100, 100).to_string(), "(0, 100, 100, 200)");
    }

    #[test]
    fn test_dimensions_display() {
        assert_eq!(ImageDimensions::new(250, 200).to_string(), "250×200");
    }
}
