//! Tile selection by mean sample value.
//!
//! Useful for discarding blank or saturated tiles (e.g. empty background,
//! overexposed sky) before writing a training set.

use image::DynamicImage;
use tracing::trace;

use crate::grid::{TileRect, Tiles};

/// Exclusive bounds on a tile's mean sample value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterThresholds {
    pub lower: f64,
    pub upper: f64,
}

impl FilterThresholds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether `mean` lies strictly between the bounds.
    pub fn admits(&self, mean: f64) -> bool {
        mean > self.lower && mean < self.upper
    }
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 255.0,
        }
    }
}

/// Arithmetic mean of every sample in an image buffer.
///
/// All channels count equally, in the image's native sample type (so a
/// 16-bit image yields means in `0..=65535`). Returns `None` for an empty
/// image.
pub fn mean_intensity(image: &DynamicImage) -> Option<f64> {
    match image {
        DynamicImage::ImageLuma8(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageLumaA8(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgb8(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgba8(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageLuma16(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageLumaA16(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgb16(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgba16(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgb32F(buf) => mean_of(buf.as_raw()),
        DynamicImage::ImageRgba32F(buf) => mean_of(buf.as_raw()),
        other => mean_of(other.to_rgba8().as_raw()),
    }
}

fn mean_of<T: Copy + Into<f64>>(samples: &[T]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|&s| s.into()).sum();
    Some(sum / samples.len() as f64)
}

/// Iterator over tiles admitted by a [`FilterThresholds`].
///
/// Created by [`BoundGrid::filter_tiles`](crate::grid::BoundGrid::filter_tiles).
#[derive(Debug, Clone)]
pub struct FilteredTiles<'a> {
    tiles: Tiles<'a>,
    thresholds: FilterThresholds,
}

impl<'a> FilteredTiles<'a> {
    pub(crate) fn new(tiles: Tiles<'a>, thresholds: FilterThresholds) -> Self {
        Self { tiles, thresholds }
    }
}

impl Iterator for FilteredTiles<'_> {
    type Item = (TileRect, DynamicImage);

    fn next(&mut self) -> Option<Self::Item> {
        let thresholds = self.thresholds;
        self.tiles.by_ref().find(|(rect, image)| {
            let admitted = mean_intensity(image).is_some_and(|mean| thresholds.admits(mean));
            trace!(%rect, admitted, "Filtered tile");
            admitted
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.tiles.size_hint().1)
    }
}
