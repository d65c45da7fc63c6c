//! Row-major traversal of a tile grid.

use std::iter::FusedIterator;

use image::DynamicImage;

use super::types::{GridConfig, GridShape, TileRect};

/// Iterator over the tile rectangles of a grid in row-major order.
///
/// The top edge advances by the stride in the outer loop and the left edge
/// advances by the stride in the inner loop, restarting at zero for every
/// row. Each iterator owns its own cursor, so independent traversals never
/// interfere with one another.
#[derive(Debug, Clone)]
pub struct TileRects {
    tile_size: u32,
    stride: u32,
    cols: usize,
    index: usize,
    count: usize,
}

impl TileRects {
    pub(crate) fn new(config: &GridConfig, shape: &GridShape) -> Self {
        Self {
            tile_size: config.tile_size(),
            stride: config.stride(),
            cols: shape.cols.max(0) as usize,
            index: 0,
            count: shape.tile_count(),
        }
    }

    fn rect_at(&self, index: usize) -> TileRect {
        let row = (index / self.cols) as u32;
        let col = (index % self.cols) as u32;
        TileRect::square(col * self.stride, row * self.stride, self.tile_size)
    }
}

impl Iterator for TileRects {
    type Item = TileRect;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let rect = self.rect_at(self.index);
        self.index += 1;
        Some(rect)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n).min(self.count);
        self.next()
    }
}

impl ExactSizeIterator for TileRects {}

impl FusedIterator for TileRects {}

/// Iterator over tile crops of a bound image, in the same order as
/// [`TileRects`].
#[derive(Debug, Clone)]
pub struct TileImages<'a> {
    image: &'a DynamicImage,
    rects: TileRects,
}

impl<'a> TileImages<'a> {
    pub(crate) fn new(image: &'a DynamicImage, rects: TileRects) -> Self {
        Self { image, rects }
    }
}

impl Iterator for TileImages<'_> {
    type Item = DynamicImage;

    fn next(&mut self) -> Option<Self::Item> {
        self.rects.next().map(|rect| crop(self.image, &rect))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rects.size_hint()
    }
}

impl ExactSizeIterator for TileImages<'_> {}

impl FusedIterator for TileImages<'_> {}

/// Iterator over `(rect, crop)` pairs of a bound image.
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    image: &'a DynamicImage,
    rects: TileRects,
}

impl<'a> Tiles<'a> {
    pub(crate) fn new(image: &'a DynamicImage, rects: TileRects) -> Self {
        Self { image, rects }
    }
}

impl Iterator for Tiles<'_> {
    type Item = (TileRect, DynamicImage);

    fn next(&mut self) -> Option<Self::Item> {
        self.rects.next().map(|rect| (rect, crop(self.image, &rect)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rects.size_hint()
    }
}

impl ExactSizeIterator for Tiles<'_> {}

impl FusedIterator for Tiles<'_> {}

pub(crate) fn crop(image: &DynamicImage, rect: &TileRect) -> DynamicImage {
    image.crop_imm(rect.left, rect.top, rect.width(), rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ImageDimensions;

    fn rects(size: u32, stride: u32, width: u32, height: u32) -> TileRects {
        let config = GridConfig::new(size, Some(stride)).unwrap();
        let shape = GridShape::compute(ImageDimensions::new(width, height), &config);
        TileRects::new(&config, &shape)
    }

    #[test]
    fn test_canonical_example() {
        let all: Vec<_> = rects(100, 100, 250, 200).map(|r| r.as_tuple()).collect();
        assert_eq!(
            all,
            vec![
                (0, 0, 100, 100),
                (100, 0, 200, 100),
                (0, 100, 100, 200),
                (100, 100, 200, 200),
            ]
        );
    }

    #[test]
    fn test_overlapping_rows() {
        let all: Vec<_> = rects(4, 2, 8, 4).collect();
        let lefts: Vec<_> = all.iter().map(|r| r.left).collect();
        assert_eq!(lefts, vec![0, 2, 4]);
        assert!(all.iter().all(|r| r.top == 0));
    }

    #[test]
    fn test_gapped_stride() {
        let all: Vec<_> = rects(2, 5, 12, 7).map(|r| (r.left, r.top)).collect();
        assert_eq!(all, vec![(0, 0), (5, 0), (10, 0), (0, 5), (5, 5), (10, 5)]);
    }

    #[test]
    fn test_empty_when_image_too_small() {
        let mut iter = rects(100, 100, 50, 500);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_exact_size() {
        let mut iter = rects(10, 10, 30, 20);
        assert_eq!(iter.len(), 6);
        iter.next();
        assert_eq!(iter.len(), 5);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut first = rects(10, 10, 30, 30);
        first.next();
        let second = first.clone();
        first.next();
        assert_eq!(second.len(), 8);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn test_nth_skips_ahead() {
        let mut iter = rects(10, 10, 30, 30);
        let fifth = iter.nth(4).unwrap();
        assert_eq!((fifth.left, fifth.top), (10, 10));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.nth(100), None);
    }

    #[test]
    fn test_tile_images_crop_size() {
        let image = DynamicImage::new_rgb8(30, 20);
        let crops: Vec<_> = TileImages::new(&image, rects(10, 10, 30, 20)).collect();
        assert_eq!(crops.len(), 6);
        assert!(crops.iter().all(|c| c.width() == 10 && c.height() == 10));
    }
}
