//! Filesystem codec backed by the `image` crate.

use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use tracing::debug;

use super::{CodecError, ImageCodec};

/// Reads and writes image files on disk.
///
/// The decoder sniffs the format from the file contents; the encoder picks
/// the format from the file extension (`png`, `jpg`, `bmp`, `tif`, ...).
/// Every call opens and closes its own file handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCodec;

impl FsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for FsCodec {
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        let decode_err = |source: ImageError| CodecError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Ok(image)
    }

    fn encode(&self, image: &DynamicImage, path: &Path) -> Result<(), CodecError> {
        image.save(path).map_err(|source| CodecError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Encoded image");
        Ok(())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), CodecError> {
        std::fs::create_dir_all(dir).map_err(|source| CodecError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_encode_decode_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])));

        let codec = FsCodec::new();
        codec.encode(&img, &path).unwrap();
        let decoded = codec.decode(&path).unwrap();

        assert_eq!(decoded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let result = FsCodec::new().decode(&path);
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }

    #[test]
    fn test_encode_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tile.notaformat");
        let result = FsCodec::new().encode(&DynamicImage::new_rgb8(1, 1), &path);
        assert!(matches!(result, Err(CodecError::Encode { .. })));
    }

    #[test]
    fn test_ensure_dir_creates_nested_and_keeps_contents() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let codec = FsCodec::new();

        codec.ensure_dir(&nested).unwrap();
        std::fs::write(nested.join("keep.txt"), b"x").unwrap();
        codec.ensure_dir(&nested).unwrap();

        assert!(nested.join("keep.txt").exists());
    }
}
