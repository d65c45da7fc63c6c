//! In-memory codec.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use parking_lot::Mutex;

use super::{CodecError, ImageCodec};

/// Stores encoded images in a map keyed by path.
///
/// Images are kept as-is (no format conversion) and directories always
/// exist. Useful for tests and for pipelines that consume written tiles
/// without touching the disk.
#[derive(Debug, Default)]
pub struct MemoryCodec {
    images: Mutex<HashMap<PathBuf, DynamicImage>>,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image under `path`, replacing any previous entry.
    pub fn insert(&self, path: impl Into<PathBuf>, image: DynamicImage) {
        self.images.lock().insert(path.into(), image);
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.images.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.images.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.lock().is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<DynamicImage> {
        self.images.lock().get(path).cloned()
    }
}

impl ImageCodec for MemoryCodec {
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        self.get(path)
            .ok_or_else(|| CodecError::NotFound(path.to_path_buf()))
    }

    fn encode(&self, image: &DynamicImage, path: &Path) -> Result<(), CodecError> {
        self.insert(path, image.clone());
        Ok(())
    }

    fn ensure_dir(&self, _dir: &Path) -> Result<(), CodecError> {
        Ok(())
    }
}
