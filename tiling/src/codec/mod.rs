//! Image codec abstraction for reading and writing tile files.
//!
//! Decoding, encoding and directory creation are delegated to an
//! [`ImageCodec`] so the grid and assembly logic never touch the filesystem
//! directly.
//!
//! ```text
//! ┌─────────────────────┐
//! │ Tiling / Assembler  │
//! │                     │
//! │  Arc<dyn ImageCodec>│
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │     ImageCodec      │ (trait)
//! └──────────┬──────────┘
//!            │
//!       ┌────┴─────┐
//!       ▼          ▼
//! ┌──────────┐ ┌───────────┐
//! │ FsCodec  │ │MemoryCodec│
//! └──────────┘ └───────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use image::DynamicImage;
//! use tiling::codec::{ImageCodec, MemoryCodec};
//!
//! let codec: Arc<dyn ImageCodec> = Arc::new(MemoryCodec::new());
//! codec.encode(&DynamicImage::new_rgb8(4, 4), Path::new("a.png")).unwrap();
//! assert_eq!(codec.decode(Path::new("a.png")).unwrap().width(), 4);
//! ```
//!
//! # Available Codecs
//!
//! - [`FsCodec`] - Reads and writes real files via the `image` crate
//! - [`MemoryCodec`] - Keeps images in a map, for tests and embedding

mod error;
mod fs;
mod memory;

pub use error::CodecError;
pub use fs::FsCodec;
pub use memory::MemoryCodec;

use std::path::Path;

use image::DynamicImage;

/// Trait for image decode/encode back ends.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single codec can
/// be shared between sessions.
pub trait ImageCodec: Send + Sync {
    /// Decode the image stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the image cannot be read or decoded.
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError>;

    /// Encode `image` to `path`, replacing any existing file.
    ///
    /// The output format is chosen from the path's extension.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if the image cannot be written.
    fn encode(&self, image: &DynamicImage, path: &Path) -> Result<(), CodecError>;

    /// Make sure `dir` exists, creating missing parents. Existing contents
    /// are left untouched.
    fn ensure_dir(&self, dir: &Path) -> Result<(), CodecError>;
}
