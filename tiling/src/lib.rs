//! Tiling - slice images into square tiles and put them back together
//!
//! The library covers the full round trip of grid-based image tiling:
//!
//! - **Grid** ([`grid`]): tile size, stride, and the rectangles of every
//!   fully in-bounds tile, in row-major order
//! - **Filtering** ([`filter`]): keep tiles whose mean sample value lies
//!   strictly between two thresholds
//! - **Export** ([`export`]): write tiles as `<prefix>_x_<left>_y_<top>.<ext>`
//!   with optional rotated and flipped copies ([`transform`])
//! - **Assembly** ([`assemble`]): paste tiles back onto a blank canvas, by
//!   parsed file name ([`identifier`]) or by grid position
//!
//! Image files are read and written through the [`codec::ImageCodec`]
//! trait; [`Tiling`] ties a grid configuration, a codec and the current
//! source image together.
//!
//! # Example
//!
//! ```
//! use image::DynamicImage;
//! use tiling::{ColorMode, GridConfig, Tiling};
//!
//! let mut tiling = Tiling::new(GridConfig::new(64, Some(32)).unwrap());
//! let grid = tiling.apply(DynamicImage::new_rgb8(128, 128)).unwrap();
//! assert_eq!(grid.tile_count(), 9);
//!
//! let tiles: Vec<_> = tiling.tile_images().unwrap().collect();
//! let canvas = tiling.assemble(tiles, ColorMode::Rgb).unwrap();
//! assert_eq!((canvas.width(), canvas.height()), (128, 128));
//! ```

pub mod assemble;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod grid;
pub mod identifier;
pub mod logging;
pub mod session;
pub mod transform;

pub use assemble::{assemble, assemble_detailed, Assembly, ColorMode, TileInput};
pub use codec::{CodecError, FsCodec, ImageCodec, MemoryCodec};
pub use error::TilingError;
pub use export::{write_tiles, WriteOptions, WriteSummary};
pub use filter::FilterThresholds;
pub use grid::{tile_rects_for, BoundGrid, GridConfig, GridShape, ImageDimensions, TileRect};
pub use identifier::{parse_identifier, ParsedIdentifier, TileIdentifier};
pub use session::{TileSource, Tiling};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
