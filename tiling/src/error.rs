//! Error types for tiling operations.

use thiserror::Error;

use crate::codec::CodecError;
use crate::identifier::IdentifierError;

/// Errors that can occur while slicing, filtering, writing or assembling tiles.
#[derive(Debug, Error)]
pub enum TilingError {
    /// A traversal was requested before a source image was applied.
    #[error("Tiling has not been applied to an image; call apply() first")]
    NotApplied,

    /// A tile identifier lacks the `x_<left>_y_<top>` structure.
    #[error("Invalid tile identifier: {0}")]
    Parse(#[from] IdentifierError),

    /// More unpositioned tiles were supplied than the grid has rectangles.
    #[error("Grid exhausted: only {available} tile positions available")]
    GridExhausted { available: usize },

    /// Grid configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image decode, encode or directory operation failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
