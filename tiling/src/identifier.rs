//! Tile identifier formatting and parsing.
//!
//! Tiles written to disk are named
//! `<prefix>_x_<left>_y_<top>[_rot_<angle>|_flip_<mode>[_rot_<angle>]]`,
//! with left/top zero-padded to five digits:
//!
//! - `scan_x_00000_y_00256.png` (base tile at left 0, top 256)
//! - `scan_x_00000_y_00256_rot_90.png` (rotated derivative)
//! - `scan_x_00000_y_00256_flip_hor_rot_270.png` (rotated flip)
//!
//! Parsing splits the file stem on `_` and looks for the `x` and `y` tokens
//! wherever they are, so the prefix may contain underscores of its own.
//! Names carrying a `rot` or `flip` token are derivatives and are never
//! placed on a canvas.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::grid::TileRect;
use crate::transform::Derivative;

/// Error parsing a tile identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// A required token (`x` or `y`) is missing.
    #[error("expected \"x_<left>_y_<top>\" in name, no '{0}' token found")]
    MissingToken(&'static str),

    /// The token after `x` or `y` is missing or not a signed 64-bit integer.
    #[error("invalid '{token}' coordinate: {value:?}")]
    InvalidCoordinate { token: &'static str, value: String },
}

/// Name of a tile (or tile derivative) on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileIdentifier {
    prefix: String,
    left: u32,
    top: u32,
    derivative: Option<Derivative>,
}

impl TileIdentifier {
    /// Identifier of a base tile.
    ///
    /// # Example
    ///
    /// ```
    /// use tiling::identifier::TileIdentifier;
    ///
    /// let id = TileIdentifier::new("img", 100, 0);
    /// assert_eq!(id.to_string(), "img_x_00100_y_00000");
    /// assert_eq!(id.file_name("png"), "img_x_00100_y_00000.png");
    /// ```
    pub fn new(prefix: impl Into<String>, left: u32, top: u32) -> Self {
        Self {
            prefix: prefix.into(),
            left,
            top,
            derivative: None,
        }
    }

    /// Identifier of the base tile covering `rect`.
    pub fn for_rect(prefix: impl Into<String>, rect: &TileRect) -> Self {
        Self::new(prefix, rect.left, rect.top)
    }

    /// The same tile position, naming a derivative copy.
    pub fn with_derivative(&self, derivative: Derivative) -> Self {
        Self {
            derivative: Some(derivative),
            ..self.clone()
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn derivative(&self) -> Option<Derivative> {
        self.derivative
    }

    /// Identifier with a file extension appended.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self, extension)
    }
}

impl fmt::Display for TileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_x_{:05}_y_{:05}", self.prefix, self.left, self.top)?;
        if let Some(derivative) = &self.derivative {
            write!(f, "_{}", derivative)?;
        }
        Ok(())
    }
}

/// Result of parsing an identifier for reassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedIdentifier {
    /// A base tile with its top-left corner at `(left, top)`.
    ///
    /// Coordinates may be negative or lie beyond any canvas; placement
    /// clips them.
    Position { left: i64, top: i64 },
    /// A rotated or flipped copy; not a grid member.
    Derivative,
}

/// Parse a tile file name or path.
///
/// Only the file stem (name without directory and last extension) is
/// examined.
///
/// # Errors
///
/// Returns `IdentifierError` if a non-derivative name lacks an `x` or `y`
/// token, or if the token that follows is not an integer.
///
/// # Examples
///
/// ```
/// use tiling::identifier::{parse_identifier, ParsedIdentifier};
///
/// let parsed = parse_identifier("tiles/img_x_00100_y_00000.png").unwrap();
/// assert_eq!(parsed, ParsedIdentifier::Position { left: 100, top: 0 });
///
/// let parsed = parse_identifier("img_x_00100_y_00000_rot_90.png").unwrap();
/// assert_eq!(parsed, ParsedIdentifier::Derivative);
/// ```
pub fn parse_identifier(path: impl AsRef<Path>) -> Result<ParsedIdentifier, IdentifierError> {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tokens: Vec<&str> = stem.split('_').collect();

    if tokens.iter().any(|t| *t == "rot" || *t == "flip") {
        return Ok(ParsedIdentifier::Derivative);
    }

    let left = coordinate_after(&tokens, "x")?;
    let top = coordinate_after(&tokens, "y")?;
    Ok(ParsedIdentifier::Position { left, top })
}

fn coordinate_after(tokens: &[&str], token: &'static str) -> Result<i64, IdentifierError> {
    let index = tokens
        .iter()
        .position(|t| *t == token)
        .ok_or(IdentifierError::MissingToken(token))?;
    let value = tokens.get(index + 1).copied().unwrap_or_default();
    value
        .parse::<i64>()
        .map_err(|_| IdentifierError::InvalidCoordinate {
            token,
            value: value.to_string(),
        })
}
