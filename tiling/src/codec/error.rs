//! Error types for image codec operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while decoding or encoding tile images.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Reading or decoding an image failed.
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Encoding or writing an image failed.
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Directory creation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No image is stored under the path (in-memory codec).
    #[error("No image at {}", .0.display())]
    NotFound(PathBuf),
}

impl CodecError {
    /// Path the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CodecError::Decode { path, .. }
            | CodecError::Encode { path, .. }
            | CodecError::Io { path, .. } => path,
            CodecError::NotFound(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CodecError::NotFound(PathBuf::from("tiles/a.png"));
        assert_eq!(err.to_string(), "No image at tiles/a.png");
        assert_eq!(err.path(), std::path::Path::new("tiles/a.png"));
    }

    #[test]
    fn test_io_display_and_source() {
        use std::error::Error;

        let err = CodecError::Io {
            path: PathBuf::from("out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("I/O error at out"));
        assert!(err.source().is_some());
    }
}
