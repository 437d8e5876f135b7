//! Error types for the vectorize-core library

use thiserror::Error;

/// Main error type for the raster-to-spline pipeline.
///
/// Numeric degeneracies encountered while fitting (singular linear systems,
/// zero-length arcs) are recovered locally per spec (falling back to the
/// one-third-chord heuristic or emitting a line) and never surface as
/// [`VectorizeError::DegenerateGeometry`]; that variant exists for cases a
/// caller passes a malformed outline the fitter cannot recover from at all
/// (e.g. an empty arc where at least one point is assumed).
#[derive(Error, Debug)]
pub enum VectorizeError {
    #[error("malformed bitmap: {message}")]
    InvalidBitmap { message: String },

    #[error("invalid fitting options: {message}")]
    InvalidOptions { message: String },

    #[error("degenerate geometry during fit: {message}")]
    DegenerateGeometry { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VectorizeError {
    pub fn invalid_bitmap(message: impl Into<String>) -> Self {
        Self::InvalidBitmap {
            message: message.into(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    pub fn degenerate_geometry(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type VectorizeResult<T> = Result<T, VectorizeError>;
