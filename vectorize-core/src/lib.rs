//! # vectorize-core
//!
//! Raster-to-vector tracing: turns a segmented bitmap into piecewise cubic
//! Bezier spline contours. The pipeline is pixel outline extraction
//! ([`outline`]), then fitting ([`fit`]) — tangent estimation, corner
//! detection, smoothing, least-squares cubic Bezier fitting with recursive
//! subdivision, Newton-Raphson reparameterization, and line reversion.
//!
//! This crate never reads image files; see `vectorize-cli` for that. A
//! caller builds a [`bitmap::Bitmap`], optionally runs [`bitmap::quantize`]
//! or [`bitmap::thin`], then calls [`outline::find_outline_pixels`]
//! followed by [`fit::fitted_splines`].

pub mod bitmap;
pub mod error;
pub mod fit;
pub mod geom;
pub mod options;
pub mod outline;

pub use bitmap::{Bitmap, PixelFormat, Rgb};
pub use error::{VectorizeError, VectorizeResult};
pub use fit::{fitted_splines, Spline, SplineList, SplineListArray};
pub use geom::Point;
pub use options::FittingOptions;
pub use outline::{find_outline_pixels, PixelOutline, PixelOutlineList, PixelPoint};
