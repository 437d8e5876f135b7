//! Decodes an image file into a [`vectorize_core::Bitmap`].
//!
//! Delegates format sniffing and pixel decoding entirely to the `image`
//! crate; this module's only job is reshaping the decoded buffer into the
//! row-major, 1- or 3-plane layout `vectorize-core` expects. Grayscale
//! inputs (including PNM's `P5`, mirroring AutoTrace's native PGM path) stay
//! single-plane so the morphological thinner can run directly on them;
//! everything else is decoded as RGB.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;
use vectorize_core::{Bitmap, PixelFormat};

pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let img = image::open(path).with_context(|| format!("failed to open image: {}", path.display()))?;

    let bitmap = match img {
        DynamicImage::ImageLuma8(buf) => {
            let (width, height) = (buf.width(), buf.height());
            Bitmap::new(width, height, PixelFormat::Gray, buf.into_raw())
        }
        other => {
            let buf = other.to_rgb8();
            let (width, height) = (buf.width(), buf.height());
            Bitmap::new(width, height, PixelFormat::Rgb, buf.into_raw())
        }
    };

    bitmap.with_context(|| format!("decoded image is not a valid bitmap: {}", path.display()))
}
