//! Bitmap input type and the two optional preprocessors ([`quantize`] and
//! [`thin`]) the pipeline can invoke before outline tracing.
//!
//! `vectorize-core` never loads image files itself — that is a CLI/loader
//! concern (see `vectorize-cli::loader`). This module only defines the shape
//! a loader must deliver: a row-major pixel buffer with 1 or 3 color planes.

use crate::error::{VectorizeError, VectorizeResult};
use std::collections::HashMap;

/// Number of color planes backing a [`Bitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 plane, values 0..=255.
    Gray,
    /// 3 interleaved planes: R, G, B.
    Rgb,
}

/// An 8-bit color, used for per-outline color tagging and background
/// matching. For [`PixelFormat::Gray`] bitmaps, `r == g == b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

/// A 2D raster image: width, height, and a row-major pixel buffer.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: PixelFormat,
    /// `width * height * planes` bytes, row-major, planes interleaved.
    data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> VectorizeResult<Self> {
        if width == 0 || height == 0 {
            return Err(VectorizeError::invalid_bitmap(
                "bitmap dimensions must be non-zero",
            ));
        }
        let planes = match format {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        };
        let expected = width as usize * height as usize * planes;
        if data.len() != expected {
            return Err(VectorizeError::invalid_bitmap(format!(
                "expected {expected} bytes of pixel data, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Pixel color at `(x, y)`. Panics if out of bounds; callers in this
    /// crate always check [`Bitmap::in_bounds`] first.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = (y as usize * self.width as usize + x as usize) * self.planes();
        match self.format {
            PixelFormat::Gray => Rgb::gray(self.data[idx]),
            PixelFormat::Rgb => Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2]),
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = (y as usize * self.width as usize + x as usize) * self.planes();
        match self.format {
            PixelFormat::Gray => self.data[idx] = color.r,
            PixelFormat::Rgb => {
                self.data[idx] = color.r;
                self.data[idx + 1] = color.g;
                self.data[idx + 2] = color.b;
            }
        }
    }

    fn planes(&self) -> usize {
        match self.format {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }
}

/// Reduce a bitmap to at most `color_count` distinct colors in place, via a
/// median-cut style quantizer over the existing palette. A no-op if
/// `color_count` is 0 or already covers the bitmap's palette.
///
/// Mirrors AutoTrace's up-front quantization call: invoked before tracing,
/// only for 3-plane bitmaps, with an optional background color that is
/// never merged into another bucket so `background_color` matching in the
/// tracer keeps working after quantization.
pub fn quantize(bitmap: &mut Bitmap, color_count: u32, background: Option<Rgb>) {
    if color_count == 0 || bitmap.format != PixelFormat::Rgb {
        return;
    }

    let mut histogram: HashMap<Rgb, u32> = HashMap::new();
    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            *histogram.entry(bitmap.pixel(x, y)).or_insert(0) += 1;
        }
    }
    if histogram.len() <= color_count as usize {
        return;
    }

    let mut buckets: Vec<Vec<Rgb>> = vec![histogram.keys().copied().collect()];
    while buckets.len() < color_count as usize {
        let Some((split_idx, _)) = buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .max_by_key(|(_, b)| channel_range(b))
        else {
            break;
        };
        let bucket = buckets.remove(split_idx);
        let axis = widest_channel(&bucket);
        let mut sorted = bucket;
        sorted.sort_by_key(|c| channel(c, axis));
        let mid = sorted.len() / 2;
        let (lo, hi) = sorted.split_at(mid);
        buckets.push(lo.to_vec());
        buckets.push(hi.to_vec());
    }

    let palette: Vec<Rgb> = buckets
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| average_color(b))
        .collect();
    let mut remap: HashMap<Rgb, Rgb> = HashMap::new();
    for (bucket, mean) in buckets.iter().zip(palette.iter()) {
        for &c in bucket {
            remap.insert(c, *mean);
        }
    }

    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            let c = bitmap.pixel(x, y);
            if Some(c) == background {
                continue;
            }
            if let Some(&mapped) = remap.get(&c) {
                bitmap.set_pixel(x, y, mapped);
            }
        }
    }
}

fn channel(c: &Rgb, axis: u8) -> u8 {
    match axis {
        0 => c.r,
        1 => c.g,
        _ => c.b,
    }
}

fn widest_channel(bucket: &[Rgb]) -> u8 {
    let ranges = [
        bucket.iter().map(|c| c.r).max().unwrap_or(0) as i32
            - bucket.iter().map(|c| c.r).min().unwrap_or(0) as i32,
        bucket.iter().map(|c| c.g).max().unwrap_or(0) as i32
            - bucket.iter().map(|c| c.g).min().unwrap_or(0) as i32,
        bucket.iter().map(|c| c.b).max().unwrap_or(0) as i32
            - bucket.iter().map(|c| c.b).min().unwrap_or(0) as i32,
    ];
    let (axis, _) = ranges.iter().enumerate().max_by_key(|(_, r)| **r).unwrap();
    axis as u8
}

fn channel_range(bucket: &[Rgb]) -> i32 {
    [0u8, 1, 2]
        .iter()
        .map(|&axis| {
            let vals: Vec<u8> = bucket.iter().map(|c| channel(c, axis)).collect();
            vals.iter().copied().max().unwrap_or(0) as i32
                - vals.iter().copied().min().unwrap_or(0) as i32
        })
        .max()
        .unwrap_or(0)
}

fn average_color(bucket: &[Rgb]) -> Rgb {
    let n = bucket.len() as u32;
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for c in bucket {
        r += c.r as u32;
        g += c.g as u32;
        b += c.b as u32;
    }
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

/// Zhang-Suen morphological thinning of a 1-plane bitmap, in place.
/// Idempotent: a second call on an already-thinned bitmap is a no-op.
/// Foreground is any pixel darker than 128; thinning only ever turns
/// foreground pixels into background, never the reverse.
pub fn thin(bitmap: &mut Bitmap) {
    if bitmap.format != PixelFormat::Gray {
        return;
    }
    let w = bitmap.width as i32;
    let h = bitmap.height as i32;
    let is_fg = |data: &[bool], x: i32, y: i32| -> bool {
        x >= 0 && y >= 0 && x < w && y < h && data[(y * w + x) as usize]
    };

    let mut fg: Vec<bool> = (0..bitmap.height)
        .flat_map(|y| (0..bitmap.width).map(move |x| (x, y)))
        .map(|(x, y)| bitmap.pixel(x, y).r < 128)
        .collect();

    loop {
        let mut removed_this_pass = false;
        for sub_iter in 0..2 {
            let mut to_clear = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    if !is_fg(&fg, x, y) {
                        continue;
                    }
                    let p = [
                        is_fg(&fg, x, y - 1),
                        is_fg(&fg, x + 1, y - 1),
                        is_fg(&fg, x + 1, y),
                        is_fg(&fg, x + 1, y + 1),
                        is_fg(&fg, x, y + 1),
                        is_fg(&fg, x - 1, y + 1),
                        is_fg(&fg, x - 1, y),
                        is_fg(&fg, x - 1, y - 1),
                    ];
                    let b_count = p.iter().filter(|&&v| v).count();
                    if !(2..=6).contains(&b_count) {
                        continue;
                    }
                    let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
                    if transitions != 1 {
                        continue;
                    }
                    let (cond1, cond2) = if sub_iter == 0 {
                        (!(p[0] && p[2] && p[4]), !(p[2] && p[4] && p[6]))
                    } else {
                        (!(p[0] && p[2] && p[6]), !(p[0] && p[4] && p[6]))
                    };
                    if cond1 && cond2 {
                        to_clear.push((x, y));
                    }
                }
            }
            if !to_clear.is_empty() {
                removed_this_pass = true;
            }
            for &(x, y) in &to_clear {
                fg[(y * w + x) as usize] = false;
            }
        }
        if !removed_this_pass {
            break;
        }
    }

    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            bitmap.set_pixel(
                x,
                y,
                if fg[(y as i32 * w + x as i32) as usize] {
                    Rgb::gray(0)
                } else {
                    Rgb::gray(255)
                },
            );
        }
    }
}
