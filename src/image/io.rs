//! Decoding encoded image bytes into bitmaps via the `image` crate.
//!
//! These helpers are the boundary where container formats (PNG, JPEG, GIF,
//! WebP) become the crate's RGB8 [`Bitmap`]. Decode failures map to
//! [`PixMatchError::Decode`], keeping per-candidate skipping a typed path.

use std::path::Path;

use crate::image::Bitmap;
use crate::util::{PixMatchError, PixMatchResult};

/// Creates a [`Bitmap`] from an `image` crate RGB8 buffer.
pub fn bitmap_from_rgb_image(img: &image::RgbImage) -> PixMatchResult<Bitmap> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    Bitmap::from_rgb8(img.as_raw().clone(), width, height)
}

/// Creates a [`Bitmap`] from a dynamic image, converting to RGB8.
pub fn bitmap_from_dynamic_image(img: &image::DynamicImage) -> PixMatchResult<Bitmap> {
    let rgb = img.to_rgb8();
    bitmap_from_rgb_image(&rgb)
}

/// Decodes in-memory image bytes, guessing the container format.
pub fn decode_bitmap(bytes: &[u8]) -> PixMatchResult<Bitmap> {
    let img = image::load_from_memory(bytes).map_err(|err| PixMatchError::Decode {
        reason: err.to_string(),
    })?;
    bitmap_from_dynamic_image(&img)
}

/// Loads an image from disk and converts it to an RGB8 bitmap.
pub fn load_bitmap<P: AsRef<Path>>(path: P) -> PixMatchResult<Bitmap> {
    let img = image::open(path).map_err(|err| PixMatchError::Decode {
        reason: err.to_string(),
    })?;
    bitmap_from_dynamic_image(&img)
}
