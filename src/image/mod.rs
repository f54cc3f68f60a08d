//! Owned RGB bitmaps and luminance access.
//!
//! `Bitmap` is the decoded-image currency of this crate: a contiguous
//! row-major buffer of 8-bit RGB triples with no row padding. Construction
//! validates dimensions and the buffer length, so every bitmap that exists
//! can be hashed without further checks. Luminance uses the integer Rec. 601
//! weights, matching the grayscale conversion of common imaging toolkits.

use std::fmt;

use crate::util::{PixMatchError, PixMatchResult};

pub mod io;

/// Owned 8-bit RGB image with three bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Bitmap {
    /// Creates a bitmap from an interleaved RGB8 buffer.
    ///
    /// The buffer length must be exactly `width * height * 3`; zero or
    /// overflowing dimensions are rejected.
    pub fn from_rgb8(data: Vec<u8>, width: usize, height: usize) -> PixMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(PixMatchError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or(PixMatchError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(PixMatchError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved RGB8 buffer, row-major.
    pub fn as_rgb8(&self) -> &[u8] {
        &self.data
    }

    /// Returns the `[r, g, b]` triple at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Rec. 601 luminance of the pixel at `(x, y)`.
    ///
    /// Callers must stay within bounds; grid sampling guarantees this.
    pub(crate) fn luma(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y * self.width + x) * 3;
        luma_rec601(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Integer Rec. 601 luma: `(299*R + 587*G + 114*B + 500) / 1000`.
pub(crate) fn luma_rec601(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    ((weighted + 500) / 1000) as u8
}
