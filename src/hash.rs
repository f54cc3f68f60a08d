//! 64-bit average-hash fingerprints and Hamming distance.
//!
//! The hash reduces a bitmap to an 8x8 grid of area-averaged luminance
//! samples and emits one bit per cell, set when the sample sits above the
//! grid mean. Samples exactly at the mean take the bright branch only when
//! the mean itself is above mid-gray, so a uniform white frame hashes to all
//! ones and a uniform black frame to all zeros instead of colliding. All
//! arithmetic is integer, so the same bitmap always yields the same hash on
//! every platform.

use std::fmt;
use std::str::FromStr;

use crate::image::Bitmap;
use crate::util::{PixMatchError, PixMatchResult};

/// Side length of the sampling grid; the hash carries one bit per cell.
pub const GRID_SIDE: usize = 8;

const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;
// Mid-gray on the comparison scale, 64 * 255 / 2. Totals above it mean the
// grid average is brighter than 127.5.
const HALF_SCALE: u64 = (GRID_CELLS as u64) * 255 / 2;

/// 64-bit perceptual fingerprint of a bitmap's coarse luminance pattern.
///
/// Grid cells are numbered row-major from the top-left; cell 0 occupies the
/// most significant bit. Distances are only meaningful between hashes
/// produced by the same algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    /// Hash width in bits.
    pub const BITS: u32 = 64;

    /// Wraps a raw bit pattern, as produced by [`average_hash`].
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern.
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Hamming distance to `other`: the number of differing bits, in `[0, 64]`.
    pub fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Renders the hash as 16 lowercase hex digits.
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parses a 16-hex-digit string, as produced by
    /// [`PerceptualHash::to_hex`]. Both digit cases are accepted; signs,
    /// whitespace, and any other characters are not.
    pub fn from_hex(hex: &str) -> PixMatchResult<Self> {
        if hex.len() != 16 {
            return Err(PixMatchError::InvalidHashHex {
                reason: format!("expected 16 hex digits, got {}", hex.len()),
            });
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PixMatchError::InvalidHashHex {
                reason: "found a non-hex character".to_string(),
            });
        }
        let bits = u64::from_str_radix(hex, 16).map_err(|err| PixMatchError::InvalidHashHex {
            reason: err.to_string(),
        })?;
        Ok(Self(bits))
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for PerceptualHash {
    type Err = PixMatchError;

    fn from_str(s: &str) -> PixMatchResult<Self> {
        Self::from_hex(s)
    }
}

/// Computes the 64-bit average hash of a bitmap.
///
/// The result depends only on the downsampled luminance pattern: two
/// bitmaps whose 8x8 grids read the same hash identically, whatever their
/// color detail or pixel dimensions.
pub fn average_hash(bitmap: &Bitmap) -> PerceptualHash {
    let samples = luma_grid(bitmap);
    let total: u64 = samples.iter().map(|&s| u64::from(s)).sum();

    let mut bits = 0u64;
    for (idx, &sample) in samples.iter().enumerate() {
        // Compare sample * 64 against the total to avoid dividing the mean.
        let scaled = u64::from(sample) * GRID_CELLS as u64;
        if scaled > total || (scaled == total && total > HALF_SCALE) {
            bits |= 1 << (63 - idx);
        }
    }
    PerceptualHash(bits)
}

/// Area-averages the bitmap's luminance onto the 8x8 grid, row-major.
///
/// Tile bounds are `[i * len / 8, (i + 1) * len / 8)`. A bound pair that
/// collapses on images narrower or shorter than the grid falls back to the
/// single pixel at the tile origin, so every cell is defined for any
/// constructible bitmap.
fn luma_grid(bitmap: &Bitmap) -> [u8; GRID_CELLS] {
    let width = bitmap.width();
    let height = bitmap.height();
    let mut samples = [0u8; GRID_CELLS];

    for gy in 0..GRID_SIDE {
        let y0 = gy * height / GRID_SIDE;
        let y1 = ((gy + 1) * height / GRID_SIDE).max(y0 + 1);
        for gx in 0..GRID_SIDE {
            let x0 = gx * width / GRID_SIDE;
            let x1 = ((gx + 1) * width / GRID_SIDE).max(x0 + 1);

            let mut sum = 0u64;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += u64::from(bitmap.luma(x, y));
                }
            }
            let count = ((x1 - x0) * (y1 - y0)) as u64;
            samples[gy * GRID_SIDE + gx] = ((sum + count / 2) / count) as u8;
        }
    }
    samples
}
