//! Pixmatch ranks candidate images against a query by perceptual-hash
//! distance.
//!
//! Every image is reduced to a 64-bit average hash of its coarse luminance
//! pattern; candidates are scored by Hamming distance to the query hash and
//! returned most-similar-first by default. An undecodable candidate is
//! skipped rather than failing the request, while an undecodable query fails
//! fast. Matching is pure computation over in-memory data, with optional
//! parallelism via the `rayon` feature.

pub mod candidate;
pub mod hash;
pub mod image;
pub mod search;
mod trace;
pub mod util;

pub use candidate::{Candidate, ImageData};
pub use hash::{average_hash, PerceptualHash};
pub use image::io;
pub use image::Bitmap;
pub use search::{MatchConfig, MatchResult, Matcher, RankOrder};
pub use util::{PixMatchError, PixMatchResult};
