//! Candidate records and their image payloads.
//!
//! A candidate couples caller-side metadata (identifier, display name,
//! links) with the image to score. Payloads arrive either already decoded or
//! as raw container bytes; turning a payload into a bitmap is an explicit
//! `Result`, so the match loop can skip undecodable entries without aborting
//! the whole request.

use std::borrow::Cow;
use std::fmt;

use crate::image::io::decode_bitmap;
use crate::image::Bitmap;
use crate::util::PixMatchResult;

/// Image payload of a candidate.
#[derive(Clone)]
pub enum ImageData {
    /// A decoded RGB bitmap, used as-is.
    Decoded(Bitmap),
    /// Encoded container bytes (PNG, JPEG, GIF, WebP), decoded during
    /// matching.
    Encoded(Vec<u8>),
}

impl ImageData {
    /// Produces a bitmap for hashing, decoding encoded payloads on demand.
    ///
    /// Decoded payloads are borrowed; encoded payloads allocate a fresh
    /// bitmap per call.
    pub fn to_bitmap(&self) -> PixMatchResult<Cow<'_, Bitmap>> {
        match self {
            ImageData::Decoded(bitmap) => Ok(Cow::Borrowed(bitmap)),
            ImageData::Encoded(bytes) => decode_bitmap(bytes).map(Cow::Owned),
        }
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageData::Decoded(bitmap) => {
                write!(f, "Decoded({}x{})", bitmap.width(), bitmap.height())
            }
            ImageData::Encoded(bytes) => write!(f, "Encoded({} bytes)", bytes.len()),
        }
    }
}

/// One stored image offered for matching.
///
/// Metadata fields pass through to the corresponding match result
/// unchanged; the matcher never mutates a candidate.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Stable identifier in the caller's storage.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Image payload to score.
    pub image: ImageData,
    /// Link to the stored image.
    pub link: String,
    /// Optional thumbnail link.
    pub thumbnail: Option<String>,
}

impl Candidate {
    /// Creates a candidate from an already-decoded bitmap.
    pub fn decoded(
        id: impl Into<String>,
        name: impl Into<String>,
        bitmap: Bitmap,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: ImageData::Decoded(bitmap),
            link: link.into(),
            thumbnail: None,
        }
    }

    /// Creates a candidate from encoded container bytes.
    pub fn encoded(
        id: impl Into<String>,
        name: impl Into<String>,
        bytes: Vec<u8>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: ImageData::Encoded(bytes),
            link: link.into(),
            thumbnail: None,
        }
    }

    /// Attaches a thumbnail link.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}
