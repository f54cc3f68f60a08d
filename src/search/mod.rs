//! Ranking candidates against a query by perceptual-hash distance.
//!
//! The matcher hashes the query once, hashes every candidate independently,
//! and returns one scored result per candidate that produced a hash. A
//! candidate whose payload fails to decode is dropped from the output; one
//! bad file never aborts the request. Sorting is stable, so candidates with
//! equal scores keep their input order, and the optional rayon path yields
//! the same sequence as the sequential one.

use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::hash::{average_hash, PerceptualHash};
use crate::image::io::decode_bitmap;
use crate::image::Bitmap;
use crate::trace::{trace_event, trace_span};
use crate::util::PixMatchResult;

/// Direction of the returned ranking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankOrder {
    /// Smallest distance first, so the most similar candidate leads.
    #[default]
    Ascending,
    /// Largest distance first.
    Descending,
}

/// Configuration for a [`Matcher`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchConfig {
    /// Sort direction of the result sequence.
    pub rank_order: RankOrder,
    /// Hash candidates on the rayon pool. Requires the `rayon` feature and
    /// is ignored without it; the output is identical either way.
    pub parallel: bool,
}

/// Scored result for one candidate, metadata carried through unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the matched candidate.
    pub id: String,
    /// Display name of the matched candidate.
    pub name: String,
    /// Hamming distance between the query and candidate hashes, in `[0, 64]`.
    pub score: u32,
    /// Link to the stored image.
    pub link: String,
    /// Optional thumbnail link.
    pub thumbnail: Option<String>,
}

/// Perceptual-hash matcher over in-memory images.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ranks `candidates` by hash distance to the already-decoded `query`.
    ///
    /// Returns at most one result per candidate. Candidates whose payload
    /// cannot be decoded are skipped; equal scores keep input order.
    pub fn rank(&self, query: &Bitmap, candidates: &[Candidate]) -> Vec<MatchResult> {
        let _span = trace_span!("rank", candidates = candidates.len()).entered();
        let query_hash = average_hash(query);

        let outcomes = self.score_all(query_hash, candidates);

        let mut results = Vec::with_capacity(candidates.len());
        let mut skipped = 0usize;
        for (candidate, outcome) in candidates.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => {
                    skipped += 1;
                    let reason = err.to_string();
                    trace_event!(
                        "candidate_skipped",
                        id = candidate.id.as_str(),
                        reason = reason.as_str()
                    );
                }
            }
        }

        match self.config.rank_order {
            RankOrder::Ascending => results.sort_by(|a, b| a.score.cmp(&b.score)),
            RankOrder::Descending => results.sort_by(|a, b| b.score.cmp(&a.score)),
        }

        trace_event!("rank_complete", matched = results.len(), skipped = skipped);
        results
    }

    /// Decodes `query` bytes and ranks `candidates` against the result.
    ///
    /// An undecodable query fails here, before any candidate is touched;
    /// there is no partial result for a broken query.
    pub fn rank_bytes(
        &self,
        query: &[u8],
        candidates: &[Candidate],
    ) -> PixMatchResult<Vec<MatchResult>> {
        let query = decode_bitmap(query)?;
        Ok(self.rank(&query, candidates))
    }

    fn score_all(
        &self,
        query_hash: PerceptualHash,
        candidates: &[Candidate],
    ) -> Vec<PixMatchResult<MatchResult>> {
        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return candidates
                .par_iter()
                .map(|candidate| score_candidate(query_hash, candidate))
                .collect();
        }

        candidates
            .iter()
            .map(|candidate| score_candidate(query_hash, candidate))
            .collect()
    }
}

/// Scores one candidate; the error carries the skip reason.
fn score_candidate(
    query_hash: PerceptualHash,
    candidate: &Candidate,
) -> PixMatchResult<MatchResult> {
    let bitmap = candidate.image.to_bitmap()?;
    let candidate_hash = average_hash(bitmap.as_ref());
    Ok(MatchResult {
        id: candidate.id.clone(),
        name: candidate.name.clone(),
        score: query_hash.distance(candidate_hash),
        link: candidate.link.clone(),
        thumbnail: candidate.thumbnail.clone(),
    })
}
