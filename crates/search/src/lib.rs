// crates/search/src/lib.rs
//! Fuzzy suggestion scoring and ranking for ticket search.
//!
//! Two layers, both pure and deterministic:
//!
//! - **Scorer** ([`scorer::score`]): computes a similarity score in `[0, 1]`
//!   and a highlight span between a query and one candidate string. Direct
//!   substring matches short-circuit at 1.0; otherwise a normalized
//!   edit-distance similarity is taken over the whole candidate and each of
//!   its tokens, and a longest-prefix-overlap span is computed independently.
//! - **Ranker** ([`ranker::rank`]): scores a batch of candidates, drops
//!   non-matches, sorts by score (recency breaks ties), deduplicates
//!   case-insensitively, and truncates to a bounded result list.
//!
//! No I/O happens here. Candidate sourcing lives in `inboxhq-db`; the HTTP
//! boundary lives in `inboxhq-server`.

pub mod ranker;
pub mod scorer;

pub use ranker::{rank, Candidate};
pub use scorer::{score, similarity, SimilarityScore};

/// Matches scoring below this are rejected unless they have a prefix-overlap
/// highlight. Users often type valid prefixes of rare or short tokens, so a
/// prefix hit keeps an otherwise low-scoring candidate alive.
pub const MIN_SIMILARITY: f64 = 0.3;

/// Maximum number of suggestions returned by the ranker and by the
/// `/api/suggestions` boundary.
pub const MAX_SUGGESTIONS: usize = 5;
