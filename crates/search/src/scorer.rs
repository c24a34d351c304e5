// crates/search/src/scorer.rs
//! Similarity scoring between a query and a single candidate string.
//!
//! All comparisons run over the lowercased text. Highlight offsets are
//! character offsets into the case-folded string; they are valid for the
//! original string only insofar as case folding preserves length (ASCII
//! case-fold assumption, a documented limitation of this scorer).

use crate::MIN_SIMILARITY;

/// Result of scoring one candidate against a query.
///
/// `match_start = -1` with `match_length = 0` means "no highlight span".
/// The score and the span are computed independently: a low-score match with
/// a prefix overlap is accepted, and a high-score fuzzy match with no prefix
/// overlap carries no span.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityScore {
    /// Match quality in `[0, 1]`; 1.0 for direct substring matches.
    pub score: f64,
    /// Start of the highlight span, in characters, or -1.
    pub match_start: i32,
    /// Length of the highlight span, in characters, or 0.
    pub match_length: u32,
}

/// Normalized edit-distance similarity: `1 - levenshtein(a, b) / max(|a|, |b|)`.
///
/// Symmetric, `similarity(s, s) == 1` for non-empty `s`. Any empty operand
/// yields 0.0 by convention (an empty query matches nothing, rather than
/// everything).
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b)
}

/// Score `candidate` against `query`.
///
/// Returns `None` for empty inputs and for candidates that neither reach
/// [`MIN_SIMILARITY`] nor share any prefix with the query.
pub fn score(candidate: &str, query: &str) -> Option<SimilarityScore> {
    if candidate.is_empty() || query.is_empty() {
        return None;
    }

    let cand = candidate.to_lowercase();
    let q = query.to_lowercase();
    let cand_chars: Vec<char> = cand.chars().collect();
    let q_chars: Vec<char> = q.chars().collect();

    // Direct substring match wins outright: first occurrence, full query span.
    if let Some(pos) = find_chars(&cand_chars, &q_chars) {
        return Some(SimilarityScore {
            score: 1.0,
            match_start: pos as i32,
            match_length: q_chars.len() as u32,
        });
    }

    // Fuzzy path: best similarity across the whole candidate and each token.
    let mut best = similarity(&q, &cand);
    for token in cand.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        best = best.max(similarity(&q, token));
    }

    let (match_start, match_length) = prefix_overlap(&cand_chars, &q_chars);

    if best < MIN_SIMILARITY && match_length == 0 {
        return None;
    }

    Some(SimilarityScore {
        score: best,
        match_start,
        match_length,
    })
}

/// Longest prefix of `query` that occurs as a contiguous substring of
/// `candidate`. Lengths are tried from `min(|candidate|, |query|)` down to 1;
/// the first hit wins, so longest wins by construction and the leftmost
/// occurrence is taken at that length.
///
/// Returns `(-1, 0)` when no prefix of any length occurs.
fn prefix_overlap(candidate: &[char], query: &[char]) -> (i32, u32) {
    let max_len = candidate.len().min(query.len());
    for len in (1..=max_len).rev() {
        if let Some(pos) = find_chars(candidate, &query[..len]) {
            return (pos as i32, len as u32);
        }
    }
    (-1, 0)
}

/// First occurrence of `needle` as a contiguous run in `haystack`.
fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
