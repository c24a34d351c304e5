// crates/search/src/ranker.rs
//! Ranking a batch of candidates into a bounded suggestion list.

use std::cmp::Ordering;
use std::collections::HashSet;

use inboxhq_types::{Suggestion, SuggestionKind};

use crate::scorer::{score, SimilarityScore};

/// A searchable record considered for suggestion ranking.
///
/// `recency` is a unix timestamp used to break score ties; the most
/// recently updated candidate is the best proxy for relevance when textual
/// score is equal. `kind` tags what committing the suggestion means so one
/// ranking pass can serve mixed candidate pools (subjects, assignee names,
/// status labels).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub recency: i64,
    pub kind: SuggestionKind,
}

impl Candidate {
    pub fn new(text: impl Into<String>, recency: i64, kind: SuggestionKind) -> Self {
        Self {
            text: text.into(),
            recency,
            kind,
        }
    }
}

/// Score, sort, deduplicate, and truncate candidates for a query.
///
/// - non-matches (scorer returns `None`) are dropped
/// - sorted by score descending, ties broken by recency descending
/// - deduplicated by case-insensitive text equality, first (highest-ranked)
///   occurrence kept
/// - truncated to `max_results`
pub fn rank(candidates: &[Candidate], query: &str, max_results: usize) -> Vec<Suggestion> {
    let mut scored: Vec<(&Candidate, SimilarityScore)> = candidates
        .iter()
        .filter_map(|c| score(&c.text, query).map(|s| (c, s)))
        .collect();

    scored.sort_by(|(a, sa), (b, sb)| {
        sb.score
            .partial_cmp(&sa.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.recency.cmp(&a.recency))
    });

    let mut seen = HashSet::with_capacity(scored.len());
    let mut out = Vec::with_capacity(max_results);
    for (candidate, s) in scored {
        if !seen.insert(candidate.text.to_lowercase()) {
            continue;
        }
        out.push(Suggestion {
            value: candidate.text.clone(),
            kind: candidate.kind,
            match_start: s.match_start,
            match_length: s.match_length,
        });
        if out.len() == max_results {
            break;
        }
    }
    out
}
