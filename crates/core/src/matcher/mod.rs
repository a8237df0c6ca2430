//! Fuzzy device-name resolution.
//!
//! [`resolve`] is a pure function of `(query, candidates)`: it scores every
//! candidate with the multi-signal [`score`] function, drops anything below
//! the acceptance threshold, ranks the survivors and decides between a
//! confident unique winner, an ambiguous set, or no match. It holds no
//! state, performs no I/O and never fails - every outcome is a
//! [`ResolutionResult`] variant.

pub mod normalize;
pub mod score;

use serde::Serialize;

pub use normalize::{normalize, Normalized};
pub use score::score;

/// Candidates scoring below this are excluded from the ranking entirely.
pub const ACCEPT_THRESHOLD: f64 = 0.35;

/// Survivors within this distance of the top score are reported together
/// as ambiguous instead of silently picking one.
pub const AMBIGUITY_MARGIN: f64 = 0.05;

/// Outcome of resolving a query against a candidate list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "labels")]
pub enum ResolutionResult {
    /// A single confident winner.
    Unique(String),
    /// Two or more candidates too close to call, best first. Whether to
    /// auto-pick the first, prompt, or fail is caller policy.
    Ambiguous(Vec<String>),
    /// Nothing cleared the acceptance threshold (also covers empty query
    /// and empty candidate list).
    NoMatch,
}

/// One candidate with its score and ranking keys.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    /// Original device label, untouched.
    pub label: String,
    /// Match quality in [0, 1].
    pub score: f64,
    /// Normalized label length, the "shortest specific match wins" key.
    normalized_len: usize,
    /// Position in the input list, for stable ordering.
    index: usize,
}

/// Score and rank all candidates that clear the acceptance threshold.
///
/// Ordering: score descending, then shorter normalized label, then original
/// candidate order. Exposed so callers can log or display the full ranking.
pub fn rank(query: &str, candidates: &[String]) -> Vec<ScoredCandidate> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<ScoredCandidate> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let normalized = normalize(label);
            let score = score::score(&query, &normalized);
            tracing::trace!(label = %label, score, "scored candidate");
            (score >= ACCEPT_THRESHOLD).then(|| ScoredCandidate {
                label: label.clone(),
                score,
                normalized_len: normalized.len(),
                index,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.normalized_len.cmp(&b.normalized_len))
            .then(a.index.cmp(&b.index))
    });
    ranked
}

/// Resolve `query` against `candidates`.
///
/// Unique when the best survivor is an exact match, the only survivor, or
/// leads the runner-up by more than [`AMBIGUITY_MARGIN`]; Ambiguous when
/// several survivors sit within the margin; NoMatch otherwise. Repeated
/// calls with identical inputs always return the identical result.
pub fn resolve(query: &str, candidates: &[String]) -> ResolutionResult {
    let ranked = rank(query, candidates);
    let Some(top) = ranked.first() else {
        return ResolutionResult::NoMatch;
    };

    let decisive = top.score >= 1.0
        || ranked.len() == 1
        || top.score - ranked[1].score > AMBIGUITY_MARGIN;
    if decisive {
        tracing::debug!(label = %top.label, score = top.score, "resolved unique");
        return ResolutionResult::Unique(top.label.clone());
    }

    let top_score = top.score;
    let contenders: Vec<String> = ranked
        .iter()
        .take_while(|c| top_score - c.score <= AMBIGUITY_MARGIN)
        .map(|c| c.label.clone())
        .collect();
    tracing::debug!(count = contenders.len(), "resolution ambiguous");
    ResolutionResult::Ambiguous(contenders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rank_orders_by_score_then_length() {
        let candidates = labels(&["External Speakers Pro Max", "External Speakers"]);
        let ranked = rank("Speakers", &candidates);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "External Speakers");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_rank_excludes_below_threshold() {
        let candidates = labels(&["MacBook Pro Speakers", "HDMI Output"]);
        let ranked = rank("Speakers", &candidates);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].label, "MacBook Pro Speakers");
    }

    #[test]
    fn test_rank_empty_query_ranks_nothing() {
        let candidates = labels(&["AirPods Pro"]);
        assert!(rank("", &candidates).is_empty());
        assert!(rank("  !! ", &candidates).is_empty());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let candidates = labels(&["AirPods Pro", "AirPods Max"]);
        match resolve("airpods", &candidates) {
            ResolutionResult::Ambiguous(set) => {
                assert_eq!(set, vec!["AirPods Pro", "AirPods Max"]);
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_match_wins_even_with_close_siblings() {
        let candidates = labels(&["AirPods Max", "AirPods"]);
        assert_eq!(
            resolve("AirPods", &candidates),
            ResolutionResult::Unique("AirPods".into())
        );
    }

    #[test]
    fn test_result_serializes_for_json_output() {
        let json = serde_json::to_value(ResolutionResult::Unique("AirPods Pro".into())).unwrap();
        assert_eq!(json["result"], "Unique");
        assert_eq!(json["labels"], "AirPods Pro");
    }
}
