//! Multi-signal similarity scoring between a query and one candidate.
//!
//! Signals, in precedence order: exact match (the only way to score 1.0),
//! substring containment weighted by coverage, token overlap with
//! edit-distance tolerance, acronym matching, and a whole-string
//! edit-distance ratio as the last-resort baseline. Constants are tuned to
//! the documented resolution outcomes, not to any published algorithm's
//! defaults.

use strsim::levenshtein;

use super::normalize::Normalized;

/// Containment score floor; coverage of the longer string adds the rest.
const CONTAINMENT_BASE: f64 = 0.55;
const CONTAINMENT_SPAN: f64 = 0.40;

/// Token-overlap signal floor and span.
const OVERLAP_BASE: f64 = 0.35;
const OVERLAP_SPAN: f64 = 0.30;

/// Query equals the candidate's full acronym ("mps" for
/// "MacBook Pro Speakers").
const ACRONYM_FULL: f64 = 0.80;

/// A query token covers a prefix of the candidate's acronym.
const ACRONYM_TOKEN: f64 = 0.85;

/// Whole-string edit-ratio fallback is deliberately weak; it only has to
/// keep borderline inputs above the floor, not outrank real signals.
const EDIT_FALLBACK_SCALE: f64 = 0.75;

/// Fractional bonus from the token-overlap ratio, applied on top of the
/// winning signal.
const OVERLAP_BONUS: f64 = 0.05;

/// Score match quality between a normalized query and candidate.
///
/// Returns a value in [0, 1]; 1.0 exactly when the normalized texts are
/// equal. Pure and symmetric in case/whitespace by construction, since it
/// only sees normalized forms.
pub fn score(query: &Normalized, candidate: &Normalized) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    if query.text == candidate.text {
        return 1.0;
    }

    let mut best: f64 = 0.0;

    if let Some(coverage) = containment_coverage(&query.text, &candidate.text) {
        best = best.max(CONTAINMENT_BASE + CONTAINMENT_SPAN * coverage);
    }

    let overlap = token_overlap(query, candidate);
    if overlap > 0.0 {
        best = best.max(OVERLAP_BASE + OVERLAP_SPAN * overlap);
    }

    let acronym = candidate.acronym();
    if acronym.chars().count() >= 2 && collapse(&query.text) == acronym {
        best = best.max(ACRONYM_FULL);
    }

    let max_len = query.len().max(candidate.len());
    let edit_ratio = 1.0 - levenshtein(&query.text, &candidate.text) as f64 / max_len as f64;
    best = best.max(EDIT_FALLBACK_SCALE * edit_ratio);

    (best + OVERLAP_BONUS * overlap).clamp(0.0, 1.0)
}

/// Coverage ratio when one text contains the other, else `None`.
///
/// Coverage is the shorter length over the longer, so a query spanning
/// more of the candidate scores higher, and a longer correct prefix never
/// scores below a shorter one.
fn containment_coverage(a: &str, b: &str) -> Option<f64> {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a <= len_b && b.contains(a) {
        Some(len_a as f64 / len_b as f64)
    } else if len_b < len_a && a.contains(b) {
        Some(len_b as f64 / len_a as f64)
    } else {
        None
    }
}

/// Mean best similarity of each query token against the candidate.
///
/// Each query token takes the better of its literal token match and its
/// acronym match. Unmatched candidate tokens never penalize.
fn token_overlap(query: &Normalized, candidate: &Normalized) -> f64 {
    if query.tokens.is_empty() {
        return 0.0;
    }
    let acronym = candidate.acronym();
    let total: f64 = query
        .tokens
        .iter()
        .map(|qt| {
            let literal = candidate
                .tokens
                .iter()
                .map(|ct| token_similarity(qt, ct))
                .fold(0.0, f64::max);
            literal.max(acronym_token_similarity(qt, &acronym))
        })
        .sum();
    total / query.tokens.len() as f64
}

/// Similarity of one query token to one candidate token.
///
/// Edit tolerance scales with the query token: 1-2 chars must match
/// exactly, 3-5 chars allow one edit, longer tokens allow two. A query
/// token at least 3 chars long that prefixes a candidate token scores the
/// fraction it covers, so partial words keep a signal.
fn token_similarity(query_token: &str, candidate_token: &str) -> f64 {
    if query_token == candidate_token {
        return 1.0;
    }
    let q_len = query_token.chars().count();
    let c_len = candidate_token.chars().count();
    let allowed = match q_len {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    };
    let distance = levenshtein(query_token, candidate_token);
    if allowed > 0 && distance <= allowed {
        return 1.0 - distance as f64 / q_len.max(c_len) as f64;
    }
    if q_len >= 3 && candidate_token.starts_with(query_token) {
        return q_len as f64 / c_len as f64;
    }
    0.0
}

/// A query token that spells out the leading initials of the candidate
/// ("ap" against "AirPods Pro") is a strong abbreviation signal.
fn acronym_token_similarity(query_token: &str, acronym: &str) -> f64 {
    if query_token.chars().count() >= 2
        && acronym.chars().count() >= 2
        && acronym.starts_with(query_token)
    {
        ACRONYM_TOKEN
    } else {
        0.0
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect()
}
