//! End-to-end resolution behavior over the public API.
//!
//! Each test pins one documented outcome of the resolver; together they are
//! the contract the scoring constants are tuned against.

use audioswitch_core::{resolve, ResolutionResult};

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_unique(query: &str, candidates: &[&str], expected: &str) {
    match resolve(query, &labels(candidates)) {
        ResolutionResult::Unique(label) => assert_eq!(label, expected, "query {query:?}"),
        other => panic!("query {query:?}: expected Unique({expected:?}), got {other:?}"),
    }
}

#[test]
fn test_exact_label_beats_its_prefix_sibling() {
    assert_unique("AirPods Pro", &["AirPods Pro", "AirPods"], "AirPods Pro");
}

#[test]
fn test_case_insensitive_match() {
    assert_unique(
        "airpods",
        &["AirPods Pro", "External Speakers"],
        "AirPods Pro",
    );
}

#[test]
fn test_partial_word_matches_containing_label() {
    assert_unique(
        "Speakers",
        &["MacBook Pro Speakers", "AirPods Pro"],
        "MacBook Pro Speakers",
    );
}

#[test]
fn test_typo_tolerance() {
    assert_unique(
        "MacBok Spekers",
        &["MacBook Pro Speakers", "HDMI Output"],
        "MacBook Pro Speakers",
    );
}

#[test]
fn test_abbreviation_resolves() {
    assert_unique("AP Pro", &["AirPods Pro", "External Speakers"], "AirPods Pro");
}

#[test]
fn test_numeric_suffix_selects_numbered_variant() {
    assert_unique("hdmi2", &["HDMI Output", "HDMI Output 2"], "HDMI Output 2");
}

#[test]
fn test_shortest_label_wins_near_equal_containment() {
    assert_unique(
        "Speakers",
        &["External Speakers", "External Speakers Pro Max"],
        "External Speakers",
    );
    // Same outcome regardless of input order.
    assert_unique(
        "Speakers",
        &["External Speakers Pro Max", "External Speakers"],
        "External Speakers",
    );
}

#[test]
fn test_unrelated_query_is_no_match() {
    assert_eq!(
        resolve("Bluetooth Gizmo", &labels(&["MacBook Pro Speakers", "AirPods Pro"])),
        ResolutionResult::NoMatch
    );
}

#[test]
fn test_empty_query_is_no_match() {
    assert_eq!(
        resolve("", &labels(&["AirPods Pro", "HDMI Output"])),
        ResolutionResult::NoMatch
    );
}

#[test]
fn test_empty_candidates_is_no_match() {
    assert_eq!(resolve("anything", &[]), ResolutionResult::NoMatch);
}

#[test]
fn test_resolution_is_deterministic() {
    let candidates = labels(&["AirPods Pro", "AirPods Max", "External Speakers"]);
    let first = resolve("airpods", &candidates);
    for _ in 0..10 {
        assert_eq!(resolve("airpods", &candidates), first);
    }
    // The ambiguous set itself is ordered stably.
    match first {
        ResolutionResult::Ambiguous(set) => {
            assert_eq!(set, vec!["AirPods Pro", "AirPods Max"]);
        }
        other => panic!("expected ambiguous airpods result, got {other:?}"),
    }
}

#[test]
fn test_ambiguity_requires_disambiguation() {
    // Two equally specific siblings: the core must not invent a winner.
    match resolve("usb dock", &labels(&["USB Dock Left", "USB Dock Right"])) {
        ResolutionResult::Ambiguous(set) => assert_eq!(set.len(), 2),
        other => panic!("expected ambiguous, got {other:?}"),
    }
}

#[test]
fn test_punctuation_and_spacing_do_not_matter() {
    assert_unique(
        "usb-c   dock",
        &["USB C Dock", "External Speakers"],
        "USB C Dock",
    );
}

#[test]
fn test_diacritics_flatten_before_matching() {
    assert_unique(
        "ecouteurs",
        &["Écouteurs Bluetooth", "HDMI Output"],
        "Écouteurs Bluetooth",
    );
}
