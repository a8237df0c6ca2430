//! Canonicalization of device labels and user queries.
//!
//! Every comparison in the scorer runs on the output of [`normalize`].
//! Lower-cases, flattens diacritics (NFKD, combining marks dropped),
//! treats punctuation as token separators and splits letter/digit runs so
//! "HDMI2" and "HDMI 2" normalize identically.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalized form of a label or query: the collapsed comparison text and
/// the ordered word tokens it was built from.
///
/// `text` is always the tokens joined by single spaces, so substring
/// checks and edit distances see exactly what tokenization saw. Empty
/// input yields an empty `text` and no tokens; there is no failure case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Lower-cased, punctuation-collapsed comparison text
    pub text: String,
    /// Ordered word tokens extracted from the input
    pub tokens: Vec<String>,
}

impl Normalized {
    /// Length of the comparison text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the input normalized to nothing comparable.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// First letters of the tokens, concatenated ("AirPods Pro" -> "ap").
    pub fn acronym(&self) -> String {
        self.tokens
            .iter()
            .filter_map(|t| t.chars().next())
            .collect()
    }
}

/// Canonicalize `input` for comparison.
pub fn normalize(input: &str) -> Normalized {
    let folded: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_is_digit: Option<bool> = None;

    for c in folded.chars() {
        if c.is_alphanumeric() {
            let is_digit = c.is_numeric();
            // Letter<->digit transitions open a new token so "hdmi2"
            // compares like "hdmi 2".
            if current_is_digit.is_some_and(|prev| prev != is_digit) && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(c);
            current_is_digit = Some(is_digit);
        } else {
            // Whitespace and punctuation both end the current token.
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current_is_digit = None;
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Normalized {
        text: tokens.join(" "),
        tokens,
    }
}
