//! Text canonicalization ahead of keyword scoring.
//!
//! Normalized text is lower-case, contains only word characters separated by
//! single spaces, and has had the contraction table applied once. Punctuation
//! therefore cannot hide a keyword: `"Open?"` and `"open"` normalize alike.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anything that is not a letter, number, underscore or whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}_\s]").unwrap());

/// Built-in contraction expansions, applied in this order.
pub const DEFAULT_CONTRACTIONS: &[(&str, &str)] = &[
    ("what's", "what is"),
    ("what're", "what are"),
    ("who's", "who is"),
    ("where's", "where is"),
    ("when's", "when is"),
    ("why's", "why is"),
    ("how's", "how is"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("i'm", "i am"),
    ("you're", "you are"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("i've", "i have"),
    ("you've", "you have"),
    ("we've", "we have"),
    ("they've", "they have"),
    ("i'll", "i will"),
    ("you'll", "you will"),
    ("we'll", "we will"),
    ("they'll", "they will"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
];

/// One literal substring replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contraction {
    pub from: String,
    pub to: String,
}

/// Lower-cases, strips punctuation, collapses whitespace and expands
/// contractions.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    contractions: Vec<Contraction>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_CONTRACTIONS
                .iter()
                .map(|&(from, to)| Contraction {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
        )
    }
}

impl TextNormalizer {
    /// Create a normalizer with an explicit contraction table.
    pub fn new(contractions: Vec<Contraction>) -> Self {
        Self { contractions }
    }

    pub fn contractions(&self) -> &[Contraction] {
        &self.contractions
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let spaced = NON_WORD.replace_all(lowered.trim(), " ");
        let mut normalized = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

        // Each entry runs once, in table order.
        for c in &self.contractions {
            if !c.from.is_empty() && normalized.contains(c.from.as_str()) {
                normalized = normalized.replace(c.from.as_str(), &c.to);
            }
        }
        normalized
    }
}

/// Whitespace tokens of already-normalized text.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
