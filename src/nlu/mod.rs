//! Natural-language understanding for restaurant chat messages.
//!
//! The pipeline is deliberately small and deterministic:
//!
//! 1. [`TextNormalizer`] canonicalizes the raw message.
//! 2. [`SynonymTable`] optionally widens it with synonym groups.
//! 3. [`score_all`] scores every intent's keyword set with the fuzzy
//!    scorers in [`similarity`].
//! 4. [`IntentClassifier`] runs the ordered decision policy over the scores.
//! 5. [`resolve_menu_item`] and [`resolve_faq`] map the raw message to a
//!    concrete dish or FAQ answer.
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod classifier;
pub mod intent;
pub mod normalize;
pub mod resolve;
pub mod similarity;
pub mod synonyms;

pub use classifier::{Classification, IntentClassifier};
pub use intent::{Intent, IntentKeywordTable, IntentScores, keyword_floor, score_all, score_intent};
pub use normalize::{Contraction, DEFAULT_CONTRACTIONS, TextNormalizer};
pub use resolve::{
    FAQ_MATCH_THRESHOLD, MENU_MATCH_THRESHOLD, MenuCorpus, resolve_faq, resolve_menu_item,
    search_faq, search_menu,
};
pub use similarity::{
    BestMatch, Score, extract_best, partial_ratio, ratio, token_set_ratio, token_sort_ratio,
    weighted_ratio,
};
pub use synonyms::{SynonymGroup, SynonymTable};
