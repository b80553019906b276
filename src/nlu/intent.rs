//! Intent labels, keyword tables and per-intent keyword scoring.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::similarity::{Score, partial_ratio, ratio};

/// Conversational purpose of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    HoursQuery,
    BranchQuery,
    About,
    FaqQuery,
    MenuQuery,
    Unknown,
}

impl Intent {
    /// Intents that carry a keyword set, in tie-break order.
    pub const SCORED: [Intent; 7] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::HoursQuery,
        Intent::BranchQuery,
        Intent::About,
        Intent::FaqQuery,
        Intent::MenuQuery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::HoursQuery => "hours_query",
            Intent::BranchQuery => "branch_query",
            Intent::About => "about",
            Intent::FaqQuery => "faq_query",
            Intent::MenuQuery => "menu_query",
            Intent::Unknown => "unknown",
        }
    }

    /// Parse a snake_case label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::SCORED
            .into_iter()
            .chain([Intent::Unknown])
            .find(|i| i.as_str() == label)
    }

    fn slot(self) -> Option<usize> {
        Self::SCORED.iter().position(|&i| i == self)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword and phrase sets per scored intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentKeywordTable {
    sets: BTreeMap<Intent, Vec<String>>,
}

impl IntentKeywordTable {
    pub fn new(sets: BTreeMap<Intent, Vec<String>>) -> Self {
        Self { sets }
    }

    /// Keywords for `intent`; empty for intents without a set.
    pub fn keywords(&self, intent: Intent) -> &[String] {
        self.sets.get(&intent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Intent, &[String])> {
        self.sets.iter().map(|(&i, k)| (i, k.as_slice()))
    }
}

/// One score per scored intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentScores([Score; 7]);

impl IntentScores {
    pub fn get(&self, intent: Intent) -> Score {
        intent.slot().map_or(0, |s| self.0[s])
    }

    pub fn set(&mut self, intent: Intent, score: Score) {
        if let Some(s) = intent.slot() {
            self.0[s] = score;
        }
    }

    /// Scores in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, Score)> + '_ {
        Intent::SCORED.into_iter().zip(self.0.iter().copied())
    }

    /// Highest score; ties go to the earliest intent in [`Intent::SCORED`].
    pub fn best(&self) -> (Intent, Score) {
        self.iter()
            .fold((Intent::Greeting, 0), |best, (intent, score)| {
                if score > best.1 { (intent, score) } else { best }
            })
    }
}

impl Serialize for IntentScores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (intent, score) in self.iter() {
            map.serialize_entry(intent.as_str(), &score)?;
        }
        map.end()
    }
}

/// Score normalized text against one keyword set.
///
/// - a keyword present as a whole token scores 100;
/// - otherwise the best [`ratio`] between the keyword and any token, counting
///   only tokens and keywords longer than two characters;
/// - multi-word keywords also score their [`partial_ratio`] against the text.
///
/// Returns the maximum, or 0 for an empty set.
pub fn score_intent<S: AsRef<str>>(normalized: &str, keywords: &[S]) -> Score {
    let words: HashSet<&str> = normalized.split_whitespace().collect();
    let mut best: Score = 0;

    for keyword in keywords.iter().map(AsRef::as_ref) {
        let keyword_len = keyword.chars().count();
        let word_score = if words.contains(keyword) {
            100
        } else if keyword_len > 2 {
            words
                .iter()
                .filter(|w| w.chars().count() > 2)
                .map(|w| ratio(w, keyword))
                .max()
                .unwrap_or(0)
        } else {
            0
        };
        best = best.max(word_score);

        if keyword.split_whitespace().nth(1).is_some() {
            best = best.max(partial_ratio(normalized, keyword));
        }
    }
    best
}

/// Floor imposed by literal keyword presence: 100 for a whole-word (or
/// whole-phrase) hit, 90 for a raw substring hit of a keyword longer than
/// three characters.
pub fn keyword_floor<S: AsRef<str>>(normalized: &str, keywords: &[S]) -> Score {
    let padded = format!(" {normalized} ");
    let mut floor = 0;
    for keyword in keywords.iter().map(AsRef::as_ref) {
        if padded.contains(&format!(" {keyword} ")) {
            return 100;
        }
        if keyword.chars().count() > 3 && normalized.contains(keyword) {
            floor = 90;
        }
    }
    floor
}

/// Score every intent of `table` against `normalized`, overrides included.
pub fn score_all(normalized: &str, table: &IntentKeywordTable) -> IntentScores {
    let mut scores = IntentScores::default();
    for intent in Intent::SCORED {
        let keywords = table.keywords(intent);
        let score = score_intent(normalized, keywords).max(keyword_floor(normalized, keywords));
        scores.set(intent, score);
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_scores_100() {
        assert_eq!(score_intent("what time do you open", &["open", "closing"]), 100);
    }

    #[test]
    fn typo_scores_by_ratio() {
        // "burgr" vs "burger": 2*5 / 11.
        assert_eq!(score_intent("one burgr", &["burger"]), 91);
    }

    #[test]
    fn short_tokens_and_keywords_skip_fuzzy() {
        assert_eq!(score_intent("hi", &["hey"]), 0);
        assert_eq!(score_intent("hey there", &["hi"]), 0);
    }

    #[test]
    fn phrase_found_inside_message() {
        assert_eq!(score_intent("so what do you have today", &["what do you have"]), 100);
    }

    #[test]
    fn empty_set_scores_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(score_intent("anything at all", &empty), 0);
    }

    #[test]
    fn floor_whole_word_and_substring() {
        assert_eq!(keyword_floor("is there parking", &["park"]), 90);
        assert_eq!(keyword_floor("is there parking", &["parking"]), 100);
        // Three-character keywords never get the substring floor.
        assert_eq!(keyword_floor("payment options", &["pay"]), 0);
        assert_eq!(keyword_floor("good morning all", &["good morning"]), 100);
    }

    #[test]
    fn best_prefers_earliest_on_tie() {
        let mut scores = IntentScores::default();
        scores.set(Intent::About, 70);
        scores.set(Intent::Farewell, 70);
        assert_eq!(scores.best(), (Intent::Farewell, 70));
        assert_eq!(scores.get(Intent::Unknown), 0);
    }

    #[test]
    fn labels_round_trip() {
        for intent in Intent::SCORED {
            assert_eq!(Intent::from_label(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_label("unknown"), Some(Intent::Unknown));
        assert_eq!(Intent::from_label("menu"), None);
    }
}
