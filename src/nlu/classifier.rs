//! Intent decision policy.
//!
//! Per-intent keyword scores are fed through an ordered rule list; the first
//! rule that returns an intent decides. Conversational intents come first,
//! then the narrow branch/FAQ intents, then hours/about (which overlap with
//! menu vocabulary and are disambiguated against the menu score), then the
//! menu default, an arg-max fallback and finally a length heuristic.
//!
//! The thresholds are empirical and kept exactly as tuned.

use serde::Serialize;

use super::intent::{Intent, IntentKeywordTable, IntentScores, score_all};
use super::normalize::TextNormalizer;
use super::synonyms::SynonymTable;

/// Words that tip an hours/menu overlap towards hours.
const HOURS_HINTS: [&str; 4] = ["open", "close", "timing", "hour"];

/// Utterances with at most this many tokens default to a menu lookup.
const SHORT_UTTERANCE_TOKENS: usize = 4;

/// What a rule sees.
struct Evidence<'a> {
    normalized: &'a str,
    scores: &'a IntentScores,
}

impl Evidence<'_> {
    fn score(&self, intent: Intent) -> u8 {
        self.scores.get(intent)
    }
}

/// A named step of the decision policy.
struct Rule {
    name: &'static str,
    decide: fn(&Evidence<'_>) -> Option<Intent>,
}

/// The decision policy, evaluated top to bottom.
const POLICY: &[Rule] = &[
    Rule {
        name: "greeting",
        decide: greeting,
    },
    Rule {
        name: "farewell",
        decide: farewell,
    },
    Rule {
        name: "branch",
        decide: branch,
    },
    Rule {
        name: "faq",
        decide: faq,
    },
    Rule {
        name: "hours",
        decide: hours,
    },
    Rule {
        name: "about",
        decide: about,
    },
    Rule {
        name: "menu",
        decide: menu,
    },
    Rule {
        name: "best_score",
        decide: best_score,
    },
    Rule {
        name: "short_utterance",
        decide: short_utterance,
    },
];

fn greeting(e: &Evidence<'_>) -> Option<Intent> {
    (e.score(Intent::Greeting) > 80).then_some(Intent::Greeting)
}

fn farewell(e: &Evidence<'_>) -> Option<Intent> {
    (e.score(Intent::Farewell) > 80).then_some(Intent::Farewell)
}

/// Branch wins unless the menu scored strictly higher.
fn branch(e: &Evidence<'_>) -> Option<Intent> {
    let branch = e.score(Intent::BranchQuery);
    (branch > 70 && e.score(Intent::MenuQuery) <= branch).then_some(Intent::BranchQuery)
}

fn faq(e: &Evidence<'_>) -> Option<Intent> {
    (e.score(Intent::FaqQuery) > 70).then_some(Intent::FaqQuery)
}

/// When menu is also strong, hours needs a literal hours word.
fn hours(e: &Evidence<'_>) -> Option<Intent> {
    if e.score(Intent::HoursQuery) <= 70 {
        return None;
    }
    let menu_strong = e.score(Intent::MenuQuery) > 70;
    let hinted = HOURS_HINTS.iter().any(|h| e.normalized.contains(h));
    (!menu_strong || hinted).then_some(Intent::HoursQuery)
}

fn about(e: &Evidence<'_>) -> Option<Intent> {
    (e.score(Intent::About) > 70 && e.score(Intent::MenuQuery) < 60).then_some(Intent::About)
}

fn menu(e: &Evidence<'_>) -> Option<Intent> {
    (e.score(Intent::MenuQuery) > 50).then_some(Intent::MenuQuery)
}

fn best_score(e: &Evidence<'_>) -> Option<Intent> {
    let (intent, score) = e.scores.best();
    (score > 50).then_some(intent)
}

fn short_utterance(e: &Evidence<'_>) -> Option<Intent> {
    (e.normalized.split_whitespace().count() <= SHORT_UTTERANCE_TOKENS)
        .then_some(Intent::MenuQuery)
}

/// Full account of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    /// The utterance after normalization.
    pub normalized: String,
    pub scores: IntentScores,
    /// Name of the policy rule that decided, or `"none"` for `unknown`.
    pub rule: &'static str,
}

/// Keyword-table intent classifier.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent callers.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    normalizer: TextNormalizer,
    keywords: IntentKeywordTable,
    synonyms: SynonymTable,
    expand_synonyms: bool,
}

impl IntentClassifier {
    pub fn new(normalizer: TextNormalizer, keywords: IntentKeywordTable) -> Self {
        Self {
            normalizer,
            keywords,
            synonyms: SynonymTable::default(),
            expand_synonyms: false,
        }
    }

    /// Score synonym-expanded text instead of the bare normalized text.
    pub fn with_synonyms(mut self, synonyms: SynonymTable, expand: bool) -> Self {
        self.synonyms = synonyms;
        self.expand_synonyms = expand;
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn keywords(&self) -> &IntentKeywordTable {
        &self.keywords
    }

    /// Pick exactly one intent for `raw_text`.
    pub fn classify(&self, raw_text: &str) -> Intent {
        self.explain(raw_text).intent
    }

    /// Per-intent scores for `raw_text` without applying the policy.
    pub fn scores(&self, raw_text: &str) -> IntentScores {
        let normalized = self.normalizer.normalize(raw_text);
        self.score_normalized(&normalized)
    }

    /// Classify and report the scores and the deciding rule.
    pub fn explain(&self, raw_text: &str) -> Classification {
        let normalized = self.normalizer.normalize(raw_text);
        let scores = self.score_normalized(&normalized);

        let evidence = Evidence {
            normalized: &normalized,
            scores: &scores,
        };
        let (intent, rule) = POLICY
            .iter()
            .find_map(|rule| (rule.decide)(&evidence).map(|intent| (intent, rule.name)))
            .unwrap_or((Intent::Unknown, "none"));

        tracing::debug!(
            text = %normalized,
            ?scores,
            %intent,
            rule,
            "classified utterance"
        );

        Classification {
            intent,
            normalized,
            scores,
            rule,
        }
    }

    fn score_normalized(&self, normalized: &str) -> IntentScores {
        if self.expand_synonyms && !self.synonyms.is_empty() {
            score_all(&self.synonyms.expand(normalized), &self.keywords)
        } else {
            score_all(normalized, &self.keywords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NluConfig;

    fn classifier() -> IntentClassifier {
        NluConfig::bundled().unwrap().classifier()
    }

    fn scores(pairs: &[(Intent, u8)]) -> IntentScores {
        let mut s = IntentScores::default();
        for &(intent, score) in pairs {
            s.set(intent, score);
        }
        s
    }

    fn decide(normalized: &str, pairs: &[(Intent, u8)]) -> Intent {
        let scores = scores(pairs);
        let evidence = Evidence {
            normalized,
            scores: &scores,
        };
        POLICY
            .iter()
            .find_map(|r| (r.decide)(&evidence))
            .unwrap_or(Intent::Unknown)
    }

    #[test]
    fn greeting_and_farewell() {
        let c = classifier();
        assert_eq!(c.classify("Hi there!"), Intent::Greeting);
        assert_eq!(c.classify("Bye, thanks!"), Intent::Farewell);
    }

    #[test]
    fn opening_time_is_hours() {
        let c = classifier();
        let explained = c.explain("what time do you open");
        assert_eq!(explained.intent, Intent::HoursQuery);
        // Both hours and menu are strong; the literal "open" decides.
        assert!(explained.scores.get(Intent::MenuQuery) > 70);
        assert_eq!(explained.rule, "hours");
    }

    #[test]
    fn vegetarian_is_faq() {
        assert_eq!(
            classifier().classify("do you have vegetarian options"),
            Intent::FaqQuery
        );
    }

    #[test]
    fn case_does_not_matter() {
        let c = classifier();
        for text in [
            "Hi there!",
            "what time do you open",
            "Where is your branch",
            "show me the menu",
            "tell me about your history and mission",
        ] {
            assert_eq!(
                c.classify(&text.to_uppercase()),
                c.classify(&text.to_lowercase()),
                "{text}"
            );
        }
    }

    #[test]
    fn short_gibberish_defaults_to_menu() {
        let c = classifier();
        let explained = c.explain("qwx vvk");
        assert_eq!(explained.intent, Intent::MenuQuery);
        assert_eq!(explained.rule, "short_utterance");
        assert_eq!(c.classify(""), Intent::MenuQuery);
    }

    #[test]
    fn long_gibberish_is_unknown() {
        let explained = classifier().explain("zzzz qqqq xxxx kkkk jjjj");
        assert_eq!(explained.intent, Intent::Unknown);
        assert_eq!(explained.rule, "none");
    }

    #[test]
    fn policy_thresholds_are_strict() {
        use Intent::*;
        assert_eq!(decide("a b c d e", &[(Greeting, 80)]), Greeting);
        assert_eq!(decide("a b c d e", &[(Greeting, 81)]), Greeting);
        assert_eq!(decide("a b c d e", &[(Greeting, 50)]), Unknown);
        assert_eq!(decide("a b c d e", &[(Farewell, 51)]), Farewell);
    }

    #[test]
    fn branch_yields_to_stronger_menu() {
        use Intent::*;
        assert_eq!(
            decide("x", &[(BranchQuery, 75), (MenuQuery, 80)]),
            MenuQuery
        );
        assert_eq!(
            decide("x", &[(BranchQuery, 80), (MenuQuery, 80)]),
            BranchQuery
        );
    }

    #[test]
    fn hours_needs_hint_when_menu_is_strong() {
        use Intent::*;
        let overlap = [(HoursQuery, 100), (MenuQuery, 100)];
        assert_eq!(decide("when do you close", &overlap), HoursQuery);
        // No hint: falls through to the menu rule.
        assert_eq!(decide("when is the special", &overlap), MenuQuery);
        assert_eq!(
            decide("when", &[(HoursQuery, 100), (MenuQuery, 70)]),
            HoursQuery
        );
    }

    #[test]
    fn about_only_without_menu() {
        use Intent::*;
        assert_eq!(decide("x", &[(About, 90), (MenuQuery, 59)]), About);
        assert_eq!(decide("x", &[(About, 90), (MenuQuery, 60)]), MenuQuery);
    }

    #[test]
    fn faq_outranks_hours() {
        use Intent::*;
        assert_eq!(
            decide("x", &[(FaqQuery, 71), (HoursQuery, 100)]),
            FaqQuery
        );
    }

    #[test]
    fn synonym_expansion_changes_scoring_text() {
        use crate::nlu::synonyms::SynonymGroup;
        use std::collections::BTreeMap;

        let mut sets = BTreeMap::new();
        sets.insert(Intent::MenuQuery, vec!["catalog".to_string()]);
        let table = IntentKeywordTable::new(sets);
        let synonyms = SynonymTable::new(vec![SynonymGroup {
            key: "menu".into(),
            terms: vec!["menu".into(), "catalog".into()],
        }]);

        let plain = IntentClassifier::new(TextNormalizer::default(), table.clone());
        let expanded = plain.clone().with_synonyms(synonyms, true);
        let text = "could i please see the menu";

        assert_eq!(expanded.scores(text).get(Intent::MenuQuery), 100);
        assert!(plain.scores(text).get(Intent::MenuQuery) < 100);
        assert_eq!(expanded.classify(text), Intent::MenuQuery);
    }
}
