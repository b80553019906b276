//! Fuzzy lookup of menu items and FAQ answers.

use crate::data::{Catalog, FaqEntry, MenuItem};

use super::similarity::{Score, extract_best, token_set_ratio};

/// Minimum [`weighted_ratio`](super::similarity::weighted_ratio) for a menu match (inclusive).
pub const MENU_MATCH_THRESHOLD: Score = 60;

/// A FAQ match must score strictly above this.
pub const FAQ_MATCH_THRESHOLD: Score = 60;

/// One searchable string and the item it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry<'c> {
    pub text: String,
    pub item: &'c MenuItem,
}

/// Flattened search strings for every item in a catalog.
///
/// Per item, in this order: the name, the description, `"{size} {name}"` for
/// each variant, then `"{flavour} {name}"` and the bare flavour for each
/// flavour. Entries keep catalog order.
#[derive(Debug, Clone, Default)]
pub struct MenuCorpus<'c> {
    entries: Vec<CorpusEntry<'c>>,
}

impl<'c> MenuCorpus<'c> {
    pub fn build(catalog: &'c Catalog) -> Self {
        let mut entries = Vec::new();
        for item in catalog.items() {
            let mut push = |text: String| {
                if !text.trim().is_empty() {
                    entries.push(CorpusEntry { text, item });
                }
            };
            push(item.name.clone());
            if let Some(description) = &item.description {
                push(description.clone());
            }
            for variant in &item.variants {
                push(format!("{} {}", variant.size, item.name));
            }
            for flavour in &item.flavours {
                push(format!("{} {}", flavour.name, item.name));
                push(flavour.name.clone());
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CorpusEntry<'c>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest entry and its score, whatever the score.
    pub fn best_match(&self, raw_text: &str) -> Option<(&CorpusEntry<'c>, Score)> {
        let best = extract_best(raw_text, self.entries.iter().map(|e| e.text.as_str()))?;
        Some((&self.entries[best.index], best.score))
    }

    /// The item whose corpus entry best matches `raw_text`, if it clears
    /// [`MENU_MATCH_THRESHOLD`].
    pub fn search(&self, raw_text: &str) -> Option<&'c MenuItem> {
        let (entry, score) = self.best_match(raw_text)?;
        tracing::debug!(
            matched = %entry.text,
            item = %entry.item.name,
            score,
            "menu search"
        );
        (score >= MENU_MATCH_THRESHOLD).then_some(entry.item)
    }
}

/// Resolve a free-text mention to a catalog item.
pub fn search_menu<'c>(raw_text: &str, catalog: &'c Catalog) -> Option<&'c MenuItem> {
    MenuCorpus::build(catalog).search(raw_text)
}

/// Canonical name of the item `raw_text` refers to.
pub fn resolve_menu_item<'c>(raw_text: &str, catalog: &'c Catalog) -> Option<&'c str> {
    search_menu(raw_text, catalog).map(|item| item.name.as_str())
}

/// The FAQ entry whose question best matches `raw_text` by word set.
///
/// Ties keep the earliest entry. Matches at or below
/// [`FAQ_MATCH_THRESHOLD`] are rejected.
pub fn search_faq<'f>(raw_text: &str, faqs: &'f [FaqEntry]) -> Option<&'f FaqEntry> {
    let query = raw_text.to_lowercase();
    let mut best: Option<(&FaqEntry, Score)> = None;
    for entry in faqs {
        let score = token_set_ratio(&query, &entry.question.to_lowercase());
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((entry, score));
        }
    }
    let (entry, score) = best?;
    tracing::debug!(question = %entry.question, score, "faq search");
    (score > FAQ_MATCH_THRESHOLD).then_some(entry)
}

/// Answer of the FAQ entry `raw_text` asks about.
pub fn resolve_faq<'f>(raw_text: &str, faqs: &'f [FaqEntry]) -> Option<&'f str> {
    search_faq(raw_text, faqs).map(|entry| entry.answer.as_str())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(&json!({
            "burgers": [
                {
                    "name": "Zinger Burger",
                    "description": "Crunchy chicken fillet in a toasted bun",
                    "variants": [{"size": "Regular", "price": 550}, {"size": "Large", "price": 750}],
                    "flavours": [{"name": "Hot & Spicy"}, "Classic"],
                },
                {"name": "Beef Burger", "description": "Grilled beef patty with cheese"},
            ],
            "pizzas": [
                {"name": "Margherita Pizza", "variants": [{"size": "Medium", "price": 1200}]},
            ],
        }))
    }

    fn faqs() -> Vec<FaqEntry> {
        [
            ("Do you offer home delivery?", "Yes, we deliver within 5 km."),
            ("Is your meat halal?", "All our meat is 100% halal certified."),
            ("Do you have vegetarian options?", "Yes, several vegetarian dishes."),
        ]
        .into_iter()
        .map(|(q, a)| FaqEntry {
            question: q.into(),
            answer: a.into(),
        })
        .collect()
    }

    #[test]
    fn corpus_layout() {
        let catalog = catalog();
        let corpus = MenuCorpus::build(&catalog);
        let zinger: Vec<_> = corpus
            .entries()
            .iter()
            .filter(|e| e.item.name == "Zinger Burger")
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(
            zinger,
            [
                "Zinger Burger",
                "Crunchy chicken fillet in a toasted bun",
                "Regular Zinger Burger",
                "Large Zinger Burger",
                "Hot & Spicy Zinger Burger",
                "Hot & Spicy",
                "Classic Zinger Burger",
                "Classic",
            ]
        );
        assert_eq!(corpus.len(), 8 + 2 + 2);
    }

    #[test]
    fn flavour_mention_resolves_to_dish() {
        assert_eq!(
            resolve_menu_item("I want something spicy", &catalog()),
            Some("Zinger Burger")
        );
    }

    #[test]
    fn name_and_size_resolve() {
        let catalog = catalog();
        assert_eq!(resolve_menu_item("zinger burger", &catalog), Some("Zinger Burger"));
        assert_eq!(resolve_menu_item("margherita", &catalog), Some("Margherita Pizza"));
        assert_eq!(
            resolve_menu_item("medium margherita pizza", &catalog),
            Some("Margherita Pizza")
        );
    }

    #[test]
    fn description_resolves_to_owner() {
        assert_eq!(
            resolve_menu_item("grilled beef patty", &catalog()),
            Some("Beef Burger")
        );
    }

    #[test]
    fn unrelated_text_has_no_item() {
        assert_eq!(resolve_menu_item("qqqq xxxx", &catalog()), None);
        assert_eq!(resolve_menu_item("", &catalog()), None);
    }

    #[test]
    fn empty_catalog_has_no_item() {
        let empty = Catalog::default();
        assert!(MenuCorpus::build(&empty).is_empty());
        assert_eq!(resolve_menu_item("zinger burger", &empty), None);
    }

    #[test]
    fn shared_string_belongs_to_first_item() {
        let catalog = Catalog::from_json(&json!({
            "a": [{"name": "Fries", "flavours": ["Masala"]}],
            "b": [{"name": "Wings", "flavours": ["Masala"]}],
        }));
        assert_eq!(resolve_menu_item("masala", &catalog), Some("Fries"));
    }

    #[test]
    fn faq_matches_question_words() {
        let faqs = faqs();
        assert_eq!(
            resolve_faq("Is your meat halal?", &faqs),
            Some("All our meat is 100% halal certified.")
        );
        assert_eq!(
            resolve_faq("do you have vegetarian options", &faqs),
            Some("Yes, several vegetarian dishes.")
        );
    }

    #[test]
    fn faq_rejects_weak_matches() {
        assert_eq!(resolve_faq("zzzz", &faqs()), None);
        assert_eq!(resolve_faq("halal", &[]), None);
    }

    #[test]
    fn faq_tie_keeps_first() {
        let twins = vec![
            FaqEntry {
                question: "Is there parking?".into(),
                answer: "first".into(),
            },
            FaqEntry {
                question: "Is there parking?".into(),
                answer: "second".into(),
            },
        ];
        assert_eq!(resolve_faq("is there parking", &twins), Some("first"));
    }
}
