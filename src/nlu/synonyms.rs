//! Synonym expansion for scoring.
//!
//! Each token that belongs to a synonym group is replaced in place by every
//! term of that group, which widens the bag of words the keyword scorer sees.
//! The expanded text is never shown to the user.

use serde::{Deserialize, Serialize};

/// A canonical key and its synonyms (the key is usually among the terms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub key: String,
    pub terms: Vec<String>,
}

/// Ordered synonym groups. When a token belongs to several groups the first
/// one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    pub fn new(groups: Vec<SynonymGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First group whose terms contain `token`.
    pub fn group_of(&self, token: &str) -> Option<&SynonymGroup> {
        self.groups
            .iter()
            .find(|g| g.terms.iter().any(|t| t == token))
    }

    /// Replace every token that belongs to a group with the group's terms.
    pub fn expand(&self, normalized: &str) -> String {
        let mut expanded: Vec<&str> = Vec::new();
        for token in normalized.split_whitespace() {
            match self.group_of(token) {
                Some(group) => expanded.extend(group.terms.iter().map(String::as_str)),
                None => expanded.push(token),
            }
        }
        expanded.join(" ")
    }
}
