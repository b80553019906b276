//! NLU configuration: intent keyword tables, synonym groups, contractions.
//!
//! A default configuration is bundled into the binary from `data/nlu.toml`.
//! Deployments can point at their own TOML file with the same layout.

use std::collections::BTreeMap;
use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nlu::{
    Contraction, Intent, IntentClassifier, IntentKeywordTable, SynonymGroup, SynonymTable,
    TextNormalizer,
};

/// The bundled configuration document.
pub const BUNDLED_NLU_TOML: &str = include_str!("../data/nlu.toml");

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read NLU config: {path}")]
    #[diagnostic(code(dinebot::config::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse NLU config: {message}")]
    #[diagnostic(
        code(dinebot::config::parse),
        help(
            "Check the TOML syntax. The file needs an [intents] table of keyword \
             lists and may add [classifier], [[synonyms]] and [[contractions]]."
        )
    )]
    Parse { message: String },

    #[error("intent \"{intent}\" has no keyword set")]
    #[diagnostic(
        code(dinebot::config::missing_intent),
        help(
            "Every scored intent needs a list under [intents]: greeting, farewell, \
             hours_query, branch_query, about, faq_query, menu_query."
        )
    )]
    MissingIntent { intent: String },

    #[error("intent \"{intent}\" has an empty keyword set")]
    #[diagnostic(
        code(dinebot::config::empty_keywords),
        help("Add at least one keyword or phrase for this intent.")
    )]
    EmptyKeywords { intent: String },

    #[error("unknown intent label \"{label}\" under [intents]")]
    #[diagnostic(
        code(dinebot::config::unknown_intent),
        help(
            "Valid labels are greeting, farewell, hours_query, branch_query, about, \
             faq_query and menu_query."
        )
    )]
    UnknownIntent { label: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ── TOML layout ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ClassifierSection {
    #[serde(default)]
    expand_synonyms: bool,
}

#[derive(Debug, Deserialize)]
struct NluToml {
    #[serde(default)]
    classifier: ClassifierSection,
    #[serde(default)]
    intents: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    synonyms: Vec<SynonymGroup>,
    contractions: Option<Vec<Contraction>>,
}

// ── Validated configuration ─────────────────────────────────────────────

/// Validated classifier configuration.
#[derive(Debug, Clone, Serialize)]
pub struct NluConfig {
    pub expand_synonyms: bool,
    pub keywords: IntentKeywordTable,
    pub synonyms: SynonymTable,
    /// `None` keeps the built-in contraction table.
    pub contractions: Option<Vec<Contraction>>,
}

impl NluConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let raw: NluToml = toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let mut sets = BTreeMap::new();
        for (label, keywords) in raw.intents {
            let intent = Intent::from_label(&label)
                .filter(|i| *i != Intent::Unknown)
                .ok_or(ConfigError::UnknownIntent { label })?;
            let keywords: Vec<String> = keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            sets.insert(intent, keywords);
        }
        for intent in Intent::SCORED {
            match sets.get(&intent) {
                None => {
                    return Err(ConfigError::MissingIntent {
                        intent: intent.to_string(),
                    });
                }
                Some(keywords) if keywords.is_empty() => {
                    return Err(ConfigError::EmptyKeywords {
                        intent: intent.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            expand_synonyms: raw.classifier.expand_synonyms,
            keywords: IntentKeywordTable::new(sets),
            synonyms: SynonymTable::new(raw.synonyms),
            contractions: raw.contractions,
        })
    }

    /// The configuration compiled into the binary.
    pub fn bundled() -> ConfigResult<Self> {
        Self::from_toml(BUNDLED_NLU_TOML)
    }

    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load `path` if given, otherwise the bundled configuration.
    pub fn load_or_bundled(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn normalizer(&self) -> TextNormalizer {
        match &self.contractions {
            Some(table) => TextNormalizer::new(table.clone()),
            None => TextNormalizer::default(),
        }
    }

    /// Build a classifier from this configuration.
    pub fn classifier(&self) -> IntentClassifier {
        IntentClassifier::new(self.normalizer(), self.keywords.clone())
            .with_synonyms(self.synonyms.clone(), self.expand_synonyms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_is_complete() {
        let config = NluConfig::bundled().unwrap();
        for intent in Intent::SCORED {
            assert!(!config.keywords.keywords(intent).is_empty(), "{intent}");
        }
        assert!(!config.expand_synonyms);
        assert_eq!(config.synonyms.groups()[0].key, "menu");
        assert!(config.contractions.is_none());
    }

    #[test]
    fn missing_intent_is_rejected() {
        let toml = r#"
            [intents]
            greeting = ["hi"]
        "#;
        let err = NluConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingIntent { ref intent } if intent == "farewell"));
    }

    #[test]
    fn empty_set_is_rejected() {
        let toml = r#"
            [intents]
            greeting = ["hi"]
            farewell = ["  "]
            hours_query = ["open"]
            branch_query = ["branch"]
            about = ["about"]
            faq_query = ["halal"]
            menu_query = ["menu"]
        "#;
        let err = NluConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyKeywords { ref intent } if intent == "farewell"));
    }

    #[test]
    fn unknown_label_is_rejected() {
        let toml = r#"
            [intents]
            smalltalk = ["weather"]
        "#;
        assert!(matches!(
            NluConfig::from_toml(toml),
            Err(ConfigError::UnknownIntent { .. })
        ));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            NluConfig::from_toml("[intents"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn custom_contractions_reach_the_normalizer() {
        let toml = r#"
            [intents]
            greeting = ["hi"]
            farewell = ["bye"]
            hours_query = ["open"]
            branch_query = ["branch"]
            about = ["about"]
            faq_query = ["halal"]
            menu_query = ["menu"]

            [[contractions]]
            from = "pls"
            to = "please"
        "#;
        let config = NluConfig::from_toml(toml).unwrap();
        assert_eq!(config.normalizer().normalize("Menu pls"), "menu please");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nlu.toml");
        std::fs::write(&path, BUNDLED_NLU_TOML).unwrap();
        let config = NluConfig::load(&path).unwrap();
        assert_eq!(config.classifier().classify("Hi there!"), Intent::Greeting);

        let missing = dir.path().join("absent.toml");
        assert!(matches!(NluConfig::load(&missing), Err(ConfigError::Io { .. })));
    }
}
