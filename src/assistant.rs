//! The chat assistant: classify, resolve, render.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::config::NluConfig;
use crate::data::RestaurantData;
use crate::error::DinebotResult;
use crate::nlu::{Classification, Intent, IntentClassifier};
use crate::respond::{Responder, suggested_actions};

/// One answered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub answer: String,
    pub actions: Vec<String>,
}

/// A classifier bound to one data snapshot.
///
/// Cheap to clone; clones share the snapshot.
#[derive(Debug, Clone)]
pub struct Assistant {
    classifier: IntentClassifier,
    data: Arc<RestaurantData>,
}

impl Assistant {
    pub fn new(classifier: IntentClassifier, data: Arc<RestaurantData>) -> Self {
        Self { classifier, data }
    }

    /// Build from a configuration and a snapshot.
    pub fn from_config(config: &NluConfig, data: Arc<RestaurantData>) -> Self {
        Self::new(config.classifier(), data)
    }

    /// Bundled configuration plus data loaded from `dir` (or discovered).
    pub fn open(dir: Option<&std::path::Path>) -> DinebotResult<Self> {
        let config = NluConfig::bundled()?;
        let data = RestaurantData::open(dir)?;
        Ok(Self::from_config(&config, Arc::new(data)))
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn data(&self) -> &Arc<RestaurantData> {
        &self.data
    }

    /// Same classifier, different snapshot.
    pub fn with_data(&self, data: Arc<RestaurantData>) -> Self {
        Self::new(self.classifier.clone(), data)
    }

    pub fn classify(&self, message: &str) -> Classification {
        self.classifier.explain(message)
    }

    /// Answer `message`, picking greeting/farewell wording at random.
    pub fn reply(&self, message: &str) -> Reply {
        self.reply_with(message, &mut rand::thread_rng())
    }

    /// Answer `message` with a caller-supplied random source.
    pub fn reply_with<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Reply {
        let intent = self.classifier.classify(message);
        let answer = Responder::new(&self.data).render(intent, message, rng);
        tracing::debug!(%intent, chars = answer.len(), "rendered reply");
        Reply {
            intent,
            answer,
            actions: suggested_actions(message),
        }
    }
}
