use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::types::{CaseMatch, Origin, TopicRecord};

/// Anything that can list the current legal-case topics.
#[async_trait]
pub trait TopicSource: Send + Sync {
    async fn fetch_active_topics(&self) -> Result<Vec<TopicRecord>>;
}

/// A fixed topic list, for tests and offline runs.
pub struct StaticTopics(pub Vec<TopicRecord>);

#[async_trait]
impl TopicSource for StaticTopics {
    async fn fetch_active_topics(&self) -> Result<Vec<TopicRecord>> {
        Ok(self.0.clone())
    }
}

/// The loaded topic table, split into the active subset and everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSet {
    pub active_cases: Vec<TopicRecord>,
    pub all_cases: Vec<TopicRecord>,
    pub total_active: usize,
    pub total_cases: usize,
    pub source: Origin,
}

pub fn fallback_record() -> TopicRecord {
    TopicRecord {
        case_type: "mesothelioma".into(),
        name: "Mesothelioma".into(),
        description: "Mesothelioma and asbestos exposure cases".into(),
        keywords: vec![
            "mesothelioma".into(),
            "asbestos".into(),
            "asbestos exposure".into(),
        ],
        active: true,
        last_updated: None,
        source: Origin::Fallback,
    }
}

impl TopicSet {
    pub fn fallback() -> Self {
        Self::build(vec![fallback_record()], Origin::Fallback)
    }

    /// An empty list is replaced by the fallback set.
    pub fn from_records(records: Vec<TopicRecord>, source: Origin) -> Self {
        if records.is_empty() {
            return Self::fallback();
        }
        Self::build(records, source)
    }

    fn build(all_cases: Vec<TopicRecord>, source: Origin) -> Self {
        let active_cases: Vec<TopicRecord> =
            all_cases.iter().filter(|r| r.active).cloned().collect();
        Self {
            total_active: active_cases.len(),
            total_cases: all_cases.len(),
            active_cases,
            all_cases,
            source,
        }
    }

    /// First active record, in table order, with a keyword inside `text`.
    pub fn classify(&self, text: &str) -> CaseMatch {
        let lower = text.to_lowercase();
        self.active_cases
            .iter()
            .find(|r| r.matches_lowercase(&lower))
            .map(CaseMatch::from_record)
            .unwrap_or_else(CaseMatch::inactive)
    }
}

/// Owns the topic table for the process. Loaded on first use, replaced
/// wholesale by `refresh`. Readers always see a complete set.
pub struct TopicCache {
    source: Arc<dyn TopicSource>,
    current: RwLock<Option<Arc<TopicSet>>>,
}

impl TopicCache {
    pub fn new(source: Arc<dyn TopicSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// A cache that starts out holding `set`.
    pub fn preloaded(source: Arc<dyn TopicSource>, set: TopicSet) -> Self {
        Self {
            source,
            current: RwLock::new(Some(Arc::new(set))),
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Current set, fetching it first if nothing is loaded yet.
    ///
    /// Two callers racing on an empty cache may both fetch; the later write wins.
    pub async fn snapshot(&self) -> Arc<TopicSet> {
        if let Some(set) = self.current.read().await.as_ref() {
            return Arc::clone(set);
        }
        self.refresh().await
    }

    /// Re-fetch from the source. A failed fetch installs the fallback set.
    pub async fn refresh(&self) -> Arc<TopicSet> {
        let set = match self.source.fetch_active_topics().await {
            Ok(records) => TopicSet::from_records(records, Origin::Remote),
            Err(e) => {
                warn!("topic fetch failed, using fallback: {e:#}");
                TopicSet::fallback()
            },
        };
        info!(
            total_active = set.total_active,
            total_cases = set.total_cases,
            source = set.source.as_str(),
            "loaded active case topics"
        );
        let set = Arc::new(set);
        *self.current.write().await = Some(Arc::clone(&set));
        set
    }

    pub async fn classify(&self, text: &str) -> CaseMatch {
        self.snapshot().await.classify(text)
    }

    pub async fn active_cases(&self) -> Vec<TopicRecord> {
        self.snapshot().await.active_cases.clone()
    }

    pub async fn all_cases(&self) -> Vec<TopicRecord> {
        self.snapshot().await.all_cases.clone()
    }
}
