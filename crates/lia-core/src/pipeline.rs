use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    links::ArticleLinker,
    markdown,
    prompts::BANNED_RESPONSE_MESSAGE,
    referral::referral_for,
    safety::banned_term,
    topics::{TopicCache, TopicSet},
    types::CaseMatch,
};

/// What the browser gets back for one model reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResponse {
    pub html: String,
    pub banned: bool,
    pub active_case: CaseMatch,
    pub referral_added: bool,
}

/// Post-processes model replies: safety filter, article links, referral, HTML.
pub struct ResponsePipeline {
    topics: Arc<TopicCache>,
    linker: ArticleLinker,
}

impl ResponsePipeline {
    pub fn new(topics: Arc<TopicCache>) -> Self {
        Self {
            topics,
            linker: ArticleLinker::default(),
        }
    }

    pub fn topics(&self) -> &Arc<TopicCache> {
        &self.topics
    }

    pub async fn process(&self, raw: &str) -> ProcessedResponse {
        let topics = self.topics.snapshot().await;
        self.process_with(raw, &topics)
    }

    /// Same as `process` against an already-loaded topic set.
    pub fn process_with(&self, raw: &str, topics: &TopicSet) -> ProcessedResponse {
        if let Some(term) = banned_term(raw) {
            info!(term, "response blocked by safety filter");
            return ProcessedResponse {
                html: markdown::render(BANNED_RESPONSE_MESSAGE),
                banned: true,
                active_case: CaseMatch::inactive(),
                referral_added: false,
            };
        }

        // Classified before linking so inserted hrefs never count as mentions.
        let active_case = topics.classify(raw);
        let linked = self.linker.annotate(raw);
        let (text, referral_added) = match referral_for(&linked, &active_case) {
            Some(with_referral) => (with_referral, true),
            None => (linked, false),
        };
        debug!(
            is_active = active_case.is_active,
            referral_added,
            "response post-processed"
        );

        ProcessedResponse {
            html: markdown::render(&text),
            banned: false,
            active_case,
            referral_added,
        }
    }
}
