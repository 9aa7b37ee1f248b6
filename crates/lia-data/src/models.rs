use lia_core::types::{CaseMatch, Origin};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub url: String,
    pub source: Origin,
}

impl Article {
    /// Case-insensitive match on title, summary and category.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.title, &self.summary, &self.category]
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawFirm {
    pub name: String,
    pub specialties: Vec<String>,
    pub location: String,
    pub phone: String,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    pub source: Origin,
}

impl LawFirm {
    pub fn has_specialty(&self, specialty: &str) -> bool {
        let specialty = specialty.to_lowercase();
        self.specialties
            .iter()
            .any(|s| s.to_lowercase().contains(&specialty))
    }

    pub fn is_in(&self, location: &str) -> bool {
        self.location.to_lowercase().contains(&location.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementData {
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_settlement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_high: Option<f64>,
    pub cases_reported: u32,
    pub notes: String,
    pub source: Origin,
}

/// Everything the site knows about one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSearch {
    pub condition: String,
    pub articles: Vec<Article>,
    pub law_firms: Vec<LawFirm>,
    pub settlements: Vec<SettlementData>,
    pub active_case: CaseMatch,
}
