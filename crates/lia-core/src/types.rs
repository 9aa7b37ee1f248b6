use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Data origin ──────────────────────────────────────────────────────────

/// Where a record came from: the live spreadsheet/CRM or built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Remote,
    #[default]
    Fallback,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

// ── Topic records ────────────────────────────────────────────────────────

/// A legal-case category that may currently be soliciting referrals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    /// Unique key, e.g. "mesothelioma".
    pub case_type: String,
    pub name: String,
    pub description: String,
    /// Matched case-insensitively as substrings of the input.
    pub keywords: Vec<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Origin,
}

impl TopicRecord {
    /// True if any keyword occurs in `lower`, which must already be lower-cased.
    pub fn matches_lowercase(&self, lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
    }
}

/// Result of checking a piece of text against the active topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaseMatch {
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CaseMatch {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn from_record(record: &TopicRecord) -> Self {
        Self {
            is_active: true,
            case_type: Some(record.case_type.clone()),
            name: Some(record.name.clone()),
            description: Some(record.description.clone()),
            keywords: Some(record.keywords.clone()),
            last_updated: record.last_updated,
        }
    }
}
