use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lia_core::config::Config;
use lia_core::topics::{TopicSet, TopicSource};
use lia_core::types::{Origin, TopicRecord};
use tracing::{debug, info, warn};

use crate::cache::TtlCell;
use crate::fallback;
use crate::hubspot::{split_specialties, HubSpotClient};
use crate::models::{Article, ConditionSearch, LawFirm, SettlementData};
use crate::sheets::SheetsClient;

pub const ARTICLES_RANGE: &str = "Articles!A:Z";
pub const SETTLEMENTS_RANGE: &str = "Settlements!A:Z";
pub const TOPICS_RANGE: &str = "LIA Cases!A:Z";

/// Articles, law firms and settlement figures from the spreadsheet and CRM,
/// cached per dataset and backed by built-in data when a source is unavailable.
pub struct DataService {
    sheets: Option<SheetsClient>,
    hubspot: Option<HubSpotClient>,
    articles: TtlCell<Vec<Article>>,
    law_firms: TtlCell<Vec<LawFirm>>,
    settlements: TtlCell<Vec<SettlementData>>,
}

impl DataService {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_s))
            .build()?;
        let sheets = config.google_configured().then(|| {
            SheetsClient::new(
                http.clone(),
                &config.google_api_key,
                &config.google_spreadsheet_id,
            )
        });
        let hubspot = config
            .hubspot_configured()
            .then(|| HubSpotClient::new(http.clone(), &config.hubspot_access_token));
        Ok(Self::with_clients(
            sheets,
            hubspot,
            Duration::from_secs(config.cache_ttl_s),
        ))
    }

    pub fn with_clients(
        sheets: Option<SheetsClient>,
        hubspot: Option<HubSpotClient>,
        ttl: Duration,
    ) -> Self {
        Self {
            sheets,
            hubspot,
            articles: TtlCell::new(ttl),
            law_firms: TtlCell::new(ttl),
            settlements: TtlCell::new(ttl),
        }
    }

    pub async fn all_articles(&self) -> Vec<Article> {
        let fetch = self.sheets.as_ref().map(|s| async move {
            let rows = s.read_records(ARTICLES_RANGE).await?;
            Ok::<Vec<Article>, anyhow::Error>(rows.iter().filter_map(article_from_row).collect())
        });
        load(&self.articles, "articles", fetch, fallback::articles).await
    }

    /// Looks in the loaded articles first, then the built-in list.
    pub async fn article(&self, slug: &str) -> Option<Article> {
        if let Some(found) = self.all_articles().await.into_iter().find(|a| a.slug == slug) {
            return Some(found);
        }
        self.fallback_articles().into_iter().find(|a| a.slug == slug)
    }

    pub fn fallback_articles(&self) -> Vec<Article> {
        fallback::articles()
    }

    pub async fn law_firms(&self, specialty: Option<&str>, location: Option<&str>) -> Vec<LawFirm> {
        let fetch = self.hubspot.as_ref().map(|h| h.law_firms());
        let firms = load(&self.law_firms, "law_firms", fetch, fallback::law_firms).await;
        firms
            .into_iter()
            .filter(|f| non_blank(specialty).map_or(true, |s| f.has_specialty(s)))
            .filter(|f| non_blank(location).map_or(true, |l| f.is_in(l)))
            .collect()
    }

    pub async fn settlement_data(
        &self,
        condition: Option<&str>,
        state: Option<&str>,
    ) -> Vec<SettlementData> {
        let fetch = self.sheets.as_ref().map(|s| async move {
            let rows = s.read_records(SETTLEMENTS_RANGE).await?;
            Ok::<Vec<SettlementData>, anyhow::Error>(
                rows.iter().filter_map(settlement_from_row).collect(),
            )
        });
        let all = load(&self.settlements, "settlements", fetch, fallback::settlements).await;
        all.into_iter()
            .filter(|s| {
                non_blank(condition)
                    .map_or(true, |c| s.condition.to_lowercase().contains(&c.to_lowercase()))
            })
            .filter(|s| {
                non_blank(state).map_or(true, |st| {
                    s.state.as_deref().is_some_and(|own| own.eq_ignore_ascii_case(st.trim()))
                })
            })
            .collect()
    }

    /// Articles, firms and settlements for one condition, plus its referral status.
    pub async fn search_condition(&self, condition: &str, topics: &TopicSet) -> ConditionSearch {
        let (articles, law_firms, settlements) = tokio::join!(
            self.all_articles(),
            self.law_firms(Some(condition), None),
            self.settlement_data(Some(condition), None),
        );
        let articles: Vec<Article> = articles.into_iter().filter(|a| a.mentions(condition)).collect();
        debug!(
            condition,
            articles = articles.len(),
            law_firms = law_firms.len(),
            settlements = settlements.len(),
            "condition search"
        );
        ConditionSearch {
            condition: condition.to_string(),
            articles,
            law_firms,
            settlements,
            active_case: topics.classify(condition),
        }
    }

    pub fn clear_cache(&self) {
        self.articles.clear();
        self.law_firms.clear();
        self.settlements.clear();
        info!("data cache cleared");
    }
}

#[async_trait]
impl TopicSource for DataService {
    async fn fetch_active_topics(&self) -> Result<Vec<TopicRecord>> {
        let Some(sheets) = &self.sheets else {
            bail!("Google Sheets not configured");
        };
        let rows = sheets.read_records(TOPICS_RANGE).await?;
        Ok(rows.iter().filter_map(topic_from_row).collect())
    }
}

/// Cache hit, else fetch. Missing sources, failures and empty results fall
/// back to built-in data, which is never cached.
async fn load<T, F>(
    slot: &TtlCell<Vec<T>>,
    dataset: &str,
    fetch: Option<F>,
    fallback: fn() -> Vec<T>,
) -> Vec<T>
where
    T: Clone,
    F: Future<Output = Result<Vec<T>>>,
{
    if let Some(hit) = slot.get() {
        debug!(dataset, "cache hit");
        return hit;
    }
    let Some(fetch) = fetch else {
        warn!(dataset, "source not configured, using fallback");
        return fallback();
    };
    match fetch.await {
        Ok(items) if !items.is_empty() => {
            info!(dataset, count = items.len(), "loaded from remote");
            slot.put(items.clone());
            items
        },
        Ok(_) => {
            warn!(dataset, "remote returned no rows, using fallback");
            fallback()
        },
        Err(e) => {
            warn!(dataset, "fetch failed, using fallback: {e:#}");
            fallback()
        },
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

fn cell<'a>(row: &'a HashMap<String, String>, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or_default()
}

fn article_from_row(row: &HashMap<String, String>) -> Option<Article> {
    let slug = cell(row, "slug");
    let title = cell(row, "title");
    if slug.is_empty() || title.is_empty() {
        return None;
    }
    let url = match cell(row, "url") {
        "" => format!("/article/{slug}"),
        u => u.to_string(),
    };
    Some(Article {
        slug: slug.into(),
        title: title.into(),
        summary: cell(row, "summary").into(),
        content: cell(row, "content").into(),
        category: cell(row, "category").into(),
        url,
        source: Origin::Remote,
    })
}

/// "$1,250,000" → 1250000.0
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',' | ' ')).collect();
    cleaned.parse().ok()
}

fn settlement_from_row(row: &HashMap<String, String>) -> Option<SettlementData> {
    let condition = cell(row, "condition");
    if condition.is_empty() {
        return None;
    }
    Some(SettlementData {
        condition: condition.into(),
        state: non_blank(Some(cell(row, "state"))).map(String::from),
        average_settlement: parse_amount(cell(row, "average_settlement")),
        range_low: parse_amount(cell(row, "range_low")),
        range_high: parse_amount(cell(row, "range_high")),
        cases_reported: cell(row, "cases_reported").parse().unwrap_or(0),
        notes: cell(row, "notes").into(),
        source: Origin::Remote,
    })
}

pub fn parse_active(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "true" | "1" | "active"
    )
}

pub fn parse_updated(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn topic_from_row(row: &HashMap<String, String>) -> Option<TopicRecord> {
    let name = cell(row, "name");
    let case_type = match cell(row, "case_type") {
        "" => name.to_lowercase(),
        t => t.to_lowercase(),
    };
    if case_type.is_empty() {
        return None;
    }
    Some(TopicRecord {
        case_type,
        name: name.into(),
        description: cell(row, "description").into(),
        keywords: split_specialties(cell(row, "keywords")),
        active: parse_active(cell(row, "active")),
        last_updated: parse_updated(cell(row, "last_updated")),
        source: Origin::Remote,
    })
}
