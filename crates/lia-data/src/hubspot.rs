use std::collections::HashMap;

use anyhow::Result;
use lia_core::types::Origin;
use serde::Deserialize;
use serde_json::json;

use crate::models::LawFirm;

const BASE: &str = "https://api.hubapi.com";

const PROPERTIES: &[&str] = &[
    "name",
    "specialties",
    "industry",
    "city",
    "state",
    "phone",
    "website",
    "rating",
];

pub struct HubSpotClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Company>,
}

#[derive(Debug, Deserialize)]
struct Company {
    #[serde(default)]
    properties: HashMap<String, Option<String>>,
}

impl HubSpotClient {
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            http,
            base: BASE.into(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Every company in the CRM, mapped to law firms. Nameless entries are dropped.
    pub async fn law_firms(&self) -> Result<Vec<LawFirm>> {
        let url = format!("{}/crm/v3/objects/companies/search", self.base.trim_end_matches('/'));
        let body = json!({
            "filterGroups": [],
            "properties": PROPERTIES,
            "limit": 100,
        });
        let resp: SearchResponse = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp
            .results
            .iter()
            .filter_map(|c| company_to_firm(&c.properties))
            .collect())
    }
}

/// "Mesothelioma; Personal Injury" or "a, b" → trimmed, non-empty parts.
pub fn split_specialties(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn company_to_firm(props: &HashMap<String, Option<String>>) -> Option<LawFirm> {
    let prop = |k: &str| {
        props
            .get(k)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };
    let name = prop("name");
    if name.is_empty() {
        return None;
    }
    let mut specialties = split_specialties(&prop("specialties"));
    if specialties.is_empty() {
        specialties = split_specialties(&prop("industry"));
    }
    let location = [prop("city"), prop("state")]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    Some(LawFirm {
        name,
        specialties,
        location,
        phone: prop("phone"),
        website: prop("website"),
        rating: prop("rating").parse().ok(),
        source: Origin::Remote,
    })
}
