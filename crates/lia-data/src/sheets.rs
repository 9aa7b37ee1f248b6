use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;

const BASE: &str = "https://sheets.googleapis.com/v4";

/// Read-only client for the Google Sheets `values` API.
pub struct SheetsClient {
    http: reqwest::Client,
    base: String,
    api_key: String,
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            http,
            base: BASE.into(),
            api_key: api_key.into(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Raw cell values for an A1 range such as `Articles!A:Z`.
    pub async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}?key={}",
            self.base.trim_end_matches('/'),
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range),
            urlencoding::encode(&self.api_key),
        );
        let body: ValueRange = self.http.get(&url).send().await?.error_for_status()?.json().await?;
        Ok(body.values)
    }

    /// Rows of `range` keyed by their header cells.
    pub async fn read_records(&self, range: &str) -> Result<Vec<HashMap<String, String>>> {
        Ok(rows_to_records(&self.read_range(range).await?))
    }
}

/// "Case Type" → "case_type".
pub fn header_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    for c in header.trim().chars() {
        if c.is_alphanumeric() {
            key.extend(c.to_lowercase());
        } else if !key.ends_with('_') && !key.is_empty() {
            key.push('_');
        }
    }
    key.trim_end_matches('_').to_string()
}

/// First row is the header. Short rows are padded, fully blank rows dropped.
pub fn rows_to_records(values: &[Vec<String>]) -> Vec<HashMap<String, String>> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    let keys: Vec<String> = header.iter().map(|h| header_key(h)).collect();
    rows.iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            keys.iter()
                .enumerate()
                .filter(|(_, k)| !k.is_empty())
                .map(|(i, k)| {
                    let cell = row.get(i).map(|c| c.trim().to_string()).unwrap_or_default();
                    (k.clone(), cell)
                })
                .collect()
        })
        .collect()
}
