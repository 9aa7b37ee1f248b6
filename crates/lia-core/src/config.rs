use std::{collections::HashMap, path::Path};

use anyhow::Result;
use serde::Serialize;

/// Files checked for `KEY=VALUE` pairs, in priority order.
const DOTENV_FILES: &[&str] = &[".env.local", ".env"];

/// Full application configuration.
/// Process environment wins over dotenv files; secrets only ever come from there.
#[derive(Debug, Clone)]
pub struct Config {
    // Chat completion provider
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub openai_max_tokens: u32,
    pub openai_base_url: String,

    // Spreadsheet
    pub google_api_key: String,
    pub google_spreadsheet_id: String,

    // CRM
    pub hubspot_access_token: String,
    pub hubspot_portal_id: String,

    // Web
    pub web_bind: String,
    pub web_port: u16,
    pub public_dir: String,

    /// Seconds a data-service answer stays cached.
    pub cache_ttl_s: u64,
    /// Timeout for outbound HTTP calls.
    pub http_timeout_s: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".into(),
            openai_temperature: 0.7,
            openai_max_tokens: 500,
            openai_base_url: "https://api.openai.com/v1".into(),
            google_api_key: String::new(),
            google_spreadsheet_id: String::new(),
            hubspot_access_token: String::new(),
            hubspot_portal_id: String::new(),
            web_bind: "0.0.0.0".into(),
            web_port: 3000,
            public_dir: "public".into(),
            cache_ttl_s: 300,
            http_timeout_s: 30,
        }
    }
}

pub fn parse_dotenv_str(contents: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                .unwrap_or(v);
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    map
}

/// Merge dotenv files under `dir`; a key from an earlier file is kept.
pub fn parse_dotenv_in(dir: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for name in DOTENV_FILES {
        let Ok(contents) = std::fs::read_to_string(dir.join(name)) else {
            continue;
        };
        for (k, v) in parse_dotenv_str(&contents) {
            map.entry(k).or_insert(v);
        }
    }
    map
}

fn get(key: &str, dotenv: &HashMap<String, String>) -> Option<String> {
    std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
}

fn get_str(key: &str, dotenv: &HashMap<String, String>, default: &str) -> String {
    get(key, dotenv).unwrap_or_else(|| default.to_string())
}

fn get_parsed<T: std::str::FromStr>(key: &str, dotenv: &HashMap<String, String>, default: T) -> T {
    get(key, dotenv)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Outcome of checking that every integration has its credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiStatus {
    pub configured: bool,
    pub model: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleStatus {
    pub configured: bool,
    /// Never the real id.
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSpotStatus {
    pub configured: bool,
    pub portal_id: Option<String>,
}

/// Configuration summary that is safe to hand to a browser.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigStatus {
    pub openai: OpenAiStatus,
    pub google: GoogleStatus,
    pub hubspot: HubSpotStatus,
    pub validation: Validation,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::from_map(&parse_dotenv_in(&cwd)))
    }

    /// Build from a dotenv map, still letting the process environment override it.
    pub fn from_map(dotenv: &HashMap<String, String>) -> Self {
        let d = Self::default();
        Self {
            openai_api_key: get_str("OPENAI_API_KEY", dotenv, &d.openai_api_key),
            openai_model: get_str("OPENAI_MODEL", dotenv, &d.openai_model),
            openai_temperature: get_parsed("OPENAI_TEMPERATURE", dotenv, d.openai_temperature),
            openai_max_tokens: get_parsed("OPENAI_MAX_TOKENS", dotenv, d.openai_max_tokens),
            openai_base_url: get_str("OPENAI_BASE_URL", dotenv, &d.openai_base_url),
            google_api_key: get_str("GOOGLE_API_KEY", dotenv, &d.google_api_key),
            google_spreadsheet_id: get_str("GOOGLE_SPREADSHEET_ID", dotenv, &d.google_spreadsheet_id),
            hubspot_access_token: get_str("HUBSPOT_ACCESS_TOKEN", dotenv, &d.hubspot_access_token),
            hubspot_portal_id: get_str("HUBSPOT_PORTAL_ID", dotenv, &d.hubspot_portal_id),
            web_bind: get_str("WEB_BIND", dotenv, &d.web_bind),
            web_port: get_parsed("PORT", dotenv, d.web_port),
            public_dir: get_str("PUBLIC_DIR", dotenv, &d.public_dir),
            cache_ttl_s: get_parsed("CACHE_TTL_S", dotenv, d.cache_ttl_s),
            http_timeout_s: get_parsed("HTTP_TIMEOUT_S", dotenv, d.http_timeout_s),
        }
    }

    pub fn openai_configured(&self) -> bool {
        !self.openai_api_key.is_empty()
    }

    pub fn google_configured(&self) -> bool {
        !self.google_api_key.is_empty() && !self.google_spreadsheet_id.is_empty()
    }

    pub fn hubspot_configured(&self) -> bool {
        !self.hubspot_access_token.is_empty() && !self.hubspot_portal_id.is_empty()
    }

    pub fn validate(&self) -> Validation {
        let required = [
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("GOOGLE_API_KEY", &self.google_api_key),
            ("GOOGLE_SPREADSHEET_ID", &self.google_spreadsheet_id),
            ("HUBSPOT_ACCESS_TOKEN", &self.hubspot_access_token),
            ("HUBSPOT_PORTAL_ID", &self.hubspot_portal_id),
        ];
        let errors: Vec<String> = required
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| format!("{k} is missing"))
            .collect();
        Validation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn status(&self) -> ConfigStatus {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ConfigStatus {
            openai: OpenAiStatus {
                configured: self.openai_configured(),
                model: self.openai_model.clone(),
            },
            google: GoogleStatus {
                configured: self.google_configured(),
                spreadsheet_id: (!self.google_spreadsheet_id.is_empty())
                    .then(|| "***configured***".to_string()),
            },
            hubspot: HubSpotStatus {
                configured: self.hubspot_configured(),
                portal_id: non_empty(&self.hubspot_portal_id),
            },
            validation: self.validate(),
        }
    }
}
