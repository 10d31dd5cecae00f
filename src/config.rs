use crate::analyzer::currency::ValuationSchedule;
use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "AWARD_SNIPER_CONFIG";

/// Where raw award records come from.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Api { endpoint: String },
    Page { url_template: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Api {
            endpoint: "https://flightsearch.smiles.com.br/search".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// BRL per one USD.
    pub brl_per_usd: f64,
    pub valuation_tiers: ValuationSchedule,
    pub origin_aliases: HashMap<String, Vec<String>>,
    pub fallback_airline: String,
    pub source: SourceConfig,
    pub request_timeout_seconds: u64,
    pub telegram_bot_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            brl_per_usd: 5.8,
            valuation_tiers: ValuationSchedule::default(),
            origin_aliases: HashMap::from([(
                "NYC".to_string(),
                vec!["JFK".to_string(), "LGA".to_string(), "EWR".to_string()],
            )]),
            fallback_airline: "GOL".to_string(),
            source: SourceConfig::default(),
            request_timeout_seconds: 20,
            telegram_bot_token: None,
        }
    }
}

impl AppConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        if !self.brl_per_usd.is_finite() || self.brl_per_usd <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "brl_per_usd must be a positive number, got {}",
                self.brl_per_usd
            )));
        }
        if self.fallback_airline.trim().is_empty() {
            return Err(ConfigError::Invalid("fallback_airline must not be empty".into()));
        }
        for (alias, codes) in &self.origin_aliases {
            if codes.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "origin alias {} maps to no airports",
                    alias
                )));
            }
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Config path from the environment, falling back to `config.json`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.brl_per_usd, 5.8);
        assert_eq!(cfg.fallback_airline, "GOL");
        assert_eq!(cfg.origin_aliases["NYC"], vec!["JFK", "LGA", "EWR"]);
        assert_eq!(cfg.source, SourceConfig::default());
        assert!(cfg.telegram_bot_token.is_none());
    }

    #[test]
    fn reads_page_source_and_custom_rate() {
        let cfg = parse_config(
            r#"{
                "brl_per_usd": 6.1,
                "source": { "kind": "page", "url_template": "https://example.com/{origin}/{destination}/{date}" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.brl_per_usd, 6.1);
        assert!(matches!(cfg.source, SourceConfig::Page { .. }));
    }

    #[test]
    fn rejects_non_positive_rate() {
        let err = parse_config(r#"{ "brl_per_usd": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_empty_alias() {
        let err = parse_config(r#"{ "origin_aliases": { "LON": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unbounded_tier_before_last() {
        let err = parse_config(
            r#"{ "valuation_tiers": [ { "up_to": null, "rate": 0.004 }, { "up_to": 100, "rate": 0.005 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
