use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::RelayError;

const DEFAULT_SENT_IDS_FILE: &str = "id_sent.json";
const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// When a record's identifier is committed to the dedup file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryPolicy {
    /// Record the identifier after every attempted send, even a failed one.
    /// A failed message is never retried.
    #[default]
    AtMostOnce,
    /// Record the identifier only once the messaging API confirmed the send.
    /// A failed message is retried on the next run.
    Confirmed,
}

impl FromStr for DeliveryPolicy {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "at-most-once" | "at_most_once" => Ok(DeliveryPolicy::AtMostOnce),
            "confirmed" => Ok(DeliveryPolicy::Confirmed),
            other => Err(RelayError::Config(format!(
                "RELAY_DELIVERY_POLICY must be `at-most-once` or `confirmed`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryPolicy::AtMostOnce => write!(f, "at-most-once"),
            DeliveryPolicy::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Process-wide configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Notion database queried for approval records
    pub notion_database_id: String,

    /// Notion integration token, sent as a bearer token
    pub notion_api_key: String,

    /// Telegram bot token used to build the send-message endpoint
    pub telegram_bot_token: String,

    /// JSON file holding identifiers of records already delivered (default: id_sent.json)
    pub sent_ids_path: PathBuf,

    /// Base URL of the Notion API (default: https://api.notion.com)
    pub notion_api_url: String,

    /// Value of the `Notion-Version` header (default: 2022-06-28)
    pub notion_version: String,

    /// Base URL of the Telegram Bot API (default: https://api.telegram.org)
    pub telegram_api_url: String,

    /// When a delivered record is committed to the dedup file (default: at-most-once)
    pub delivery_policy: DeliveryPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    ///
    /// Credentials are not validated here: a missing one only shows up as an
    /// authentication failure on the first request that needs it.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = |key: &str| {
            let value = lookup(key).unwrap_or_default();
            if value.is_empty() {
                tracing::warn!(variable = key, "Credential is not set");
            }
            value
        };

        let delivery_policy = match lookup("RELAY_DELIVERY_POLICY") {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => DeliveryPolicy::default(),
        };

        Ok(Self {
            notion_database_id: credential("NOTION_DATABASE_ID"),
            notion_api_key: credential("NOTION_API_KEY"),
            telegram_bot_token: credential("TELEGRAM_BOT_TOKEN"),
            sent_ids_path: lookup("SENT_IDS_FILE")
                .unwrap_or_else(|| DEFAULT_SENT_IDS_FILE.to_string())
                .into(),
            notion_api_url: lookup("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            notion_version: lookup("NOTION_VERSION")
                .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            delivery_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.notion_database_id, "");
        assert_eq!(config.notion_api_key, "");
        assert_eq!(config.telegram_bot_token, "");
        assert_eq!(config.sent_ids_path, PathBuf::from("id_sent.json"));
        assert_eq!(config.notion_api_url, "https://api.notion.com");
        assert_eq!(config.notion_version, "2022-06-28");
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
        assert_eq!(config.delivery_policy, DeliveryPolicy::AtMostOnce);
    }

    #[test]
    fn test_reads_credentials_and_overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("NOTION_DATABASE_ID", "db123"),
            ("NOTION_API_KEY", "secret_abc"),
            ("TELEGRAM_BOT_TOKEN", "42:XYZ"),
            ("SENT_IDS_FILE", "/var/lib/relay/sent.json"),
            ("TELEGRAM_API_URL", "http://127.0.0.1:8081"),
            ("RELAY_DELIVERY_POLICY", "confirmed"),
        ]))
        .unwrap();

        assert_eq!(config.notion_database_id, "db123");
        assert_eq!(config.notion_api_key, "secret_abc");
        assert_eq!(config.telegram_bot_token, "42:XYZ");
        assert_eq!(config.sent_ids_path, PathBuf::from("/var/lib/relay/sent.json"));
        assert_eq!(config.telegram_api_url, "http://127.0.0.1:8081");
        assert_eq!(config.delivery_policy, DeliveryPolicy::Confirmed);
    }

    #[test]
    fn test_invalid_delivery_policy_is_rejected() {
        let err = AppConfig::from_vars(vars(&[("RELAY_DELIVERY_POLICY", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    fn test_delivery_policy_parsing() {
        assert_eq!(
            "AT-MOST-ONCE".parse::<DeliveryPolicy>().unwrap(),
            DeliveryPolicy::AtMostOnce
        );
        assert_eq!(
            " confirmed ".parse::<DeliveryPolicy>().unwrap(),
            DeliveryPolicy::Confirmed
        );
        assert_eq!(DeliveryPolicy::Confirmed.to_string(), "confirmed");
    }
}
