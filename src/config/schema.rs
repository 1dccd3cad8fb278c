//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum refresh interval enforced regardless of configuration.
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

/// Root configuration for the keyword relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Keyword source and refresh settings.
    pub keywords: KeywordConfig,

    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Alert destination settings.
    pub alerts: AlertConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Keyword source configuration.
///
/// Exactly one of `file` and `url` must be set; validation rejects configs
/// that set both or neither.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Local keyword file path.
    pub file: Option<String>,

    /// Remote keyword document URL.
    pub url: Option<String>,

    /// Minimum seconds between reload checks (default 30, floor 5).
    pub refresh_interval_secs: u64,

    /// Timeout for remote fetches in seconds.
    pub fetch_timeout_secs: u64,

    /// Fallback keyword list used when the source is unreadable or empty
    /// on first load.
    pub defaults: Vec<String>,
}

impl KeywordConfig {
    /// Effective refresh interval with the floor applied.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(MIN_REFRESH_INTERVAL_SECS))
    }

    /// Timeout applied to each remote fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            file: None,
            url: None,
            refresh_interval_secs: 30,
            fetch_timeout_secs: 10,
            defaults: vec!["buy".to_string(), "sell".to_string()],
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Alert destination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Optional webhook URL alerts are posted to.
    pub webhook_url: Option<String>,

    /// Fixed destination overriding the originating chat.
    pub destination_override: Option<String>,

    /// Timeout for webhook delivery in seconds.
    pub dispatch_timeout_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            destination_override: None,
            dispatch_timeout_secs: 5,
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
