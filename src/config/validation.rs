//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the source XOR rule (file or URL, never both, never neither)
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("exactly one keyword source must be set; both `keywords.file` and `keywords.url` are configured")]
    ConflictingKeywordSources,

    #[error("no keyword source configured; set `keywords.file` or `keywords.url`")]
    MissingKeywordSource,

    #[error("`keywords.url` must be an http(s) URL, got `{0}`")]
    InvalidSourceUrl(String),

    #[error("`keywords.defaults` must not be empty")]
    EmptyDefaultKeywords,

    #[error("invalid `listener.bind_address`: `{0}`")]
    InvalidBindAddress(String),

    #[error("`admin.api_key` must be set when the admin API is enabled")]
    MissingAdminKey,
}

/// Validate a deserialized config, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match (&config.keywords.file, &config.keywords.url) {
        (Some(_), Some(_)) => errors.push(ValidationError::ConflictingKeywordSources),
        (None, None) => errors.push(ValidationError::MissingKeywordSource),
        (None, Some(url)) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ValidationError::InvalidSourceUrl(url.clone()));
            }
        }
        (Some(_), None) => {}
    }

    if config.keywords.defaults.iter().all(|k| k.trim().is_empty()) {
        errors.push(ValidationError::EmptyDefaultKeywords);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> RelayConfig {
        let mut config = RelayConfig::default();
        config.keywords.file = Some("keywords.txt".to_string());
        config
    }

    #[test]
    fn test_valid_file_source() {
        assert!(validate_config(&file_config()).is_ok());
    }

    #[test]
    fn test_both_sources_rejected() {
        let mut config = file_config();
        config.keywords.url = Some("https://example.com/kw.txt".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ConflictingKeywordSources));
    }

    #[test]
    fn test_no_source_rejected() {
        let config = RelayConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingKeywordSource));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut config = RelayConfig::default();
        config.keywords.url = Some("ftp://example.com/kw.txt".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidSourceUrl(
            "ftp://example.com/kw.txt".to_string()
        )));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = RelayConfig::default();
        config.keywords.defaults.clear();
        config.listener.bind_address = "not-an-address".to_string();
        config.admin.api_key = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
