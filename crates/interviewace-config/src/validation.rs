// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parseable URLs, usable hosts, and non-zero durations.

use crate::diagnostic::ConfigError;
use crate::model::InterviewAceConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or every collected error
/// (does not fail fast).
pub fn validate_config(config: &InterviewAceConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    check_http_url(&mut errors, "upstream.base_url", &config.upstream.base_url);
    check_http_url(&mut errors, "client.base_url", &config.client.base_url);

    if config.upstream.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "upstream.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.cookies.max_age_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "cookies.max_age_secs must be at least 1".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(dir) = &config.server.static_dir
        && dir.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "server.static_dir must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ConfigError::Validation {
            message: format!("{key} must use http or https, got `{}`", url.scheme()),
        }),
        Err(e) => errors.push(ConfigError::Validation {
            message: format!("{key} `{value}` is not a valid URL: {e}"),
        }),
    }
}
