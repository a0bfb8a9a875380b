// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./interviewace.toml` > `~/.config/interviewace/interviewace.toml`
//! > `/etc/interviewace/interviewace.toml` with environment variable overrides via the
//! `INTERVIEWACE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::InterviewAceConfig;

/// File name looked up in every layer of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "interviewace.toml";

/// System-wide config path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/interviewace/interviewace.toml";

/// Per-user config path under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("interviewace").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/interviewace/interviewace.toml` (system-wide)
/// 3. `~/.config/interviewace/interviewace.toml` (user XDG config)
/// 4. `./interviewace.toml` (local directory)
/// 5. `INTERVIEWACE_*` environment variables
pub fn load_config() -> Result<InterviewAceConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<InterviewAceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InterviewAceConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<InterviewAceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InterviewAceConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(InterviewAceConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Environment provider mapping `INTERVIEWACE_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `INTERVIEWACE_UPSTREAM_BASE_URL` must map to
/// `upstream.base_url`, not `upstream.base.url`.
fn env_provider() -> Env {
    Env::prefixed("INTERVIEWACE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("upstream_", "upstream.", 1)
            .replacen("cookies_", "cookies.", 1)
            .replacen("logging_", "logging.", 1)
            .replacen("client_", "client.", 1);
        mapped.into()
    })
}
