use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources, RemoteSettings};

const DEFAULT_AUTOCOMPLETE_URL: &str = "https://suggestqueries.google.com/complete/search";
const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
const DEFAULT_FAVICON_URL: &str = "https://www.google.com/s2/favicons";
const DEFAULT_TIMEOUT_MS: u64 = 1200;

/// Remote endpoints as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RemoteSection {
    pub(super) enabled: Option<bool>,
    pub(super) autocomplete_url: Option<String>,
    pub(super) search_url: Option<String>,
    pub(super) favicon_url: Option<String>,
    pub(super) timeout_ms: Option<u64>,
}

impl RemoteSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if cli.offline {
            self.enabled = Some(false);
        }
    }

    pub(super) fn resolve(self, sources: &ConfigSources) -> Result<RemoteSettings, ConfigError> {
        Ok(RemoteSettings {
            enabled: self.enabled.unwrap_or(true),
            autocomplete_url: parse_url(
                "remote.autocomplete_url",
                self.autocomplete_url,
                DEFAULT_AUTOCOMPLETE_URL,
                sources,
            )?,
            search_url: parse_url(
                "remote.search_url",
                self.search_url,
                DEFAULT_SEARCH_URL,
                sources,
            )?,
            favicon_url: parse_url(
                "remote.favicon_url",
                self.favicon_url,
                DEFAULT_FAVICON_URL,
                sources,
            )?,
            timeout: Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
        })
    }
}

fn parse_url(
    key: &'static str,
    value: Option<String>,
    default: &str,
    sources: &ConfigSources,
) -> Result<Url, ConfigError> {
    let raw = value.as_deref().unwrap_or(default);
    Url::parse(raw).map_err(|err| ConfigError::invalid(key, raw, sources.source_for(key), err.to_string()))
}
