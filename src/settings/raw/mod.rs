use anyhow::{Error, Result};
use ktab::{AggregatorOptions, SearchLimits};
use serde::Deserialize;
use std::env;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod limits;
mod remote;
mod search;

use limits::LimitsSection;
use remote::RemoteSection;
use search::SearchSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    search: SearchSection,
    palette: LimitsSection,
    omnibox: LimitsSection,
    remote: RemoteSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.search.apply_cli_overrides(cli);
        if let Some(value) = cli.max_results {
            self.palette.max_results = Some(value);
        }
        self.remote.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            debounce_ms: detect_source(
                cli.debounce_ms.is_some().then_some("--debounce-ms"),
                self.search.debounce_ms.is_some(),
                "KTAB__SEARCH__DEBOUNCE_MS",
                "search.debounce_ms",
            ),
            oneshot_timeout_ms: detect_source(
                None,
                self.search.oneshot_timeout_ms.is_some(),
                "KTAB__SEARCH__ONESHOT_TIMEOUT_MS",
                "search.oneshot_timeout_ms",
            ),
            scoped_max_results: detect_source(
                None,
                self.search.scoped_max_results.is_some(),
                "KTAB__SEARCH__SCOPED_MAX_RESULTS",
                "search.scoped_max_results",
            ),
            palette_max_results: detect_source(
                cli.max_results.is_some().then_some("--max-results"),
                self.palette.max_results.is_some(),
                "KTAB__PALETTE__MAX_RESULTS",
                "palette.max_results",
            ),
            omnibox_max_results: detect_source(
                None,
                self.omnibox.max_results.is_some(),
                "KTAB__OMNIBOX__MAX_RESULTS",
                "omnibox.max_results",
            ),
            remote_timeout_ms: detect_source(
                None,
                self.remote.timeout_ms.is_some(),
                "KTAB__REMOTE__TIMEOUT_MS",
                "remote.timeout_ms",
            ),
            autocomplete_url: detect_source(
                None,
                self.remote.autocomplete_url.is_some(),
                "KTAB__REMOTE__AUTOCOMPLETE_URL",
                "remote.autocomplete_url",
            ),
            search_url: detect_source(
                None,
                self.remote.search_url.is_some(),
                "KTAB__REMOTE__SEARCH_URL",
                "remote.search_url",
            ),
            favicon_url: detect_source(
                None,
                self.remote.favicon_url.is_some(),
                "KTAB__REMOTE__FAVICON_URL",
                "remote.favicon_url",
            ),
        };

        let search = self.search.resolve();
        let remote = self.remote.resolve(&sources).map_err(Error::new)?;

        let config = ResolvedConfig {
            debounce: search.debounce,
            aggregator: AggregatorOptions {
                palette: self.palette.resolve(SearchLimits::palette()),
                omnibox: self.omnibox.resolve(SearchLimits::omnibox()),
                scoped_max_results: search.scoped_max_results,
                oneshot_timeout: search.oneshot_timeout,
            },
            remote,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

/// Work out where a present value came from. `cli_flag` is set only when the
/// flag was passed on this invocation.
fn detect_source(
    cli_flag: Option<&'static str>,
    value_present: bool,
    env_var: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if let Some(flag) = cli_flag {
        return Some(SettingSource::CliFlag(flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}
