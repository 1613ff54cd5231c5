use std::time::Duration;

use url::Url;

use super::{ConfigError, ConfigSources, ResolvedConfig};

/// Longest accepted quiet period.
const MAX_DEBOUNCE: Duration = Duration::from_secs(5);

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let counts = [
		("palette.max_results", config.aggregator.palette.max_results),
		("omnibox.max_results", config.aggregator.omnibox.max_results),
		(
			"search.scoped_max_results",
			config.aggregator.scoped_max_results,
		),
	];
	for (key, value) in counts {
		if value == 0 {
			return Err(ConfigError::invalid(
				key,
				value.to_string(),
				sources.source_for(key),
				"must be greater than zero",
			));
		}
	}

	let durations = [
		("search.oneshot_timeout_ms", config.aggregator.oneshot_timeout),
		("remote.timeout_ms", config.remote.timeout),
	];
	for (key, value) in durations {
		if value.is_zero() {
			return Err(ConfigError::invalid(
				key,
				"0",
				sources.source_for(key),
				"must be at least 1ms",
			));
		}
	}

	if config.debounce > MAX_DEBOUNCE {
		return Err(ConfigError::invalid(
			"search.debounce_ms",
			config.debounce.as_millis().to_string(),
			sources.source_for("search.debounce_ms"),
			"must not exceed 5000",
		));
	}

	let urls = [
		("remote.autocomplete_url", &config.remote.autocomplete_url),
		("remote.search_url", &config.remote.search_url),
		("remote.favicon_url", &config.remote.favicon_url),
	];
	for (key, url) in urls {
		check_scheme(key, url, sources)?;
	}

	Ok(())
}

fn check_scheme(key: &'static str, url: &Url, sources: &ConfigSources) -> Result<(), ConfigError> {
	if matches!(url.scheme(), "http" | "https") {
		return Ok(());
	}
	Err(ConfigError::invalid(
		key,
		url.as_str(),
		sources.source_for(key),
		"must be an http or https URL",
	))
}
