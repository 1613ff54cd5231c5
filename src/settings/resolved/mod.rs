use std::time::Duration;

use ktab::AggregatorOptions;
use url::Url;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	/// Quiet period before an `INPUT_CHANGED` keystroke is queried.
	pub debounce: Duration,
	pub aggregator: AggregatorOptions,
	pub remote: RemoteSettings,
}

/// Endpoints of the autocomplete and favicon services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
	/// `false` leaves autocomplete out of the registry and skips favicon lookups.
	pub enabled: bool,
	pub autocomplete_url: Url,
	/// Base of the links built for autocomplete phrases.
	pub search_url: Url,
	pub favicon_url: Url,
	pub timeout: Duration,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
