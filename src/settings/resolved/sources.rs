use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origin of every value that validation can reject.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) debounce_ms: Option<SettingSource>,
	pub(crate) oneshot_timeout_ms: Option<SettingSource>,
	pub(crate) scoped_max_results: Option<SettingSource>,
	pub(crate) palette_max_results: Option<SettingSource>,
	pub(crate) omnibox_max_results: Option<SettingSource>,
	pub(crate) remote_timeout_ms: Option<SettingSource>,
	pub(crate) autocomplete_url: Option<SettingSource>,
	pub(crate) search_url: Option<SettingSource>,
	pub(crate) favicon_url: Option<SettingSource>,
}

impl ConfigSources {
	/// Detected origin of `key`, or the key itself when nothing set it.
	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		let detected = match key {
			"search.debounce_ms" => &self.debounce_ms,
			"search.oneshot_timeout_ms" => &self.oneshot_timeout_ms,
			"search.scoped_max_results" => &self.scoped_max_results,
			"palette.max_results" => &self.palette_max_results,
			"omnibox.max_results" => &self.omnibox_max_results,
			"remote.timeout_ms" => &self.remote_timeout_ms,
			"remote.autocomplete_url" => &self.autocomplete_url,
			"remote.search_url" => &self.search_url,
			"remote.favicon_url" => &self.favicon_url,
			_ => return SettingSource::ConfigKey(key),
		};
		detected.clone().unwrap_or(SettingSource::ConfigKey(key))
	}
}
