use ktab::SearchLimits;

use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	println!("  Debounce: {}ms", config.debounce.as_millis());
	println!(
		"  One-shot timeout: {}ms",
		config.aggregator.oneshot_timeout.as_millis()
	);
	println!(
		"  Scoped max results: {}",
		config.aggregator.scoped_max_results
	);
	println!("  Palette: {}", describe_limits(&config.aggregator.palette));
	println!("  Omnibox: {}", describe_limits(&config.aggregator.omnibox));
	println!("  Remote lookups: {}", bool_to_word(config.remote.enabled));
	if config.remote.enabled {
		println!("  Autocomplete: {}", config.remote.autocomplete_url);
		println!("  Search links: {}", config.remote.search_url);
		println!("  Favicons: {}", config.remote.favicon_url);
		println!("  Remote timeout: {}ms", config.remote.timeout.as_millis());
	}
}

fn describe_limits(limits: &SearchLimits) -> String {
	format!(
		"max {}, history {}, bookmarks {}, autocomplete {}, actions {}",
		limits.max_results,
		limits.history,
		limits.bookmarks,
		limits.autocomplete,
		bool_to_word(limits.actions)
	)
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
