//! Diagnostic logging for the `ktab` binary.
//!
//! Logs go to stderr; stdout carries the message protocol.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "KTAB_LOG";

/// Build the filter used by [`initialize`].
///
/// `verbose` forces `debug`. Otherwise `KTAB_LOG`, then `RUST_LOG`, then `info`.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
	if verbose {
		return EnvFilter::new("debug");
	}
	EnvFilter::try_from_env(LOG_ENV)
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice keeps the first one.
pub fn initialize(verbose: bool) {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter(verbose))
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}

#[cfg(test)]
mod tests {
	use tracing_subscriber::filter::LevelFilter;

	use super::*;

	#[test]
	fn verbose_forces_debug() {
		assert_eq!(filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
	}

	#[test]
	fn repeated_initialization_is_harmless() {
		initialize(false);
		initialize(true);
	}
}
