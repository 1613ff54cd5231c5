use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_ONESHOT_TIMEOUT_MS: u64 = 1800;
const DEFAULT_SCOPED_MAX_RESULTS: usize = 30;

/// Request pacing as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
    pub(super) debounce_ms: Option<u64>,
    pub(super) oneshot_timeout_ms: Option<u64>,
    pub(super) scoped_max_results: Option<usize>,
}

pub(super) struct SearchResolution {
    pub(super) debounce: Duration,
    pub(super) oneshot_timeout: Duration,
    pub(super) scoped_max_results: usize,
}

impl SearchSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.debounce_ms {
            self.debounce_ms = Some(value);
        }
    }

    pub(super) fn resolve(&self) -> SearchResolution {
        SearchResolution {
            debounce: Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
            oneshot_timeout: Duration::from_millis(
                self.oneshot_timeout_ms.unwrap_or(DEFAULT_ONESHOT_TIMEOUT_MS),
            ),
            scoped_max_results: self
                .scoped_max_results
                .unwrap_or(DEFAULT_SCOPED_MAX_RESULTS),
        }
    }
}
