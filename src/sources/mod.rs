//! Built-in suggestion sources.
//!
//! Registration order matters: it is the order the leading and immediate
//! sources are emitted in and the order one-shot results are assembled in
//! before the priority policy runs.

pub mod actions;
pub mod autocomplete;
pub mod bookmarks;
pub mod favicon;
pub mod history;
pub mod http;
pub mod tabs;
pub mod website;

use std::sync::Arc;

use ktab_source_api::{SourceRegistry, SourceRegistryError};

pub use actions::ActionSource;
pub use autocomplete::AutocompleteSource;
pub use bookmarks::BookmarkSource;
pub use favicon::{DEFAULT_ICON, FaviconResolver};
pub use history::HistorySource;
pub use http::{RemoteError, build_http_client};
pub use tabs::TabSource;
pub use website::WebsiteSource;

use crate::actions::ActionTable;
use crate::platform::Browser;

/// Register every built-in source. `autocomplete` is omitted when offline.
pub fn builtin_registry(
	browser: Arc<dyn Browser>,
	actions: ActionTable,
	autocomplete: Option<AutocompleteSource>,
) -> Result<SourceRegistry, SourceRegistryError> {
	let mut registry = SourceRegistry::new();
	registry.register(WebsiteSource)?;
	registry.register(TabSource::new(Arc::clone(&browser)))?;
	registry.register(ActionSource::new(actions))?;
	registry.register(HistorySource::new(Arc::clone(&browser)))?;
	registry.register(BookmarkSource::new(browser))?;
	if let Some(source) = autocomplete {
		registry.register(source)?;
	}
	Ok(registry)
}
