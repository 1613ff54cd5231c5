//! Turning a selected suggestion into a browser side effect.

use ktab_source_api::{Suggestion, SuggestionKind};
use tracing::{debug, warn};

use crate::actions::ActionTable;
use crate::platform::{Browser, BrowserCommand, PlatformError};

/// Command run when `suggestion` is selected.
///
/// Tabs are re-activated, actions run their bound command and everything else
/// opens `content` in a new tab.
#[must_use]
pub fn activation_for(suggestion: &Suggestion, actions: &ActionTable) -> BrowserCommand {
	match (suggestion.kind, suggestion.tab_id) {
		(SuggestionKind::Tab, Some(tab_id)) => BrowserCommand::SwitchTab { tab_id },
		(SuggestionKind::Action, _) => actions
			.command_for(&suggestion.content)
			.cloned()
			.unwrap_or_else(|| open(suggestion)),
		_ => open(suggestion),
	}
}

fn open(suggestion: &Suggestion) -> BrowserCommand {
	BrowserCommand::NewTab {
		url: suggestion.content.clone(),
	}
}

/// Run `command` once. Failures are logged and reported, never retried.
pub async fn execute(browser: &dyn Browser, command: &BrowserCommand) -> Result<(), PlatformError> {
	match browser.execute(command).await {
		Ok(()) => {
			debug!(command = command.id(), "browser command executed");
			Ok(())
		}
		Err(err) => {
			warn!(command = command.id(), "browser command failed: {err}");
			Err(err)
		}
	}
}
