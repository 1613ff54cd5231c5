use anyhow::Result;
use ktab::{ActionTable, Suggestion};
use serde_json::json;

use super::OutputFormat;

fn plain_line(suggestion: &Suggestion) -> String {
	format!(
		"{:<8} {}  {}",
		suggestion.kind.id(),
		suggestion.content,
		suggestion.description
	)
}

/// Print one suggestion per line.
pub(crate) fn print_plain(suggestions: &[Suggestion]) {
	if suggestions.is_empty() {
		println!("No suggestions");
		return;
	}
	for suggestion in suggestions {
		println!("{}", plain_line(suggestion));
	}
}

/// Print the suggestion list as a pretty JSON array.
pub(crate) fn print_json(suggestions: &[Suggestion]) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(suggestions)?);
	Ok(())
}

/// Print one streamed batch. JSON output emits one object per line.
pub(crate) fn print_batch(
	format: OutputFormat,
	source: Option<&str>,
	suggestions: &[Suggestion],
	complete: bool,
) -> Result<()> {
	match format {
		OutputFormat::Plain => {
			for suggestion in suggestions {
				println!("{}", plain_line(suggestion));
			}
			if complete {
				println!("-- complete");
			}
		}
		OutputFormat::Json => {
			let batch = json!({
				"source": source,
				"suggestions": suggestions,
				"complete": complete,
			});
			println!("{}", serde_json::to_string(&batch)?);
		}
	}
	Ok(())
}

/// Format the action table as a JSON string.
pub(crate) fn format_actions_json(table: &ActionTable) -> Result<String> {
	let actions: Vec<_> = table
		.iter()
		.map(|action| {
			json!({
				"content": action.suggestion.content,
				"description": action.suggestion.description,
				"iconUrl": action.suggestion.icon_url,
				"command": action.command.as_ref().map(|command| command.id()),
				"shortcut": action.shortcut,
			})
		})
		.collect();
	Ok(serde_json::to_string_pretty(&actions)?)
}

pub(crate) fn print_actions(table: &ActionTable, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Plain => {
			for action in table.iter() {
				match action.shortcut {
					Some(shortcut) => println!(
						"{}  {}  [{shortcut}]",
						action.suggestion.content, action.suggestion.description
					),
					None => println!(
						"{}  {}",
						action.suggestion.content, action.suggestion.description
					),
				}
			}
		}
		OutputFormat::Json => println!("{}", format_actions_json(table)?),
	}
	Ok(())
}
