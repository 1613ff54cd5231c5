use clap::{CommandFactory, Parser};

use super::{CliArgs, CliCommand, ModeArg, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn no_subcommand_means_serve() {
	let parsed = CliArgs::parse_from(["ktab"]);
	assert!(parsed.command.is_none());
	assert!(parsed.config.is_empty());
	assert!(!parsed.offline);
}

#[test]
fn query_accepts_mode_and_global_flags() {
	let parsed = CliArgs::parse_from([
		"ktab",
		"query",
		"rust",
		"--mode",
		"tab-only",
		"--stream",
		"--offline",
		"--max-results",
		"8",
		"-o",
		"json",
	]);
	assert!(parsed.offline);
	assert_eq!(parsed.max_results, Some(8));
	let Some(CliCommand::Query(query)) = parsed.command else {
		panic!("expected the query subcommand");
	};
	assert_eq!(query.input, "rust");
	assert_eq!(query.mode, Some(ModeArg::TabOnly));
	assert!(query.stream);
	assert!(!query.omnibox);
	assert_eq!(query.output, OutputFormat::Json);
}

#[test]
fn actions_default_to_plain_output() {
	let parsed = CliArgs::parse_from(["ktab", "actions"]);
	assert!(matches!(
		parsed.command,
		Some(CliCommand::Actions {
			output: OutputFormat::Plain
		})
	));
}
