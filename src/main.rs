mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliCommand, parse_cli, print_actions};
use workflow::PaletteWorkflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = parse_cli();
	ktab::logging::initialize(cli.verbose);

	if let Some(CliCommand::Actions { output }) = &cli.command {
		return print_actions(&ktab::ActionTable::builtin(), *output);
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = PaletteWorkflow::from_config(resolved, cli.snapshot.clone())?;
	match &cli.command {
		Some(CliCommand::Query(args)) => workflow.query(args).await,
		Some(CliCommand::Serve) | None => workflow.serve().await,
		Some(CliCommand::Actions { output }) => print_actions(workflow.actions(), *output),
	}
}
