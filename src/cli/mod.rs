mod args;
mod output;

pub(crate) use args::{CliArgs, CliCommand, ModeArg, OutputFormat, QueryArgs, parse_cli};
pub(crate) use output::{print_actions, print_batch, print_json, print_plain};
