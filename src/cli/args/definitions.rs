use std::path::PathBuf;

use clap::{ArgAction, Args, ColorChoice, Parser, Subcommand};

use super::options::{ModeArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `ktab` binary.
#[derive(Parser, Debug)]
#[command(
    name = "ktab",
    version,
    long_version = long_version(),
    about = "Command palette suggestions from tabs, history, bookmarks, actions and web search",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "KTAB_CONFIG",
        action = ArgAction::Append,
        global = true,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        global = true,
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        global = true,
        help = "Browser snapshot to serve (default: snapshot.json in the data directory)"
    )]
    pub(crate) snapshot: Option<PathBuf>,
    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Log at debug level to stderr (default: disabled)"
    )]
    pub(crate) verbose: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        global = true,
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        long,
        global = true,
        help = "Skip autocomplete and favicon requests (default: disabled)"
    )]
    pub(crate) offline: bool,
    #[arg(
        long = "max-results",
        value_name = "NUM",
        global = true,
        help = "Cap the palette result list (default: 20)"
    )]
    pub(crate) max_results: Option<usize>,
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        global = true,
        help = "Quiet period before a keystroke triggers a query (default: 300)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Serve the message protocol on stdin and stdout (default).
    Serve,
    /// Run a single query and print the suggestions.
    Query(QueryArgs),
    /// List the built-in action table.
    Actions {
        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value_t = OutputFormat::Plain,
            help = "Choose how to print the actions"
        )]
        output: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub(crate) struct QueryArgs {
    #[arg(value_name = "INPUT", help = "Palette input, prefix tokens included")]
    pub(crate) input: String,
    #[arg(long, help = "Print batches as sources settle (default: disabled)")]
    pub(crate) stream: bool,
    #[arg(
        short = 'm',
        long,
        value_enum,
        help = "Query a single source instead of reading a prefix (default: from input)"
    )]
    pub(crate) mode: Option<ModeArg>,
    #[arg(long, help = "Use the omnibox limits (default: disabled)")]
    pub(crate) omnibox: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}
