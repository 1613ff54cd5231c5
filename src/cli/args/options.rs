use clap::ValueEnum;
use ktab::QueryMode;

/// Query modes accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    All,
    TabOnly,
    HistoryOnly,
    BookmarkOnly,
    ActionOnly,
}

impl ModeArg {
    /// Return the mode the aggregator understands.
    pub(crate) fn into_mode(self) -> QueryMode {
        match self {
            ModeArg::All => QueryMode::All,
            ModeArg::TabOnly => QueryMode::TabOnly,
            ModeArg::HistoryOnly => QueryMode::HistoryOnly,
            ModeArg::BookmarkOnly => QueryMode::BookmarkOnly,
            ModeArg::ActionOnly => QueryMode::ActionOnly,
        }
    }
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}
