//! Suggestion backend for the ktab command palette.
//!
//! The crate merges open tabs, history, bookmarks, quick actions and web
//! search completions into one ranked list. [`aggregator::Aggregator`] drives
//! the registered [`sources`], [`host::MessageHost`] speaks the line-delimited
//! JSON protocol with the extension UI, and [`platform::Browser`] is the seam
//! onto the hosting browser.

pub mod actions;
pub mod aggregator;
pub mod app_dirs;
pub mod commands;
pub mod host;
pub mod logging;
pub mod palette;
pub mod platform;
pub mod protocol;
pub mod session;
pub mod sources;

pub use actions::{Action, ActionTable};
pub use aggregator::{Aggregator, AggregatorOptions, SearchLimits, SuggestionRequest, Surface};
pub use host::MessageHost;
pub use ktab_source_api::{QueryMode, Suggestion, SuggestionKind};
pub use platform::{Browser, BrowserCommand, PlatformError, SnapshotBrowser};
