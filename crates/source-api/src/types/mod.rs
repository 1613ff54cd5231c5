mod dedup;
mod mode;
mod suggestion;

pub use dedup::{SeenSet, dedup};
pub use mode::QueryMode;
pub use suggestion::{Suggestion, SuggestionKind};
