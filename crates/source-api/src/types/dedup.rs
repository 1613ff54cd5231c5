use std::collections::HashSet;

use super::Suggestion;

/// Tracks which suggestion contents have already been accepted.
///
/// The first suggestion observed for a given `content` wins; later duplicates
/// are rejected regardless of their kind or description.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    seen: HashSet<String>,
}

impl SeenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `suggestion` and report whether it was seen for the first time.
    pub fn admit(&mut self, suggestion: &Suggestion) -> bool {
        if self.seen.contains(&suggestion.content) {
            return false;
        }
        self.seen.insert(suggestion.content.clone());
        true
    }

    /// Keep only the suggestions whose content has not been seen yet,
    /// preserving their relative order.
    pub fn retain_new(&mut self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        suggestions
            .into_iter()
            .filter(|suggestion| self.admit(suggestion))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, content: &str) -> bool {
        self.seen.contains(content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

/// Drop repeated contents from `suggestions`, keeping first-seen order.
#[must_use]
pub fn dedup(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    SeenSet::new().retain_new(suggestions)
}
