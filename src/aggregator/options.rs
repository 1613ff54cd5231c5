use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sources::{actions, autocomplete, bookmarks, history};

/// UI surface a request is served for. Each surface has its own limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
	#[default]
	Palette,
	Omnibox,
}

impl Surface {
	#[must_use]
	pub const fn id(self) -> &'static str {
		match self {
			Surface::Palette => "palette",
			Surface::Omnibox => "omnibox",
		}
	}
}

/// Result caps for unscoped queries on one surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
	/// Total number of suggestions delivered for one request.
	pub max_results: usize,
	pub history: usize,
	pub bookmarks: usize,
	pub autocomplete: usize,
	/// Whether the action table participates.
	pub actions: bool,
}

impl SearchLimits {
	#[must_use]
	pub const fn palette() -> Self {
		Self {
			max_results: 20,
			history: 5,
			bookmarks: 3,
			autocomplete: 5,
			actions: true,
		}
	}

	#[must_use]
	pub const fn omnibox() -> Self {
		Self {
			max_results: 6,
			history: 3,
			bookmarks: 0,
			autocomplete: 3,
			actions: false,
		}
	}

	/// Cap handed to the source `id`. Zero keeps the source out of the query.
	#[must_use]
	pub fn cap_for(&self, id: &str) -> usize {
		let cap = match id {
			history::ID => self.history,
			bookmarks::ID => self.bookmarks,
			autocomplete::ID => self.autocomplete,
			actions::ID if !self.actions => 0,
			_ => self.max_results,
		};
		cap.min(self.max_results)
	}
}

/// Tuning knobs for the [`Aggregator`](super::Aggregator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatorOptions {
	pub palette: SearchLimits,
	pub omnibox: SearchLimits,
	/// Cap for a prefix-scoped query, which consults a single source.
	pub scoped_max_results: usize,
	/// Deadline for buffering a one-shot answer.
	pub oneshot_timeout: Duration,
}

impl AggregatorOptions {
	#[must_use]
	pub fn limits(&self, surface: Surface) -> &SearchLimits {
		match surface {
			Surface::Palette => &self.palette,
			Surface::Omnibox => &self.omnibox,
		}
	}
}

impl Default for AggregatorOptions {
	fn default() -> Self {
		Self {
			palette: SearchLimits::palette(),
			omnibox: SearchLimits::omnibox(),
			scoped_max_results: 30,
			oneshot_timeout: Duration::from_millis(1800),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::tabs;

	#[test]
	fn per_source_caps_follow_surface() {
		let palette = SearchLimits::palette();
		assert_eq!(palette.cap_for(history::ID), 5);
		assert_eq!(palette.cap_for(tabs::ID), 20);
		assert_eq!(palette.cap_for(actions::ID), 20);

		let omnibox = SearchLimits::omnibox();
		assert_eq!(omnibox.cap_for(bookmarks::ID), 0);
		assert_eq!(omnibox.cap_for(actions::ID), 0);
		assert_eq!(omnibox.cap_for(tabs::ID), 6);
		assert_eq!(omnibox.cap_for("custom"), 6);
	}

	#[test]
	fn caps_never_exceed_total() {
		let limits = SearchLimits {
			max_results: 2,
			..SearchLimits::palette()
		};
		assert_eq!(limits.cap_for(history::ID), 2);
	}

	#[test]
	fn surfaces_use_lowercase_names() {
		let surface: Surface = serde_json::from_str("\"omnibox\"").expect("parse");
		assert_eq!(surface, Surface::Omnibox);
		assert_eq!(Surface::default().id(), "palette");
	}
}
