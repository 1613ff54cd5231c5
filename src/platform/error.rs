use thiserror::Error;

/// Failures reported by a [`Browser`](super::Browser) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
	#[error("no tab with id {tab_id}")]
	TabNotFound { tab_id: i64 },
	#[error("no active tab")]
	NoActiveTab,
	#[error("no bookmark for {url}")]
	BookmarkNotFound { url: String },
	#[error("{operation} is not supported by this browser")]
	Unsupported { operation: &'static str },
	#[error("browser call failed: {0}")]
	Call(String),
}
