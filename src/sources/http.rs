use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to a remote endpoint. Sources log these and fall back to an
/// empty or default result.
#[derive(Debug, Error)]
pub enum RemoteError {
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("{url} answered with status {status}")]
	Status { url: String, status: StatusCode },
	#[error("unexpected payload from {url}: {reason}")]
	Payload { url: String, reason: String },
}

/// Build the client shared by every remote source. Each request is bounded by
/// `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
	reqwest::Client::builder()
		.timeout(timeout)
		.user_agent(concat!("ktab/", env!("CARGO_PKG_VERSION")))
		.build()
}
