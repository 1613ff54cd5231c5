use async_trait::async_trait;
use ktab_source_api::IconResolver;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::http::RemoteError;

/// Icon reference used when the favicon proxy cannot answer.
pub const DEFAULT_ICON: &str = "/assets/default-favicon.png";

/// Resolves a domain to a favicon URL through a favicon proxy.
#[derive(Debug, Clone)]
pub struct FaviconResolver {
	client: Client,
	endpoint: Url,
}

impl FaviconResolver {
	#[must_use]
	pub fn new(client: Client, endpoint: Url) -> Self {
		Self { client, endpoint }
	}

	async fn fetch(&self, domain: &str) -> Result<String, RemoteError> {
		let url = self.endpoint.to_string();
		let response = self
			.client
			.get(self.endpoint.clone())
			.query(&[("domain", domain), ("sz", "32")])
			.send()
			.await
			.map_err(|source| RemoteError::Transport {
				url: url.clone(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(RemoteError::Status { url, status });
		}
		Ok(response.url().to_string())
	}
}

#[async_trait]
impl IconResolver for FaviconResolver {
	async fn resolve(&self, domain: &str) -> String {
		match self.fetch(domain).await {
			Ok(icon) => icon,
			Err(err) => {
				debug!(domain, "favicon lookup failed: {err}");
				DEFAULT_ICON.to_string()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use futures::future::join_all;
	use ktab_source_api::IconPool;
	use wiremock::matchers::{method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	use super::*;
	use crate::sources::http::build_http_client;

	fn resolver(server: &MockServer) -> FaviconResolver {
		let endpoint = Url::parse(&format!("{}/s2/favicons", server.uri())).expect("endpoint");
		FaviconResolver::new(
			build_http_client(Duration::from_secs(2)).expect("client"),
			endpoint,
		)
	}

	#[tokio::test]
	async fn success_returns_proxy_url() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/s2/favicons"))
			.and(query_param("domain", "github.com"))
			.and(query_param("sz", "32"))
			.respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 4]))
			.mount(&server)
			.await;

		let icon = resolver(&server).resolve("github.com").await;
		assert_eq!(
			icon,
			format!("{}/s2/favicons?domain=github.com&sz=32", server.uri())
		);
	}

	#[tokio::test]
	async fn failure_returns_default_icon() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(404))
			.mount(&server)
			.await;

		assert_eq!(resolver(&server).resolve("nowhere.test").await, DEFAULT_ICON);
	}

	#[tokio::test]
	async fn pool_issues_one_request_per_domain() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(query_param("domain", "github.com"))
			.respond_with(
				ResponseTemplate::new(200).set_delay(Duration::from_millis(50)),
			)
			.expect(1)
			.mount(&server)
			.await;

		let pool = IconPool::new(Arc::new(resolver(&server)));
		let icons = join_all(
			["https://github.com/a", "https://github.com/b", "https://github.com/c"]
				.iter()
				.map(|url| pool.icon_for(url)),
		)
		.await;

		assert!(icons.iter().all(|icon| icon == &icons[0]));
		assert_eq!(pool.lookups(), 1);
	}
}
