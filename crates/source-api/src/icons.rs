use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use url::Url;

/// Resolves the icon shown next to a suggestion for a given domain.
///
/// Implementations never fail: when the icon cannot be fetched they return a
/// default icon reference instead.
#[async_trait]
pub trait IconResolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> String;
}

type PendingIcon = Shared<BoxFuture<'static, String>>;

/// Per-request memo of icon lookups keyed by domain.
///
/// Concurrent lookups for the same domain share one in-flight future, so a
/// request never issues more than one resolver call per domain.
pub struct IconPool {
    resolver: Option<Arc<dyn IconResolver>>,
    lookups: Mutex<HashMap<String, PendingIcon>>,
}

impl IconPool {
    /// Create a pool backed by `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn IconResolver>) -> Self {
        Self {
            resolver: Some(resolver),
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Create a pool that never resolves icons.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            resolver: None,
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the icon for the domain of `url`.
    ///
    /// Returns `None` when the pool is disabled or `url` has no host.
    pub async fn icon_for(&self, url: &str) -> Option<String> {
        let resolver = self.resolver.as_ref()?;
        let domain = domain_of(url)?;
        let pending = {
            let mut lookups = self.lookups.lock().unwrap_or_else(PoisonError::into_inner);
            lookups
                .entry(domain.clone())
                .or_insert_with(|| {
                    let resolver = Arc::clone(resolver);
                    async move { resolver.resolve(&domain).await }
                        .boxed()
                        .shared()
                })
                .clone()
        };
        Some(pending.await)
    }

    /// Number of distinct domains looked up so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for IconPool {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for IconPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconPool")
            .field("enabled", &self.resolver.is_some())
            .field("lookups", &self.lookups())
            .finish()
    }
}

/// Extract the host portion of `url`.
#[must_use]
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::join_all;

    use super::*;

    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IconResolver for CountingResolver {
        async fn resolve(&self, domain: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("icon://{domain}")
        }
    }

    #[test]
    fn domain_extraction() {
        assert_eq!(domain_of("https://github.com/rust-lang").as_deref(), Some("github.com"));
        assert_eq!(domain_of("BOOKMARK_CURRENT_TAB"), None);
    }

    #[tokio::test]
    async fn lookups_are_memoized_per_domain() {
        let resolver = Arc::new(CountingResolver::default());
        let pool = IconPool::new(resolver.clone());

        let urls = [
            "https://github.com/a",
            "https://github.com/b",
            "https://docs.rs/tokio",
            "https://github.com/c",
        ];
        let icons = join_all(urls.iter().map(|url| pool.icon_for(url))).await;

        assert_eq!(icons[0].as_deref(), Some("icon://github.com"));
        assert_eq!(icons[2].as_deref(), Some("icon://docs.rs"));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
        assert_eq!(pool.lookups(), 2);
    }

    #[tokio::test]
    async fn disabled_pool_returns_nothing() {
        let pool = IconPool::disabled();
        assert_eq!(pool.icon_for("https://github.com").await, None);
        assert_eq!(pool.lookups(), 0);
    }
}
