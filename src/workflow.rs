use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ktab::aggregator::{Aggregator, SuggestionRequest, Surface};
use ktab::app_dirs;
use ktab::platform::{Browser, SnapshotBrowser};
use ktab::sources::{AutocompleteSource, FaviconResolver, build_http_client, builtin_registry};
use ktab::{ActionTable, MessageHost};
use ktab_stream::suggestions::{BatchOrigin, BatchStream, RequestTracker};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::{ModeArg, OutputFormat, QueryArgs, print_batch, print_json, print_plain};
use crate::settings::{RemoteSettings, ResolvedConfig};

/// Wires the browser, the sources and the aggregator together for one run.
pub(crate) struct PaletteWorkflow {
    aggregator: Arc<Aggregator>,
    browser: Arc<dyn Browser>,
    debounce: Duration,
}

impl PaletteWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig, snapshot: Option<PathBuf>) -> Result<Self> {
        let browser: Arc<dyn Browser> = Arc::new(load_browser(snapshot)?);
        let actions = ActionTable::builtin();
        let remote = RemoteClients::build(&config.remote)?;

        let registry = builtin_registry(Arc::clone(&browser), actions.clone(), remote.autocomplete)
            .context("failed to register suggestion sources")?;
        let mut aggregator = Aggregator::new(registry, actions, config.aggregator);
        if let Some(icons) = remote.icons {
            aggregator = aggregator.with_icon_resolver(Arc::new(icons));
        }

        Ok(Self {
            aggregator: Arc::new(aggregator),
            browser,
            debounce: config.debounce,
        })
    }

    pub(crate) fn actions(&self) -> &ActionTable {
        self.aggregator.actions()
    }

    /// Answer the extension over stdin and stdout until the input closes.
    pub(crate) async fn serve(&self) -> Result<()> {
        info!(sources = self.aggregator.registry().len(), "serving palette requests");
        MessageHost::new(
            Arc::clone(&self.aggregator),
            Arc::clone(&self.browser),
            self.debounce,
        )
        .serve_stdio()
        .await
    }

    pub(crate) async fn query(&self, args: &QueryArgs) -> Result<()> {
        let surface = if args.omnibox {
            Surface::Omnibox
        } else {
            Surface::Palette
        };
        let request = SuggestionRequest::new(args.input.clone())
            .with_mode(args.mode.map(ModeArg::into_mode))
            .with_surface(surface);

        if !args.stream {
            let suggestions = self.aggregator.collect(1, &request).await;
            return match args.output {
                OutputFormat::Plain => {
                    print_plain(&suggestions);
                    Ok(())
                }
                OutputFormat::Json => print_json(&suggestions),
            };
        }

        let tracker = RequestTracker::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let stream = BatchStream::new(tx, tracker.begin());
        let aggregator = &self.aggregator;

        let producer = async move {
            aggregator.stream(&request, &stream, &tracker).await;
        };
        let printer = async {
            while let Some(envelope) = rx.recv().await {
                let source = match envelope.kind {
                    BatchOrigin::Source(source) => Some(source),
                    BatchOrigin::ActionTable | BatchOrigin::Terminal => None,
                };
                print_batch(args.output, source, &envelope.payload, envelope.complete)?;
            }
            Ok::<_, anyhow::Error>(())
        };

        let ((), printed) = tokio::join!(producer, printer);
        printed
    }
}

/// HTTP-backed collaborators; both are absent when remote lookups are off.
struct RemoteClients {
    autocomplete: Option<AutocompleteSource>,
    icons: Option<FaviconResolver>,
}

impl RemoteClients {
    fn build(settings: &RemoteSettings) -> Result<Self> {
        if !settings.enabled {
            debug!("remote lookups disabled");
            return Ok(Self {
                autocomplete: None,
                icons: None,
            });
        }

        let client = build_http_client(settings.timeout).context("failed to build HTTP client")?;
        Ok(Self {
            autocomplete: Some(AutocompleteSource::new(
                client.clone(),
                settings.autocomplete_url.clone(),
                settings.search_url.clone(),
            )),
            icons: Some(FaviconResolver::new(client, settings.favicon_url.clone())),
        })
    }
}

/// Load the snapshot at `path`, or the default one when it exists.
fn load_browser(path: Option<PathBuf>) -> Result<SnapshotBrowser> {
    if let Some(path) = path {
        return SnapshotBrowser::load(&path);
    }

    let default = app_dirs::default_snapshot_path()?;
    if default.is_file() {
        return SnapshotBrowser::load(&default);
    }

    warn!(
        path = %default.display(),
        "no browser snapshot found, serving an empty browser"
    );
    Ok(SnapshotBrowser::default())
}
