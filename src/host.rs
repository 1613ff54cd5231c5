//! Newline-delimited JSON message loop between the extension UI and the
//! aggregator.
//!
//! Each inbound line is decoded by [`protocol::parse_inbound`] and dispatched
//! onto a task of its own, so a slow query never blocks commands or newer
//! queries. Replies are written in the order their tasks produce them.
//! Streamed requests share one [`RequestTracker`]: every `GET_SUGGESTIONS`
//! supersedes the streamed requests before it, and batches of a superseded
//! request are dropped before they reach the writer. `INPUT_CHANGED` events
//! feed a debounced [`PaletteSession`].
//!
//! When the input closes, in-flight work is allowed to finish and its replies
//! are flushed before [`MessageHost::run`] returns. Palette input still inside
//! its debounce window is queried at that point rather than dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ktab_stream::suggestions::{BatchOrigin, BatchStream, RequestTracker, SuggestionEnvelope};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use crate::aggregator::Aggregator;
use crate::commands;
use crate::platform::{Browser, BrowserCommand};
use crate::protocol::{self, Inbound, Outbound, Request};
use crate::session::{PaletteSession, SessionEvent, SessionUpdate};

pub struct MessageHost {
	aggregator: Arc<Aggregator>,
	browser: Arc<dyn Browser>,
	debounce: Duration,
}

/// Per-connection state shared by the dispatch paths.
struct Connection {
	tracker: RequestTracker,
	batches: UnboundedSender<SuggestionEnvelope>,
	replies: UnboundedSender<Outbound>,
	events: UnboundedSender<SessionEvent>,
	correlations: HashMap<u64, Option<Value>>,
	tasks: JoinSet<()>,
}

impl MessageHost {
	#[must_use]
	pub fn new(aggregator: Arc<Aggregator>, browser: Arc<dyn Browser>, debounce: Duration) -> Self {
		Self {
			aggregator,
			browser,
			debounce,
		}
	}

	/// Serve the UI over the process's standard streams.
	pub async fn serve_stdio(&self) -> Result<()> {
		self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
			.await
	}

	pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
	where
		R: AsyncBufRead + Unpin,
		W: AsyncWrite + Unpin,
	{
		let mut lines = reader.lines();
		let (batch_tx, mut batch_rx) = mpsc::unbounded_channel();
		let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
		let (update_tx, mut update_rx) = mpsc::unbounded_channel();
		let (event_tx, event_rx) = mpsc::unbounded_channel();

		let mut connection = Connection {
			tracker: RequestTracker::new(),
			batches: batch_tx,
			replies: reply_tx,
			events: event_tx,
			correlations: HashMap::new(),
			tasks: JoinSet::new(),
		};
		let session = PaletteSession::new(Arc::clone(&self.aggregator), self.debounce);
		connection.tasks.spawn(session.run(event_rx, update_tx));

		let mut input_open = true;
		loop {
			if !input_open && connection.tasks.is_empty() {
				break;
			}
			tokio::select! {
				line = lines.next_line(), if input_open => {
					match line.context("failed to read message")? {
						Some(line) => self.dispatch(&line, &mut connection),
						None => {
							debug!("input closed, draining in-flight requests");
							input_open = false;
							let _ = connection.events.send(SessionEvent::Close);
						}
					}
				}
				Some(envelope) = batch_rx.recv() => {
					if let Some(message) = partial_reply(envelope, &mut connection) {
						write_message(&mut writer, &message).await?;
					}
				}
				Some(reply) = reply_rx.recv() => write_message(&mut writer, &reply).await?,
				Some(update) = update_rx.recv() => {
					write_message(&mut writer, &updated_reply(update)).await?;
				}
				Some(joined) = connection.tasks.join_next(), if !connection.tasks.is_empty() => {
					if let Err(err) = joined {
						warn!("host task failed: {err}");
					}
				}
			}
		}

		while let Ok(envelope) = batch_rx.try_recv() {
			if let Some(message) = partial_reply(envelope, &mut connection) {
				write_message(&mut writer, &message).await?;
			}
		}
		while let Ok(reply) = reply_rx.try_recv() {
			write_message(&mut writer, &reply).await?;
		}
		while let Ok(update) = update_rx.try_recv() {
			write_message(&mut writer, &updated_reply(update)).await?;
		}
		writer.flush().await.context("failed to flush output")?;
		Ok(())
	}

	fn dispatch(&self, line: &str, connection: &mut Connection) {
		let line = line.trim();
		if line.is_empty() {
			return;
		}

		let inbound = match protocol::parse_inbound(line) {
			Ok(inbound) => inbound,
			Err(err) => {
				warn!("rejected message: {err}");
				let _ = connection.replies.send(Outbound::Error {
					message: err.to_string(),
				});
				return;
			}
		};

		match inbound {
			Inbound::Request(Request::GetSuggestions {
				input,
				mode,
				stream,
				surface,
				id,
			}) => {
				let request_id = connection.tracker.begin();
				let request = protocol::suggestion_request(input, mode, surface);
				let aggregator = Arc::clone(&self.aggregator);
				trace!(request = request_id, stream, "suggestions requested");

				if stream {
					connection.correlations.clear();
					connection.correlations.insert(request_id, id);
					let batches = BatchStream::new(connection.batches.clone(), request_id);
					let tracker = connection.tracker.clone();
					connection.tasks.spawn(async move {
						aggregator.stream(&request, &batches, &tracker).await;
					});
				} else {
					let replies = connection.replies.clone();
					connection.tasks.spawn(async move {
						let suggestions = aggregator.collect(request_id, &request).await;
						let _ = replies.send(Outbound::Suggestions {
							request_id,
							id,
							suggestions,
						});
					});
				}
			}
			Inbound::Request(Request::InputChanged { input }) => {
				let _ = connection.events.send(SessionEvent::Input(input));
			}
			Inbound::Request(Request::SelectSuggestion { suggestion }) => {
				let command = commands::activation_for(&suggestion, self.aggregator.actions());
				self.spawn_command(command, connection);
			}
			Inbound::Command(command) => self.spawn_command(command, connection),
		}
	}

	fn spawn_command(&self, command: BrowserCommand, connection: &mut Connection) {
		let browser = Arc::clone(&self.browser);
		connection.tasks.spawn(async move {
			let _ = commands::execute(browser.as_ref(), &command).await;
		});
	}
}

fn partial_reply(envelope: SuggestionEnvelope, connection: &mut Connection) -> Option<Outbound> {
	if connection.tracker.is_stale(envelope.id) {
		trace!(request = envelope.id, "dropping stale batch");
		connection.correlations.remove(&envelope.id);
		return None;
	}
	let id = if envelope.complete {
		connection.correlations.remove(&envelope.id).flatten()
	} else {
		connection.correlations.get(&envelope.id).cloned().flatten()
	};
	let source = match envelope.kind {
		BatchOrigin::Source(source) => Some(source),
		BatchOrigin::ActionTable | BatchOrigin::Terminal => None,
	};
	Some(Outbound::PartialSuggestions {
		request_id: envelope.id,
		id,
		source,
		suggestions: envelope.payload,
		complete: envelope.complete,
	})
}

fn updated_reply(update: SessionUpdate) -> Outbound {
	Outbound::SuggestionsUpdated {
		request_id: update.request_id,
		suggestions: update.suggestions,
		complete: update.complete,
	}
}

async fn write_message<W>(writer: &mut W, message: &Outbound) -> Result<()>
where
	W: AsyncWrite + Unpin,
{
	let mut line = serde_json::to_vec(message).context("failed to encode message")?;
	line.push(b'\n');
	writer
		.write_all(&line)
		.await
		.context("failed to write message")?;
	writer.flush().await.context("failed to flush output")?;
	Ok(())
}
