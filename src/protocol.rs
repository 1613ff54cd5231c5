//! Messages exchanged with the extension UI, one JSON object per line.
//!
//! Every message carries its kind in `type`. Suggestion requests and selection
//! events are [`Request`]s; any other known `type` names a [`BrowserCommand`].

use ktab_source_api::{QueryMode, Suggestion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::aggregator::{SuggestionRequest, Surface};
use crate::platform::BrowserCommand;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
	GetSuggestions {
		#[serde(default)]
		input: String,
		#[serde(default)]
		mode: Option<QueryMode>,
		/// Answer with partial batches instead of one final list.
		#[serde(default)]
		stream: bool,
		#[serde(default)]
		surface: Surface,
		/// Opaque correlation value echoed back in every reply.
		#[serde(default)]
		id: Option<Value>,
	},
	InputChanged {
		#[serde(default)]
		input: String,
	},
	SelectSuggestion {
		suggestion: Suggestion,
	},
}

impl Request {
	const TYPES: [&'static str; 3] = ["GET_SUGGESTIONS", "INPUT_CHANGED", "SELECT_SUGGESTION"];
}

#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
	Request(Request),
	Command(BrowserCommand),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
	#[error("malformed message: {0}")]
	Json(#[from] serde_json::Error),
	#[error("message has no `type` field")]
	MissingType,
	#[error("unknown message type `{0}`")]
	UnknownType(String),
}

/// Decode one inbound line.
pub fn parse_inbound(line: &str) -> Result<Inbound, ProtocolError> {
	let value: Value = serde_json::from_str(line)?;
	let kind = value
		.get("type")
		.and_then(Value::as_str)
		.ok_or(ProtocolError::MissingType)?;

	if Request::TYPES.contains(&kind) {
		Ok(Inbound::Request(serde_json::from_value(value)?))
	} else if BrowserCommand::is_known(kind) {
		Ok(Inbound::Command(serde_json::from_value(value)?))
	} else {
		Err(ProtocolError::UnknownType(kind.to_string()))
	}
}

/// Split a `GET_SUGGESTIONS` payload into the aggregator request and the
/// reply options.
#[must_use]
pub fn suggestion_request(
	input: String,
	mode: Option<QueryMode>,
	surface: Surface,
) -> SuggestionRequest {
	SuggestionRequest::new(input)
		.with_mode(mode)
		.with_surface(surface)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(
	tag = "type",
	rename_all = "SCREAMING_SNAKE_CASE",
	rename_all_fields = "camelCase"
)]
pub enum Outbound {
	/// Final answer to a one-shot request.
	Suggestions {
		request_id: u64,
		#[serde(skip_serializing_if = "Option::is_none")]
		id: Option<Value>,
		suggestions: Vec<Suggestion>,
	},
	/// One batch of a streamed request. `complete` marks the last one.
	PartialSuggestions {
		request_id: u64,
		#[serde(skip_serializing_if = "Option::is_none")]
		id: Option<Value>,
		#[serde(skip_serializing_if = "Option::is_none")]
		source: Option<&'static str>,
		suggestions: Vec<Suggestion>,
		complete: bool,
	},
	/// Whole palette list after an `INPUT_CHANGED` batch.
	SuggestionsUpdated {
		request_id: u64,
		suggestions: Vec<Suggestion>,
		complete: bool,
	},
	Error {
		message: String,
	},
}
