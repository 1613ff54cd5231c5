use async_trait::async_trait;
use ktab_source_api::{
	QueryContext, QueryMode, SourceDescriptor, SourceLatency, Suggestion, SuggestionSource,
};

use crate::actions::ActionTable;

pub const ID: &str = "actions";

static DESCRIPTOR: SourceDescriptor = SourceDescriptor {
	id: ID,
	label: "Actions",
	scope: Some(QueryMode::ActionOnly),
	latency: SourceLatency::Immediate,
};

/// Filters the static action table.
#[derive(Debug, Clone)]
pub struct ActionSource {
	table: ActionTable,
}

impl ActionSource {
	#[must_use]
	pub fn new(table: ActionTable) -> Self {
		Self { table }
	}
}

#[async_trait]
impl SuggestionSource for ActionSource {
	fn descriptor(&self) -> &'static SourceDescriptor {
		&DESCRIPTOR
	}

	async fn search(&self, context: &QueryContext, limit: usize) -> Vec<Suggestion> {
		self.table.filter(context.text(), limit)
	}
}
