use leptos::prelude::*;
use thiserror::Error;

use crate::components::knowledge_graph::KnowledgeGraphCanvas;
use crate::engine::{GraphConfig, GraphModel, GraphSnapshot};

const SAMPLE_GRAPH: &str = include_str!("sample_graph.json");

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("graph snapshot is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("graph snapshot rejected: {0}")]
	Invalid(#[from] crate::engine::ValidationError),
}

/// Parse and validate a JSON graph snapshot.
pub fn load_snapshot(json: &str) -> Result<GraphModel, LoadError> {
	let snapshot: GraphSnapshot = serde_json::from_str(json)?;
	Ok(GraphModel::from_snapshot(snapshot)?)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (query, set_query) = signal(String::new());
	let config = Signal::derive(GraphConfig::default);

	let graph = load_snapshot(SAMPLE_GRAPH).map(|model| {
		let model = Signal::derive(move || model.clone());
		view! { <KnowledgeGraphCanvas model=model config=config search=query fullscreen=true /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{graph}
				<div class="graph-overlay">
					<h1>"Learning Map"</h1>
					<p class="subtitle">
						"Hover to see related concepts. Click to pin, shift-click another node for the learning path. Scroll to zoom. Drag background to pan."
					</p>
					<input
						type="search"
						placeholder="Search concepts"
						prop:value=query
						on:input=move |ev| set_query.set(event_target_value(&ev))
					/>
				</div>
			</div>
		</ErrorBoundary>
	}
}
