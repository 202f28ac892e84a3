//! Highlight sets derived from graph topology.

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::GraphModel;
use super::path::LearningPath;
use super::types::EdgeId;

/// Nodes and edges to emphasize for one selected node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSet<'a> {
	pub nodes: BTreeSet<&'a str>,
	pub edges: BTreeSet<EdgeId>,
}

/// Stateless topology queries behind selection and search.
pub struct SelectionIndex;

impl SelectionIndex {
	/// The node itself, its one-hop neighbors in either direction, and every
	/// edge touching it.
	///
	/// An unknown id selects nothing.
	pub fn select<'a>(graph: &'a GraphModel, id: &str) -> HighlightSet<'a> {
		let Some(node) = graph.node(id) else {
			return HighlightSet::default();
		};
		let mut nodes = graph.neighbors(id);
		nodes.insert(node.id.as_str());
		let edges = graph.incident(id).map(|(edge_id, _)| edge_id).collect();
		HighlightSet { nodes, edges }
	}

	/// Ids of nodes whose label contains `query`, ignoring case.
	///
	/// The query is used as typed, spaces included. An empty query
	/// matches nothing.
	pub fn search<'a>(graph: &'a GraphModel, query: &str) -> BTreeSet<&'a str> {
		if query.is_empty() {
			return BTreeSet::new();
		}
		let needle = query.to_lowercase();
		graph
			.nodes()
			.iter()
			.filter(|node| node.label.to_lowercase().contains(&needle))
			.map(|node| node.id.as_str())
			.collect()
	}
}

/// What the renderer should restyle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightState {
	pub selected_node_id: Option<String>,
	pub highlighted_node_ids: BTreeSet<String>,
	pub highlighted_edge_keys: BTreeSet<EdgeId>,
}

impl HighlightState {
	/// Highlight for a selected node; unknown ids give an empty state.
	pub fn from_selection(graph: &GraphModel, id: &str) -> Self {
		if !graph.contains(id) {
			return Self::default();
		}
		let set = SelectionIndex::select(graph, id);
		Self {
			selected_node_id: Some(id.to_string()),
			highlighted_node_ids: set.nodes.into_iter().map(str::to_string).collect(),
			highlighted_edge_keys: set.edges,
		}
	}

	/// Highlight search matches, with no selection.
	pub fn from_search(graph: &GraphModel, query: &str) -> Self {
		Self {
			selected_node_id: None,
			highlighted_node_ids: SelectionIndex::search(graph, query)
				.into_iter()
				.map(str::to_string)
				.collect(),
			highlighted_edge_keys: BTreeSet::new(),
		}
	}

	/// Highlight every node and edge along a path.
	pub fn from_path(path: &LearningPath) -> Self {
		Self {
			selected_node_id: path.nodes.first().cloned(),
			highlighted_node_ids: path.nodes.iter().cloned().collect(),
			highlighted_edge_keys: path.edges.iter().copied().collect(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.selected_node_id.is_none() && self.highlighted_node_ids.is_empty()
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.highlighted_node_ids.contains(id)
	}

	pub fn contains_edge(&self, id: EdgeId) -> bool {
		self.highlighted_edge_keys.contains(&id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::path::PathFinder;
	use crate::engine::types::{Edge, Node, NodeType, Relationship};

	fn sample() -> GraphModel {
		GraphModel::load(
			vec![
				Node::new("a", "Linear Algebra", NodeType::Concept),
				Node::new("b", "Matrix Skills", NodeType::Skill),
				Node::new("c", "Machine Learning", NodeType::Topic),
				Node::new("d", "Unrelated", NodeType::Outcome),
			],
			vec![
				Edge::new("a", "b", Relationship::Prerequisite),
				Edge::new("b", "c", Relationship::LeadsTo),
			],
		)
		.unwrap()
	}

	#[test]
	fn select_covers_both_directions() {
		let g = sample();
		let set = SelectionIndex::select(&g, "b");
		assert_eq!(set.nodes, BTreeSet::from(["a", "b", "c"]));
		assert_eq!(set.edges, BTreeSet::from([EdgeId(0), EdgeId(1)]));

		let lonely = SelectionIndex::select(&g, "d");
		assert_eq!(lonely.nodes, BTreeSet::from(["d"]));
		assert!(lonely.edges.is_empty());

		assert_eq!(SelectionIndex::select(&g, "ghost"), HighlightSet::default());
	}

	#[test]
	fn search_ignores_case() {
		let g = sample();
		assert_eq!(SelectionIndex::search(&g, "MATRIX"), BTreeSet::from(["b"]));
		assert_eq!(SelectionIndex::search(&g, "ear"), BTreeSet::from(["a", "c"]));
		assert!(SelectionIndex::search(&g, "").is_empty());
		assert_eq!(SelectionIndex::search(&g, "ear "), BTreeSet::from(["a"]));
		assert_eq!(SelectionIndex::search(&g, " "), BTreeSet::from(["a", "b", "c"]));
	}

	#[test]
	fn highlight_state_builders() {
		let g = sample();
		let state = HighlightState::from_selection(&g, "a");
		assert_eq!(state.selected_node_id.as_deref(), Some("a"));
		assert!(state.contains_node("b"));
		assert!(state.contains_edge(EdgeId(0)));
		assert!(!state.contains_edge(EdgeId(1)));

		let path = PathFinder::find(&g, "a", "c").unwrap();
		let state = HighlightState::from_path(&path);
		assert_eq!(state.highlighted_node_ids.len(), 3);
		assert_eq!(state.highlighted_edge_keys.len(), 2);

		let mut state = HighlightState::from_search(&g, "unrel");
		assert!(state.contains_node("d"));
		assert!(state.selected_node_id.is_none());
		state.clear();
		assert!(state.is_empty());
	}
}
