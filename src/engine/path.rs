//! Shortest directed learning paths.

use std::collections::{HashMap, VecDeque};

use log::debug;
use serde::Serialize;

use super::model::GraphModel;
use super::types::EdgeId;

/// Nodes from start to end, with the edges walked between them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LearningPath {
	pub nodes: Vec<String>,
	pub edges: Vec<EdgeId>,
}

impl LearningPath {
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Breadth-first search over edges in their `source -> target` direction.
pub struct PathFinder;

impl PathFinder {
	/// Fewest-hop path from `start` to `end`, or `None` when `end` cannot be
	/// reached or either id is unknown.
	///
	/// Among equally short paths, the one found first wins; at every node
	/// outgoing edges are tried in insertion order.
	pub fn find(graph: &GraphModel, start: &str, end: &str) -> Option<LearningPath> {
		if !graph.contains(start) || !graph.contains(end) {
			return None;
		}
		if start == end {
			return Some(LearningPath {
				nodes: vec![start.to_string()],
				edges: Vec::new(),
			});
		}

		// node -> (previous node, edge used to reach it)
		let mut came_from: HashMap<&str, (&str, EdgeId)> = HashMap::new();
		let mut queue = VecDeque::from([start]);

		while let Some(current) = queue.pop_front() {
			for (edge_id, edge) in graph.outgoing_edges(current) {
				let next = edge.target.as_str();
				if next == start || came_from.contains_key(next) {
					continue;
				}
				came_from.insert(next, (current, edge_id));
				if next == end {
					let path = unwind(&came_from, start, end);
					debug!("path {} -> {}: {} hops", start, end, path.edges.len());
					return Some(path);
				}
				queue.push_back(next);
			}
		}
		None
	}
}

fn unwind(came_from: &HashMap<&str, (&str, EdgeId)>, start: &str, end: &str) -> LearningPath {
	let mut nodes = vec![end.to_string()];
	let mut edges = Vec::new();
	let mut current = end;
	while current != start {
		let Some(&(prev, edge)) = came_from.get(current) else {
			break;
		};
		nodes.push(prev.to_string());
		edges.push(edge);
		current = prev;
	}
	nodes.reverse();
	edges.reverse();
	LearningPath { nodes, edges }
}
