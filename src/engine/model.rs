//! Validated, read-only graph container.

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};
use thiserror::Error;

use super::types::{Edge, EdgeId, GraphSnapshot, Node, NodeType};

/// Reasons a snapshot is rejected by [`GraphModel::load`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
	#[error("duplicate node id `{id}`")]
	DuplicateNodeId { id: String },

	#[error("edge {index} ({from} -> {to}) references missing node `{missing}`")]
	DanglingEdgeReference {
		index: usize,
		from: String,
		to: String,
		missing: String,
	},

	#[error("edge {index} has non-positive weight {weight}")]
	NonPositiveWeight { index: usize, weight: f64 },

	#[error("node `{id}` has {property} = {value}, outside its valid range")]
	PropertyOutOfRange {
		id: String,
		property: &'static str,
		value: f64,
	},
}

/// Nodes and edges that passed validation, with adjacency indexes.
///
/// A model is built once per snapshot and never changes afterwards.
/// Layout positions live outside of it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
	// edge indices per node, in insertion order
	outgoing: Vec<Vec<usize>>,
	incident: Vec<Vec<usize>>,
}

impl GraphModel {
	/// Validate `nodes` and `edges` and build a model from them.
	///
	/// Either the whole input is accepted or an error is returned and
	/// nothing is kept.
	pub fn load(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, ValidationError> {
		let result = Self::build(nodes, edges);
		match &result {
			Ok(model) => debug!(
				"loaded graph: {} nodes, {} edges",
				model.node_count(),
				model.edge_count()
			),
			Err(err) => warn!("rejected graph snapshot: {}", err),
		}
		result
	}

	/// [`GraphModel::load`] on a deserialized snapshot.
	pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, ValidationError> {
		Self::load(snapshot.nodes, snapshot.edges)
	}

	fn build(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, ValidationError> {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(ValidationError::DuplicateNodeId {
					id: node.id.clone(),
				});
			}
			check_properties(node)?;
		}

		let mut outgoing = vec![Vec::new(); nodes.len()];
		let mut incident = vec![Vec::new(); nodes.len()];
		for (i, edge) in edges.iter().enumerate() {
			let lookup = |id: &str| {
				index
					.get(id)
					.copied()
					.ok_or_else(|| ValidationError::DanglingEdgeReference {
						index: i,
						from: edge.source.clone(),
						to: edge.target.clone(),
						missing: id.to_string(),
					})
			};
			let src = lookup(&edge.source)?;
			let tgt = lookup(&edge.target)?;
			if !(edge.weight.is_finite() && edge.weight > 0.0) {
				return Err(ValidationError::NonPositiveWeight {
					index: i,
					weight: edge.weight,
				});
			}

			outgoing[src].push(i);
			incident[src].push(i);
			if tgt != src {
				incident[tgt].push(i);
			}
		}

		Ok(Self {
			nodes,
			edges,
			index,
			outgoing,
			incident,
		})
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in input order; an edge's position is its [`EdgeId`].
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(id.0)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Input position of a node.
	pub fn position_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Nodes one edge away from `id`, following edges in either direction.
	pub fn neighbors(&self, id: &str) -> BTreeSet<&str> {
		self.incident(id)
			.filter_map(|(_, edge)| edge.other(id))
			.filter(|&other| other != id)
			.collect()
	}

	/// Edges leaving `id`, in insertion order, paired with their target.
	pub fn outgoing(&self, id: &str) -> impl Iterator<Item = (&str, &Edge)> + '_ {
		self.outgoing_edges(id)
			.map(|(_, edge)| (edge.target.as_str(), edge))
	}

	/// [`GraphModel::outgoing`] keyed by edge id instead of target.
	pub fn outgoing_edges(&self, id: &str) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
		self.edge_list(&self.outgoing, id)
	}

	/// Edges touching `id` in either direction, in insertion order.
	pub fn incident(&self, id: &str) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
		self.edge_list(&self.incident, id)
	}

	/// Ids of every node of the given type.
	pub fn filter_by_type(&self, node_type: NodeType) -> BTreeSet<&str> {
		self.nodes
			.iter()
			.filter(|node| node.node_type == node_type)
			.map(|node| node.id.as_str())
			.collect()
	}

	fn edge_list<'a>(
		&'a self,
		lists: &'a [Vec<usize>],
		id: &str,
	) -> impl Iterator<Item = (EdgeId, &'a Edge)> + 'a {
		self.index
			.get(id)
			.map(move |&i| lists[i].as_slice())
			.unwrap_or_default()
			.iter()
			.map(move |&e| (EdgeId(e), &self.edges[e]))
	}
}

fn check_properties(node: &Node) -> Result<(), ValidationError> {
	let props = &node.properties;
	let bounded = [
		("difficulty", props.difficulty),
		("importance", props.importance),
		("mastery", props.mastery),
	];
	for (property, value) in bounded {
		if !(0.0..=1.0).contains(&value) {
			return Err(ValidationError::PropertyOutOfRange {
				id: node.id.clone(),
				property,
				value,
			});
		}
	}
	let hours = props.learning_time;
	if !(hours.is_finite() && hours >= 0.0) {
		return Err(ValidationError::PropertyOutOfRange {
			id: node.id.clone(),
			property: "learningTime",
			value: hours,
		});
	}
	Ok(())
}
