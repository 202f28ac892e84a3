//! Graph snapshot data as it arrives from the backend.

use serde::{Deserialize, Serialize};

/// Kind of learning item a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	/// An abstract idea.
	Concept,
	/// Something the learner can do.
	Skill,
	/// A subject area grouping concepts.
	Topic,
	/// Knowledge required before other items.
	Prerequisite,
	/// A target result of learning.
	Outcome,
	/// Any type this build does not know about.
	#[serde(other)]
	Unknown,
}

impl NodeType {
	/// Vertical rank used by the hierarchical layout.
	pub fn rank(self) -> usize {
		match self {
			NodeType::Prerequisite => 0,
			NodeType::Concept => 1,
			NodeType::Skill => 2,
			NodeType::Topic => 3,
			NodeType::Outcome => 4,
			NodeType::Unknown => 2,
		}
	}

	/// Wire name of the type.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeType::Concept => "concept",
			NodeType::Skill => "skill",
			NodeType::Topic => "topic",
			NodeType::Prerequisite => "prerequisite",
			NodeType::Outcome => "outcome",
			NodeType::Unknown => "unknown",
		}
	}
}

/// Learning metrics attached to a node.
///
/// `difficulty`, `importance` and `mastery` are normalized to `[0, 1]`;
/// `learning_time` is in hours.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeProperties {
	pub difficulty: f64,
	pub importance: f64,
	pub learning_time: f64,
	pub mastery: f64,
}

impl Default for NodeProperties {
	fn default() -> Self {
		Self {
			difficulty: 0.5,
			importance: 0.5,
			learning_time: 0.0,
			mastery: 0.0,
		}
	}
}

/// A learning item in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub label: String,
	#[serde(rename = "type")]
	pub node_type: NodeType,
	#[serde(default)]
	pub properties: NodeProperties,
}

impl Node {
	/// Node with default properties.
	pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			node_type,
			properties: NodeProperties::default(),
		}
	}

	/// Replace the node's properties.
	pub fn with_properties(mut self, properties: NodeProperties) -> Self {
		self.properties = properties;
		self
	}
}

/// How the source of an edge relates to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
	Prerequisite,
	LeadsTo,
	RelatedTo,
	PartOf,
	Enables,
}

fn default_weight() -> f64 {
	1.0
}

/// Directed, weighted relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub source: String,
	pub target: String,
	pub relationship: Relationship,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

impl Edge {
	/// Edge with weight 1.
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		relationship: Relationship,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			relationship,
			weight: default_weight(),
		}
	}

	/// Set the edge weight.
	pub fn with_weight(mut self, weight: f64) -> Self {
		self.weight = weight;
		self
	}

	/// The endpoint opposite `id`, if `id` is one of the endpoints.
	pub fn other(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Stable handle of an edge inside one loaded model: its input index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// Raw nodes and edges as supplied by the data source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
}

/// A point in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(&self, other: &Self) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}
