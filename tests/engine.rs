use std::collections::BTreeSet;

use knowledge_graph_canvas::engine::layout::{self, CancelToken};
use knowledge_graph_canvas::engine::{
	Edge, GraphConfig, GraphModel, HighlightState, LayoutKind, Node, NodeType, PathFinder,
	Position, Relationship, SelectionIndex, ValidationError, ViewportController,
};
use proptest::prelude::*;

const TYPES: [NodeType; 6] = [
	NodeType::Concept,
	NodeType::Skill,
	NodeType::Topic,
	NodeType::Prerequisite,
	NodeType::Outcome,
	NodeType::Unknown,
];

fn scenario() -> GraphModel {
	GraphModel::load(
		vec![
			Node::new("A", "Algebra", NodeType::Concept),
			Node::new("B", "Graph sketching skill", NodeType::Skill),
			Node::new("C", "Calculus", NodeType::Topic),
		],
		vec![
			Edge::new("A", "B", Relationship::Prerequisite).with_weight(1.0),
			Edge::new("B", "C", Relationship::LeadsTo).with_weight(1.0),
		],
	)
	.unwrap()
}

#[test]
fn end_to_end_scenario() {
	let g = scenario();

	let path = PathFinder::find(&g, "A", "C").unwrap();
	assert_eq!(path.nodes, ["A", "B", "C"]);
	assert_eq!(PathFinder::find(&g, "C", "A"), None);
	assert_eq!(PathFinder::find(&g, "A", "A").unwrap().nodes, ["A"]);

	assert_eq!(SelectionIndex::search(&g, "ski"), BTreeSet::from(["B"]));
	assert_eq!(SelectionIndex::select(&g, "B").nodes, BTreeSet::from(["A", "B", "C"]));

	let highlight = HighlightState::from_path(&path);
	assert_eq!(highlight.highlighted_edge_keys.len(), 2);
}

#[test]
fn zoom_limits() {
	assert_eq!(ViewportController::zoom(1.0, -10.0), 0.5);
	assert_eq!(ViewportController::zoom(1.0, 10.0), 3.0);
}

#[test]
fn negative_iterations_are_clamped_not_rejected() {
	let config = GraphConfig {
		iterations: -5,
		..GraphConfig::default()
	};
	let positions = layout::compute(&scenario(), &config, 11);
	assert_eq!(positions.len(), 3);
}

#[test]
fn cancelling_mid_run_returns_nothing() {
	let token = CancelToken::new();
	token.cancel();
	let config = GraphConfig {
		iterations: 500,
		..GraphConfig::default()
	};
	assert!(layout::compute_cancellable(&scenario(), &config, 3, &token).is_none());
	// the model is untouched and a fresh run still works
	assert_eq!(layout::compute(&scenario(), &config, 3).len(), 3);
}

/// Nodes `n0..n{count}` with random types and edges between them.
fn arb_graph() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
	(1usize..24).prop_flat_map(|count| {
		let nodes = prop::collection::vec(0usize..TYPES.len(), count).prop_map(|types| {
			types
				.into_iter()
				.enumerate()
				.map(|(i, t)| Node::new(format!("n{i}"), format!("Node {i}"), TYPES[t]))
				.collect::<Vec<_>>()
		});
		let edges = prop::collection::vec((0..count, 0..count, 0.1f64..5.0), 0..count * 2)
			.prop_map(|pairs| {
				pairs
					.into_iter()
					.map(|(s, t, w)| {
						Edge::new(format!("n{s}"), format!("n{t}"), Relationship::RelatedTo)
							.with_weight(w)
					})
					.collect::<Vec<_>>()
			});
		(nodes, edges)
	})
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn valid_graphs_load((nodes, edges) in arb_graph()) {
		let g = GraphModel::load(nodes.clone(), edges.clone()).unwrap();
		prop_assert_eq!(g.node_count(), nodes.len());
		prop_assert_eq!(g.edge_count(), edges.len());
	}

	#[test]
	fn dangling_edges_are_rejected(
		(nodes, mut edges) in arb_graph(),
		at in any::<prop::sample::Index>(),
		flip in any::<bool>(),
	) {
		let ghost = if flip {
			Edge::new("ghost", "n0", Relationship::Enables)
		} else {
			Edge::new("n0", "ghost", Relationship::Enables)
		};
		let at = at.index(edges.len() + 1);
		edges.insert(at, ghost);
		let err = GraphModel::load(nodes, edges).unwrap_err();
		match err {
			ValidationError::DanglingEdgeReference { index, missing, .. } => {
				prop_assert_eq!(index, at);
				prop_assert_eq!(missing, "ghost");
			}
			other => prop_assert!(false, "unexpected error: {}", other),
		}
	}

	#[test]
	fn duplicate_ids_are_rejected((mut nodes, edges) in arb_graph(), pick in any::<prop::sample::Index>()) {
		let copy = nodes[pick.index(nodes.len())].clone();
		nodes.push(copy);
		let err = GraphModel::load(nodes, edges).unwrap_err();
		let is_duplicate = matches!(err, ValidationError::DuplicateNodeId { .. });
		prop_assert!(is_duplicate);
	}

	#[test]
	fn force_layout_is_deterministic((nodes, edges) in arb_graph(), seed in any::<u64>()) {
		let g = GraphModel::load(nodes, edges).unwrap();
		let config = GraphConfig { iterations: 30, ..GraphConfig::default() };
		let first = layout::compute(&g, &config, seed);
		let second = layout::compute(&g, &config, seed);
		prop_assert_eq!(first.len(), g.node_count());
		for (id, p) in &first {
			prop_assert!(p.x.is_finite() && p.y.is_finite(), "{} at {:?}", id, p);
			let q = second[id];
			prop_assert_eq!(p.x.to_bits(), q.x.to_bits());
			prop_assert_eq!(p.y.to_bits(), q.y.to_bits());
		}
	}

	#[test]
	fn circular_layout_keeps_radius((nodes, edges) in arb_graph()) {
		let g = GraphModel::load(nodes, edges).unwrap();
		let config = GraphConfig { layout: LayoutKind::Circular, ..GraphConfig::default() };
		let (cx, cy) = config.geometry.center();
		let center = Position::new(cx, cy);
		for p in layout::compute(&g, &config, 0).values() {
			prop_assert!((p.distance(&center) - config.geometry.radius).abs() < 1e-9);
		}
	}

	#[test]
	fn hierarchical_rows_share_y((nodes, edges) in arb_graph()) {
		let g = GraphModel::load(nodes, edges).unwrap();
		let config = GraphConfig { layout: LayoutKind::Hierarchical, ..GraphConfig::default() };
		let positions = layout::compute(&g, &config, 0);
		for a in g.nodes() {
			for b in g.nodes() {
				if a.node_type.rank() == b.node_type.rank() {
					prop_assert_eq!(positions[&a.id].y, positions[&b.id].y);
				}
			}
		}
	}

	#[test]
	fn selection_is_node_plus_neighbors((nodes, edges) in arb_graph(), pick in any::<prop::sample::Index>()) {
		let g = GraphModel::load(nodes, edges).unwrap();
		let id = g.nodes()[pick.index(g.node_count())].id.clone();
		let mut expected: BTreeSet<&str> = g
			.edges()
			.iter()
			.filter_map(|e| e.other(&id))
			.collect();
		expected.insert(&id);
		prop_assert_eq!(SelectionIndex::select(&g, &id).nodes, expected);
	}
}
