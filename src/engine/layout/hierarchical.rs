use std::collections::BTreeMap;

use super::{CancelToken, LayoutStrategy, PositionMap};
use crate::engine::config::GraphConfig;
use crate::engine::model::GraphModel;
use crate::engine::types::Position;

/// Rows by node type rank (prerequisites on top, outcomes at the bottom).
///
/// Within a row nodes keep their input order and are spread evenly across
/// the frame width.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hierarchical;

impl LayoutStrategy for Hierarchical {
	fn compute(
		&self,
		graph: &GraphModel,
		config: &GraphConfig,
		_seed: u64,
		cancel: &CancelToken,
	) -> Option<PositionMap> {
		let geometry = &config.geometry;

		let mut ranks: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
		for node in graph.nodes() {
			ranks
				.entry(node.node_type.rank())
				.or_default()
				.push(&node.id);
		}

		let mut positions = PositionMap::with_capacity(graph.node_count());
		for (rank, ids) in ranks {
			let spacing = geometry.width / (ids.len() + 1) as f64;
			let y = rank as f64 * geometry.level_height + geometry.level_offset;
			for (slot, id) in ids.into_iter().enumerate() {
				let x = (slot + 1) as f64 * spacing;
				positions.insert(id.to_string(), Position::new(x, y));
			}
		}
		(!cancel.is_cancelled()).then_some(positions)
	}
}
