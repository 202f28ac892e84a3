use std::f64::consts::PI;

use super::{CancelToken, LayoutStrategy, PositionMap};
use crate::engine::config::GraphConfig;
use crate::engine::model::GraphModel;
use crate::engine::types::Position;

/// Nodes evenly spaced on a circle, in input order. Ignores the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Circular;

impl LayoutStrategy for Circular {
	fn compute(
		&self,
		graph: &GraphModel,
		config: &GraphConfig,
		_seed: u64,
		cancel: &CancelToken,
	) -> Option<PositionMap> {
		let nodes = graph.nodes();
		let (cx, cy) = config.geometry.center();
		let radius = config.geometry.radius;
		let n = nodes.len() as f64;

		let positions = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / n;
				let pos = Position::new(cx + radius * angle.cos(), cy + radius * angle.sin());
				(node.id.clone(), pos)
			})
			.collect();
		(!cancel.is_cancelled()).then_some(positions)
	}
}
