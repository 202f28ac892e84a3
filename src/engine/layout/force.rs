use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CancelToken, LayoutStrategy, PositionMap};
use crate::engine::config::GraphConfig;
use crate::engine::model::GraphModel;
use crate::engine::types::Position;

/// Largest move of one node in the first iteration, in model units.
const FORCE_MAX: f64 = 100.0;
/// Per-iteration decay of the move cap.
const COOLING: f64 = 0.95;

/// Pairwise repulsion plus weighted spring attraction along edges.
///
/// O(n²) per iteration. Repulsion and attraction add up into one
/// displacement per node, whose length is capped at a bound that cools
/// every iteration, so heavy edges and hubs cannot blow the layout up.
/// Components with no edges between them keep pushing each other away,
/// so they drift apart as iterations go on.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForceDirected;

impl LayoutStrategy for ForceDirected {
	fn compute(
		&self,
		graph: &GraphModel,
		config: &GraphConfig,
		seed: u64,
		cancel: &CancelToken,
	) -> Option<PositionMap> {
		simulate(graph, config, seed, |_| !cancel.is_cancelled())
	}
}

/// Runs the simulation, asking `keep_going` after every finished
/// iteration (numbered from 1) whether to continue.
fn simulate(
	graph: &GraphModel,
	config: &GraphConfig,
	seed: u64,
	mut keep_going: impl FnMut(usize) -> bool,
) -> Option<PositionMap> {
	let nodes = graph.nodes();
	let geometry = &config.geometry;
	match nodes.len() {
		0 => return Some(PositionMap::new()),
		1 => {
			let (cx, cy) = geometry.center();
			return Some(PositionMap::from([(nodes[0].id.clone(), Position::new(cx, cy))]));
		}
		_ => {}
	}

	let mut rng = StdRng::seed_from_u64(seed);
	let mut xs: Vec<f64> = Vec::with_capacity(nodes.len());
	let mut ys: Vec<f64> = Vec::with_capacity(nodes.len());
	for _ in nodes {
		xs.push(rng.gen_range(0.0..geometry.width));
		ys.push(rng.gen_range(0.0..geometry.height));
	}

	// (source, target, weight) by node index
	let springs: Vec<(usize, usize, f64)> = graph
		.edges()
		.iter()
		.filter_map(|edge| {
			let src = graph.position_of(&edge.source)?;
			let tgt = graph.position_of(&edge.target)?;
			(src != tgt).then_some((src, tgt, edge.weight))
		})
		.collect();

	let n = nodes.len();
	let (repulsion, attraction) = (config.repulsion, config.attraction);
	let mut fx = vec![0.0; n];
	let mut fy = vec![0.0; n];

	let mut max_step = FORCE_MAX;
	for iteration in 1..=config.iteration_count() {
		fx.fill(0.0);
		fy.fill(0.0);

		for i in 0..n {
			for j in (i + 1)..n {
				let (dx, dy) = (xs[i] - xs[j], ys[i] - ys[j]);
				let len = (dx * dx + dy * dy).sqrt();
				// coincident nodes get pushed apart along x
				let (ux, uy) = if len > f64::EPSILON {
					(dx / len, dy / len)
				} else {
					(-1.0, 0.0)
				};
				let dist = len.max(1.0);
				let force = repulsion / (dist * dist);
				fx[i] += ux * force;
				fy[i] += uy * force;
				fx[j] -= ux * force;
				fy[j] -= uy * force;
			}
		}

		for &(i, j, weight) in &springs {
			let (dx, dy) = (xs[j] - xs[i], ys[j] - ys[i]);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist <= f64::EPSILON {
				continue;
			}
			// attraction * dist * weight along the unit vector
			let (sx, sy) = (attraction * weight * dx, attraction * weight * dy);
			fx[i] += sx;
			fy[i] += sy;
			fx[j] -= sx;
			fy[j] -= sy;
		}

		for i in 0..n {
			let len = fx[i].hypot(fy[i]);
			let scale = if len > max_step { max_step / len } else { 1.0 };
			xs[i] += fx[i] * scale;
			ys[i] += fy[i] * scale;
		}
		max_step *= COOLING;

		if !keep_going(iteration) {
			return None;
		}
	}

	Some(
		nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), Position::new(xs[i], ys[i])))
			.collect(),
	)
}
