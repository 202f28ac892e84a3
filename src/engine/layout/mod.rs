//! Layout strategies mapping a [`GraphModel`] to node positions.
//!
//! Every strategy is a pure function of `(graph, config, seed)`: the same
//! inputs always give bit-identical output and the model is never touched.

mod circular;
mod force;
mod hierarchical;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

pub use circular::Circular;
pub use force::ForceDirected;
pub use hierarchical::Hierarchical;

use super::config::{GraphConfig, LayoutKind};
use super::model::GraphModel;
use super::types::Position;

/// Model-space position of every node, keyed by node id.
pub type PositionMap = HashMap<String, Position>;

/// Cooperative cancellation flag shared between a layout run and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// A way of placing nodes.
pub trait LayoutStrategy {
	/// Compute positions, or `None` if `cancel` fired before the run
	/// finished. `config` is expected to be clamped already.
	fn compute(
		&self,
		graph: &GraphModel,
		config: &GraphConfig,
		seed: u64,
		cancel: &CancelToken,
	) -> Option<PositionMap>;
}

impl LayoutKind {
	pub fn strategy(self) -> &'static dyn LayoutStrategy {
		match self {
			LayoutKind::Force => &ForceDirected,
			LayoutKind::Circular => &Circular,
			LayoutKind::Hierarchical => &Hierarchical,
		}
	}
}

/// Run the layout selected by `config.layout`.
pub fn compute(graph: &GraphModel, config: &GraphConfig, seed: u64) -> PositionMap {
	compute_cancellable(graph, config, seed, &CancelToken::new()).unwrap_or_default()
}

/// Like [`compute`], but gives up and returns `None` once `cancel` fires.
pub fn compute_cancellable(
	graph: &GraphModel,
	config: &GraphConfig,
	seed: u64,
	cancel: &CancelToken,
) -> Option<PositionMap> {
	let config = config.clamped();
	let positions = config
		.layout
		.strategy()
		.compute(graph, &config, seed, cancel);
	match &positions {
		Some(map) => debug!("{:?} layout placed {} nodes", config.layout, map.len()),
		None => warn!("{:?} layout cancelled", config.layout),
	}
	positions
}
