//! User-facing graph settings.
//!
//! Settings arrive as loosely typed preferences, so nothing here is ever
//! rejected: [`GraphConfig::clamped`] pulls each value back into range
//! and the layouts only ever see the clamped copy.

use log::warn;
use serde::{Deserialize, Serialize};

pub const MAX_ITERATIONS: i64 = 1000;

/// Which layout strategy to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
	#[default]
	Force,
	Circular,
	Hierarchical,
}

/// Fixed frame the layouts place nodes in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutGeometry {
	pub width: f64,
	pub height: f64,
	/// Circle radius for the circular layout.
	pub radius: f64,
	/// Vertical distance between hierarchy ranks.
	pub level_height: f64,
	/// y of rank 0 in the hierarchical layout.
	pub level_offset: f64,
}

impl Default for LayoutGeometry {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			radius: 200.0,
			level_height: 100.0,
			level_offset: 50.0,
		}
	}
}

impl LayoutGeometry {
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Graph display and layout settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphConfig {
	pub layout: LayoutKind,
	/// Force-directed iterations. Signed so out-of-range input can be clamped.
	pub iterations: i64,
	pub repulsion: f64,
	pub attraction: f64,
	pub node_size: f64,
	pub edge_thickness: f64,
	pub color_by_type: bool,
	pub show_mastery: bool,
	pub geometry: LayoutGeometry,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			layout: LayoutKind::Force,
			iterations: 100,
			repulsion: 150.0,
			attraction: 0.05,
			node_size: 5.0,
			edge_thickness: 1.5,
			color_by_type: true,
			show_mastery: true,
			geometry: LayoutGeometry::default(),
		}
	}
}

impl GraphConfig {
	/// Copy of this config with every numeric field inside its valid range.
	pub fn clamped(&self) -> Self {
		let defaults = Self::default();
		let frame = LayoutGeometry::default();
		let clamped = Self {
			layout: self.layout,
			iterations: self.iterations.clamp(0, MAX_ITERATIONS),
			repulsion: clamp_or(self.repulsion, 0.0, 1.0e6, defaults.repulsion),
			attraction: clamp_or(self.attraction, 0.0, 0.5, defaults.attraction),
			node_size: clamp_or(self.node_size, 1.0, 50.0, defaults.node_size),
			edge_thickness: clamp_or(self.edge_thickness, 0.1, 10.0, defaults.edge_thickness),
			color_by_type: self.color_by_type,
			show_mastery: self.show_mastery,
			geometry: LayoutGeometry {
				width: clamp_or(self.geometry.width, 1.0, 1.0e5, frame.width),
				height: clamp_or(self.geometry.height, 1.0, 1.0e5, frame.height),
				radius: clamp_or(self.geometry.radius, 0.0, 1.0e5, frame.radius),
				level_height: clamp_or(self.geometry.level_height, 0.0, 1.0e5, frame.level_height),
				level_offset: clamp_or(self.geometry.level_offset, -1.0e5, 1.0e5, frame.level_offset),
			},
		};
		if clamped != *self {
			warn!("graph config had out-of-range values; clamped");
		}
		clamped
	}

	/// Iteration count after clamping.
	pub fn iteration_count(&self) -> usize {
		self.iterations.clamp(0, MAX_ITERATIONS) as usize
	}
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
	if value.is_finite() {
		value.clamp(min, max)
	} else {
		fallback
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config: GraphConfig =
			serde_json::from_str(r#"{ "layout": "hierarchical", "nodeSize": 8 }"#).unwrap();
		assert_eq!(config.layout, LayoutKind::Hierarchical);
		assert_eq!(config.node_size, 8.0);
		assert_eq!(config.iterations, 100);
		assert!(config.show_mastery);
	}

	#[test]
	fn out_of_range_values_are_clamped() {
		let config = GraphConfig {
			iterations: -20,
			repulsion: -5.0,
			attraction: f64::NAN,
			node_size: 500.0,
			..GraphConfig::default()
		}
		.clamped();
		assert_eq!(config.iterations, 0);
		assert_eq!(config.repulsion, 0.0);
		assert_eq!(config.attraction, GraphConfig::default().attraction);
		assert_eq!(config.node_size, 50.0);
	}

	#[test]
	fn defaults_are_already_valid() {
		let config = GraphConfig::default();
		assert_eq!(config.clamped(), config);
		assert_eq!(config.iteration_count(), 100);
	}
}
