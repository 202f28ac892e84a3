use log::info;

use crate::engine::layout::{self, PositionMap};
use crate::engine::{
	GraphConfig, GraphModel, HighlightState, Node, NodeType, Offset, PathFinder, Position, Viewport,
};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const HIT_RADIUS: f64 = 12.0;

pub fn type_color(node_type: NodeType) -> &'static str {
	match node_type {
		NodeType::Prerequisite => COLORS[3],
		NodeType::Concept => COLORS[0],
		NodeType::Skill => COLORS[2],
		NodeType::Topic => COLORS[4],
		NodeType::Outcome => COLORS[1],
		NodeType::Unknown => COLORS[7],
	}
}

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<String>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub viewport_start: Viewport,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<String>,
	pub current: HighlightState,
	pub prev: HighlightState,
	pub highlight_t: f64,
	delay_t: f64,
}

/// Render-side state: the loaded model plus this view's own copy of the
/// positions, which dragging may edit.
pub struct KnowledgeGraphState {
	pub model: GraphModel,
	pub config: GraphConfig,
	pub positions: PositionMap,
	pub viewport: Viewport,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	/// Click selection or learning path, kept until cleared.
	pub pinned: Option<HighlightState>,
	pub search: HighlightState,
	search_query: String,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	seed: u64,
}

impl KnowledgeGraphState {
	pub fn new(model: GraphModel, config: GraphConfig, seed: u64, width: f64, height: f64) -> Self {
		let config = config.clamped();
		let positions = layout::compute(&model, &config, seed);
		let mut state = Self {
			model,
			config,
			positions,
			viewport: Viewport::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			pinned: None,
			search: HighlightState::default(),
			search_query: String::new(),
			width,
			height,
			flow_time: 0.0,
			seed,
		};
		state.center_view();
		state
	}

	/// Swap in a new snapshot. Selections that referred to the old one go;
	/// the search query is matched again against the new labels.
	pub fn reload(&mut self, model: GraphModel) {
		self.model = model;
		self.pinned = None;
		self.hover = HoverState::default();
		self.relayout();
		let query = std::mem::take(&mut self.search_query);
		self.set_search(&query);
	}

	pub fn set_config(&mut self, config: GraphConfig) {
		let config = config.clamped();
		let relayout = config.layout != self.config.layout
			|| config.iterations != self.config.iterations
			|| config.repulsion != self.config.repulsion
			|| config.attraction != self.config.attraction
			|| config.geometry != self.config.geometry;
		self.config = config;
		if relayout {
			self.relayout();
		}
	}

	fn relayout(&mut self) {
		self.positions = layout::compute(&self.model, &self.config, self.seed);
		self.center_view();
	}

	fn center_view(&mut self) {
		let (cx, cy) = self.config.geometry.center();
		self.viewport = Viewport {
			offset: Offset {
				x: self.width / 2.0 - cx,
				y: self.height / 2.0 - cy,
			},
			zoom: 1.0,
		};
	}

	pub fn position(&self, id: &str) -> Option<Position> {
		self.positions.get(id).copied()
	}

	pub fn node_radius(&self, node: &Node) -> f64 {
		self.config.node_size * (0.75 + 0.5 * node.properties.importance)
	}

	pub fn node_color(&self, node: &Node) -> &'static str {
		if self.config.color_by_type {
			type_color(node.node_type)
		} else {
			COLORS[0]
		}
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let p = self.viewport.to_model(sx, sy);
		let mut found = None;
		for node in self.model.nodes() {
			let Some(pos) = self.position(&node.id) else {
				continue;
			};
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if pos.distance(&p) < HIT_RADIUS.max(self.node_radius(node)) {
				found = Some(node.id.clone());
			}
		}
		found
	}

	pub fn set_hover(&mut self, node: Option<String>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev = std::mem::take(&mut self.hover.current);
		} else {
			self.hover.prev.clear();
		}

		self.hover.current = match &node {
			Some(id) => {
				if !was_hovering {
					self.hover.delay_t = 0.0;
				}
				HighlightState::from_selection(&self.model, id)
			}
			None => HighlightState::default(),
		};
		self.hover.node = node;
	}

	/// Click on a node. With `extend` and a pinned node, shows the learning
	/// path from the pinned node to `id` instead.
	pub fn click_node(&mut self, id: &str, extend: bool) {
		let from = self
			.pinned
			.as_ref()
			.and_then(|p| p.selected_node_id.clone());
		self.pinned = match from {
			Some(from) if extend => match PathFinder::find(&self.model, &from, id) {
				Some(path) => Some(HighlightState::from_path(&path)),
				None => {
					info!("no learning path from {} to {}", from, id);
					None
				}
			},
			_ => Some(HighlightState::from_selection(&self.model, id)),
		};
	}

	pub fn clear_pinned(&mut self) {
		self.pinned = None;
	}

	pub fn set_search(&mut self, query: &str) {
		self.search = HighlightState::from_search(&self.model, query);
		self.search_query = query.to_string();
	}

	/// The highlight to draw and its strength in `[0, 1]`.
	pub fn active_highlight(&self) -> Option<(&HighlightState, f64)> {
		let fading = ease_out_cubic(self.hover.highlight_t);
		if !self.hover.current.is_empty() {
			Some((&self.hover.current, fading))
		} else if let Some(pinned) = &self.pinned {
			Some((pinned, 1.0))
		} else if !self.search.is_empty() {
			Some((&self.search, 1.0))
		} else if !self.hover.prev.is_empty() {
			Some((&self.hover.prev, fading))
		} else {
			None
		}
	}

	pub fn move_node(&mut self, id: &str, to: Position) {
		if let Some(pos) = self.positions.get_mut(id) {
			*pos = to;
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{Edge, Relationship};

	fn state() -> KnowledgeGraphState {
		let model = GraphModel::load(
			vec![
				Node::new("a", "Algebra", NodeType::Concept),
				Node::new("b", "Graphing", NodeType::Skill),
				Node::new("c", "Calculus", NodeType::Topic),
			],
			vec![
				Edge::new("a", "b", Relationship::Prerequisite),
				Edge::new("b", "c", Relationship::LeadsTo),
			],
		)
		.unwrap();
		let config = GraphConfig {
			layout: crate::engine::LayoutKind::Circular,
			..GraphConfig::default()
		};
		KnowledgeGraphState::new(model, config, 1, 800.0, 600.0)
	}

	#[test]
	fn hit_test_goes_through_viewport() {
		let s = state();
		let (sx, sy) = s.viewport.to_screen(s.position("b").unwrap());
		assert_eq!(s.node_at_position(sx, sy).as_deref(), Some("b"));
		assert_eq!(s.node_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn hover_then_fade_out() {
		let mut s = state();
		s.set_hover(Some("a".into()));
		let (h, _) = s.active_highlight().unwrap();
		assert!(h.contains_node("b"));
		assert!(!h.contains_node("c"));

		s.set_hover(None);
		assert!(s.hover.current.is_empty());
		assert!(s.hover.prev.contains_node("a"));
		for _ in 0..1000 {
			s.tick(0.016);
		}
		assert!(s.active_highlight().is_none());
	}

	#[test]
	fn shift_click_shows_path() {
		let mut s = state();
		s.click_node("a", false);
		s.click_node("c", true);
		let pinned = s.pinned.as_ref().unwrap();
		assert_eq!(pinned.highlighted_node_ids.len(), 3);

		s.click_node("c", false);
		s.click_node("a", true);
		assert!(s.pinned.is_none());
	}

	#[test]
	fn search_survives_reload() {
		let mut s = state();
		s.set_search("calc");
		assert!(s.search.contains_node("c"));

		let next = GraphModel::load(
			vec![
				Node::new("c", "Calculus", NodeType::Topic),
				Node::new("d", "Vector calculus", NodeType::Outcome),
				Node::new("e", "Geometry", NodeType::Concept),
			],
			vec![Edge::new("c", "d", Relationship::LeadsTo)],
		)
		.unwrap();
		s.reload(next);

		assert!(s.search.contains_node("c"));
		assert!(s.search.contains_node("d"));
		assert!(!s.search.contains_node("e"));
		let (h, _) = s.active_highlight().unwrap();
		assert!(h.contains_node("d"));

		s.set_search("");
		let same = s.model.clone();
		s.reload(same);
		assert!(s.search.is_empty());
	}

	#[test]
	fn dragging_leaves_model_alone() {
		let mut s = state();
		let before = s.model.clone();
		s.move_node("a", Position::new(1.0, 2.0));
		assert_eq!(s.position("a"), Some(Position::new(1.0, 2.0)));
		assert_eq!(s.model, before);
	}
}
