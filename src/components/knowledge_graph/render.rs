use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::KnowledgeGraphState;
use crate::engine::EdgeId;

pub fn render(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let view = &state.viewport;
	let _ = ctx.translate(view.offset.x, view.offset.y);
	let _ = ctx.scale(view.zoom, view.zoom);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.viewport.zoom;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let highlight = state.active_highlight();
	let t = highlight.map_or(0.0, |(_, t)| t);

	for (i, edge) in state.model.edges().iter().enumerate() {
		let (Some(p1), Some(p2)) = (state.position(&edge.source), state.position(&edge.target))
		else {
			continue;
		};
		let (Some(n1), Some(n2)) = (state.model.node(&edge.source), state.model.node(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = highlight.is_some_and(|(h, _)| {
			if h.highlighted_edge_keys.is_empty() {
				h.contains_node(&edge.source) && h.contains_node(&edge.target)
			} else {
				h.contains_edge(EdgeId(i))
			}
		});

		// Base values when no highlight active
		// When highlighting: highlighted edges brighten, others dim
		let line_width = state.config.edge_thickness * edge.weight.clamp(0.5, 3.0) / k;
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (r1, r2) = (state.node_radius(n1), state.node_radius(n2));
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(p1.x + ux * r1, p1.y + uy * r1);
		ctx.line_to(p2.x - ux * (r2 + arrow_size), p2.y - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", arrow_alpha));
		let (tip_x, tip_y) = (p2.x - ux * r2, p2.y - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d) {
	let highlight = state.active_highlight();
	let (t, k) = (highlight.map_or(0.0, |(_, t)| t), state.viewport.zoom);
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	// dimmed nodes first so highlighted ones draw on top
	for pass_highlighted in [false, true] {
		for node in state.model.nodes() {
			let Some(p) = state.position(&node.id) else {
				continue;
			};
			let is_highlighted = highlight.is_some_and(|(h, _)| h.contains_node(&node.id));
			if is_highlighted != pass_highlighted {
				continue;
			}
			let is_selected = highlight
				.is_some_and(|(h, _)| h.selected_node_id.as_deref() == Some(node.id.as_str()));

			let base = state.node_radius(node);
			let (alpha, radius, glow_radius) = match (highlight.is_some(), is_highlighted) {
				(false, _) => (1.0, base, 0.0),
				(true, false) => (1.0 - 0.7 * t, base * (1.0 - 0.15 * t), 0.0),
				(true, true) if is_selected => (1.0, base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t)),
				(true, true) => (1.0, base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t)),
			};

			if glow_radius > 0.0 && t > 0.01 {
				if let Ok(gradient) =
					ctx.create_radial_gradient(p.x, p.y, radius * 0.3, p.x, p.y, glow_radius)
				{
					let glow = if is_selected { 0.35 * t } else { 0.2 * t };
					let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", glow));
					let _ = gradient
						.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", glow * 0.3));
					let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
					ctx.begin_path();
					let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, 2.0 * PI);
					#[allow(deprecated)]
					ctx.set_fill_style(&gradient);
					ctx.fill();
				}
			}

			ctx.set_global_alpha(alpha);
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(state.node_color(node));
			ctx.fill();

			if state.config.show_mastery && node.properties.mastery > 0.0 {
				let start = -PI / 2.0;
				ctx.begin_path();
				let _ = ctx.arc(
					p.x,
					p.y,
					radius + 2.0 / k,
					start,
					start + 2.0 * PI * node.properties.mastery,
				);
				ctx.set_stroke_style_str("rgba(120, 255, 160, 0.9)");
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}
			ctx.set_global_alpha(1.0);

			if is_selected && t > 0.01 {
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, radius + 4.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			let label_alpha = if is_highlighted { 1.0 } else { alpha * 0.8 };
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", label_alpha));
			ctx.set_font(&font);
			let _ = ctx.fill_text(&node.label, p.x + radius + 3.0, p.y + 3.0);
		}
	}
}
