//! Zoom and pan, independent of any graph.

use serde::{Deserialize, Serialize};

use super::types::Position;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;

/// Screen-space translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
	pub x: f64,
	pub y: f64,
}

/// Stateless zoom and pan steps.
pub struct ViewportController;

impl ViewportController {
	/// `current + delta`, kept within `[MIN_ZOOM, MAX_ZOOM]`.
	pub fn zoom(current: f64, delta: f64) -> f64 {
		let level = current + delta;
		if level.is_nan() {
			return current.clamp(MIN_ZOOM, MAX_ZOOM);
		}
		level.clamp(MIN_ZOOM, MAX_ZOOM)
	}

	/// Offset moved by `(dx, dy)`. Not clamped.
	pub fn pan(current: Offset, dx: f64, dy: f64) -> Offset {
		Offset {
			x: current.x + dx,
			y: current.y + dy,
		}
	}
}

/// Model-to-screen transform: `screen = model * zoom + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
	pub offset: Offset,
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			offset: Offset::default(),
			zoom: 1.0,
		}
	}
}

impl Viewport {
	pub fn to_screen(&self, p: Position) -> (f64, f64) {
		(p.x * self.zoom + self.offset.x, p.y * self.zoom + self.offset.y)
	}

	pub fn to_model(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.offset.x) / self.zoom,
			(sy - self.offset.y) / self.zoom,
		)
	}

	pub fn panned(&self, dx: f64, dy: f64) -> Self {
		Self {
			offset: ViewportController::pan(self.offset, dx, dy),
			zoom: self.zoom,
		}
	}

	/// Zoom by `delta` while keeping the model point under screen point
	/// `(fx, fy)` in place.
	pub fn zoomed_at(&self, fx: f64, fy: f64, delta: f64) -> Self {
		let zoom = ViewportController::zoom(self.zoom, delta);
		let ratio = zoom / self.zoom;
		Self {
			offset: Offset {
				x: fx - (fx - self.offset.x) * ratio,
				y: fy - (fy - self.offset.y) * ratio,
			},
			zoom,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zoom_is_clamped() {
		assert_eq!(ViewportController::zoom(1.0, -10.0), 0.5);
		assert_eq!(ViewportController::zoom(1.0, 10.0), 3.0);
		assert_eq!(ViewportController::zoom(1.0, 0.25), 1.25);
	}

	#[test]
	fn pan_accumulates() {
		let offset = ViewportController::pan(Offset::default(), 1e6, -3.0);
		let offset = ViewportController::pan(offset, 1e6, -3.0);
		assert_eq!(offset, Offset { x: 2e6, y: -6.0 });
	}

	#[test]
	fn zoom_keeps_focus_fixed() {
		let view = Viewport {
			offset: Offset { x: 400.0, y: 300.0 },
			zoom: 1.0,
		};
		let before = view.to_model(120.0, 80.0);
		let after = view.zoomed_at(120.0, 80.0, 0.5).to_model(120.0, 80.0);
		assert!(before.distance(&after) < 1e-9);
	}

	#[test]
	fn screen_and_model_round_trip() {
		let view = Viewport::default().panned(10.0, 20.0).zoomed_at(0.0, 0.0, 1.0);
		let p = Position::new(3.0, -4.0);
		let (sx, sy) = view.to_screen(p);
		assert!(view.to_model(sx, sy).distance(&p) < 1e-9);
	}
}
