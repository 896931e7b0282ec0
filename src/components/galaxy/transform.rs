pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.0;
pub const ZOOM_OUT: f64 = 0.9;
pub const ZOOM_IN: f64 = 1.1;

/// Pan offset (screen space) and zoom applied when drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub offset_x: f64,
	pub offset_y: f64,
	pub scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			offset_x: 0.0,
			offset_y: 0.0,
			scale: 1.0,
		}
	}
}

/// Pointer driven pan/zoom over a [`ViewTransform`].
#[derive(Clone, Debug, Default)]
pub struct PanZoom {
	pub transform: ViewTransform,
	dragging: bool,
	last_x: f64,
	last_y: f64,
}

impl PanZoom {
	pub fn is_dragging(&self) -> bool {
		self.dragging
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.dragging = true;
		self.last_x = x;
		self.last_y = y;
	}

	/// Pan by the pointer delta since the last event; ignored unless dragging.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.dragging {
			return;
		}
		self.transform.offset_x += x - self.last_x;
		self.transform.offset_y += y - self.last_y;
		self.last_x = x;
		self.last_y = y;
	}

	pub fn end_drag(&mut self) {
		self.dragging = false;
	}

	/// Only single-finger gestures pan.
	pub fn touch_start(&mut self, touches: u32, x: f64, y: f64) {
		if touches == 1 {
			self.begin_drag(x, y);
		}
	}

	pub fn touch_move(&mut self, touches: u32, x: f64, y: f64) {
		if touches == 1 {
			self.drag_to(x, y);
		}
	}

	/// Positive `delta_y` (scrolling down) zooms out.
	pub fn wheel(&mut self, delta_y: f64) {
		let factor = if delta_y > 0.0 { ZOOM_OUT } else { ZOOM_IN };
		self.transform.scale = (self.transform.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drag_accumulates_screen_deltas() {
		let mut pz = PanZoom::default();
		pz.transform.scale = 2.0;
		pz.begin_drag(10.0, 10.0);
		pz.drag_to(15.0, 20.0);
		pz.drag_to(5.0, 25.0);
		pz.end_drag();

		assert_eq!(pz.transform.offset_x, -5.0);
		assert_eq!(pz.transform.offset_y, 15.0);
		assert!(!pz.is_dragging());
	}

	#[test]
	fn moving_without_drag_does_nothing() {
		let mut pz = PanZoom::default();
		pz.drag_to(100.0, 100.0);
		pz.begin_drag(0.0, 0.0);
		pz.end_drag();
		pz.drag_to(50.0, 50.0);
		assert_eq!(pz.transform, ViewTransform::default());
	}

	#[test]
	fn multi_touch_is_ignored() {
		let mut pz = PanZoom::default();
		pz.touch_start(2, 0.0, 0.0);
		assert!(!pz.is_dragging());

		pz.touch_start(1, 0.0, 0.0);
		pz.touch_move(2, 40.0, 40.0);
		pz.touch_move(1, 10.0, -5.0);
		assert_eq!((pz.transform.offset_x, pz.transform.offset_y), (10.0, -5.0));
	}

	#[test]
	fn zoom_clamps_to_bounds() {
		let mut pz = PanZoom::default();
		for _ in 0..20 {
			pz.wheel(1.0);
		}
		assert_eq!(pz.transform.scale, MIN_SCALE);
		for _ in 0..20 {
			pz.wheel(-1.0);
		}
		assert_eq!(pz.transform.scale, MAX_SCALE);
	}

	#[test]
	fn zoom_out_then_in_returns_unless_clamped() {
		let mut pz = PanZoom::default();
		for _ in 0..3 {
			pz.wheel(1.0);
		}
		for _ in 0..3 {
			pz.wheel(-1.0);
		}
		// 0.9^3 * 1.1^3 ~= 0.97, not exactly 1: the factors are not inverses
		let expected = (ZOOM_OUT * ZOOM_IN).powi(3);
		assert!((pz.transform.scale - expected).abs() < 1e-12);

		let mut pz = PanZoom::default();
		for _ in 0..10 {
			pz.wheel(1.0);
		}
		let after_clamp = pz.transform.scale;
		assert_eq!(after_clamp, MIN_SCALE);
		for _ in 0..10 {
			pz.wheel(-1.0);
		}
		assert!(pz.transform.scale > 1.0);
	}
}
