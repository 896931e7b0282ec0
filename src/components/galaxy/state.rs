use super::layout::{ForceLayout, LayoutParams};
use super::transform::PanZoom;
use super::types::GalaxyData;

pub const PARTICLE_COUNT: usize = 100;

/// A decorative background star.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub alpha: f64,
	pub twinkle_speed: f64,
}

impl Particle {
	/// Opacity at `time` seconds.
	pub fn alpha_at(&self, time: f64) -> f64 {
		self.alpha * (0.5 + 0.5 * (time * self.twinkle_speed).sin())
	}
}

/// Everything one galaxy canvas owns between frames.
pub struct GalaxyState {
	pub layout: ForceLayout,
	pub view: PanZoom,
	pub particles: Vec<Particle>,
	pub width: f64,
	pub height: f64,
	source: GalaxyData,
}

impl GalaxyState {
	/// `random` must yield values in `[0, 1)`.
	pub fn new(data: &GalaxyData, width: f64, height: f64, mut random: impl FnMut() -> f64) -> Self {
		let particles = (0..PARTICLE_COUNT)
			.map(|_| Particle {
				x: random() * width,
				y: random() * height,
				size: random() * 2.0,
				alpha: random() * 0.5 + 0.2,
				twinkle_speed: random() * 0.02,
			})
			.collect();

		let mut state = Self {
			layout: ForceLayout::new(LayoutParams::default()),
			view: PanZoom::default(),
			particles,
			width,
			height,
			source: GalaxyData::default(),
		};
		state.set_data(data);
		state
	}

	/// Replace the graph and re-run the layout from fresh seed positions.
	pub fn set_data(&mut self, data: &GalaxyData) {
		self.layout.set_data(data, self.width, self.height);
		self.source = data.clone();
	}

	/// Whether the current layout was built from `data`.
	pub fn is_showing(&self, data: &GalaxyData) -> bool {
		self.source == *data
	}

	/// The layout is kept; only later `set_data` calls use the new centre.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
