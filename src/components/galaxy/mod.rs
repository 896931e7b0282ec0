//! Force-directed "skill galaxy" canvas.

mod component;
mod layout;
mod palette;
mod render;
mod state;
mod transform;
mod types;

pub use component::GalaxyCanvas;
pub use layout::{ForceLayout, LayoutParams, SimNode};
pub use palette::category_color;
pub use state::{GalaxyState, Particle};
pub use transform::{MAX_SCALE, MIN_SCALE, PanZoom, ViewTransform};
pub use types::{GalaxyData, GalaxyLink, GalaxyNode};
