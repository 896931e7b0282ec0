use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::SimNode;
use super::palette::{category_color, with_alpha};
use super::state::GalaxyState;

/// Draw one frame. `time` is in seconds and only drives the twinkle.
pub fn render(state: &GalaxyState, ctx: &CanvasRenderingContext2d, time: f64) {
	let view = state.view.transform;
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(view.offset_x, view.offset_y);
	let _ = ctx.scale(view.scale, view.scale);
	draw_particles(state, ctx, time);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_particles(state: &GalaxyState, ctx: &CanvasRenderingContext2d, time: f64) {
	// Stars are offset against the pan so they read as a distant backdrop.
	let view = state.view.transform;
	for p in &state.particles {
		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", p.alpha_at(time)));
		ctx.begin_path();
		let _ = ctx.arc(p.x - view.offset_x, p.y - view.offset_y, p.size, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_links(state: &GalaxyState, ctx: &CanvasRenderingContext2d) {
	for (source, target) in state.layout.resolved_links() {
		let gradient = ctx.create_linear_gradient(source.x, source.y, target.x, target.y);
		let _ = gradient.add_color_stop(0.0, &with_alpha(category_color(&source.category), "80"));
		let _ = gradient.add_color_stop(1.0, &with_alpha(category_color(&target.category), "80"));

		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.set_line_width(2.0);
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();

		// glow
		ctx.set_line_width(4.0);
		ctx.set_global_alpha(0.2);
		ctx.stroke();
		ctx.set_global_alpha(1.0);
	}
}

fn draw_nodes(state: &GalaxyState, ctx: &CanvasRenderingContext2d) {
	for node in state.layout.nodes() {
		let color = category_color(&node.category);
		draw_halo(ctx, node, color);

		ctx.set_fill_style_str(color);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.fill();

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius * 0.4, 0.0, 2.0 * PI);
		ctx.fill();

		ctx.set_fill_style_str("#f1f5f9");
		ctx.set_font("bold 12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_shadow_color("rgba(0, 0, 0, 0.8)");
		ctx.set_shadow_blur(4.0);
		let _ = ctx.fill_text(&node.name, node.x, node.y + node.radius + 8.0);
		ctx.set_shadow_blur(0.0);
	}
}

fn draw_halo(ctx: &CanvasRenderingContext2d, node: &SimNode, color: &str) {
	let glow_radius = node.radius * 3.0;
	let Ok(gradient) = ctx.create_radial_gradient(node.x, node.y, 0.0, node.x, node.y, glow_radius)
	else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &with_alpha(color, "60"));
	let _ = gradient.add_color_stop(1.0, "transparent");

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, glow_radius, 0.0, 2.0 * PI);
	ctx.fill();
}
