use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent};

use super::render;
use super::state::GalaxyState;
use super::types::GalaxyData;

type SharedState = Rc<RefCell<Option<GalaxyState>>>;
type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser resources owned by one mounted canvas.
struct Teardown {
	state: SharedState,
	frame: Rc<Cell<Option<i32>>>,
	animate: Callback,
	resize: Callback,
}

impl Teardown {
	fn run(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(handle) = self.frame.take() {
				let _ = window.cancel_animation_frame(handle);
			}
			if let Some(ref cb) = *self.resize.borrow() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		// The animate closure holds a handle to itself; dropping it breaks the cycle.
		self.animate.borrow_mut().take();
		self.resize.borrow_mut().take();
		self.state.borrow_mut().take();
		info!("Galaxy canvas torn down");
	}
}

fn surface_size(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let window = web_sys::window();
		let dim = |v: Option<Result<JsValue, JsValue>>, fallback| {
			v.and_then(|r| r.ok())
				.and_then(|v| v.as_f64())
				.unwrap_or(fallback)
		};
		return (
			dim(window.as_ref().map(|w| w.inner_width()), 800.0),
			dim(window.as_ref().map(|w| w.inner_height()), 600.0),
		);
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn first_touch(ev: &TouchEvent) -> Option<(u32, f64, f64)> {
	let touches = ev.touches();
	let touch = touches.get(0)?;
	Some((
		touches.length(),
		touch.client_x() as f64,
		touch.client_y() as f64,
	))
}

/// Canvas that lays out `data` as a galaxy and lets the user pan and zoom.
///
/// Each instance owns its layout and view; unmounting cancels the pending
/// animation frame and removes the window resize listener.
#[component]
pub fn GalaxyCanvas(
	#[prop(into)] data: Signal<GalaxyData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let (state_init, frame_init, animate_init, resize_cb_init) =
		(state.clone(), frame.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = surface_size(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("2d canvas context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(GalaxyState::new(
			&data.get_untracked(),
			w,
			h,
			js_sys::Math::random,
		));
		info!("Galaxy canvas mounted at {}x{}", w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = surface_size(&canvas_resize, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, frame_inner) =
			(state_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx, js_sys::Date::now() * 0.001);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let data = data.get();
		// Mounting already laid out the data it was given.
		if let Some(ref mut s) = *state_data.borrow_mut() {
			if !s.is_showing(&data) {
				s.set_data(&data);
			}
		}
	});

	let teardown = SendWrapper::new(Teardown {
		state: state.clone(),
		frame,
		animate,
		resize: resize_cb,
	});
	on_cleanup(move || teardown.run());

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.view.begin_drag(ev.client_x() as f64, ev.client_y() as f64);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.view.drag_to(ev.client_x() as f64, ev.client_y() as f64);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.view.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.view.end_drag();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.view.wheel(ev.delta_y());
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		if let (Some(s), Some((count, x, y))) = (&mut *state_ts.borrow_mut(), first_touch(&ev)) {
			s.view.touch_start(count, x, y);
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		if let (Some(s), Some((count, x, y))) = (&mut *state_tm.borrow_mut(), first_touch(&ev)) {
			s.view.touch_move(count, x, y);
		}
	};

	let state_te = state.clone();
	let on_touchend = move |_: TouchEvent| {
		if let Some(ref mut s) = *state_te.borrow_mut() {
			s.view.end_drag();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="galaxy-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block; cursor: grab;"
		/>
	}
}
