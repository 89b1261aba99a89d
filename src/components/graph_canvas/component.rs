use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{CanvasState, CLICK_SLOP};
use super::types::{CanvasGraph, Selection};

/// Interactive schema canvas: preset vertex positions, pan/zoom, click
/// selection and drag-to-move. With `interactive=false` it renders a
/// read-only preview (used on project cards).
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<CanvasGraph>,
	#[prop(optional, into)] selection: Option<Signal<Selection>>,
	/// Fired with the new selection on click: a vertex, an edge, or
	/// `Selection::None` for the background.
	#[prop(optional, into)]
	on_select: Option<Callback<Selection>>,
	/// Fired when a vertex drag ends, with the id and the final world
	/// coordinates.
	#[prop(optional, into)]
	on_vertex_moved: Option<Callback<(String, f64, f64)>>,
	/// Bump to re-center and re-fit the view.
	#[prop(optional, into)]
	center_epoch: Option<Signal<u64>>,
	#[prop(default = true)] interactive: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_init, animate_init, resize_cb_init, raf_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), raf_id.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let measure = {
			let canvas = canvas.clone();
			move || {
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
		};
		let (w, h) = measure();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(CanvasState::new(data.get_untracked(), w, h));

		let (state_resize, canvas_resize, measure_resize) =
			(state_init.clone(), canvas.clone(), measure.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = measure_resize();
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, raf_inner) =
			(state_init.clone(), animate_init.clone(), raf_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					raf_inner.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_init.set(Some(id));
			}
		}
	});

	// The canvas is remounted per card and per editor visit; stop the render
	// loop and detach the resize listener when it leaves the tree.
	let cleanup_handles = leptos::__reexports::send_wrapper::SendWrapper::new((
		animate.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	));
	on_cleanup(move || {
		let (animate_cleanup, resize_cleanup, raf_cleanup) = cleanup_handles.take();
		if let Some(id) = raf_cleanup.take() {
			let _ = web_sys::window().unwrap().cancel_animation_frame(id);
		}
		if let Some(cb) = resize_cleanup.borrow_mut().take() {
			let _ = web_sys::window()
				.unwrap()
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		// The animate closure holds an Rc to its own cell; dropping it here
		// breaks the cycle.
		*animate_cleanup.borrow_mut() = None;
	});

	// Push graph updates into the canvas without resetting pan/zoom.
	let state_data = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.set_graph(graph);
		}
	});

	if let Some(selection) = selection {
		let state_sel = state.clone();
		Effect::new(move |_| {
			let selection = selection.get();
			if let Some(ref mut s) = *state_sel.borrow_mut() {
				s.selection = selection;
			}
		});
	}

	if let Some(center_epoch) = center_epoch {
		let state_center = state.clone();
		Effect::new(move |_| {
			let epoch = center_epoch.get();
			if let Some(ref mut s) = *state_center.borrow_mut() {
				// The initial fit already happened in CanvasState::new.
				if epoch > 0 {
					s.fit();
				}
			}
		});
	}

	let cursor_pos = move |ev: &MouseEvent, canvas_ref: NodeRef<leptos::html::Canvas>| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if !interactive {
			return;
		}
		let (x, y) = cursor_pos(&ev, canvas_ref);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				let node = &s.graph.nodes[idx];
				let picked = Selection::Vertex(node.id.clone());
				s.drag.active = true;
				s.drag.node = Some(idx);
				s.drag.moved = false;
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.drag.node_start_x = node.x;
				s.drag.node_start_y = node.y;
				if let Some(cb) = on_select {
					cb.run(picked);
				}
			} else if let Some(idx) = s.edge_at_position(x, y) {
				let picked = Selection::Edge(s.graph.edges[idx].id.clone());
				if let Some(cb) = on_select {
					cb.run(picked);
				}
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
				if let Some(cb) = on_select {
					cb.run(Selection::None);
				}
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if !interactive {
			return;
		}
		let (x, y) = cursor_pos(&ev, canvas_ref);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node {
					let (dx, dy) = (x - s.drag.start_x, y - s.drag.start_y);
					if dx.hypot(dy) > CLICK_SLOP {
						s.drag.moved = true;
					}
					let nx = s.drag.node_start_x + dx / s.transform.k;
					let ny = s.drag.node_start_y + dy / s.transform.k;
					s.move_node(idx, nx, ny);
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active && s.drag.moved {
				if let Some(node) = s.drag.node.and_then(|idx| s.graph.nodes.get(idx)) {
					if let Some(cb) = on_vertex_moved {
						cb.run((node.id.clone(), node.x, node.y));
					}
				}
			}
			s.drag = Default::default();
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag = Default::default();
			s.pan.active = false;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		if !interactive {
			return;
		}
		ev.prevent_default();
		let (x, y) = cursor_pos(&ev, canvas_ref);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
