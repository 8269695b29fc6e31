//! Leptos component wrapping the hierarchy canvas.
//!
//! One effect owns the canvas: on first run it creates the drawing context and
//! starts the `requestAnimationFrame` loop, and on every data change it swaps
//! in freshly laid-out state. Mouse handlers pan, zoom, hover and select.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::layout;
use super::render;
use super::scale::ZoomStyle;
use super::state::HierarchyState;
use super::theme::Theme;
use crate::model::{HierarchyData, SelectionEvent};

const DEFAULT_WIDTH: f64 = 800.0;
const CANVAS_HEIGHT: f64 = 520.0;
const FRAME_DT: f32 = 0.016;

struct CanvasContext {
	state: HierarchyState,
	ctx: CanvasRenderingContext2d,
	style: ZoomStyle,
	theme: Theme,
}

type Shared = Rc<RefCell<Option<CanvasContext>>>;

fn parent_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(DEFAULT_WIDTH)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Renders a [`HierarchyData`] payload as a root → branch → leaf tree.
///
/// Clicking a node (press and release without dragging) emits its
/// [`SelectionEvent`]; dragging pans and the wheel zooms.
#[component]
pub fn HierarchyTree(
	#[prop(into)] data: Signal<HierarchyData>,
	on_select: Callback<SelectionEvent>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Shared = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let (context_init, animate_init) = (context.clone(), animate.clone());
	Effect::new(move |_| {
		let tree = layout(&data.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;

		{
			let mut slot = context_init.borrow_mut();
			match slot.as_mut() {
				Some(c) => {
					c.state = HierarchyState::new(&tree, c.state.width, c.state.height, &c.theme);
				}
				None => {
					let w = parent_width(&canvas);
					canvas.set_width(w as u32);
					canvas.set_height(CANVAS_HEIGHT as u32);
					let ctx = match canvas.get_context("2d") {
						Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
						_ => None,
					};
					let Some(ctx) = ctx else {
						warn!("concept-map: 2d canvas context unavailable");
						return;
					};
					let theme = Theme::default();
					*slot = Some(CanvasContext {
						state: HierarchyState::new(&tree, w, CANVAS_HEIGHT, &theme),
						ctx,
						style: ZoomStyle::default(),
						theme,
					});
				}
			}
		}
		debug!("concept-map: hierarchy laid out with {} nodes", tree.nodes.len());

		if animate_init.borrow().is_some() {
			return;
		}
		let (context_anim, animate_inner, alive_anim) =
			(context_init.clone(), animate_init.clone(), alive.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let w = parent_width(&canvas);
				if (w - c.state.width).abs() >= 1.0 {
					canvas.set_width(w as u32);
					c.state.resize(w, c.state.height);
				}
				c.state.tick(FRAME_DT);
				render::render(&c.state, &c.ctx, &c.style, &c.theme);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(window), Some(cb)) = (web_sys::window(), animate_init.borrow().as_ref()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.begin_press(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let over_node = match *context_mm.borrow_mut() {
			Some(ref mut c) => {
				c.state.drag_to(x, y);
				let hovered = if c.state.press.moved {
					None
				} else {
					c.state.node_at_position(x, y, &c.style)
				};
				c.state.set_hover(hovered);
				hovered.is_some()
			}
			None => false,
		};
		set_cursor(canvas_ref, if over_node { "pointer" } else { "grab" });
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let event = match *context_mu.borrow_mut() {
			Some(ref mut c) => c
				.state
				.end_press(&c.style)
				.and_then(|idx| c.state.select(idx)),
			None => None,
		};
		if let Some(event) = event {
			on_select.run(event);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.press.active = false;
			c.state.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<div class="hierarchy-tree">
			<canvas
				node_ref=canvas_ref
				class="hierarchy-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
