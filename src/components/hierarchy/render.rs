//! Canvas drawing for the hierarchy tree.
//!
//! Draw order: background (screen space), then edges, nodes and labels in
//! world space, so highlighted nodes land on top of the dimmed ones.

use std::f64::consts::PI;

use force_graph::Node;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::Tier;
use super::scale::{FrameMetrics, ZoomStyle};
use super::state::{HierarchyState, NodeInfo};
use super::theme::Theme;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

pub fn render(
	state: &HierarchyState,
	ctx: &CanvasRenderingContext2d,
	style: &ZoomStyle,
	theme: &Theme,
) {
	let m = FrameMetrics::new(style, state.transform.k, state.flow_time);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &m, theme);
	draw_nodes(state, ctx, &m, theme);

	ctx.restore();
}

fn draw_background(state: &HierarchyState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &HierarchyState,
	ctx: &CanvasRenderingContext2d,
	m: &FrameMetrics,
	theme: &Theme,
) {
	state.graph.visit_edges(|n1, n2, _| {
		draw_edge(state, ctx, m, theme, n1, n2);
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn node_radius(m: &FrameMetrics, node: &Node<NodeInfo>) -> f64 {
	m.node_radius * node.data.user_data.size
}

fn draw_edge(
	state: &HierarchyState,
	ctx: &CanvasRenderingContext2d,
	m: &FrameMetrics,
	theme: &Theme,
	n1: &Node<NodeInfo>,
	n2: &Node<NodeInfo>,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let edge_t = smooth_step(state.highlight.edge_intensity(n1.index(), n2.index()));
	let max_t = smooth_step(state.highlight.max_intensity());
	let (alpha, width) = if edge_t > 0.01 {
		(0.7 + 0.3 * edge_t, m.edge_width * (1.0 + 0.5 * edge_t))
	} else if max_t > 0.01 {
		(0.7 - 0.4 * max_t, m.edge_width)
	} else {
		(0.7, m.edge_width)
	};

	let color = theme.edge.with_alpha(theme.edge.a * alpha);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);

	let gap = m.dash.1 * m.dash_alpha;
	if gap > 0.1 {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(m.dash.0),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(m.dash_offset);
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let (r1, r2) = (node_radius(m, n1), node_radius(m, n2));

	ctx.begin_path();
	ctx.move_to(x1 + ux * r1, y1 + uy * r1);
	ctx.line_to(
		x2 - ux * (r2 + m.arrow),
		y2 - uy * (r2 + m.arrow),
	);
	ctx.stroke();

	let arrow_alpha = alpha * m.arrow_alpha;
	if arrow_alpha > 0.05 {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&theme.edge.with_alpha(theme.edge.a * arrow_alpha).to_css());

		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * m.arrow, tip_y - uy * m.arrow);
		let (px, py) = (-uy * m.arrow * 0.5, ux * m.arrow * 0.5);

		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(
	state: &HierarchyState,
	ctx: &CanvasRenderingContext2d,
	m: &FrameMetrics,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let dimmed = max_t > 0.01;

	// Dimmed nodes first, highlighted ones on top.
	for on_top in [false, true] {
		state.graph.visit_nodes(|node| {
			let node_t = smooth_step(state.highlight.node_intensity(node.index()));
			if (node_t > 0.001) != on_top {
				return;
			}
			let dim_alpha = if dimmed { 1.0 - 0.6 * max_t } else { 1.0 };
			let alpha = dim_alpha + (1.0 - dim_alpha) * node_t;
			let radius_mult = 1.0 + 0.2 * node_t;
			draw_node(state, ctx, node, m, theme, alpha, radius_mult);
		});
	}
}

fn draw_node(
	state: &HierarchyState,
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	m: &FrameMetrics,
	theme: &Theme,
	alpha: f64,
	radius_mult: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let radius = node_radius(m, node) * radius_mult;

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &info.color.to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&info.color.to_css()),
	}
	ctx.fill();

	if state.selected == Some(node.index()) {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + m.ring_gap, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.selection_ring.to_css());
		ctx.set_line_width(m.ring_width);
		ctx.stroke();
	}

	let weight = if info.tier == Tier::Leaf { "" } else { "bold " };
	ctx.set_font(&format!("{}{}", weight, m.caption_font));
	ctx.set_text_align("center");
	ctx.set_fill_style_str(&theme.label.to_css());
	let _ = ctx.fill_text(&info.label, x, y + radius + m.caption_size + 2.0);
	ctx.set_text_align("start");

	ctx.set_global_alpha(1.0);
}
