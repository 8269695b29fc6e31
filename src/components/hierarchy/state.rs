//! Canvas state for the hierarchy tree.
//!
//! Nodes live in a `force_graph` simulation but are all anchored at their grid
//! positions, so ticking only advances animation clocks. The state also keeps
//! the pan/zoom transform, the hover glow and the current selection.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::layout::{Tier, TreeLayout};
use super::scale::ZoomStyle;
use super::theme::{Color, Theme};
use crate::model::SelectionEvent;

/// Display data attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub tier: Tier,
	pub color: Color,
	/// Radius multiplier per tier.
	pub size: f64,
	pub selection: SelectionEvent,
}

fn tier_size(tier: Tier) -> f64 {
	match tier {
		Tier::Root => 1.6,
		Tier::Branch => 1.25,
		Tier::Leaf => 0.9,
	}
}

/// Pan and zoom transform applied to the whole tree.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to `MIN_ZOOM..MAX_ZOOM`.
	pub k: f64,
}

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Pointer movement (screen px) beyond which a press becomes a pan.
pub const CLICK_SLOP: f64 = 4.0;

/// A pointer press that may still turn into a pan or a click.
#[derive(Clone, Debug, Default)]
pub struct Press {
	pub active: bool,
	pub moved: bool,
	/// Screen point where the press started.
	pub origin: (f64, f64),
	/// Transform offset at the time of the press.
	pub anchor: (f64, f64),
}

const GLOW_RISE: f64 = 6.0;
const GLOW_DECAY: f64 = 4.0;
const GLOW_CUTOFF: f64 = 0.005;

/// Hover glow along a node's lineage.
///
/// Hovering lights the node, every ancestor up to the root and its direct
/// children. Lit nodes rise towards 1.0 and unlit ones decay towards 0.0.
#[derive(Clone, Debug, Default)]
pub struct LineageGlow {
	pub hovered: Option<DefaultNodeIdx>,
	parent: HashMap<DefaultNodeIdx, DefaultNodeIdx>,
	children: HashMap<DefaultNodeIdx, Vec<DefaultNodeIdx>>,
	lit: HashSet<DefaultNodeIdx>,
	glow: HashMap<DefaultNodeIdx, f64>,
	peak: f64,
}

impl LineageGlow {
	fn new(edges: &[(DefaultNodeIdx, DefaultNodeIdx)]) -> Self {
		let mut glow = Self::default();
		for &(parent, child) in edges {
			glow.parent.insert(child, parent);
			glow.children.entry(parent).or_default().push(child);
		}
		glow
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		self.lit.clear();
		let Some(idx) = node else {
			return;
		};
		let mut cursor = Some(idx);
		while let Some(current) = cursor {
			if !self.lit.insert(current) {
				break;
			}
			cursor = self.parent.get(&current).copied();
		}
		if let Some(children) = self.children.get(&idx) {
			self.lit.extend(children.iter().copied());
		}
	}

	pub fn tick(&mut self, dt: f64) {
		let rise = 1.0 - (-GLOW_RISE * dt).exp();
		let decay = (-GLOW_DECAY * dt).exp();

		for &idx in &self.lit {
			let g = self.glow.entry(idx).or_insert(0.0);
			*g += (1.0 - *g) * rise;
		}
		let lit = &self.lit;
		let mut peak: f64 = 0.0;
		self.glow.retain(|idx, g| {
			if !lit.contains(idx) {
				*g *= decay;
			}
			peak = peak.max(*g);
			*g > GLOW_CUTOFF
		});
		self.peak = peak;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.glow.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of both endpoints, so an edge glows only when both do.
	pub fn edge_intensity(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.peak
	}
}

/// Everything the animation loop and event handlers share.
pub struct HierarchyState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub press: Press,
	pub highlight: LineageGlow,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl HierarchyState {
	pub fn new(tree: &TreeLayout, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let indices: Vec<DefaultNodeIdx> = tree
			.nodes
			.iter()
			.map(|node| {
				let branch_color = node.branch.map(|b| {
					node.color
						.as_deref()
						.and_then(Color::parse)
						.unwrap_or_else(|| theme.palette.get(b))
				});
				let color = match (node.tier, branch_color) {
					(Tier::Leaf, Some(c)) => c.lighten(theme.leaf_lighten),
					(_, Some(c)) => c,
					(_, None) => theme.root,
				};
				graph.add_node(NodeData {
					x: node.x as f32,
					y: node.y as f32,
					mass: 10.0,
					is_anchor: true,
					user_data: NodeInfo {
						label: node.label.clone(),
						tier: node.tier,
						color,
						size: tier_size(node.tier),
						selection: node.selection.clone(),
					},
				})
			})
			.collect();

		let edges: Vec<_> = tree
			.edges
			.iter()
			.map(|&(parent, child)| (indices[parent], indices[child]))
			.collect();
		for &(parent, child) in &edges {
			graph.add_edge(parent, child, EdgeData::default());
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			press: Press::default(),
			highlight: LineageGlow::new(&edges),
			selected: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		style: &ZoomStyle,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let hit = style.hit_radius * node.data.user_data.size;
			if (node.x() as f64 - gx).hypot(node.y() as f64 - gy) < hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node);
	}

	/// Marks `idx` selected and returns its selection event.
	pub fn select(&mut self, idx: DefaultNodeIdx) -> Option<SelectionEvent> {
		let mut event = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				event = Some(node.data.user_data.selection.clone());
			}
		});
		if event.is_some() {
			self.selected = Some(idx);
		}
		event
	}

	/// Zooms by `factor` around screen point `(x, y)`.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn begin_press(&mut self, x: f64, y: f64) {
		self.press = Press {
			active: true,
			moved: false,
			origin: (x, y),
			anchor: (self.transform.x, self.transform.y),
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.press.active {
			return;
		}
		let (dx, dy) = (x - self.press.origin.0, y - self.press.origin.1);
		if !self.press.moved && dx.hypot(dy) > CLICK_SLOP {
			self.press.moved = true;
		}
		if self.press.moved {
			self.transform.x = self.press.anchor.0 + dx;
			self.transform.y = self.press.anchor.1 + dy;
		}
	}

	/// Ends a press; returns the pressed node if it was a click, not a pan.
	pub fn end_press(&mut self, style: &ZoomStyle) -> Option<DefaultNodeIdx> {
		let was_click = self.press.active && !self.press.moved;
		self.press.active = false;
		let (x, y) = self.press.origin;
		was_click.then(|| self.node_at_position(x, y, style)).flatten()
	}

	/// Advances animation clocks. Every node is anchored, so positions hold.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
