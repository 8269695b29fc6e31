//! Fixed grid placement for the three-tier tree.
//!
//! Root on the top row, branches evenly spaced on the middle row, and each
//! branch's leaves evenly spaced beneath it, centered under their branch.
//! Coordinates are in graph space with the origin at the middle row's center.

use std::collections::HashSet;

use crate::diagnostics::{self, DropKind};
use crate::model::{HierarchyBranch, HierarchyData, SelectionEvent};

/// Vertical distance between rows.
pub const ROW_SPACING: f64 = 150.0;
/// Minimum horizontal distance between neighbouring branches.
pub const BRANCH_SPACING: f64 = 240.0;
/// Horizontal distance between sibling leaves.
pub const LEAF_SPACING: f64 = 120.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tier {
	#[default]
	Root,
	Branch,
	Leaf,
}

/// A placed node.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub id: String,
	pub label: String,
	pub tier: Tier,
	pub x: f64,
	pub y: f64,
	/// Which branch the node belongs to (`None` for the root).
	pub branch: Option<usize>,
	/// Explicit color from the data, if any.
	pub color: Option<String>,
	pub selection: SelectionEvent,
}

/// Placed nodes and `(parent, child)` edges as indices into `nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
	pub nodes: Vec<LayoutNode>,
	pub edges: Vec<(usize, usize)>,
}

/// Offset of slot `i` among `n` evenly spaced slots centered on zero.
fn centered(i: usize, n: usize, spacing: f64) -> f64 {
	(i as f64 - (n as f64 - 1.0) / 2.0) * spacing
}

/// Lays out `data`, skipping any branch or leaf whose id was already used.
pub fn layout(data: &HierarchyData) -> TreeLayout {
	let mut seen: HashSet<&str> = HashSet::new();
	seen.insert(data.root.id.as_str());

	let mut kept: Vec<(&HierarchyBranch, Vec<usize>)> = Vec::new();
	for branch in &data.branches {
		if !seen.insert(branch.id.as_str()) {
			diagnostics::record(DropKind::DuplicateHierarchyId, &branch.id);
			continue;
		}
		let leaves = branch
			.leaves
			.iter()
			.enumerate()
			.filter_map(|(i, leaf)| {
				if seen.insert(leaf.id.as_str()) {
					Some(i)
				} else {
					diagnostics::record(DropKind::DuplicateHierarchyId, &leaf.id);
					None
				}
			})
			.collect();
		kept.push((branch, leaves));
	}

	// Widen branch spacing so sibling leaf groups never overlap.
	let widest = kept.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
	let branch_spacing = BRANCH_SPACING.max(widest as f64 * LEAF_SPACING);

	let root = &data.root;
	let mut tree = TreeLayout::default();
	tree.nodes.push(LayoutNode {
		id: root.id.clone(),
		label: root.label.clone(),
		tier: Tier::Root,
		x: 0.0,
		y: -ROW_SPACING,
		branch: None,
		color: None,
		selection: SelectionEvent::from_labelled(
			&root.label,
			root.description.as_deref(),
			root.info.as_ref(),
		),
	});

	for (b, (branch, leaves)) in kept.iter().enumerate() {
		let bx = centered(b, kept.len(), branch_spacing);
		let branch_idx = tree.nodes.len();
		tree.nodes.push(LayoutNode {
			id: branch.id.clone(),
			label: branch.label.clone(),
			tier: Tier::Branch,
			x: bx,
			y: 0.0,
			branch: Some(b),
			color: branch.color.clone(),
			selection: SelectionEvent::from_labelled(
				&branch.label,
				branch.description.as_deref(),
				branch.info.as_ref(),
			),
		});
		tree.edges.push((0, branch_idx));

		for (slot, &leaf_idx) in leaves.iter().enumerate() {
			let leaf = &branch.leaves[leaf_idx];
			let idx = tree.nodes.len();
			tree.nodes.push(LayoutNode {
				id: leaf.id.clone(),
				label: leaf.label.clone(),
				tier: Tier::Leaf,
				x: bx + centered(slot, leaves.len(), LEAF_SPACING),
				y: ROW_SPACING,
				branch: Some(b),
				color: branch.color.clone(),
				selection: SelectionEvent::from_labelled(
					&leaf.label,
					leaf.description.as_deref(),
					leaf.info.as_ref(),
				),
			});
			tree.edges.push((branch_idx, idx));
		}
	}

	tree
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn data(value: serde_json::Value) -> HierarchyData {
		serde_json::from_value(value).unwrap()
	}

	fn sample() -> HierarchyData {
		data(json!({
			"root": {"id": "gov", "label": "Government"},
			"branches": [
				{"id": "leg", "label": "Legislature", "leaves": [
					{"id": "ls", "label": "Lok Sabha"},
					{"id": "rs", "label": "Rajya Sabha"}
				]},
				{"id": "exe", "label": "Executive", "leaves": [
					{"id": "pm", "label": "Prime Minister"}
				]},
				{"id": "jud", "label": "Judiciary"}
			]
		}))
	}

	#[test]
	fn rows_and_centering() {
		let tree = layout(&sample());
		let find = |id: &str| tree.nodes.iter().find(|n| n.id == id).unwrap();

		let root = find("gov");
		assert_eq!((root.x, root.y), (0.0, -ROW_SPACING));

		let (leg, exe, jud) = (find("leg"), find("exe"), find("jud"));
		assert_eq!(leg.y, 0.0);
		assert_eq!(exe.x, 0.0);
		assert_eq!(leg.x, -jud.x);
		assert_eq!(jud.x - exe.x, exe.x - leg.x);

		let (ls, rs) = (find("ls"), find("rs"));
		assert_eq!(ls.y, ROW_SPACING);
		assert_eq!((ls.x + rs.x) / 2.0, leg.x);
		assert_eq!(rs.x - ls.x, LEAF_SPACING);
		assert_eq!(find("pm").x, exe.x);
	}

	#[test]
	fn edges_connect_root_branches_and_leaves() {
		let tree = layout(&sample());
		let named: Vec<(&str, &str)> = tree
			.edges
			.iter()
			.map(|&(a, b)| (tree.nodes[a].id.as_str(), tree.nodes[b].id.as_str()))
			.collect();
		assert_eq!(
			named,
			vec![
				("gov", "leg"),
				("leg", "ls"),
				("leg", "rs"),
				("gov", "exe"),
				("exe", "pm"),
				("gov", "jud"),
			]
		);
	}

	#[test]
	fn wide_leaf_groups_push_branches_apart() {
		let tree = layout(&data(json!({
			"root": {"id": "r", "label": "R"},
			"branches": [
				{"id": "a", "label": "A", "leaves": [
					{"id": "a1", "label": "1"}, {"id": "a2", "label": "2"},
					{"id": "a3", "label": "3"}, {"id": "a4", "label": "4"}
				]},
				{"id": "b", "label": "B"}
			]
		})));
		let a = &tree.nodes[1];
		let b = tree.nodes.iter().find(|n| n.id == "b").unwrap();
		assert_eq!(b.x - a.x, 4.0 * LEAF_SPACING);
	}

	#[test]
	fn duplicate_ids_are_skipped() {
		diagnostics::reset();
		let tree = layout(&data(json!({
			"root": {"id": "r", "label": "R"},
			"branches": [
				{"id": "a", "label": "A", "leaves": [{"id": "x", "label": "X"}]},
				{"id": "a", "label": "A again"},
				{"id": "b", "label": "B", "leaves": [{"id": "x", "label": "X again"}]}
			]
		})));
		let ids: Vec<&str> = tree.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["r", "a", "x", "b"]);
		assert_eq!(diagnostics::count(DropKind::DuplicateHierarchyId), 2);
	}

	#[test]
	fn selection_carries_label_and_info() {
		let tree = layout(&data(json!({
			"root": {"id": "r", "label": "Root", "info": {"description": "Top", "era": "1950"}}
		})));
		let selection = &tree.nodes[0].selection;
		assert_eq!(selection.title, "Root");
		assert_eq!(selection.description, "Top");
		assert!(selection.info.is_some());
	}
}
