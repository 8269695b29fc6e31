//! Ordered-item diagrams: left-to-right flows and top-to-bottom layer stacks.
//!
//! Both draw items sorted by their `order` field and emit the same kind of
//! selection, so they share the ordering and selection helpers here.

mod flow;
mod layered;

pub use flow::FlowDiagram;
pub use layered::LayeredStack;

use crate::model::{DetailValue, FlowNode, LayerItem, SelectionEvent};

/// An item with a position in a sequence.
pub trait Sequenced {
	fn id(&self) -> &str;
	fn order(&self) -> i32;
	fn label(&self) -> &str;
	fn info(&self) -> Option<&DetailValue>;

	fn selection(&self) -> SelectionEvent {
		SelectionEvent::from_labelled(self.label(), None, self.info())
	}
}

impl Sequenced for FlowNode {
	fn id(&self) -> &str {
		&self.id
	}

	fn order(&self) -> i32 {
		self.order
	}

	fn label(&self) -> &str {
		&self.label
	}

	fn info(&self) -> Option<&DetailValue> {
		self.info.as_ref()
	}
}

impl Sequenced for LayerItem {
	fn id(&self) -> &str {
		&self.id
	}

	fn order(&self) -> i32 {
		self.order
	}

	fn label(&self) -> &str {
		&self.label
	}

	fn info(&self) -> Option<&DetailValue> {
		self.info.as_ref()
	}
}

/// Sorts by `order` ascending; items with equal order keep input order.
pub fn in_order<T: Sequenced>(mut items: Vec<T>) -> Vec<T> {
	items.sort_by_key(T::order);
	items
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::model::{FlowData, LayeredData};

	#[test]
	fn flow_nodes_sort_stably_by_order() {
		let data: FlowData = serde_json::from_value(json!({
			"nodes": [
				{"id": "c", "label": "Output", "order": 3},
				{"id": "a", "label": "Input", "order": 1},
				{"id": "b1", "label": "Process", "order": 2},
				{"id": "b2", "label": "Store", "order": 2}
			]
		}))
		.unwrap();
		let ids: Vec<String> = in_order(data.nodes).into_iter().map(|n| n.id).collect();
		assert_eq!(ids, vec!["a", "b1", "b2", "c"]);
	}

	#[test]
	fn layers_sort_by_order() {
		let data: LayeredData = serde_json::from_value(json!({
			"layers": [
				{"id": 2, "name": "Mantle", "order": 2},
				{"id": 1, "name": "Crust", "order": 1},
				{"id": 3, "name": "Core", "order": 3}
			]
		}))
		.unwrap();
		let labels: Vec<String> = in_order(data.layers)
			.into_iter()
			.map(|l| l.label)
			.collect();
		assert_eq!(labels, vec!["Crust", "Mantle", "Core"]);
	}

	#[test]
	fn selection_lifts_description_and_keeps_other_info() {
		let node: FlowNode = serde_json::from_value(json!({
			"id": "a", "label": "Input", "order": 1,
			"info": {"description": "Raw inputs", "examples": ["sensors", "forms"]}
		}))
		.unwrap();
		let selection = node.selection();
		assert_eq!(selection.title, "Input");
		assert_eq!(selection.description, "Raw inputs");
		assert_eq!(
			selection.info,
			Some(DetailValue::Map(vec![(
				"examples".into(),
				DetailValue::List(vec![
					DetailValue::Text("sensors".into()),
					DetailValue::Text("forms".into()),
				])
			)]))
		);
	}
}
