//! Picks the renderer for a topic's visual kind.

use leptos::callback::Callback;
use leptos::prelude::*;
use log::warn;
use serde_json::Value;

use super::geographic::GeographicMap;
use super::hierarchy::HierarchyTree;
use super::sequence::{FlowDiagram, LayeredStack};
use super::timeline::Timeline;
use crate::model::{PayloadError, SelectionEvent, VisualData, VisualKind};

/// What the dispatcher will show for a kind/payload pair.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
	Render(VisualData),
	/// The kind is not one this client draws.
	Unsupported(String),
	/// The kind is known but the payload is missing or malformed.
	Unavailable(String),
}

pub fn resolve_visual(kind: &VisualKind, payload: Option<&Value>) -> Dispatch {
	match VisualData::from_payload(kind, payload) {
		Ok(data) => Dispatch::Render(data),
		Err(PayloadError::UnsupportedKind(tag)) => Dispatch::Unsupported(tag),
		Err(e) => {
			warn!("concept-map: {} content unavailable: {}", kind, e);
			Dispatch::Unavailable(e.to_string())
		}
	}
}

/// Renders `payload` with the renderer `kind` names.
///
/// Every renderer reports selections through the same `on_select`.
#[component]
pub fn VisualDispatcher(
	kind: VisualKind,
	payload: Option<Value>,
	on_select: Callback<SelectionEvent>,
) -> impl IntoView {
	match resolve_visual(&kind, payload.as_ref()) {
		Dispatch::Render(VisualData::Geographic(data)) => {
			view! { <GeographicMap data=data on_select=on_select /> }.into_any()
		}
		Dispatch::Render(VisualData::Hierarchy(data)) => {
			view! { <HierarchyTree data=data on_select=on_select /> }.into_any()
		}
		Dispatch::Render(VisualData::Timeline(data)) => {
			view! { <Timeline data=data on_select=on_select /> }.into_any()
		}
		Dispatch::Render(VisualData::Flow(data)) => {
			view! { <FlowDiagram data=data on_select=on_select /> }.into_any()
		}
		Dispatch::Render(VisualData::Layered(data)) => {
			view! { <LayeredStack data=data on_select=on_select /> }.into_any()
		}
		Dispatch::Unsupported(tag) => view! {
			<div class="visual-placeholder unsupported">
				{format!("Unsupported visual type: {}", if tag.is_empty() { "(none)" } else { tag.as_str() })}
			</div>
		}
		.into_any(),
		Dispatch::Unavailable(_) => view! {
			<div class="visual-placeholder unavailable">"Content for this topic is not available yet."</div>
		}
		.into_any(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn known_kinds_render() {
		let dispatch = resolve_visual(
			&VisualKind::Flow,
			Some(&json!({"nodes": [{"id": "a", "label": "A", "order": 1}]})),
		);
		assert!(matches!(dispatch, Dispatch::Render(VisualData::Flow(_))));
	}

	#[test]
	fn unknown_kind_is_unsupported() {
		let dispatch = resolve_visual(&VisualKind::parse("venn"), Some(&json!({})));
		assert_eq!(dispatch, Dispatch::Unsupported("venn".into()));
	}

	#[test]
	fn missing_or_malformed_payload_is_unavailable() {
		assert!(matches!(
			resolve_visual(&VisualKind::Timeline, None),
			Dispatch::Unavailable(_)
		));
		assert!(matches!(
			resolve_visual(&VisualKind::Hierarchy, Some(&json!({"branches": 3}))),
			Dispatch::Unavailable(_)
		));
	}
}
