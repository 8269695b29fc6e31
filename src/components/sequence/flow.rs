use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

use super::{Sequenced, in_order};
use crate::model::{FlowData, SelectionEvent};

/// Renders a [`FlowData`] payload as steps left to right joined by arrows.
#[component]
pub fn FlowDiagram(data: FlowData, on_select: Callback<SelectionEvent>) -> impl IntoView {
	let hovered: RwSignal<Option<String>> = RwSignal::new(None);
	let selected: RwSignal<Option<String>> = RwSignal::new(None);
	let nodes = in_order(data.nodes);
	let last = nodes.len().saturating_sub(1);

	let steps = nodes
		.into_iter()
		.enumerate()
		.map(|(i, node)| {
			let selection = node.selection();
			let id = node.id().to_string();
			let (hover_id, leave_id, select_id) = (id.clone(), id.clone(), id.clone());
			let is_hovered = {
				let id = id.clone();
				move || hovered.with(|h| h.as_deref() == Some(id.as_str()))
			};
			let is_selected = move || selected.with(|s| s.as_deref() == Some(id.as_str()));
			view! {
				<div
					class="flow-step"
					class:hovered=is_hovered
					class:selected=is_selected
					on:mouseenter=move |_| hovered.set(Some(hover_id.clone()))
					on:mouseleave=move |_| {
						hovered.update(|h| {
							if h.as_deref() == Some(leave_id.as_str()) {
								*h = None;
							}
						})
					}
					on:click=move |_| {
						selected.set(Some(select_id.clone()));
						on_select.run(selection.clone());
					}
				>
					<span class="flow-step-index">{(i + 1).to_string()}</span>
					<span class="flow-step-label">{node.label}</span>
				</div>
				{(i < last).then(|| view! { <span class="flow-arrow" aria-hidden="true">"→"</span> })}
			}
		})
		.collect_view();

	view! {
		<div class="flow-diagram">
			{data.title.map(|t| view! { <h3 class="flow-title">{t}</h3> })}
			<div class="flow-steps">{steps}</div>
		</div>
	}
}
