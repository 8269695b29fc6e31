use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

use super::{Sequenced, in_order};
use crate::model::{LayeredData, SelectionEvent};

const LAYER_COLORS: [&str; 6] = ["#1E3A8A", "#1D4ED8", "#2563EB", "#3B82F6", "#60A5FA", "#93C5FD"];

/// Renders a [`LayeredData`] payload as a top-to-bottom stack of bands.
#[component]
pub fn LayeredStack(data: LayeredData, on_select: Callback<SelectionEvent>) -> impl IntoView {
	let hovered: RwSignal<Option<usize>> = RwSignal::new(None);
	let selected: RwSignal<Option<usize>> = RwSignal::new(None);

	let layers = in_order(data.layers)
		.into_iter()
		.enumerate()
		.map(|(i, layer)| {
			let selection = layer.selection();
			let color = layer
				.color
				.clone()
				.unwrap_or_else(|| LAYER_COLORS[i % LAYER_COLORS.len()].to_string());
			view! {
				<li
					class="layer"
					class:hovered=move || hovered.get() == Some(i)
					class:selected=move || selected.get() == Some(i)
					style=format!("background:{color}")
					on:mouseenter=move |_| hovered.set(Some(i))
					on:mouseleave=move |_| {
						hovered.update(|h| {
							if *h == Some(i) {
								*h = None;
							}
						})
					}
					on:click=move |_| {
						selected.set(Some(i));
						on_select.run(selection.clone());
					}
				>
					<span class="layer-label">{layer.label().to_string()}</span>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="layered-stack">
			{data.title.map(|t| view! { <h3 class="layered-title">{t}</h3> })}
			<ol class="layers">{layers}</ol>
		</div>
	}
}
