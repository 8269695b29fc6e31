//! Views over the detail presentation tree.

use leptos::prelude::*;

use crate::model::{DetailBlock, DetailValue, SelectionEvent, format_details};

/// Walks a [`DetailBlock`] tree into nested views.
pub fn block_view(block: DetailBlock) -> AnyView {
	match block {
		DetailBlock::Paragraph(text) => view! { <p class="detail-text">{text}</p> }.into_any(),
		DetailBlock::Bullets(items) => view! {
			<ul class="detail-list">
				{items.into_iter().map(|item| view! { <li>{block_view(item)}</li> }).collect_view()}
			</ul>
		}
		.into_any(),
		DetailBlock::Fields(fields) => view! {
			<dl class="detail-fields">
				{fields
					.into_iter()
					.map(|field| {
						view! {
							<dt>
								<span class="detail-icon">{field.style.icon}</span>
								{field.style.label.into_owned()}
							</dt>
							<dd>{block_view(field.body)}</dd>
						}
					})
					.collect_view()}
			</dl>
		}
		.into_any(),
	}
}

/// Formats and renders a detail value.
#[component]
pub fn DetailView(value: DetailValue) -> impl IntoView {
	view! { <div class="detail-view">{block_view(format_details(&value))}</div> }
}

/// Panel showing the most recent selection from any renderer.
#[component]
pub fn SelectionPanel(
	#[prop(into)] selection: Signal<Option<SelectionEvent>>,
	#[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
	use leptos::callback::Callable;

	move || {
		selection.get().map(|event| {
			view! {
				<aside class="selection-panel">
					<header>
						<h4>{event.title}</h4>
						<button class="selection-close" on:click=move |_| on_close.run(())>
							"×"
						</button>
					</header>
					{(!event.description.is_empty())
						.then(|| view! { <p class="selection-description">{event.description}</p> })}
					{event.info.map(|info| view! { <DetailView value=info /> })}
				</aside>
			}
		})
	}
}
