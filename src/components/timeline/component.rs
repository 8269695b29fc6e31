use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

use super::model::{
	PhaseBucket, PhaseKey, TimelineExpansion, axis_ticks, bucket_events, event_key,
	event_selection, year_span,
};
use crate::components::detail_view::DetailView;
use crate::model::{SelectionEvent, TimelineData};

const MAX_TICKS: usize = 6;

/// Renders a [`TimelineData`] payload as collapsible phases of events.
#[component]
pub fn Timeline(data: TimelineData, on_select: Callback<SelectionEvent>) -> impl IntoView {
	let buckets = bucket_events(&data);
	let axis = year_span(&data).map(|(start, end)| {
		let ticks = axis_ticks(start, end, MAX_TICKS);
		let span = (f64::from(end) - f64::from(start)).max(1.0);
		view! {
			<div class="timeline-axis">
				{ticks
					.into_iter()
					.map(|year| {
						let left = (f64::from(year) - f64::from(start)) / span * 100.0;
						view! {
							<span class="timeline-tick" style=format!("left:{left:.2}%")>
								{year.to_string()}
							</span>
						}
					})
					.collect_view()}
			</div>
		}
	});

	let data = StoredValue::new(data);
	let expansion = RwSignal::new(TimelineExpansion::default());

	view! {
		<div class="timeline">
			{axis}
			{buckets
				.into_iter()
				.map(|bucket| phase_view(bucket, data, expansion, on_select))
				.collect_view()}
		</div>
	}
}

fn phase_view(
	bucket: PhaseBucket,
	data: StoredValue<TimelineData>,
	expansion: RwSignal<TimelineExpansion>,
	on_select: Callback<SelectionEvent>,
) -> impl IntoView {
	let phase = bucket
		.phase
		.and_then(|i| data.with_value(|d| d.phases.get(i).cloned()));
	let key = bucket.key.clone();
	let expanded = move || expansion.with(|e| e.is_phase_expanded(&key));

	let header = phase.map(|phase| {
		let id = phase.id.clone();
		let range = match (phase.start_year, phase.end_year) {
			(Some(s), Some(e)) => Some(format!("{s} – {e}")),
			(Some(s), None) => Some(format!("from {s}")),
			(None, Some(e)) => Some(format!("until {e}")),
			(None, None) => None,
		};
		let accent = phase.color.unwrap_or_else(|| "#64748B".to_string());
		view! {
			<button
				class="timeline-phase-header"
				style=format!("border-left-color:{accent}")
				on:click=move |_| expansion.update(|e| e.toggle_phase(&id))
			>
				<span class="phase-title">{phase.title}</span>
				{range.map(|r| view! { <span class="phase-range">{r}</span> })}
			</button>
			{phase.description.map(|d| view! { <p class="phase-description">{d}</p> })}
		}
	});

	let implicit = bucket.key == PhaseKey::Implicit;
	let events = bucket.events;
	let expanded_class = expanded.clone();
	let body = move || {
		expanded().then(|| {
			view! {
				<ol class="timeline-events">
					{events
						.iter()
						.map(|&idx| event_view(idx, data, expansion, on_select))
						.collect_view()}
				</ol>
			}
		})
	};

	view! {
		<section class="timeline-phase" class:implicit=implicit class:expanded=expanded_class>
			{header}
			{body}
		</section>
	}
}

fn event_view(
	idx: usize,
	data: StoredValue<TimelineData>,
	expansion: RwSignal<TimelineExpansion>,
	on_select: Callback<SelectionEvent>,
) -> impl IntoView {
	let Some(event) = data.with_value(|d| d.events.get(idx).cloned()) else {
		return ().into_any();
	};
	let key = event_key(&event, idx);
	let selection = event_selection(&event);
	let open_key = key.clone();
	let is_open = move || expansion.with(|e| e.is_event_expanded(&open_key));
	let open_class = is_open.clone();

	let description = event.description.clone();
	let details = event.details.clone();
	let body = move || {
		is_open().then(|| {
			view! {
				<div class="timeline-event-body">
					{description.clone().map(|d| view! { <p>{d}</p> })}
					{details.clone().map(|value| view! { <DetailView value=value /> })}
				</div>
			}
		})
	};

	view! {
		<li class="timeline-event" class:open=open_class>
			<button
				class="timeline-event-header"
				on:click=move |_| {
					expansion.update(|e| {
						e.toggle_event(&key);
					});
					on_select.run(selection.clone());
				}
			>
				{event.year.map(|y| view! { <span class="event-year">{y}</span> })}
				<span class="event-title">{event.title}</span>
			</button>
			{body}
		</li>
	}
	.into_any()
}
