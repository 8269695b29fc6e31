//! Leptos component drawing the geographic map in either mode.

use leptos::callback::{Callable, Callback};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::styling::{
	EMPTY_STATE_COLOR, RegionStyle, RegionTarget, item_selection, resolve_styles, target_content,
};
use crate::api::{ConceptMapApi, HttpApi};
use crate::model::{GeographicData, MapType, SelectionEvent};
use crate::regions::{MapMode, RegionEntry, RegionGeometry, RegionRegistry, Shape, ShapeKind};

/// Fill of real-map regions the data does not mention.
const BASE_FILL: &str = "#F3F4F6";
const BASE_STROKE: &str = "#9CA3AF";
const MARKER_RADIUS: f64 = 11.0;

/// Builds the registry for this mount: the real asset if it loads and
/// parses, the synthetic table otherwise.
pub async fn load_registry<A: ConceptMapApi + ?Sized>(api: &A) -> RegionRegistry {
	match api.map_asset().await {
		Ok(svg) => match RegionRegistry::from_svg(&svg) {
			Ok(registry) => {
				info!(
					"concept-map: map asset loaded with {} regions",
					registry.entries().len()
				);
				registry
			}
			Err(e) => {
				warn!("concept-map: map asset unusable ({}), using synthetic map", e);
				RegionRegistry::synthetic()
			}
		},
		Err(e) => {
			warn!(
				"concept-map: map asset unavailable ({}), using synthetic map",
				e
			);
			RegionRegistry::synthetic()
		}
	}
}

/// Interaction handles shared by every region element.
#[derive(Clone, Copy)]
struct MapInteraction {
	data: StoredValue<GeographicData>,
	selected: RwSignal<Option<RegionTarget>>,
	hovered: RwSignal<Option<String>>,
	on_select: Callback<SelectionEvent>,
}

impl MapInteraction {
	fn select(self, target: RegionTarget) {
		self.selected.set(Some(target));
		if let Some((event, _)) = self.data.with_value(|d| target_content(d, target)) {
			self.on_select.run(event);
		}
	}
}

/// Renders a [`GeographicData`] payload as a clickable map of India.
#[component]
pub fn GeographicMap(data: GeographicData, on_select: Callback<SelectionEvent>) -> impl IntoView {
	let legend = data.legend.clone();
	let show_empty_legend =
		data.map_type == MapType::StateCategorized && !data.empty_states.is_empty();
	let title = data.title.clone();

	let interaction = MapInteraction {
		data: StoredValue::new(data),
		selected: RwSignal::new(None),
		hovered: RwSignal::new(None),
		on_select,
	};
	let registry: RwSignal<Option<RegionRegistry>> = RwSignal::new(None);

	match use_context::<HttpApi>() {
		Some(api) => spawn_local(async move {
			let loaded = load_registry(&api).await;
			let _ = registry.try_set(Some(loaded));
		}),
		None => registry.set(Some(RegionRegistry::synthetic())),
	}

	let map = move || {
		registry.with(|registry| match registry {
			None => view! { <div class="geo-map-loading">"Loading map…"</div> }.into_any(),
			Some(registry) => {
				let styles = interaction
					.data
					.with_value(|d| resolve_styles(d, registry));
				map_view(registry, styles, interaction).into_any()
			}
		})
	};

	let mode_note = move || {
		registry.with(|r| {
			r.as_ref()
				.filter(|r| r.mode() == MapMode::Synthetic)
				.map(|_| view! { <p class="geo-map-note">"Simplified map view"</p> })
		})
	};

	let legend_view = (!legend.is_empty() || show_empty_legend).then(|| {
		view! {
			<ul class="geo-legend">
				{legend
					.into_iter()
					.map(|entry| {
						view! {
							<li>
								<span class="swatch" style=format!("background:{}", entry.color)></span>
								{entry.label}
							</li>
						}
					})
					.collect_view()}
				{show_empty_legend
					.then(|| {
						view! {
							<li>
								<span class="swatch" style=format!("background:{}", EMPTY_STATE_COLOR)></span>
								"No content yet"
							</li>
						}
					})}
			</ul>
		}
	});

	view! {
		<div class="geo-map">
			{title.map(|t| view! { <h3 class="geo-map-title">{t}</h3> })}
			<div class="geo-map-body">
				<div class="geo-map-canvas">{map} {mode_note}</div>
				<RegionPanel interaction=interaction />
			</div>
			{legend_view}
		</div>
	}
}

fn map_view(
	registry: &RegionRegistry,
	styles: Vec<RegionStyle>,
	interaction: MapInteraction,
) -> impl IntoView + use<> {
	let view_box = registry.view_box();
	let styled_ids: Vec<String> = styles.iter().map(|s| s.region_id.clone()).collect();

	// The real map shows every region; unmentioned ones stay neutral.
	let base = match registry.mode() {
		MapMode::Real => registry
			.entries()
			.iter()
			.filter(|e| !styled_ids.contains(&e.id))
			.map(|entry| {
				view! {
					<g class="geo-region geo-region-base" fill=BASE_FILL stroke=BASE_STROKE>
						{geometry_view(entry, registry)}
					</g>
				}
			})
			.collect_view()
			.into_any(),
		MapMode::Synthetic => ().into_any(),
	};

	let regions = styles
		.into_iter()
		.filter_map(|style| {
			let entry = registry.resolve(&style.region_id)?;
			Some(region_view(entry, registry, style, interaction))
		})
		.collect_view();

	view! {
		<svg class="geo-map-svg" viewBox=view_box.to_attr() preserveAspectRatio="xMidYMid meet">
			{base}
			{regions}
		</svg>
	}
}

fn region_view(
	entry: &RegionEntry,
	registry: &RegionRegistry,
	style: RegionStyle,
	interaction: MapInteraction,
) -> impl IntoView + use<> {
	let target = style.target;
	let id = entry.id.clone();
	let (hover_id, leave_id) = (id.clone(), id.clone());

	let class = move || {
		let mut class = String::from("geo-region");
		if target.is_some() {
			class.push_str(" interactive");
		}
		if interaction.hovered.with(|h| h.as_deref() == Some(id.as_str())) {
			class.push_str(" hovered");
		}
		if target.is_some() && interaction.selected.get() == target {
			class.push_str(" selected");
		}
		class
	};

	view! {
		<g
			class=class
			fill=style.fill
			opacity=style.opacity.to_string()
			stroke="#FFFFFF"
			on:click=move |_| {
				if let Some(target) = target {
					interaction.select(target);
				}
			}
			on:mouseenter=move |_| interaction.hovered.set(Some(hover_id.clone()))
			on:mouseleave=move |_| {
				interaction.hovered.update(|h| {
					if h.as_deref() == Some(leave_id.as_str()) {
						*h = None;
					}
				})
			}
		>
			<title>{entry.name.clone()}</title>
			{geometry_view(entry, registry)}
		</g>
	}
}

fn geometry_view(entry: &RegionEntry, registry: &RegionRegistry) -> AnyView {
	match &entry.geometry {
		RegionGeometry::Marker { x, y } => {
			let vb = registry.view_box();
			let (cx, cy) = (vb.min_x + x * vb.width, vb.min_y + y * vb.height);
			view! {
				<circle cx=format!("{cx:.1}") cy=format!("{cy:.1}") r=MARKER_RADIUS.to_string() />
				<text
					x=format!("{cx:.1}")
					y=format!("{:.1}", cy + MARKER_RADIUS + 11.0)
					text-anchor="middle"
					font-size="11"
					fill="#374151"
				>
					{entry.id.clone()}
				</text>
			}
			.into_any()
		}
		RegionGeometry::Shapes { shapes, transform } => {
			let shapes = shapes.iter().map(shape_view).collect_view();
			view! { <g transform=transform.clone()>{shapes}</g> }.into_any()
		}
	}
}

fn shape_view(shape: &Shape) -> AnyView {
	let transform = shape.transform.clone();
	match &shape.kind {
		ShapeKind::Path(d) => view! { <path d=d.clone() transform=transform /> }.into_any(),
		ShapeKind::Polygon(points) => {
			view! { <polygon points=points.clone() transform=transform /> }.into_any()
		}
		ShapeKind::Circle { cx, cy, r } => view! {
			<circle cx=cx.to_string() cy=cy.to_string() r=r.to_string() transform=transform />
		}
		.into_any(),
		ShapeKind::Rect {
			x,
			y,
			width,
			height,
		} => view! {
			<rect
				x=x.to_string()
				y=y.to_string()
				width=width.to_string()
				height=height.to_string()
				transform=transform
			/>
		}
		.into_any(),
	}
}

/// Side panel listing the selected region's items.
#[component]
fn RegionPanel(interaction: MapInteraction) -> impl IntoView {
	move || {
		let target = interaction.selected.get()?;
		let (event, items) = interaction.data.with_value(|d| target_content(d, target))?;
		let on_select = interaction.on_select;
		Some(view! {
			<aside class="geo-panel">
				<header>
					<h4>{event.title}</h4>
					<button class="geo-panel-close" on:click=move |_| interaction.selected.set(None)>
						"×"
					</button>
				</header>
				<p class="geo-panel-description">{event.description}</p>
				<ul class="geo-panel-items">
					{items
						.into_iter()
						.map(|item| {
							let nested = item_selection(&item);
							view! {
								<li on:click=move |_| on_select.run(nested.clone())>
									<span class="item-title">{item.title}</span>
									{item.description.map(|d| view! { <span class="item-description">{d}</span> })}
								</li>
							}
						})
						.collect_view()}
				</ul>
			</aside>
		})
	}
}
