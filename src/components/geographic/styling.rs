//! Which regions get which color, and what selecting them means.
//!
//! Both map modes share this resolution; they differ only in how a resolved
//! region is drawn.

use std::collections::HashSet;

use crate::diagnostics::{self, DropKind};
use crate::model::{
	DetailValue, GeoRegion, GeoState, GeographicData, MapType, RegionItem, SelectionEvent,
};
use crate::regions::RegionRegistry;

pub const DEFAULT_STATE_COLOR: &str = "#F97316";
pub const EMPTY_STATE_COLOR: &str = "#E5E7EB";
pub const EMPTY_STATE_OPACITY: f64 = 0.5;
pub const REGION_OPACITY: f64 = 0.85;

/// What a styled region selects when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionTarget {
	/// Index into `GeographicData::states`.
	State(usize),
	/// Index into `GeographicData::regions`.
	Region(usize),
}

/// Resolved style of one drawable region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionStyle {
	/// Registry id of the drawable element.
	pub region_id: String,
	pub fill: String,
	pub opacity: f64,
	/// `None` for regions that cannot be selected.
	pub target: Option<RegionTarget>,
}

/// Resolves every region id in `data` against `registry`.
///
/// For `state-categorized` maps an id listed in both `states` and
/// `emptyStates` takes the `states` styling. For `regional-shading` maps an
/// id claimed by several regions keeps the first region. Ids the registry
/// cannot draw are left out and recorded as diagnostics.
pub fn resolve_styles(data: &GeographicData, registry: &RegionRegistry) -> Vec<RegionStyle> {
	let mut styles = Vec::new();
	let mut seen = HashSet::new();
	let mut place = |id: &str, style: &dyn Fn(String) -> RegionStyle| {
		match registry.resolve(id) {
			Some(entry) => {
				if seen.insert(entry.id.clone()) {
					styles.push(style(entry.id.clone()));
				}
			}
			None => diagnostics::record(DropKind::UnresolvedRegion, id),
		}
	};

	match data.map_type {
		MapType::StateCategorized => {
			for (idx, state) in data.states.iter().enumerate() {
				place(&state.id, &|region_id| RegionStyle {
					region_id,
					fill: state
						.color
						.clone()
						.unwrap_or_else(|| DEFAULT_STATE_COLOR.to_string()),
					opacity: 1.0,
					target: state.has_content.then_some(RegionTarget::State(idx)),
				});
			}
			for id in &data.empty_states {
				place(id, &|region_id| RegionStyle {
					region_id,
					fill: EMPTY_STATE_COLOR.to_string(),
					opacity: EMPTY_STATE_OPACITY,
					target: None,
				});
			}
		}
		MapType::RegionalShading => {
			for (idx, region) in data.regions.iter().enumerate() {
				let fill = region
					.color
					.clone()
					.unwrap_or_else(|| DEFAULT_STATE_COLOR.to_string());
				for id in &region.states {
					place(id, &|region_id| RegionStyle {
						region_id,
						fill: fill.clone(),
						opacity: REGION_OPACITY,
						target: Some(RegionTarget::Region(idx)),
					});
				}
			}
		}
	}

	styles
}

fn item_titles(items: &[RegionItem]) -> Option<DetailValue> {
	(!items.is_empty()).then(|| {
		DetailValue::List(
			items
				.iter()
				.map(|i| DetailValue::Text(i.title.clone()))
				.collect(),
		)
	})
}

fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
	if name.is_empty() { id } else { name }
}

pub fn state_selection(state: &GeoState) -> SelectionEvent {
	let description = match (&state.category, state.items.len()) {
		(Some(category), n) => format!("{category} · {n} items"),
		(None, n) => format!("{n} items"),
	};
	let event = SelectionEvent::new(display_name(&state.name, &state.id), description);
	match item_titles(&state.items) {
		Some(info) => event.with_info(info),
		None => event,
	}
}

pub fn region_selection(region: &GeoRegion) -> SelectionEvent {
	let description = region
		.description
		.clone()
		.unwrap_or_else(|| format!("{} states", region.states.len()));
	let event = SelectionEvent::new(display_name(&region.name, &region.id), description);
	match item_titles(&region.items) {
		Some(info) => event.with_info(info),
		None => event,
	}
}

pub fn item_selection(item: &RegionItem) -> SelectionEvent {
	let event = SelectionEvent::new(&item.title, item.description.clone().unwrap_or_default());
	match &item.details {
		Some(details) => event.with_info(details.clone()),
		None => event,
	}
}

/// Selection event and side-panel items for a target.
pub fn target_content(
	data: &GeographicData,
	target: RegionTarget,
) -> Option<(SelectionEvent, Vec<RegionItem>)> {
	match target {
		RegionTarget::State(idx) => data
			.states
			.get(idx)
			.map(|s| (state_selection(s), s.items.clone())),
		RegionTarget::Region(idx) => data
			.regions
			.get(idx)
			.map(|r| (region_selection(r), r.items.clone())),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn data(value: serde_json::Value) -> GeographicData {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn states_are_colored_and_interactive_only_with_content() {
		let data = data(json!({
			"mapType": "state-categorized",
			"states": [
				{"id": "MH", "name": "Maharashtra", "color": "#2563EB", "hasContent": true},
				{"id": "KA", "name": "Karnataka"}
			]
		}));
		let styles = resolve_styles(&data, &RegionRegistry::synthetic());

		assert_eq!(styles.len(), 2);
		assert_eq!(styles[0].fill, "#2563EB");
		assert_eq!(styles[0].target, Some(RegionTarget::State(0)));
		assert_eq!(styles[1].fill, DEFAULT_STATE_COLOR);
		assert_eq!(styles[1].target, None);
	}

	#[test]
	fn content_styling_wins_over_empty_listing() {
		let data = data(json!({
			"states": [{"id": "IN-GJ", "name": "Gujarat", "hasContent": true}],
			"emptyStates": ["GJ", "RJ"]
		}));
		let styles = resolve_styles(&data, &RegionRegistry::synthetic());

		let gujarat: Vec<_> = styles.iter().filter(|s| s.region_id == "GJ").collect();
		assert_eq!(gujarat.len(), 1);
		assert_eq!(gujarat[0].fill, DEFAULT_STATE_COLOR);
		assert!(gujarat[0].target.is_some());

		let rajasthan = styles.iter().find(|s| s.region_id == "RJ").unwrap();
		assert_eq!(rajasthan.fill, EMPTY_STATE_COLOR);
		assert_eq!(rajasthan.opacity, EMPTY_STATE_OPACITY);
		assert_eq!(rajasthan.target, None);
	}

	#[test]
	fn regional_shading_selects_whole_region() {
		let data = data(json!({
			"mapType": "regional-shading",
			"regions": [
				{"id": "south", "name": "South", "color": "#10B981", "states": ["TN", "KL"]},
				{"id": "west", "name": "West", "color": "#F59E0B", "states": ["KL", "GJ"]}
			]
		}));
		let styles = resolve_styles(&data, &RegionRegistry::synthetic());

		let targets: Vec<_> = styles
			.iter()
			.map(|s| (s.region_id.as_str(), s.target))
			.collect();
		assert_eq!(
			targets,
			vec![
				("TN", Some(RegionTarget::Region(0))),
				("KL", Some(RegionTarget::Region(0))),
				("GJ", Some(RegionTarget::Region(1))),
			]
		);
		assert!(styles.iter().all(|s| s.opacity == REGION_OPACITY));
	}

	#[test]
	fn unresolvable_ids_are_skipped_and_counted() {
		diagnostics::reset();
		let data = data(json!({
			"states": [{"id": "Atlantis", "hasContent": true}, {"id": "TN"}],
			"emptyStates": ["Lemuria"]
		}));
		let styles = resolve_styles(&data, &RegionRegistry::synthetic());

		assert_eq!(styles.len(), 1);
		assert_eq!(diagnostics::count(DropKind::UnresolvedRegion), 2);
	}

	#[test]
	fn selections_list_items() {
		let data = data(json!({
			"states": [{
				"id": "MH", "name": "Maharashtra", "hasContent": true,
				"items": ["Ajanta", {"title": "Ellora", "description": "Rock-cut caves"}]
			}]
		}));
		let (event, items) = target_content(&data, RegionTarget::State(0)).unwrap();

		assert_eq!(event.title, "Maharashtra");
		assert_eq!(event.description, "2 items");
		assert_eq!(
			event.info,
			Some(DetailValue::List(vec![
				DetailValue::Text("Ajanta".into()),
				DetailValue::Text("Ellora".into()),
			]))
		);

		let nested = item_selection(&items[1]);
		assert_eq!(nested.title, "Ellora");
		assert_eq!(nested.description, "Rock-cut caves");
	}
}
