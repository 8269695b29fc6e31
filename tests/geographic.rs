use async_trait::async_trait;
use concept_map::api::{ConceptMapApi, FetchError};
use concept_map::components::geographic::{
	EMPTY_STATE_COLOR, RegionTarget, load_registry, resolve_styles,
};
use concept_map::diagnostics::{self, DropKind};
use concept_map::model::{GeographicData, Roadmap, Subject, Topic};
use concept_map::regions::MapMode;
use futures::executor::block_on;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Serves only the map asset; everything else is empty.
struct MapOnly(Result<String, FetchError>);

#[async_trait(?Send)]
impl ConceptMapApi for MapOnly {
	async fn subjects(&self) -> Result<Vec<Subject>, FetchError> {
		Ok(Vec::new())
	}

	async fn topics(&self, _subject_id: &str) -> Result<Vec<Topic>, FetchError> {
		Ok(Vec::new())
	}

	async fn roadmap(&self, _subject_id: &str) -> Result<Option<Roadmap>, FetchError> {
		Ok(None)
	}

	async fn topic_detail(
		&self,
		_topic_id: &str,
		_subject_id: &str,
	) -> Result<Option<Topic>, FetchError> {
		Ok(None)
	}

	async fn map_asset(&self) -> Result<String, FetchError> {
		self.0.clone()
	}
}

fn southern_states() -> GeographicData {
	serde_json::from_value(json!({
		"mapType": "state-categorized",
		"states": [
			{"id": "MH", "name": "Maharashtra", "color": "#2563EB", "hasContent": true},
			{"id": "IN-KA", "name": "Karnataka", "hasContent": true},
			{"id": "Tamil Nadu", "hasContent": false}
		],
		"emptyStates": ["GJ", "rj", "MH"]
	}))
	.unwrap()
}

#[test]
fn test_missing_asset_falls_back_to_synthetic_map() {
	diagnostics::reset();
	let registry = block_on(load_registry(&MapOnly(Err(FetchError::Status(404)))));
	assert_eq!(registry.mode(), MapMode::Synthetic);

	let styles = resolve_styles(&southern_states(), &registry);
	let mut ids: Vec<&str> = styles.iter().map(|s| s.region_id.as_str()).collect();
	ids.sort_unstable();

	assert_eq!(ids, vec!["GJ", "KA", "MH", "RJ", "TN"]);
	assert_eq!(diagnostics::count(DropKind::UnresolvedRegion), 0);
}

#[test]
fn test_listed_state_wins_over_empty_state() {
	let registry = block_on(load_registry(&MapOnly(Err(FetchError::Unavailable))));
	let styles = resolve_styles(&southern_states(), &registry);

	let mh = styles.iter().find(|s| s.region_id == "MH").unwrap();
	assert_eq!(mh.fill, "#2563EB");
	assert_eq!(mh.target, Some(RegionTarget::State(0)));

	let tn = styles.iter().find(|s| s.region_id == "TN").unwrap();
	assert_eq!(tn.target, None);

	let gj = styles.iter().find(|s| s.region_id == "GJ").unwrap();
	assert_eq!(gj.fill, EMPTY_STATE_COLOR);
	assert_eq!(gj.target, None);
}

#[test]
fn test_unparseable_asset_falls_back_to_synthetic_map() {
	let registry = block_on(load_registry(&MapOnly(Ok("<svg".to_string()))));
	assert_eq!(registry.mode(), MapMode::Synthetic);
}

#[test]
fn test_real_asset_is_used_when_it_parses() {
	let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
		<path id="IN-MH" d="M10 10 L20 10 L20 20 Z"/>
		<path id="IN-KA" d="M30 30 L40 30 L40 40 Z"/>
	</svg>"#;
	diagnostics::reset();
	let registry = block_on(load_registry(&MapOnly(Ok(svg.to_string()))));
	assert_eq!(registry.mode(), MapMode::Real);

	let styles = resolve_styles(&southern_states(), &registry);
	assert_eq!(styles.len(), 2);
	// TN, GJ and RJ are not in the asset.
	assert_eq!(diagnostics::count(DropKind::UnresolvedRegion), 3);
}
