//! Visual kinds and the per-kind diagram payloads.

use std::fmt;

use serde::Deserialize;

use super::details::DetailValue;
use super::{opt_string_or_number, string_or_number};

/// Discriminator selecting which renderer displays a topic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VisualKind {
	Geographic,
	Hierarchy,
	Timeline,
	Flow,
	Layered,
	/// A tag this client does not know how to draw. Kept for the placeholder.
	Unknown(String),
}

impl VisualKind {
	pub fn parse(tag: &str) -> Self {
		match tag.trim().to_ascii_lowercase().as_str() {
			"geographic" | "geography" | "map" | "india-map" => VisualKind::Geographic,
			"hierarchy" | "tree" | "graph" | "mindmap" => VisualKind::Hierarchy,
			"timeline" => VisualKind::Timeline,
			"flow" | "flowchart" | "flow-diagram" | "flow_diagram" => VisualKind::Flow,
			"layered" | "layers" | "stack" | "layered-stack" | "layered_stack" => {
				VisualKind::Layered
			}
			_ => VisualKind::Unknown(tag.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			VisualKind::Geographic => "geographic",
			VisualKind::Hierarchy => "hierarchy",
			VisualKind::Timeline => "timeline",
			VisualKind::Flow => "flow",
			VisualKind::Layered => "layered",
			VisualKind::Unknown(tag) => tag,
		}
	}
}

impl Default for VisualKind {
	fn default() -> Self {
		VisualKind::Unknown(String::new())
	}
}

impl From<String> for VisualKind {
	fn from(tag: String) -> Self {
		VisualKind::parse(&tag)
	}
}

impl fmt::Display for VisualKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Why a topic payload could not become a [`VisualData`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
	#[error("unsupported visual kind `{0}`")]
	UnsupportedKind(String),
	#[error("topic has no visual payload")]
	Missing,
	#[error("invalid {kind} payload: {source}")]
	Decode {
		kind: &'static str,
		#[source]
		source: serde_json::Error,
	},
}

/// Topic content to visualize, one variant per known [`VisualKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum VisualData {
	Geographic(GeographicData),
	Hierarchy(HierarchyData),
	Timeline(TimelineData),
	Flow(FlowData),
	Layered(LayeredData),
}

impl VisualData {
	/// Parses the raw payload as the variant `kind` names.
	pub fn from_payload(
		kind: &VisualKind,
		payload: Option<&serde_json::Value>,
	) -> Result<Self, PayloadError> {
		fn decode<T: for<'de> Deserialize<'de>>(
			kind: &'static str,
			payload: &serde_json::Value,
		) -> Result<T, PayloadError> {
			T::deserialize(payload).map_err(|source| PayloadError::Decode { kind, source })
		}

		if let VisualKind::Unknown(tag) = kind {
			return Err(PayloadError::UnsupportedKind(tag.clone()));
		}
		let payload = payload
			.filter(|p| !p.is_null())
			.ok_or(PayloadError::Missing)?;
		match kind {
			VisualKind::Geographic => decode("geographic", payload).map(VisualData::Geographic),
			VisualKind::Hierarchy => decode("hierarchy", payload).map(VisualData::Hierarchy),
			VisualKind::Timeline => decode("timeline", payload).map(VisualData::Timeline),
			VisualKind::Flow => decode("flow", payload).map(VisualData::Flow),
			VisualKind::Layered => decode("layered", payload).map(VisualData::Layered),
			VisualKind::Unknown(tag) => Err(PayloadError::UnsupportedKind(tag.clone())),
		}
	}
}

// ---------------------------------------------------------------------------
// Geographic

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum MapType {
	#[default]
	#[serde(rename = "state-categorized")]
	StateCategorized,
	#[serde(rename = "regional-shading")]
	RegionalShading,
}

/// An entry listed in a region's side panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawRegionItem")]
pub struct RegionItem {
	pub title: String,
	pub description: Option<String>,
	pub details: Option<DetailValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRegionItem {
	Title(String),
	Full {
		#[serde(alias = "name", alias = "label")]
		title: String,
		#[serde(default)]
		description: Option<String>,
		#[serde(default, alias = "info")]
		details: Option<DetailValue>,
	},
}

impl From<RawRegionItem> for RegionItem {
	fn from(raw: RawRegionItem) -> Self {
		match raw {
			RawRegionItem::Title(title) => RegionItem {
				title,
				description: None,
				details: None,
			},
			RawRegionItem::Full {
				title,
				description,
				details,
			} => RegionItem {
				title,
				description,
				details,
			},
		}
	}
}

/// A state colored by its own category.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoState {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub has_content: bool,
	#[serde(default)]
	pub items: Vec<RegionItem>,
	#[serde(default)]
	pub category: Option<String>,
}

/// A group of states shaded with one color and selected as a unit.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeoRegion {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub states: Vec<String>,
	#[serde(default)]
	pub items: Vec<RegionItem>,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LegendEntry {
	pub label: String,
	pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicData {
	#[serde(default)]
	pub map_type: MapType,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub states: Vec<GeoState>,
	#[serde(default)]
	pub regions: Vec<GeoRegion>,
	#[serde(default)]
	pub legend: Vec<LegendEntry>,
	#[serde(default)]
	pub empty_states: Vec<String>,
}

// ---------------------------------------------------------------------------
// Hierarchy

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HierarchyNode {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(alias = "name", alias = "title")]
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub info: Option<DetailValue>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HierarchyBranch {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(alias = "name", alias = "title")]
	pub label: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub info: Option<DetailValue>,
	#[serde(default, alias = "children")]
	pub leaves: Vec<HierarchyNode>,
}

/// Three-tier tree: root, branches, leaves.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HierarchyData {
	pub root: HierarchyNode,
	#[serde(default)]
	pub branches: Vec<HierarchyBranch>,
}

// ---------------------------------------------------------------------------
// Timeline

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimelineEvent {
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub id: Option<String>,
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub year: Option<String>,
	#[serde(alias = "name", alias = "label")]
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub phase: Option<String>,
	#[serde(default)]
	pub details: Option<DetailValue>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePhase {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(alias = "name", alias = "label")]
	pub title: String,
	#[serde(default)]
	pub start_year: Option<i32>,
	#[serde(default)]
	pub end_year: Option<i32>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
	#[serde(default)]
	pub start_year: Option<i32>,
	#[serde(default)]
	pub end_year: Option<i32>,
	#[serde(default)]
	pub events: Vec<TimelineEvent>,
	#[serde(default)]
	pub phases: Vec<TimelinePhase>,
}

// ---------------------------------------------------------------------------
// Flow / layered

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlowNode {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(alias = "name", alias = "title")]
	pub label: String,
	#[serde(default)]
	pub order: i32,
	#[serde(default)]
	pub info: Option<DetailValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FlowData {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default, alias = "steps")]
	pub nodes: Vec<FlowNode>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayerItem {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(alias = "name", alias = "title")]
	pub label: String,
	#[serde(default)]
	pub order: i32,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub info: Option<DetailValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LayeredData {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub layers: Vec<LayerItem>,
}
