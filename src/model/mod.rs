//! Typed data model for concept map content.
//!
//! Everything here is plain data deserialized from the REST API. Topics and
//! roadmaps drive navigation; [`VisualData`] is the closed set of diagram
//! payloads; [`SelectionEvent`] is the one contract every renderer emits.

mod details;
mod selection;
mod topic;
mod visual;

pub use details::{DetailBlock, DetailField, DetailValue, FieldStyle, format_details};
pub use selection::SelectionEvent;
pub use topic::{
	Roadmap, RoadmapChapter, Subject, SubjectsResponse, SubTopicRef, Topic, TopicDetailResponse,
	TopicsResponse,
};
pub use visual::{
	FlowData, FlowNode, GeoRegion, GeoState, GeographicData, HierarchyBranch, HierarchyData,
	HierarchyNode, LayeredData, LayerItem, LegendEntry, MapType, PayloadError, RegionItem,
	TimelineData, TimelineEvent, TimelinePhase, VisualData, VisualKind,
};

use serde::{Deserialize, Deserializer};

/// Accepts `"1857"`, `1857` or `null` for fields the backend is loose about.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<serde_json::Value>::deserialize(deserializer)?;
	Ok(match value {
		None | Some(serde_json::Value::Null) => None,
		Some(serde_json::Value::String(s)) => Some(s),
		Some(other) => Some(other.to_string()),
	})
}

/// Like [`opt_string_or_number`] for required identifiers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}
