//! Subjects, topics and roadmaps as served by the concept map API.

use serde::Deserialize;

use super::details::DetailValue;
use super::visual::VisualKind;
use super::{opt_string_or_number, string_or_number};

/// A subject the user can pick (e.g. "Geography").
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Subject {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, alias = "title")]
	pub name: String,
}

/// `GET /conceptmap/subjects`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubjectsResponse {
	#[serde(default)]
	pub subjects: Vec<Subject>,
}

/// A single unit of study content and the diagram kind that displays it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, alias = "name")]
	pub title: String,
	#[serde(default, alias = "visualKind", alias = "type")]
	pub visual_type: VisualKind,
	/// Precomputed variant payload, parsed once the kind is dispatched.
	#[serde(default, alias = "data")]
	pub visual_data: Option<serde_json::Value>,
	/// Static-content path; topics carrying one need no detail fetch.
	#[serde(default)]
	pub path: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

impl Topic {
	pub fn has_static_content(&self) -> bool {
		self.path.as_deref().is_some_and(|p| !p.trim().is_empty())
	}

	/// Fills fields the detail response left out from the basic list entry.
	pub fn merged_with(mut self, basic: &Topic) -> Topic {
		if self.id.is_empty() {
			self.id = basic.id.clone();
		}
		if self.title.is_empty() {
			self.title = basic.title.clone();
		}
		if matches!(&self.visual_type, VisualKind::Unknown(tag) if tag.is_empty()) {
			self.visual_type = basic.visual_type.clone();
		}
		if self.visual_data.is_none() {
			self.visual_data = basic.visual_data.clone();
		}
		if self.path.is_none() {
			self.path = basic.path.clone();
		}
		if self.description.is_none() {
			self.description = basic.description.clone();
		}
		self
	}
}

/// `GET /conceptmap/topics/{subjectId}`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopicsResponse {
	#[serde(default)]
	pub topics: Vec<Topic>,
}

/// `GET /conceptmap/topic/{topicId}` answers either `{topic: {...}}` or the topic itself.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TopicDetailResponse {
	Wrapped { topic: Topic },
	Bare(Topic),
}

impl TopicDetailResponse {
	pub fn into_topic(self) -> Topic {
		match self {
			TopicDetailResponse::Wrapped { topic } | TopicDetailResponse::Bare(topic) => topic,
		}
	}
}

/// Reference to a member topic inside a roadmap chapter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubTopicRef {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default)]
	pub title: Option<String>,
}

/// An ordered group of topics in the suggested study sequence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapChapter {
	#[serde(default, deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, alias = "title")]
	pub main_topic: String,
	#[serde(default)]
	pub sub_topics: Vec<SubTopicRef>,
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub estimated_time: Option<String>,
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub difficulty: Option<String>,
	#[serde(default, deserialize_with = "opt_string_or_number")]
	pub importance: Option<String>,
	#[serde(default)]
	pub key_takeaways: Vec<String>,
}

/// `GET /conceptmap/roadmap/{subjectId}`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub learning_path: Option<DetailValue>,
	#[serde(default)]
	pub topics: Vec<RoadmapChapter>,
	#[serde(default)]
	pub study_tips: Vec<String>,
	#[serde(default)]
	pub exam_strategy: Option<DetailValue>,
}
