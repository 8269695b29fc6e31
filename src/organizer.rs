//! Groups a flat topic list into the chapters of a learning path.

use std::collections::{HashMap, HashSet};

use crate::model::{RoadmapChapter, Topic};

/// Title of the single chapter produced when there is no roadmap.
pub const ALL_TOPICS: &str = "All Topics";
/// Title of the trailing chapter holding topics no roadmap chapter claims.
pub const OTHER_TOPICS: &str = "Other Topics";

/// Roadmap metadata carried alongside an organized chapter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChapterMeta {
	pub estimated_time: Option<String>,
	pub difficulty: Option<String>,
	pub importance: Option<String>,
	pub key_takeaways: Vec<String>,
}

impl From<&RoadmapChapter> for ChapterMeta {
	fn from(chapter: &RoadmapChapter) -> Self {
		Self {
			estimated_time: chapter.estimated_time.clone(),
			difficulty: chapter.difficulty.clone(),
			importance: chapter.importance.clone(),
			key_takeaways: chapter.key_takeaways.clone(),
		}
	}
}

/// A chapter of the learning path with the topics it holds, in study order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizedChapter {
	pub chapter_title: String,
	pub chapter_id: Option<String>,
	pub topics: Vec<Topic>,
	pub meta: Option<ChapterMeta>,
}

impl OrganizedChapter {
	fn synthesized(title: &str, topics: Vec<Topic>) -> Self {
		Self {
			chapter_title: title.to_string(),
			chapter_id: None,
			topics,
			meta: None,
		}
	}
}

/// Partitions `topics` into the chapters of `roadmap`.
///
/// Every input topic lands in exactly one output chapter. Chapters follow
/// roadmap order and list members in the roadmap's member order; chapters
/// with no matching topic are omitted. Topics no chapter references are
/// appended, in input order, as a trailing [`OTHER_TOPICS`] chapter. Without a
/// roadmap (or with an empty one) a single [`ALL_TOPICS`] chapter holds the
/// input unchanged.
///
/// A topic referenced by several chapters belongs to the first of them.
pub fn organize(topics: &[Topic], roadmap: Option<&[RoadmapChapter]>) -> Vec<OrganizedChapter> {
	let chapters = match roadmap {
		Some(chapters) if !chapters.is_empty() => chapters,
		_ => return vec![OrganizedChapter::synthesized(ALL_TOPICS, topics.to_vec())],
	};

	// Topics sharing an id travel together so none is lost.
	let mut by_id: HashMap<&str, Vec<&Topic>> = HashMap::new();
	for topic in topics {
		by_id.entry(topic.id.as_str()).or_default().push(topic);
	}

	let mut placed: HashSet<&str> = HashSet::new();
	let mut organized = Vec::with_capacity(chapters.len() + 1);

	for chapter in chapters {
		let mut members = Vec::new();
		for sub in &chapter.sub_topics {
			let Some(matching) = by_id.get(sub.id.as_str()) else {
				continue;
			};
			if placed.insert(sub.id.as_str()) {
				members.extend(matching.iter().map(|t| (*t).clone()));
			}
		}
		if !members.is_empty() {
			organized.push(OrganizedChapter {
				chapter_title: chapter.main_topic.clone(),
				chapter_id: Some(chapter.id.clone()),
				topics: members,
				meta: Some(ChapterMeta::from(chapter)),
			});
		}
	}

	let leftovers: Vec<Topic> = topics
		.iter()
		.filter(|t| !placed.contains(t.id.as_str()))
		.cloned()
		.collect();
	if !leftovers.is_empty() {
		organized.push(OrganizedChapter::synthesized(OTHER_TOPICS, leftovers));
	}

	organized
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::{SubTopicRef, VisualKind};

	fn topic(id: &str) -> Topic {
		Topic {
			id: id.to_string(),
			title: format!("Topic {id}"),
			visual_type: VisualKind::Timeline,
			visual_data: None,
			path: None,
			description: None,
		}
	}

	fn chapter(id: &str, members: &[&str]) -> RoadmapChapter {
		RoadmapChapter {
			id: id.to_string(),
			main_topic: format!("Chapter {id}"),
			sub_topics: members
				.iter()
				.map(|m| SubTopicRef {
					id: m.to_string(),
					title: None,
				})
				.collect(),
			estimated_time: None,
			difficulty: None,
			importance: None,
			key_takeaways: Vec::new(),
		}
	}

	fn ids(chapter: &OrganizedChapter) -> Vec<&str> {
		chapter.topics.iter().map(|t| t.id.as_str()).collect()
	}

	#[test]
	fn no_roadmap_yields_all_topics_in_order() {
		let topics = vec![topic("b"), topic("a"), topic("c")];
		let organized = organize(&topics, None);

		assert_eq!(organized.len(), 1);
		assert_eq!(organized[0].chapter_title, ALL_TOPICS);
		assert_eq!(ids(&organized[0]), vec!["b", "a", "c"]);
	}

	#[test]
	fn empty_roadmap_behaves_like_none() {
		let topics = vec![topic("a")];
		let organized = organize(&topics, Some(&[]));
		assert_eq!(organized[0].chapter_title, ALL_TOPICS);
	}

	#[test]
	fn members_follow_roadmap_order() {
		let topics = vec![topic("t1"), topic("t2"), topic("t3")];
		let roadmap = vec![chapter("c1", &["t3", "t1"]), chapter("c2", &["t2"])];

		let organized = organize(&topics, Some(&roadmap));

		assert_eq!(organized.len(), 2);
		assert_eq!(ids(&organized[0]), vec!["t3", "t1"]);
		assert_eq!(ids(&organized[1]), vec!["t2"]);
		assert_eq!(organized[0].chapter_id.as_deref(), Some("c1"));
	}

	#[test]
	fn empty_chapters_are_omitted_and_unknown_members_ignored() {
		let topics = vec![topic("t1")];
		let roadmap = vec![chapter("c1", &["ghost"]), chapter("c2", &["t1"])];

		let organized = organize(&topics, Some(&roadmap));

		assert_eq!(organized.len(), 1);
		assert_eq!(organized[0].chapter_title, "Chapter c2");
	}

	#[test]
	fn topic_claimed_twice_goes_to_first_chapter() {
		let topics = vec![topic("t1"), topic("t2")];
		let roadmap = vec![chapter("c1", &["t1"]), chapter("c2", &["t1", "t2"])];

		let organized = organize(&topics, Some(&roadmap));

		assert_eq!(ids(&organized[0]), vec!["t1"]);
		assert_eq!(ids(&organized[1]), vec!["t2"]);
	}

	#[test]
	fn full_coverage_produces_no_other_chapter() {
		let topics = vec![topic("t1"), topic("t2")];
		let roadmap = vec![chapter("c1", &["t2", "t1"])];

		let organized = organize(&topics, Some(&roadmap));

		assert!(organized.iter().all(|c| c.chapter_title != OTHER_TOPICS));
	}

	#[test]
	fn geography_scenario() {
		let topics = vec![topic("t1"), topic("t2"), topic("t3")];
		let roadmap = vec![chapter("c1", &["t2"])];

		let organized = organize(&topics, Some(&roadmap));

		assert_eq!(organized.len(), 2);
		assert_eq!(organized[0].chapter_title, "Chapter c1");
		assert_eq!(ids(&organized[0]), vec!["t2"]);
		assert_eq!(organized[1].chapter_title, OTHER_TOPICS);
		assert_eq!(ids(&organized[1]), vec!["t1", "t3"]);
	}
}
