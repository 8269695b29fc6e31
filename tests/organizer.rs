use std::collections::HashSet;

use concept_map::model::{RoadmapChapter, SubTopicRef, Topic, VisualKind};
use concept_map::organizer::{ALL_TOPICS, OTHER_TOPICS, organize};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn topic(id: &str) -> Topic {
	Topic {
		id: id.to_string(),
		title: id.to_uppercase(),
		visual_type: VisualKind::Geographic,
		visual_data: None,
		path: None,
		description: None,
	}
}

fn chapter(id: &str, title: &str, members: &[String]) -> RoadmapChapter {
	RoadmapChapter {
		id: id.to_string(),
		main_topic: title.to_string(),
		sub_topics: members
			.iter()
			.map(|m| SubTopicRef {
				id: m.clone(),
				title: None,
			})
			.collect(),
		estimated_time: None,
		difficulty: None,
		importance: None,
		key_takeaways: Vec::new(),
	}
}

fn ids(topics: &[Topic]) -> Vec<&str> {
	topics.iter().map(|t| t.id.as_str()).collect()
}

proptest! {
	#[test]
	fn prop_organize_partitions_topics(
		topic_ids in proptest::collection::hash_set("[a-f]{1,2}", 0..12),
		chapters in proptest::collection::vec(
			proptest::collection::vec("[a-f]{1,2}", 0..5),
			0..5
		)
	) {
		let topics: Vec<Topic> = topic_ids.iter().map(|id| topic(id)).collect();
		let roadmap: Vec<RoadmapChapter> = chapters
			.iter()
			.enumerate()
			.map(|(i, members)| chapter(&format!("c{i}"), &format!("Chapter {i}"), members))
			.collect();

		let organized = organize(&topics, Some(&roadmap));

		let mut seen = HashSet::new();
		for chapter in &organized {
			// "All Topics" is always present without a roadmap, even when empty.
			if chapter.chapter_title != ALL_TOPICS {
				prop_assert!(!chapter.topics.is_empty());
			}
			for t in &chapter.topics {
				prop_assert!(seen.insert(t.id.clone()), "{} placed twice", t.id);
			}
		}
		prop_assert_eq!(seen, topic_ids);
	}

	#[test]
	fn prop_no_other_chapter_when_everything_is_referenced(
		topic_ids in proptest::collection::vec("[a-z]{3}", 1..10)
	) {
		let topics: Vec<Topic> = topic_ids.iter().map(|id| topic(id)).collect();
		let roadmap = vec![chapter("c1", "Everything", &topic_ids)];
		let organized = organize(&topics, Some(&roadmap));
		prop_assert!(organized.iter().all(|c| c.chapter_title != OTHER_TOPICS));
	}
}

#[test]
fn test_geography_scenario() {
	let topics = vec![topic("t1"), topic("t2"), topic("t3")];
	let roadmap = vec![chapter("c1", "Physical Geography", &["t2".to_string()])];

	let organized = organize(&topics, Some(&roadmap));

	assert_eq!(organized.len(), 2);
	assert_eq!(organized[0].chapter_title, "Physical Geography");
	assert_eq!(ids(&organized[0].topics), vec!["t2"]);
	assert_eq!(organized[1].chapter_title, OTHER_TOPICS);
	assert_eq!(ids(&organized[1].topics), vec!["t1", "t3"]);
}

#[test]
fn test_no_roadmap_keeps_input_order() {
	let topics = vec![topic("b"), topic("a"), topic("c")];

	for roadmap in [None, Some(&[][..])] {
		let organized = organize(&topics, roadmap);
		assert_eq!(organized.len(), 1);
		assert_eq!(organized[0].chapter_title, ALL_TOPICS);
		assert_eq!(ids(&organized[0].topics), vec!["b", "a", "c"]);
	}
}

#[test]
fn test_empty_topic_list_still_has_all_topics() {
	for roadmap in [None, Some(&[][..])] {
		let organized = organize(&[], roadmap);
		assert_eq!(organized.len(), 1);
		assert_eq!(organized[0].chapter_title, ALL_TOPICS);
		assert!(organized[0].topics.is_empty());
	}
}

#[test]
fn test_chapters_follow_roadmap_member_order() {
	let topics = vec![topic("t1"), topic("t2"), topic("t3")];
	let roadmap = vec![
		chapter("c1", "First", &["t3".into(), "t1".into()]),
		chapter("c2", "Second", &["t1".into(), "ghost".into(), "t2".into()]),
		chapter("c3", "Empty", &["ghost".into()]),
	];

	let organized = organize(&topics, Some(&roadmap));
	let titles: Vec<&str> = organized.iter().map(|c| c.chapter_title.as_str()).collect();

	assert_eq!(titles, vec!["First", "Second"]);
	assert_eq!(ids(&organized[0].topics), vec!["t3", "t1"]);
	assert_eq!(ids(&organized[1].topics), vec!["t2"]);
}
