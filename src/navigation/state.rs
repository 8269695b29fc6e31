//! Navigation state machine.
//!
//! ```text
//! NoSubject -> LoadingTopics -> TopicsReady <-> TopicSelected
//!                           \-> TopicsUnavailable
//! ```
//!
//! plus the orthogonal `roadmap_loading` flag. Every async request is issued
//! under a ticket naming the selection it was made for; results whose ticket
//! no longer matches the current selection are dropped instead of committed,
//! so a slow response for a superseded subject or topic cannot overwrite
//! newer state.

use log::{info, warn};

use crate::api::FetchError;
use crate::diagnostics::{self, DropKind};
use crate::model::{Roadmap, Subject, Topic};
use crate::organizer::{OrganizedChapter, organize};

/// Identifies the subject selection a topic-list or roadmap request belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectTicket {
	pub subject_id: String,
	generation: u64,
}

/// Identifies the topic selection a detail request belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicTicket {
	pub subject: SubjectTicket,
	pub topic_id: String,
	generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	NoSubject,
	LoadingTopics,
	TopicsReady,
	/// The topic list could not be fetched; shown as an inline message.
	TopicsUnavailable,
	TopicSelected,
}

/// The selected topic's payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TopicContent {
	/// Detail fetch in flight; holds the basic topic from the list.
	Loading(Topic),
	Ready(Topic),
}

impl TopicContent {
	pub fn topic(&self) -> &Topic {
		match self {
			TopicContent::Loading(t) | TopicContent::Ready(t) => t,
		}
	}
}

/// What [`NavigationState::select_topic`] asks the caller to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopicRequest {
	/// Content is already present; nothing to fetch.
	Immediate,
	/// Fetch the topic detail under this ticket.
	Fetch(TopicTicket),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
	subjects: Vec<Subject>,
	subjects_loading: bool,
	subjects_error: Option<String>,
	subject_id: Option<String>,
	subject_generation: u64,
	topic_generation: u64,
	topics: Vec<Topic>,
	topics_loading: bool,
	topics_error: Option<String>,
	roadmap: Option<Roadmap>,
	roadmap_loading: bool,
	selected: Option<TopicContent>,
}

impl NavigationState {
	pub fn phase(&self) -> Phase {
		if self.subject_id.is_none() {
			Phase::NoSubject
		} else if self.topics_loading {
			Phase::LoadingTopics
		} else if self.topics_error.is_some() {
			Phase::TopicsUnavailable
		} else if matches!(self.selected, Some(TopicContent::Ready(_))) {
			Phase::TopicSelected
		} else {
			Phase::TopicsReady
		}
	}

	pub fn subjects(&self) -> &[Subject] {
		&self.subjects
	}

	pub fn subjects_loading(&self) -> bool {
		self.subjects_loading
	}

	pub fn subjects_error(&self) -> Option<&str> {
		self.subjects_error.as_deref()
	}

	pub fn subject_id(&self) -> Option<&str> {
		self.subject_id.as_deref()
	}

	pub fn topics(&self) -> &[Topic] {
		&self.topics
	}

	pub fn topics_error(&self) -> Option<&str> {
		self.topics_error.as_deref()
	}

	pub fn roadmap(&self) -> Option<&Roadmap> {
		self.roadmap.as_ref()
	}

	pub fn roadmap_loading(&self) -> bool {
		self.roadmap_loading
	}

	pub fn selected(&self) -> Option<&TopicContent> {
		self.selected.as_ref()
	}

	/// Topics grouped into the learning path.
	pub fn chapters(&self) -> Vec<OrganizedChapter> {
		organize(
			&self.topics,
			self.roadmap.as_ref().map(|r| r.topics.as_slice()),
		)
	}

	pub fn begin_subjects(&mut self) {
		self.subjects_loading = true;
		self.subjects_error = None;
	}

	pub fn apply_subjects(&mut self, result: Result<Vec<Subject>, FetchError>) {
		self.subjects_loading = false;
		match result {
			Ok(subjects) => {
				info!("concept-map: {} subjects available", subjects.len());
				self.subjects = subjects;
			}
			Err(e) => {
				warn!("concept-map: subjects unavailable: {}", e);
				self.subjects_error = Some(e.to_string());
			}
		}
	}

	/// Switches to `subject_id`, discarding topics, roadmap and selection.
	pub fn select_subject(&mut self, subject_id: &str) -> SubjectTicket {
		self.subject_generation += 1;
		self.topic_generation += 1;
		self.subject_id = Some(subject_id.to_string());
		self.topics.clear();
		self.topics_loading = true;
		self.topics_error = None;
		self.roadmap = None;
		self.roadmap_loading = true;
		self.selected = None;
		SubjectTicket {
			subject_id: subject_id.to_string(),
			generation: self.subject_generation,
		}
	}

	fn is_current_subject(&self, ticket: &SubjectTicket) -> bool {
		ticket.generation == self.subject_generation
			&& self.subject_id.as_deref() == Some(ticket.subject_id.as_str())
	}

	fn reject_stale(what: &str, subject_id: &str) -> bool {
		diagnostics::record(
			DropKind::StaleResponse,
			&format!("{} subject={}", what, subject_id),
		);
		false
	}

	/// Commits a topic-list result. Returns false if the ticket is stale.
	pub fn apply_topics(
		&mut self,
		ticket: &SubjectTicket,
		result: Result<Vec<Topic>, FetchError>,
	) -> bool {
		if !self.is_current_subject(ticket) {
			return Self::reject_stale("topics", &ticket.subject_id);
		}
		self.topics_loading = false;
		match result {
			Ok(topics) => {
				info!(
					"concept-map: subject {} has {} topics",
					ticket.subject_id,
					topics.len()
				);
				self.topics = topics;
			}
			Err(e) => {
				warn!(
					"concept-map: topics for {} unavailable: {}",
					ticket.subject_id, e
				);
				self.topics_error = Some(e.to_string());
			}
		}
		true
	}

	/// Commits a roadmap result. Failures degrade to "no roadmap".
	pub fn apply_roadmap(
		&mut self,
		ticket: &SubjectTicket,
		result: Result<Option<Roadmap>, FetchError>,
	) -> bool {
		if !self.is_current_subject(ticket) {
			return Self::reject_stale("roadmap", &ticket.subject_id);
		}
		self.roadmap_loading = false;
		self.roadmap = match result {
			Ok(roadmap) => roadmap,
			Err(e) => {
				warn!(
					"concept-map: roadmap for {} unavailable, using flat list: {}",
					ticket.subject_id, e
				);
				None
			}
		};
		true
	}

	/// Selects a topic from the current list.
	///
	/// A topic carrying a static-content path is shown at once. Anything else
	/// needs a detail fetch first. Returns `None` for unknown ids.
	pub fn select_topic(&mut self, topic_id: &str) -> Option<TopicRequest> {
		let subject_id = self.subject_id.clone()?;
		let topic = self.topics.iter().find(|t| t.id == topic_id)?.clone();
		self.topic_generation += 1;
		if topic.has_static_content() {
			self.selected = Some(TopicContent::Ready(topic));
			return Some(TopicRequest::Immediate);
		}
		self.selected = Some(TopicContent::Loading(topic));
		Some(TopicRequest::Fetch(TopicTicket {
			subject: SubjectTicket {
				subject_id,
				generation: self.subject_generation,
			},
			topic_id: topic_id.to_string(),
			generation: self.topic_generation,
		}))
	}

	/// Commits a topic-detail result, falling back to the basic topic when
	/// the detail is missing or failed. Returns false if the ticket is stale.
	pub fn apply_topic_detail(
		&mut self,
		ticket: &TopicTicket,
		result: Result<Option<Topic>, FetchError>,
	) -> bool {
		let current = self.is_current_subject(&ticket.subject)
			&& ticket.generation == self.topic_generation;
		let basic = match &self.selected {
			Some(TopicContent::Loading(t)) if current && t.id == ticket.topic_id => t.clone(),
			_ => return Self::reject_stale("topic detail", &ticket.subject.subject_id),
		};
		let topic = match result {
			Ok(Some(detail)) => detail.merged_with(&basic),
			Ok(None) => basic,
			Err(e) => {
				warn!(
					"concept-map: detail for topic {} unavailable, showing summary: {}",
					ticket.topic_id, e
				);
				basic
			}
		};
		self.selected = Some(TopicContent::Ready(topic));
		true
	}

	/// Back from a topic to the list.
	pub fn clear_topic(&mut self) {
		self.topic_generation += 1;
		self.selected = None;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::VisualKind;

	fn topic(id: &str, path: Option<&str>) -> Topic {
		Topic {
			id: id.to_string(),
			title: id.to_uppercase(),
			visual_type: VisualKind::Flow,
			visual_data: None,
			path: path.map(str::to_string),
			description: None,
		}
	}

	#[test]
	fn subject_selection_walks_the_phases() {
		let mut state = NavigationState::default();
		assert_eq!(state.phase(), Phase::NoSubject);

		let ticket = state.select_subject("geo");
		assert_eq!(state.phase(), Phase::LoadingTopics);
		assert!(state.roadmap_loading());

		assert!(state.apply_topics(&ticket, Ok(vec![topic("t1", None)])));
		assert_eq!(state.phase(), Phase::TopicsReady);
		// Roadmap still pending does not gate the topic list.
		assert!(state.roadmap_loading());

		assert!(state.apply_roadmap(&ticket, Err(FetchError::Status(500))));
		assert!(!state.roadmap_loading());
		assert_eq!(state.chapters()[0].chapter_title, "All Topics");
	}

	#[test]
	fn stale_topics_are_discarded() {
		diagnostics::reset();
		let mut state = NavigationState::default();
		let old = state.select_subject("history");
		let new = state.select_subject("geo");

		assert!(!state.apply_topics(&old, Ok(vec![topic("h1", None)])));
		assert_eq!(state.phase(), Phase::LoadingTopics);
		assert_eq!(diagnostics::count(DropKind::StaleResponse), 1);

		assert!(state.apply_topics(&new, Ok(vec![topic("g1", None)])));
		assert_eq!(state.topics()[0].id, "g1");
	}

	#[test]
	fn reselecting_same_subject_still_invalidates_old_ticket() {
		let mut state = NavigationState::default();
		let first = state.select_subject("geo");
		let second = state.select_subject("geo");
		assert!(!state.apply_roadmap(&first, Ok(None)));
		assert!(state.apply_roadmap(&second, Ok(None)));
	}

	#[test]
	fn topic_with_path_needs_no_fetch() {
		let mut state = NavigationState::default();
		let ticket = state.select_subject("geo");
		state.apply_topics(&ticket, Ok(vec![topic("t5", Some("/static/t5.json"))]));

		assert_eq!(state.select_topic("t5"), Some(TopicRequest::Immediate));
		assert_eq!(state.phase(), Phase::TopicSelected);
		assert_eq!(state.selected().unwrap().topic().id, "t5");
	}

	#[test]
	fn failed_detail_falls_back_to_basic_topic() {
		let mut state = NavigationState::default();
		let ticket = state.select_subject("geo");
		state.apply_topics(&ticket, Ok(vec![topic("t1", None)]));

		let Some(TopicRequest::Fetch(detail)) = state.select_topic("t1") else {
			panic!("expected a detail fetch");
		};
		assert_eq!(state.phase(), Phase::TopicsReady);

		assert!(state.apply_topic_detail(&detail, Err(FetchError::Network("offline".into()))));
		assert_eq!(
			state.selected(),
			Some(&TopicContent::Ready(topic("t1", None)))
		);
	}

	#[test]
	fn detail_for_superseded_topic_is_dropped() {
		let mut state = NavigationState::default();
		let ticket = state.select_subject("geo");
		state.apply_topics(&ticket, Ok(vec![topic("t1", None), topic("t2", None)]));

		let Some(TopicRequest::Fetch(first)) = state.select_topic("t1") else {
			panic!("expected a detail fetch");
		};
		let Some(TopicRequest::Fetch(second)) = state.select_topic("t2") else {
			panic!("expected a detail fetch");
		};

		assert!(!state.apply_topic_detail(&first, Ok(Some(topic("t1", None)))));
		assert_eq!(state.selected().unwrap().topic().id, "t2");
		assert!(state.apply_topic_detail(&second, Ok(None)));
		assert_eq!(state.phase(), Phase::TopicSelected);
	}

	#[test]
	fn subject_change_discards_selection() {
		let mut state = NavigationState::default();
		let ticket = state.select_subject("geo");
		state.apply_topics(&ticket, Ok(vec![topic("t5", Some("/p"))]));
		state.select_topic("t5");

		state.select_subject("history");
		assert_eq!(state.phase(), Phase::LoadingTopics);
		assert!(state.selected().is_none());
		assert!(state.topics().is_empty());
	}

	#[test]
	fn topic_list_failure_is_reported_inline() {
		let mut state = NavigationState::default();
		let ticket = state.select_subject("geo");
		state.apply_topics(&ticket, Err(FetchError::Timeout(15_000)));
		assert_eq!(state.phase(), Phase::TopicsUnavailable);
		assert!(state.topics_error().unwrap().contains("timed out"));
	}
}
