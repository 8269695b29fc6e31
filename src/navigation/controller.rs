//! Async driver for [`NavigationState`].
//!
//! Issues the fetches each transition needs and commits their results back
//! under the ticket they were requested with. A listener sees every state
//! change, which is how the page mirrors the state into a signal.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::api::ConceptMapApi;

use super::state::{NavigationState, TopicRequest};

type Listener = Rc<dyn Fn(&NavigationState)>;

/// Coordinates subject selection, topic/roadmap loading and topic selection.
pub struct TopicNavigator<A> {
	api: Rc<A>,
	state: Rc<RefCell<NavigationState>>,
	listener: Listener,
}

impl<A> Clone for TopicNavigator<A> {
	fn clone(&self) -> Self {
		Self {
			api: self.api.clone(),
			state: self.state.clone(),
			listener: self.listener.clone(),
		}
	}
}

impl<A: ConceptMapApi> TopicNavigator<A> {
	pub fn new(api: A) -> Self {
		Self::with_listener(api, |_| {})
	}

	pub fn with_listener(api: A, listener: impl Fn(&NavigationState) + 'static) -> Self {
		Self {
			api: Rc::new(api),
			state: Rc::new(RefCell::new(NavigationState::default())),
			listener: Rc::new(listener),
		}
	}

	pub fn state(&self) -> Ref<'_, NavigationState> {
		self.state.borrow()
	}

	/// Applies `f` and notifies the listener.
	fn update<R>(&self, f: impl FnOnce(&mut NavigationState) -> R) -> R {
		let result = f(&mut self.state.borrow_mut());
		(self.listener)(&self.state.borrow());
		result
	}

	pub async fn load_subjects(&self) {
		self.update(NavigationState::begin_subjects);
		let result = self.api.subjects().await;
		self.update(|s| s.apply_subjects(result));
	}

	/// Selects a subject and loads its topics and roadmap concurrently.
	///
	/// Each result commits as soon as it arrives, so a slow roadmap never
	/// holds back the topic list.
	pub async fn select_subject(&self, subject_id: &str) {
		let ticket = self.update(|s| s.select_subject(subject_id));

		let topics = async {
			let result = self.api.topics(&ticket.subject_id).await;
			self.update(|s| s.apply_topics(&ticket, result));
		};
		let roadmap = async {
			let result = self.api.roadmap(&ticket.subject_id).await;
			self.update(|s| s.apply_roadmap(&ticket, result));
		};
		futures::join!(topics, roadmap);
	}

	/// Selects a topic, fetching its detail unless it already has content.
	pub async fn select_topic(&self, topic_id: &str) {
		let Some(TopicRequest::Fetch(ticket)) = self.update(|s| s.select_topic(topic_id)) else {
			return;
		};
		let result = self
			.api
			.topic_detail(&ticket.topic_id, &ticket.subject.subject_id)
			.await;
		self.update(|s| s.apply_topic_detail(&ticket, result));
	}

	pub fn clear_topic(&self) {
		self.update(NavigationState::clear_topic);
	}
}
