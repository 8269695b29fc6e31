//! The selection contract shared by all diagram renderers.

use super::details::DetailValue;

/// Emitted by any renderer when the user selects a displayed element.
///
/// The host page consumes these uniformly to fill its detail panel, which is
/// what lets structurally unrelated renderers be swapped per topic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionEvent {
	pub title: String,
	pub description: String,
	pub info: Option<DetailValue>,
}

impl SelectionEvent {
	pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			info: None,
		}
	}

	/// Attaches `info` unless it carries nothing to show.
	pub fn with_info(mut self, info: DetailValue) -> Self {
		if !info.is_empty() {
			self.info = Some(info);
		}
		self
	}

	/// Builds an event from a label and an `info` object, lifting
	/// `info.description` into the description and keeping the rest as info.
	pub fn from_labelled(
		label: &str,
		description: Option<&str>,
		info: Option<&DetailValue>,
	) -> Self {
		let from_info = info
			.and_then(|i| i.field("description"))
			.and_then(DetailValue::as_text);
		let description = description.or(from_info).unwrap_or_default();
		let event = Self::new(label, description);
		match info {
			Some(info) => event.with_info(info.without("description")),
			None => event,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn lifts_description_out_of_info() {
		let info: DetailValue = serde_json::from_value(json!({
			"description": "Raw inputs enter here",
			"examples": ["sensors"]
		}))
		.unwrap();

		let event = SelectionEvent::from_labelled("Input", None, Some(&info));

		assert_eq!(event.title, "Input");
		assert_eq!(event.description, "Raw inputs enter here");
		assert_eq!(
			event.info,
			Some(DetailValue::Map(vec![(
				"examples".into(),
				DetailValue::List(vec![DetailValue::Text("sensors".into())])
			)]))
		);
	}

	#[test]
	fn explicit_description_wins_and_empty_info_is_dropped() {
		let info: DetailValue = serde_json::from_value(json!({"description": "ignored"})).unwrap();
		let event = SelectionEvent::from_labelled("Root", Some("explicit"), Some(&info));
		assert_eq!(event.description, "explicit");
		assert_eq!(event.info, None);
	}
}
