//! Phase bucketing and expansion state for the timeline.

use std::collections::HashSet;

use crate::diagnostics::{self, DropKind};
use crate::model::{SelectionEvent, TimelineData, TimelineEvent};

/// Which phase a bucket represents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKey {
	/// Stand-in phase used when the data declares no phases.
	Implicit,
	Named(String),
}

/// Events of one phase, as indices into `TimelineData::events`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseBucket {
	pub key: PhaseKey,
	/// Index into `TimelineData::phases`, `None` for the implicit phase.
	pub phase: Option<usize>,
	pub events: Vec<usize>,
}

/// Stable key for an event: its id, or its position when it has none.
pub fn event_key(event: &TimelineEvent, idx: usize) -> String {
	event.id.clone().unwrap_or_else(|| format!("#{idx}"))
}

/// Groups events by phase in input order.
///
/// With no declared phases every event goes into a single implicit bucket.
/// Otherwise an event whose phase is missing or undeclared belongs to no
/// bucket and is recorded as a diagnostic.
pub fn bucket_events(data: &TimelineData) -> Vec<PhaseBucket> {
	if data.phases.is_empty() {
		return vec![PhaseBucket {
			key: PhaseKey::Implicit,
			phase: None,
			events: (0..data.events.len()).collect(),
		}];
	}

	let mut buckets: Vec<PhaseBucket> = data
		.phases
		.iter()
		.enumerate()
		.map(|(i, phase)| PhaseBucket {
			key: PhaseKey::Named(phase.id.clone()),
			phase: Some(i),
			events: Vec::new(),
		})
		.collect();

	for (idx, event) in data.events.iter().enumerate() {
		let bucket = event
			.phase
			.as_deref()
			.and_then(|p| data.phases.iter().position(|phase| phase.id == p));
		match bucket {
			Some(b) => buckets[b].events.push(idx),
			None => diagnostics::record(
				DropKind::OrphanTimelineEvent,
				&format!("{} (phase {:?})", event.title, event.phase),
			),
		}
	}

	buckets
}

/// Which phase and which events are expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimelineExpansion {
	/// `None` means every phase is expanded.
	pub expanded_phase: Option<String>,
	pub expanded_events: HashSet<String>,
}

impl TimelineExpansion {
	pub fn is_phase_expanded(&self, key: &PhaseKey) -> bool {
		match (key, &self.expanded_phase) {
			(PhaseKey::Implicit, _) | (_, None) => true,
			(PhaseKey::Named(id), Some(expanded)) => id == expanded,
		}
	}

	/// Focuses `id`, or restores all-expanded if `id` was already focused.
	pub fn toggle_phase(&mut self, id: &str) {
		if self.expanded_phase.as_deref() == Some(id) {
			self.expanded_phase = None;
		} else {
			self.expanded_phase = Some(id.to_string());
		}
	}

	pub fn is_event_expanded(&self, key: &str) -> bool {
		self.expanded_events.contains(key)
	}

	/// Flips an event's detail expansion; returns whether it is now open.
	pub fn toggle_event(&mut self, key: &str) -> bool {
		if self.expanded_events.remove(key) {
			false
		} else {
			self.expanded_events.insert(key.to_string());
			true
		}
	}
}

pub fn event_selection(event: &TimelineEvent) -> SelectionEvent {
	let description = match (&event.year, &event.description) {
		(_, Some(d)) => d.clone(),
		(Some(year), None) => year.clone(),
		(None, None) => String::new(),
	};
	let selection = SelectionEvent::new(&event.title, description);
	match &event.details {
		Some(details) => selection.with_info(details.clone()),
		None => selection,
	}
}

/// First numeric year in a free-form year string (`"1857"`, `"c. 320 BCE"`).
fn leading_year(s: &str) -> Option<i32> {
	let digits: String = s
		.chars()
		.skip_while(|c| !c.is_ascii_digit())
		.take_while(|c| c.is_ascii_digit())
		.collect();
	let year: i32 = digits.parse().ok()?;
	let upper = s.to_ascii_uppercase();
	Some(if upper.contains("BC") { -year } else { year })
}

/// Years covered by the axis: the declared span, completed from event years.
pub fn year_span(data: &TimelineData) -> Option<(i32, i32)> {
	let years: Vec<i32> = data
		.events
		.iter()
		.filter_map(|e| e.year.as_deref().and_then(leading_year))
		.collect();
	let start = data.start_year.or_else(|| years.iter().copied().min())?;
	let end = data.end_year.or_else(|| years.iter().copied().max())?;
	Some((start.min(end), start.max(end)))
}

/// Evenly spaced tick years including both ends, at most `max_ticks` of them.
pub fn axis_ticks(start: i32, end: i32, max_ticks: usize) -> Vec<i32> {
	// Deep-time spans overflow i32 arithmetic.
	let span = (i64::from(end) - i64::from(start)).max(0);
	if span == 0 || max_ticks < 2 {
		return vec![start];
	}
	let intervals = ((max_ticks - 1) as i64).min(span);
	(0..=intervals)
		.map(|i| (i64::from(start) + span * i / intervals) as i32)
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn data(value: serde_json::Value) -> TimelineData {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn no_phases_means_single_implicit_bucket() {
		let data = data(json!({
			"events": [{"year": 1857, "title": "Revolt"}, {"year": 1885, "title": "INC"}]
		}));
		let buckets = bucket_events(&data);
		assert_eq!(
			buckets,
			vec![PhaseBucket {
				key: PhaseKey::Implicit,
				phase: None,
				events: vec![0, 1],
			}]
		);
		assert!(TimelineExpansion::default().is_phase_expanded(&buckets[0].key));
	}

	#[test]
	fn events_bucket_by_phase_and_orphans_are_dropped() {
		diagnostics::reset();
		let data = data(json!({
			"phases": [{"id": "early", "title": "Early"}, {"id": "late", "title": "Late"}],
			"events": [
				{"title": "a", "phase": "late"},
				{"title": "b", "phase": "early"},
				{"title": "c", "phase": "missing"},
				{"title": "d"},
				{"title": "e", "phase": "late"}
			]
		}));
		let buckets = bucket_events(&data);
		assert_eq!(buckets[0].events, vec![1]);
		assert_eq!(buckets[1].events, vec![0, 4]);
		assert_eq!(diagnostics::count(DropKind::OrphanTimelineEvent), 2);
	}

	#[test]
	fn clicking_expanded_phase_restores_all() {
		let mut expansion = TimelineExpansion::default();
		let (early, late) = (
			PhaseKey::Named("early".into()),
			PhaseKey::Named("late".into()),
		);

		expansion.toggle_phase("early");
		assert!(expansion.is_phase_expanded(&early));
		assert!(!expansion.is_phase_expanded(&late));

		expansion.toggle_phase("late");
		assert!(!expansion.is_phase_expanded(&early));

		expansion.toggle_phase("late");
		assert_eq!(expansion.expanded_phase, None);
		assert!(expansion.is_phase_expanded(&early));
		assert!(expansion.is_phase_expanded(&late));
	}

	#[test]
	fn events_toggle_independently() {
		let mut expansion = TimelineExpansion::default();
		assert!(expansion.toggle_event("#0"));
		assert!(expansion.toggle_event("ev-2"));
		assert!(!expansion.toggle_event("#0"));
		assert!(!expansion.is_event_expanded("#0"));
		assert!(expansion.is_event_expanded("ev-2"));
	}

	#[test]
	fn span_falls_back_to_event_years() {
		let data = data(json!({
			"startYear": 1900,
			"events": [
				{"year": "1919", "title": "a"},
				{"year": "c. 1947", "title": "b"},
				{"year": "undated", "title": "c"}
			]
		}));
		assert_eq!(year_span(&data), Some((1900, 1947)));
		assert_eq!(year_span(&TimelineData::default()), None);
	}

	#[test]
	fn ticks_cover_both_ends() {
		assert_eq!(axis_ticks(1900, 2000, 6), vec![1900, 1920, 1940, 1960, 1980, 2000]);
		assert_eq!(axis_ticks(1947, 1950, 6), vec![1947, 1948, 1949, 1950]);
		assert_eq!(axis_ticks(1947, 1947, 6), vec![1947]);
	}

	#[test]
	fn deep_time_ticks_do_not_overflow() {
		assert_eq!(
			axis_ticks(-540_000_000, 0, 6),
			vec![-540_000_000, -432_000_000, -324_000_000, -216_000_000, -108_000_000, 0]
		);
		let ticks = axis_ticks(i32::MIN, i32::MAX, 3);
		assert_eq!(ticks.first(), Some(&i32::MIN));
		assert_eq!(ticks.last(), Some(&i32::MAX));
		assert!(ticks.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn span_keeps_extreme_bounds() {
		let data = data(json!({"startYear": i32::MAX, "endYear": i32::MIN}));
		let (start, end) = year_span(&data).unwrap();
		assert_eq!((start, end), (i32::MIN, i32::MAX));
		assert_eq!(axis_ticks(start, end, 2), vec![i32::MIN, i32::MAX]);
	}

	#[test]
	fn selection_prefers_description_over_year() {
		let event: TimelineEvent = serde_json::from_value(json!({
			"year": 1950, "title": "Constitution", "details": {"significance": "Republic"}
		}))
		.unwrap();
		let selection = event_selection(&event);
		assert_eq!(selection.description, "1950");
		assert!(selection.info.is_some());
	}
}
