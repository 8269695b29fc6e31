//! Structured records of data that was silently left out of a rendering.
//!
//! Unresolvable region ids, orphaned timeline events and the like never reach
//! the user as errors. Each drop is logged and counted here so integration
//! tests (and anyone watching the console) can notice data/asset drift.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

/// What kind of element was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropKind {
	/// A region id with no drawable element in the active map.
	UnresolvedRegion,
	/// A timeline event whose `phase` matches no declared phase.
	OrphanTimelineEvent,
	/// A hierarchy node reusing an id already placed in the graph.
	DuplicateHierarchyId,
	/// An async response for a selection that is no longer current.
	StaleResponse,
}

impl DropKind {
	pub fn as_str(self) -> &'static str {
		match self {
			DropKind::UnresolvedRegion => "unresolved_region",
			DropKind::OrphanTimelineEvent => "orphan_timeline_event",
			DropKind::DuplicateHierarchyId => "duplicate_hierarchy_id",
			DropKind::StaleResponse => "stale_response",
		}
	}
}

impl fmt::Display for DropKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

thread_local! {
	static COUNTERS: RefCell<HashMap<DropKind, usize>> = RefCell::new(HashMap::new());
}

/// Counts one dropped element and logs it.
pub fn record(kind: DropKind, subject: &str) {
	COUNTERS.with(|c| *c.borrow_mut().entry(kind).or_insert(0) += 1);
	match kind {
		// Stale responses are routine under rapid re-selection.
		DropKind::StaleResponse => debug!("concept-map: drop kind={} subject={}", kind, subject),
		_ => warn!("concept-map: drop kind={} subject={}", kind, subject),
	}
}

/// Number of drops recorded for `kind` on this thread.
pub fn count(kind: DropKind) -> usize {
	COUNTERS.with(|c| c.borrow().get(&kind).copied().unwrap_or(0))
}

/// All counters recorded on this thread.
pub fn snapshot() -> HashMap<DropKind, usize> {
	COUNTERS.with(|c| c.borrow().clone())
}

pub fn reset() {
	COUNTERS.with(|c| c.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_per_kind() {
		reset();
		record(DropKind::UnresolvedRegion, "XX");
		record(DropKind::UnresolvedRegion, "YY");
		record(DropKind::StaleResponse, "subject=s1");

		assert_eq!(count(DropKind::UnresolvedRegion), 2);
		assert_eq!(count(DropKind::StaleResponse), 1);
		assert_eq!(count(DropKind::OrphanTimelineEvent), 0);
		assert_eq!(snapshot().len(), 2);

		reset();
		assert_eq!(count(DropKind::UnresolvedRegion), 0);
	}
}
