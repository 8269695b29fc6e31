//! Leptos components: the diagram renderers, the dispatcher that picks one
//! per topic, and the shared detail view.

pub mod detail_view;
pub mod dispatcher;
pub mod geographic;
pub mod hierarchy;
pub mod sequence;
pub mod timeline;
