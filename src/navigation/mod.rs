//! Subject and topic navigation.
//!
//! [`state`] is the pure state machine, [`controller`] drives it against a
//! [`ConceptMapApi`](crate::api::ConceptMapApi), and [`page`] renders it.

pub mod controller;
pub mod page;
pub mod state;

pub use controller::TopicNavigator;
pub use page::ConceptMapPage;
pub use state::{NavigationState, Phase, SubjectTicket, TopicContent, TopicRequest, TopicTicket};
