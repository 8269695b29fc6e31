//! Timeline of events grouped into collapsible phases.

mod component;
pub mod model;

pub use component::Timeline;
pub use model::{PhaseBucket, PhaseKey, TimelineExpansion, bucket_events};
