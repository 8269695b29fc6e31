//! Choropleth map of India.
//!
//! The map mode is decided once when the component mounts: if the vector map
//! asset loads and parses, regions are drawn from it; otherwise the static
//! coordinate table is drawn as labelled markers. Either way the same styling
//! resolution colors regions and wires selection.

mod component;
mod styling;

pub use component::{GeographicMap, load_registry};
pub use styling::{
	DEFAULT_STATE_COLOR, EMPTY_STATE_COLOR, EMPTY_STATE_OPACITY, REGION_OPACITY, RegionStyle,
	RegionTarget, item_selection, region_selection, resolve_styles, state_selection,
	target_content,
};
