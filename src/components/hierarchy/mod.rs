//! Three-tier tree diagram drawn on a canvas.
//!
//! - Fixed grid placement: root on top, branches in the middle row, leaves
//!   centered beneath their branch
//! - Pan, zoom and hover highlighting of a node and its neighbours
//! - Click-to-select with a selection ring
//!
//! The nodes sit in a `force_graph` simulation with every node anchored, so
//! the layout never drifts while the animation loop keeps the edges flowing.

mod component;
pub mod layout;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::HierarchyTree;
pub use layout::{LayoutNode, Tier, TreeLayout};
