//! Side panel over the path tree.
//!
//! The panel owns the current tree root and the per-directory expansion
//! state, and renders both into indented text rows. Expansion state is
//! keyed by full path and deliberately lives outside the tree itself.

mod controller;
mod render;
mod view_state;

pub use controller::PanelController;
pub use render::{PanelRow, render};
pub use view_state::PanelState;
