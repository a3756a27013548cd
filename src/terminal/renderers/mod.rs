//! Specialized renderers for TUI components
//!
//! Each renderer paints one kind of screen element into the back buffer.

mod dirty_tracker;
pub mod status_renderer;
pub mod tile_painter;

pub use dirty_tracker::DirtyTracker;
pub use status_renderer::StatusRenderer;
pub use tile_painter::TilePainter;
