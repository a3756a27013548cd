//! This module constitutes the core, headless, and backend-agnostic tile engine of gridtile.
//! It owns the tile data model, style resolution, value formatting, the renderer
//! itself, re-render memoization, interaction dispatch and grid layout.

pub mod format;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod memo;
pub mod style;
pub mod tile;
pub mod tile_renderer;
