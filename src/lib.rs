//! gridtile - tile rendering for reinforcement-learning grid worlds
//!
//! `core` is the substrate-independent tile engine: data model, style
//! tokens, the renderer, memoization and interaction dispatch. `terminal`
//! rasterizes rendered tiles with crossterm, and `run` hosts the demo
//! viewer.

pub mod cli;
pub mod config;
pub mod core;
pub mod run;
pub mod terminal;
pub mod user_config;
