//! Re-render decisions and render caches
//!
//! `should_recompute` compares two consecutive inputs of the same tile and
//! says whether anything visible can have changed. `TileMemo` keeps the
//! last input and output of one tile, `MemoArena` keeps one memo per grid
//! position.

use std::collections::HashMap;

use crate::core::format::round2;
use crate::core::style::BadgeStyle;
use crate::core::tile::{Icon, Position, TileRenderState, TileType};
use crate::core::tile_renderer::{HeatmapLayer, TileRenderer, TileVisual};

/// Single-slot cache keyed by the inputs of one derived value
#[derive(Debug, Clone)]
pub struct Memoized<K, V> {
    slot: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memoized<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V: Clone> Memoized<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                self.hits += 1;
                return value.clone();
            }
        }
        self.misses += 1;
        let value = compute();
        self.slot = Some((key, value.clone()));
        value
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

/// Cached derived values of one tile
#[derive(Debug, Clone, Default)]
pub struct DerivedCache {
    /// Keyed by the bit pattern of the rounded value
    pub formatted: Memoized<u64, String>,
    pub badge: Memoized<(bool, bool, TileType), BadgeStyle>,
    pub heatmap: Memoized<(bool, u32, i64, TileType), Option<HeatmapLayer>>,
}

fn same_icon(a: &Option<Icon>, b: &Option<Icon>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same(b),
        _ => false,
    }
}

/// Whether `next` can look different from `prev`.
///
/// Position and accessible label are not compared; handlers only count by
/// presence, the icon only by identity, and the value only after rounding
/// to the displayed precision.
pub fn should_recompute(prev: &TileRenderState, next: &TileRenderState) -> bool {
    let unchanged = prev.tile_type == next.tile_type
        && prev.is_agent == next.is_agent
        && prev.is_goal == next.is_goal
        && prev.show_values == next.show_values
        && prev.show_heatmap == next.show_heatmap
        && prev.show_actions == next.show_actions
        && prev.best_action == next.best_action
        && prev.visits == next.visits
        && prev.max_visits == next.max_visits
        && prev.tile_size == next.tile_size
        && prev.reward_animation == next.reward_animation
        && same_icon(&prev.icon, &next.icon)
        && round2(prev.value) == round2(next.value)
        && prev.handlers.presence() == next.handlers.presence();
    !unchanged
}

/// Outcome of feeding a new input to a memo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Recomputed,
    Skipped,
}

/// Last input and output of a single tile instance
#[derive(Debug, Default)]
pub struct TileMemo {
    last: Option<(TileRenderState, TileVisual)>,
    derived: DerivedCache,
    renders: u64,
    skips: u64,
}

impl TileMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `state`, reusing the previous visual when nothing visible
    /// changed. The latest state is always kept so interaction dispatch
    /// sees the newest handlers, and a kept visual takes the new position
    /// and label.
    pub fn update(&mut self, state: TileRenderState) -> RenderOutcome {
        let outcome = match &self.last {
            Some((prev, _)) if !should_recompute(prev, &state) => RenderOutcome::Skipped,
            _ => RenderOutcome::Recomputed,
        };

        match (outcome, self.last.take()) {
            (RenderOutcome::Skipped, Some((_, mut visual))) => {
                self.skips += 1;
                // Uncompared fields still flow into the kept visual
                visual.position = state.position;
                if visual.label != state.accessible_label {
                    visual.label.clone_from(&state.accessible_label);
                }
                self.last = Some((state, visual));
            }
            _ => {
                self.renders += 1;
                let visual = TileRenderer::render_with(&state, &mut self.derived);
                self.last = Some((state, visual));
            }
        }
        outcome
    }

    pub fn state(&self) -> Option<&TileRenderState> {
        self.last.as_ref().map(|(state, _)| state)
    }

    pub fn visual(&self) -> Option<&TileVisual> {
        self.last.as_ref().map(|(_, visual)| visual)
    }

    pub fn derived(&self) -> &DerivedCache {
        &self.derived
    }

    /// (renders, skips)
    pub fn stats(&self) -> (u64, u64) {
        (self.renders, self.skips)
    }
}

/// One memo per grid position
#[derive(Debug, Default)]
pub struct MemoArena {
    tiles: HashMap<Position, TileMemo>,
}

impl MemoArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame of tile states; returns the positions that recomputed
    pub fn update_all<I>(&mut self, states: I) -> Vec<Position>
    where
        I: IntoIterator<Item = TileRenderState>,
    {
        let mut changed = Vec::new();
        let mut skipped = 0usize;
        for state in states {
            let position = state.position;
            let memo = self.tiles.entry(position).or_default();
            match memo.update(state) {
                RenderOutcome::Recomputed => changed.push(position),
                RenderOutcome::Skipped => skipped += 1,
            }
        }
        tracing::trace!(recomputed = changed.len(), skipped, "memo frame");
        changed
    }

    pub fn get(&self, position: Position) -> Option<&TileMemo> {
        self.tiles.get(&position)
    }

    pub fn visuals(&self) -> impl Iterator<Item = &TileVisual> {
        self.tiles.values().filter_map(|memo| memo.visual())
    }

    /// Drop memos whose positions left the grid
    pub fn retain(&mut self, keep: impl Fn(Position) -> bool) {
        self.tiles.retain(|position, _| keep(*position));
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
