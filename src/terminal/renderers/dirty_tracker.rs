//! Dirty row tracking for incremental terminal output
//!
//! Only rows covered by a tile whose visual was recomputed (or by the
//! status line) are written to the terminal on the next flush.

use crate::core::layout::{GridLayout, Rect};
use crate::core::tile::Position;

#[derive(Debug, Clone)]
pub struct DirtyTracker {
    width: u16,
    height: u16,
    /// Per-row dirty flags (true = needs output)
    dirty_rows: Vec<bool>,
    full_redraw: bool,
}

impl DirtyTracker {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            dirty_rows: vec![true; height as usize],
            full_redraw: true,
        }
    }

    /// Resize the tracker (marks everything dirty)
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.dirty_rows = vec![true; height as usize];
        self.full_redraw = true;
    }

    pub fn mark_full_redraw(&mut self) {
        self.full_redraw = true;
        self.dirty_rows.fill(true);
    }

    pub fn mark_row(&mut self, row: usize) {
        if let Some(flag) = self.dirty_rows.get_mut(row) {
            *flag = true;
        }
    }

    pub fn mark_rect(&mut self, rect: &Rect) {
        for y in rect.y..(rect.y + rect.height) {
            self.mark_row(y);
        }
    }

    /// Mark the rows occupied by each listed tile
    pub fn mark_tiles(&mut self, layout: &GridLayout, positions: &[Position]) {
        for position in positions {
            if let Some(rect) = layout.tile_rect(*position) {
                self.mark_rect(&rect);
            }
        }
    }

    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.full_redraw || self.dirty_rows.get(row).copied().unwrap_or(false)
    }

    pub fn needs_full_redraw(&self) -> bool {
        self.full_redraw
    }

    /// Number of rows that will be written on the next flush
    pub fn dirty_row_count(&self) -> usize {
        if self.full_redraw {
            self.height as usize
        } else {
            self.dirty_rows.iter().filter(|d| **d).count()
        }
    }

    /// Clear all dirty flags after output
    pub fn clear(&mut self) {
        self.full_redraw = false;
        self.dirty_rows.fill(false);
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
