//! Grid layout in terminal cells
//!
//! Tile sizes are given in pixels; a terminal cell is taken to be
//! `CELL_WIDTH_PX` by `CELL_HEIGHT_PX`, so a 48px tile covers 6x3 cells.

use crate::core::tile::Position;

/// Assumed pixel width of one terminal cell
pub const CELL_WIDTH_PX: f32 = 8.0;
/// Assumed pixel height of one terminal cell
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// A rectangle representing a screen area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Cells covered by one tile of `tile_size` pixels (at least 1x1)
pub fn tile_cells(tile_size: f32) -> (usize, usize) {
    let size = tile_size.max(0.0);
    let cols = (size / CELL_WIDTH_PX).ceil() as usize;
    let rows = (size / CELL_HEIGHT_PX).ceil() as usize;
    (cols.max(1), rows.max(1))
}

/// Placement of a `columns` x `rows` tile grid on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin_x: usize,
    pub origin_y: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn new(tile_size: f32, columns: usize, rows: usize, origin_x: usize, origin_y: usize) -> Self {
        let (tile_width, tile_height) = tile_cells(tile_size);
        Self {
            origin_x,
            origin_y,
            tile_width,
            tile_height,
            columns,
            rows,
        }
    }

    /// Center the grid inside `area`, clamping to its top-left corner when
    /// the grid does not fit.
    pub fn centered_in(tile_size: f32, columns: usize, rows: usize, area: Rect) -> Self {
        let mut layout = Self::new(tile_size, columns, rows, area.x, area.y);
        let bounds = layout.bounds();
        layout.origin_x = area.x + area.width.saturating_sub(bounds.width) / 2;
        layout.origin_y = area.y + area.height.saturating_sub(bounds.height) / 2;
        layout
    }

    /// Screen area covered by the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.columns * self.tile_width,
            self.rows * self.tile_height,
        )
    }

    pub fn tile_rect(&self, position: Position) -> Option<Rect> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (col, row) = (position.x as usize, position.y as usize);
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some(Rect::new(
            self.origin_x + col * self.tile_width,
            self.origin_y + row * self.tile_height,
            self.tile_width,
            self.tile_height,
        ))
    }

    /// Tile under a screen cell, if any
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Position> {
        let (x, y) = (column as usize, row as usize);
        if !self.bounds().contains(x, y) {
            return None;
        }
        let col = (x - self.origin_x) / self.tile_width;
        let row = (y - self.origin_y) / self.tile_height;
        Some(Position::new(col as i32, row as i32))
    }

    /// Neighbor of `from` one step in (dx, dy), clamped to the grid
    pub fn step(&self, from: Position, dx: i32, dy: i32) -> Position {
        let max_x = self.columns.saturating_sub(1) as i32;
        let max_y = self.rows.saturating_sub(1) as i32;
        Position::new(
            (from.x + dx).clamp(0, max_x),
            (from.y + dy).clamp(0, max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_cells() {
        assert_eq!(tile_cells(48.0), (6, 3));
        assert_eq!(tile_cells(36.0), (5, 3));
        assert_eq!(tile_cells(24.0), (3, 2));
        assert_eq!(tile_cells(0.0), (1, 1));
    }

    #[test]
    fn test_tile_rect() {
        let layout = GridLayout::new(48.0, 4, 3, 2, 1);
        assert_eq!(layout.tile_rect(Position::new(0, 0)), Some(Rect::new(2, 1, 6, 3)));
        assert_eq!(layout.tile_rect(Position::new(3, 2)), Some(Rect::new(20, 7, 6, 3)));
        assert_eq!(layout.tile_rect(Position::new(4, 0)), None);
        assert_eq!(layout.tile_rect(Position::new(-1, 0)), None);
    }

    #[test]
    fn test_hit_test() {
        let layout = GridLayout::new(48.0, 4, 3, 2, 1);
        assert_eq!(layout.hit_test(2, 1), Some(Position::new(0, 0)));
        assert_eq!(layout.hit_test(7, 3), Some(Position::new(0, 0)));
        assert_eq!(layout.hit_test(8, 4), Some(Position::new(1, 1)));
        assert_eq!(layout.hit_test(1, 1), None);
        assert_eq!(layout.hit_test(26, 1), None);
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 30, 12);
        let layout = GridLayout::centered_in(48.0, 3, 2, area);
        assert_eq!(layout.bounds(), Rect::new(6, 3, 18, 6));

        let tiny = GridLayout::centered_in(48.0, 10, 10, Rect::new(0, 1, 5, 5));
        assert_eq!((tiny.origin_x, tiny.origin_y), (0, 1));
    }

    #[test]
    fn test_step_clamps() {
        let layout = GridLayout::new(48.0, 4, 3, 0, 0);
        assert_eq!(layout.step(Position::new(0, 0), -1, 0), Position::new(0, 0));
        assert_eq!(layout.step(Position::new(3, 2), 1, 1), Position::new(3, 2));
        assert_eq!(layout.step(Position::new(1, 1), 1, -1), Position::new(2, 0));
    }
}
