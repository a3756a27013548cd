use unicode_width::UnicodeWidthStr;

use crate::terminal::capabilities::DisplayMode;
use crate::terminal::renderers::DirtyTracker;
use crate::terminal::theme::Theme;

pub use crate::terminal::color::Color;

/// Content of a single cell: either a plain char or a static multi-codepoint glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Char(char),
    Str(&'static str),
}

impl Glyph {
    /// Number of terminal columns the glyph occupies (1 or 2)
    pub fn width(&self) -> usize {
        let w = match self {
            Glyph::Char(c) => unicode_width::UnicodeWidthChar::width(*c).unwrap_or(1),
            Glyph::Str(s) => UnicodeWidthStr::width(*s),
        };
        w.clamp(1, 2)
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Glyph::Char(c) => write!(f, "{}", c),
            Glyph::Str(s) => f.write_str(s),
        }
    }
}

/// Represents a single cell on the terminal screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: Glyph,
    pub fg: Color,
    pub bg: Color,
    /// If true, this cell is covered by the previous wide glyph and should be skipped
    pub hidden: bool,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self {
            glyph: Glyph::Char(ch),
            fg,
            bg,
            hidden: false,
        }
    }

    pub fn with_glyph(glyph: Glyph, fg: Color, bg: Color) -> Self {
        Self {
            glyph,
            fg,
            bg,
            hidden: false,
        }
    }

    pub fn hidden(fg: Color, bg: Color) -> Self {
        Self {
            glyph: Glyph::Char(' '),
            fg,
            bg,
            hidden: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            glyph: Glyph::Char(' '),
            fg: Color::Reset,
            bg: Color::Reset,
            hidden: false,
        }
    }
}

/// Represents the state of the entire screen
#[derive(Clone, Debug)]
pub struct ScreenBuffer {
    pub cells: Vec<Cell>,

    pub width: u16,

    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::empty(); (width as usize) * (height as usize)];
        Self {
            cells,
            width,
            height,
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::empty(); (width as usize) * (height as usize)];
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::empty();
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    /// Get mutable reference to the cell at the given position
    pub fn get_cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width as usize && y < self.height as usize {
            let idx = (y * self.width as usize) + x;
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Write `text` starting at (x, y), clipped to `max_width` columns.
    /// Returns the number of columns written.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, max_width: usize, fg: Color, bg: Color) -> usize {
        let mut col = 0;
        for ch in text.chars() {
            // Combining marks and variation selectors have no cell of their own
            if unicode_width::UnicodeWidthChar::width(ch) == Some(0) {
                continue;
            }
            let glyph = Glyph::Char(ch);
            let w = glyph.width();
            if col + w > max_width {
                break;
            }
            self.put_glyph(x + col, y, glyph, fg, bg);
            col += w;
        }
        col
    }

    /// Place a glyph, hiding the cell under its second column if it is wide
    pub fn put_glyph(&mut self, x: usize, y: usize, glyph: Glyph, fg: Color, bg: Color) {
        if x > u16::MAX as usize || y > u16::MAX as usize {
            return;
        }
        self.set(x as u16, y as u16, Cell::with_glyph(glyph, fg, bg));
        if glyph.width() == 2 && x + 1 <= u16::MAX as usize {
            self.set((x + 1) as u16, y as u16, Cell::hidden(fg, bg));
        }
    }
}

/// Manages the terminal display and rendering
pub struct Display {
    /// Terminal dimensions (cols, rows)
    pub terminal_size: (u16, u16),
    /// Whether the display needs a repaint
    pub dirty: bool,
    /// Whether a full screen clear is needed (e.g. after resize)
    pub needs_full_redraw: bool,
    /// Current status message to display
    pub message: String,
    /// Front buffer (currently displayed)
    pub front_buffer: ScreenBuffer,
    /// Back buffer (being drawn to)
    pub back_buffer: ScreenBuffer,
    /// Current color theme
    pub theme: Theme,
    /// Dirty region tracker for incremental rendering
    pub dirty_tracker: DirtyTracker,
    /// Display mode (TrueColor, Ansi, Ascii) for color and glyph fallback
    pub display_mode: DisplayMode,
}

impl Display {
    /// Initialize the display system with specified dimensions
    pub fn new(width: u16, height: u16, theme: Theme, display_mode: DisplayMode) -> Self {
        Self {
            terminal_size: (width, height),
            dirty: true,
            needs_full_redraw: true, // Initial full redraw
            message: String::new(),
            front_buffer: ScreenBuffer::new(width, height),
            back_buffer: ScreenBuffer::new(width, height),
            theme,
            dirty_tracker: DirtyTracker::new(width, height),
            display_mode,
        }
    }

    /// Initialize the display system with terminal detection (for terminal mode)
    pub fn new_terminal(theme: Theme) -> Result<Self, Box<dyn std::error::Error>> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::new(cols, rows, theme, DisplayMode::detect()))
    }

    /// Set a status message to display
    pub fn set_message(&mut self, msg: String) {
        if self.message != msg {
            self.message = msg;
            self.dirty = true;
            self.dirty_tracker
                .mark_row(self.terminal_size.1.saturating_sub(1) as usize);
        }
    }

    /// Update terminal size
    pub fn update_size(&mut self, cols: u16, rows: u16) {
        // Validate new dimensions
        if cols == 0 || rows == 0 {
            return;
        }

        self.terminal_size = (cols, rows);

        // Fresh buffers; the full redraw repaints everything
        self.front_buffer = ScreenBuffer::new(cols, rows);
        self.back_buffer = ScreenBuffer::new(cols, rows);

        // Sync dirty tracker (marks full redraw internally)
        self.dirty_tracker.resize(cols, rows);

        self.dirty = true;
        self.needs_full_redraw = true;
    }

    /// Start a frame: clear the back buffer and paint the screen background
    pub fn begin_frame(&mut self) {
        if self.needs_full_redraw {
            self.dirty_tracker.mark_full_redraw();
            self.needs_full_redraw = false;
        }
        let bg = self.theme.bg();
        let fg = self.theme.fg();
        for cell in &mut self.back_buffer.cells {
            *cell = Cell::new(' ', fg, bg);
        }
    }

    /// Validate buffer synchronization before swap
    pub fn validate_buffer_synchronization(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.front_buffer.width != self.back_buffer.width
            || self.front_buffer.height != self.back_buffer.height
        {
            return Err("Buffer dimensions mismatch during synchronization".into());
        }

        if self.back_buffer.width != self.terminal_size.0
            || self.back_buffer.height != self.terminal_size.1
        {
            return Err("Back buffer dimensions don't match terminal size".into());
        }

        for (i, cell) in self.back_buffer.cells.iter().enumerate() {
            if cell.glyph == Glyph::Char('\0') {
                return Err(
                    format!("Invalid null character found in back buffer at index {}", i).into(),
                );
            }
        }

        Ok(())
    }

    /// Swap buffers once the frame has been written to the terminal
    pub fn swap_buffers(&mut self) {
        if self.front_buffer.width != self.back_buffer.width
            || self.front_buffer.height != self.back_buffer.height
        {
            self.front_buffer
                .resize(self.back_buffer.width, self.back_buffer.height);
        }
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        self.back_buffer.clear();
        self.dirty = false;
        // Clear dirty tracker AFTER terminal output is complete
        self.dirty_tracker.clear();
    }
}
