//! Terminal output
//!
//! Writes the display's back buffer to the terminal with ANSI escape codes,
//! diffing against the front buffer and skipping rows the dirty tracker
//! reports clean.

use std::io::Write;

use crate::terminal::capabilities::DisplayMode;
use crate::terminal::display::Display;

/// Flush the back buffer to `out`
///
/// - Full redraws clear the screen first (startup, resize)
/// - Otherwise only dirty rows are scanned, and only changed cells written
/// - Colors are re-emitted only when they change
pub fn render_display_to_terminal<W: Write>(
    display: &Display,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    // Hide cursor during update to prevent flickering
    write!(out, "\x1b[?25l")?;

    let needs_full = display.needs_full_redraw || display.dirty_tracker.needs_full_redraw();
    if needs_full {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    // back_buffer has the NEW frame, front_buffer what is on screen
    let front_buffer = &display.front_buffer;
    let back_buffer = &display.back_buffer;

    let mut last_fg = String::new();
    let mut last_bg = String::new();
    let mut cursor_moved = false;
    let mut written = 0usize;

    for y in 0..display.terminal_size.1 {
        if !needs_full && !display.dirty_tracker.is_row_dirty(y as usize) {
            continue;
        }

        for x in 0..display.terminal_size.0 {
            let new_cell = match back_buffer.get(x, y) {
                Some(cell) => cell,
                None => continue,
            };

            if !needs_full && front_buffer.get(x, y) == Some(new_cell) {
                continue;
            }

            if new_cell.hidden {
                continue;
            }

            write!(out, "\x1b[{};{}H", y + 1, x + 1)?;
            cursor_moved = true;

            let (fg, bg) = match display.display_mode {
                DisplayMode::TrueColor => (new_cell.fg, new_cell.bg),
                DisplayMode::Ansi | DisplayMode::Ascii => (
                    new_cell.fg.to_ansi_fallback(),
                    new_cell.bg.to_ansi_fallback(),
                ),
            };
            let fg_code = fg.to_ansi_fg_code();
            let bg_code = bg.to_ansi_bg_code();

            if fg_code != last_fg || bg_code != last_bg {
                write!(out, "\x1b[{}m\x1b[{}m", fg_code, bg_code)?;
                last_fg = fg_code;
                last_bg = bg_code;
            }

            write!(out, "{}", new_cell.glyph)?;
            written += 1;
        }
    }

    if cursor_moved {
        write!(out, "\x1b[0m")?;
    }
    out.flush()?;

    tracing::trace!(cells = written, full = needs_full, "frame flushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::display::{Cell, Color};
    use crate::terminal::theme::Theme;

    fn display() -> Display {
        Display::new(10, 3, Theme::default(), DisplayMode::TrueColor)
    }

    #[test]
    fn test_full_redraw_clears_screen() {
        let display = display();
        let mut out = Vec::new();
        render_display_to_terminal(&display, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2J"));
    }

    #[test]
    fn test_clean_rows_are_skipped() {
        let mut display = display();
        display.needs_full_redraw = false;
        display.swap_buffers();

        display.back_buffer.set(2, 0, Cell::new('A', Color::White, Color::Black));
        display.back_buffer.set(2, 1, Cell::new('B', Color::White, Color::Black));
        display.dirty_tracker.mark_row(1);

        let mut out = Vec::new();
        render_display_to_terminal(&display, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[2;3H"));
        assert!(text.contains('B'));
        assert!(!text.contains('A'));
    }

    #[test]
    fn test_ansi_mode_uses_fallback_colors() {
        let mut display = Display::new(4, 1, Theme::default(), DisplayMode::Ansi);
        display.back_buffer.set(0, 0, Cell::new('x', crate::rgb!(250, 40, 40), Color::Black));
        let mut out = Vec::new();
        render_display_to_terminal(&display, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[31m"));
        assert!(!text.contains("38;2;"));
    }
}
