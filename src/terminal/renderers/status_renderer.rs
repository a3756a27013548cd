use crate::terminal::display::{Cell, ScreenBuffer};
use crate::terminal::theme::Theme;

/// Renders the bottom status line: focused tile label on the left,
/// the latest message on the right
pub struct StatusRenderer;

impl StatusRenderer {
    pub fn render(screen_buffer: &mut ScreenBuffer, theme: &Theme, label: &str, message: &str) {
        let Some(status_y) = screen_buffer.height.checked_sub(1) else {
            return;
        };
        let y = status_y as usize;
        let width = screen_buffer.width as usize;
        let bg = theme.status_bg();
        let fg = theme.status_fg();

        for x in 0..width {
            if let Some(cell) = screen_buffer.get_cell_mut(x, y) {
                *cell = Cell::new(' ', fg, bg);
            }
        }

        let left = format!(" {} ", label);
        let used = screen_buffer.put_str(0, y, &left, width, fg, bg);

        if message.is_empty() {
            return;
        }
        let right = format!(" {} ", message);
        let right_width = unicode_width::UnicodeWidthStr::width(right.as_str());
        // Message yields to the label when the line is too narrow for both
        if used + right_width <= width {
            screen_buffer.put_str(width - right_width, y, &right, right_width, fg, bg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buffer: &ScreenBuffer) -> String {
        let y = buffer.height - 1;
        (0..buffer.width)
            .filter_map(|x| buffer.get(x, y))
            .map(|cell| cell.glyph.to_string())
            .collect()
    }

    #[test]
    fn test_label_and_message() {
        let mut buffer = ScreenBuffer::new(30, 2);
        StatusRenderer::render(&mut buffer, &Theme::default(), "goal tile at (1, 2)", "q quits");
        let text = line(&buffer);
        assert!(text.starts_with(" goal tile at (1, 2) "));
        assert!(text.ends_with(" q quits "));
        assert_eq!(buffer.get(0, 1).unwrap().bg, Theme::default().status_bg());
    }

    #[test]
    fn test_message_dropped_when_narrow() {
        let mut buffer = ScreenBuffer::new(22, 1);
        StatusRenderer::render(&mut buffer, &Theme::default(), "goal tile at (1, 2)", "q quits");
        assert!(!line(&buffer).contains("quits"));
    }
}
