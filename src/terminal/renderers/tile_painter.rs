use crate::core::layout::Rect;
use crate::core::style::StyleResolver;
use crate::core::tile_renderer::TileVisual;
use crate::terminal::capabilities::{DisplayMode, ascii_glyph};
use crate::terminal::display::{Cell, Glyph, ScreenBuffer};
use crate::terminal::theme::Theme;

/// Paints a rendered tile into its cell rectangle
///
/// Layout inside the rectangle:
/// - every cell takes the tile background, tinted by the heat overlay
/// - the middle row carries one glyph: pulse, else arrow, else icon
/// - the value badge is right-aligned on the bottom row
/// - a focused tile gets bracket markers on the middle row
pub struct TilePainter;

impl TilePainter {
    pub fn paint(
        visual: &TileVisual,
        rect: &Rect,
        theme: &Theme,
        mode: DisplayMode,
        screen_buffer: &mut ScreenBuffer,
        focused: bool,
    ) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let (base_bg, fg) = theme.pair(visual.style);
        let bg = match &visual.heatmap {
            Some(heat) => base_bg.blend(theme.heat(), heat.alpha),
            None => base_bg,
        };

        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if let Some(cell) = screen_buffer.get_cell_mut(x, y) {
                    *cell = Cell::new(' ', fg, bg);
                }
            }
        }

        let mid_y = rect.y + rect.height / 2;
        let badge_row = rect.y + rect.height - 1;
        let badge_shares_row = visual.badge.is_some() && badge_row == mid_y;

        if !badge_shares_row {
            if let Some(glyph) = Self::center_glyph(visual, mode, rect.width) {
                let x = rect.x + rect.width.saturating_sub(glyph.width()) / 2;
                screen_buffer.put_glyph(x, mid_y, glyph, fg, bg);
            } else if let Some(icon) = &visual.icon {
                let text = if mode.supports_unicode() {
                    icon.as_str()
                } else {
                    ascii_glyph(icon.as_str())
                };
                if mode.supports_unicode() || text.is_ascii() {
                    let width = unicode_width::UnicodeWidthStr::width(text).min(rect.width);
                    let x = rect.x + (rect.width - width) / 2;
                    screen_buffer.put_str(x, mid_y, text, rect.width, fg, bg);
                }
            }
        }

        if let Some(badge) = &visual.badge {
            let (badge_bg, badge_fg) = theme.badge(badge.style);
            let text = format!(" {} ", badge.text);
            let width = text.chars().count().min(rect.width);
            let x = rect.x + rect.width - width;
            screen_buffer.put_str(x, badge_row, &text, width, badge_fg, badge_bg);
        }

        if focused && rect.width >= 2 {
            let marker = theme.focus();
            for (x, ch) in [(rect.x, '['), (rect.x + rect.width - 1, ']')] {
                if let Some(cell) = screen_buffer.get_cell_mut(x, mid_y) {
                    if !cell.hidden {
                        *cell = Cell::new(ch, marker, cell.bg);
                    }
                }
            }
        }
    }

    /// Topmost overlay glyph for the middle row, narrowed to its ASCII
    /// stand-in when the wide form would spill into the next tile
    fn center_glyph(visual: &TileVisual, mode: DisplayMode, width: usize) -> Option<Glyph> {
        let glyph = visual
            .pulse
            .as_ref()
            .map(|pulse| pulse.glyph)
            .or_else(|| visual.arrow.as_ref().map(|arrow| arrow.glyph))?;
        let wide = mode.supports_unicode().then_some(glyph);
        wide.into_iter()
            .chain(Some(ascii_glyph(glyph)))
            .map(Glyph::Str)
            .find(|g| g.width() <= width)
    }
}
