//! Terminal color definitions and ANSI conversion
//!
//! Provides the Color enum used by tile painting and ANSI escape sequence generation.

/// Terminal color definition - supporting Reset, RGB, and 16-color ANSI fallback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb { r: u8, g: u8, b: u8 },
}

/// Helper macro to create RGB colors
#[macro_export]
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        $crate::terminal::color::Color::Rgb {
            r: $r,
            g: $g,
            b: $b,
        }
    };
}

impl Color {
    /// Convert Color enum to ANSI foreground color code
    pub fn to_ansi_fg_code(self) -> String {
        match self {
            Color::Reset => "39".to_string(),
            Color::Black => "30".to_string(),
            Color::Red => "31".to_string(),
            Color::Green => "32".to_string(),
            Color::Yellow => "33".to_string(),
            Color::Blue => "34".to_string(),
            Color::Magenta => "35".to_string(),
            Color::Cyan => "36".to_string(),
            Color::White => "37".to_string(),
            Color::BrightBlack => "90".to_string(),
            Color::BrightRed => "91".to_string(),
            Color::BrightGreen => "92".to_string(),
            Color::BrightYellow => "93".to_string(),
            Color::BrightBlue => "94".to_string(),
            Color::BrightMagenta => "95".to_string(),
            Color::BrightCyan => "96".to_string(),
            Color::BrightWhite => "97".to_string(),
            Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        }
    }

    /// Convert Color enum to ANSI background color code
    pub fn to_ansi_bg_code(self) -> String {
        match self {
            Color::Reset => "49".to_string(),
            Color::Black => "40".to_string(),
            Color::Red => "41".to_string(),
            Color::Green => "42".to_string(),
            Color::Yellow => "43".to_string(),
            Color::Blue => "44".to_string(),
            Color::Magenta => "45".to_string(),
            Color::Cyan => "46".to_string(),
            Color::White => "47".to_string(),
            Color::BrightBlack => "100".to_string(),
            Color::BrightRed => "101".to_string(),
            Color::BrightGreen => "102".to_string(),
            Color::BrightYellow => "103".to_string(),
            Color::BrightBlue => "104".to_string(),
            Color::BrightMagenta => "105".to_string(),
            Color::BrightCyan => "106".to_string(),
            Color::BrightWhite => "107".to_string(),
            Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        }
    }

    /// Approximate RGB components (named colors use xterm defaults)
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Reset | Color::Black => (0, 0, 0),
            Color::Red => (205, 0, 0),
            Color::Green => (0, 205, 0),
            Color::Yellow => (205, 205, 0),
            Color::Blue => (0, 0, 238),
            Color::Magenta => (205, 0, 205),
            Color::Cyan => (0, 205, 205),
            Color::White => (229, 229, 229),
            Color::BrightBlack => (127, 127, 127),
            Color::BrightRed => (255, 0, 0),
            Color::BrightGreen => (0, 255, 0),
            Color::BrightYellow => (255, 255, 0),
            Color::BrightBlue => (92, 92, 255),
            Color::BrightMagenta => (255, 0, 255),
            Color::BrightCyan => (0, 255, 255),
            Color::BrightWhite => (255, 255, 255),
            Color::Rgb { r, g, b } => (r, g, b),
        }
    }

    /// Composite `over` on top of `self` with the given alpha (0.0-1.0)
    pub fn blend(self, over: Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return self;
        }
        let (br, bg, bb) = self.to_rgb();
        let (or, og, ob) = over.to_rgb();
        let mix = |base: u8, top: u8| -> u8 {
            (base as f32 + (top as f32 - base as f32) * alpha).round() as u8
        };
        Color::Rgb {
            r: mix(br, or),
            g: mix(bg, og),
            b: mix(bb, ob),
        }
    }

    /// Convert RGB color to nearest 16-color ANSI for terminals without TrueColor
    pub fn to_ansi_fallback(self) -> Self {
        match self {
            Color::Rgb { r, g, b } => {
                let luminance = (r as u32 + g as u32 + b as u32) / 3;
                let bright = luminance > 127;
                let threshold = 85;

                let has_r = r > threshold;
                let has_g = g > threshold;
                let has_b = b > threshold;

                match (has_r, has_g, has_b, bright) {
                    (false, false, false, false) => Color::Black,
                    (false, false, false, true) => Color::BrightBlack,
                    (true, false, false, false) => Color::Red,
                    (true, false, false, true) => Color::BrightRed,
                    (false, true, false, false) => Color::Green,
                    (false, true, false, true) => Color::BrightGreen,
                    (true, true, false, false) => Color::Yellow,
                    (true, true, false, true) => Color::BrightYellow,
                    (false, false, true, false) => Color::Blue,
                    (false, false, true, true) => Color::BrightBlue,
                    (true, false, true, false) => Color::Magenta,
                    (true, false, true, true) => Color::BrightMagenta,
                    (false, true, true, false) => Color::Cyan,
                    (false, true, true, true) => Color::BrightCyan,
                    (true, true, true, false) => Color::White,
                    (true, true, true, true) => Color::BrightWhite,
                }
            }
            other => other,
        }
    }
}
