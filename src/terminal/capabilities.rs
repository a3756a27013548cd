/// Terminal capabilities detection for graceful degradation
/// Detects available features and chooses appropriate display mode
use std::env;

/// Display mode representing different terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// True color support (24-bit color)
    TrueColor,
    /// Standard ANSI 16-color support
    Ansi,
    /// ASCII-only glyphs with 16-color fallback
    Ascii,
}

impl DisplayMode {
    /// Get the display mode based on environment detection
    pub fn detect() -> Self {
        Self::detect_with(|key| env::var(key).ok())
    }

    /// Detection against an arbitrary variable lookup
    pub fn detect_with<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if has_true_color_support(&var) {
            return DisplayMode::TrueColor;
        }
        if !has_utf8_locale(&var) {
            return DisplayMode::Ascii;
        }
        if has_ansi_support(&var) {
            return DisplayMode::Ansi;
        }
        DisplayMode::Ascii
    }

    pub fn supports_unicode(&self) -> bool {
        !matches!(self, DisplayMode::Ascii)
    }
}

/// ASCII stand-ins for the glyphs tiles draw
pub fn ascii_glyph(glyph: &str) -> &str {
    match glyph {
        "↑" => "^",
        "↓" => "v",
        "←" => "<",
        "→" => ">",
        "❤️" => "+",
        "💔" => "x",
        other => other,
    }
}

/// Check if terminal supports true color (24-bit)
fn has_true_color_support<F: Fn(&str) -> Option<String>>(var: &F) -> bool {
    if let Some(colorterm) = var("COLORTERM") {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return true;
        }
    }

    if let Some(term) = var("TERM") {
        if term.contains("24bit")
            || term.contains("truecolor")
            || term.starts_with("xterm-kitty")
            || term.starts_with("tmux")
        {
            return true;
        }
    }

    var("TERM_PROGRAM").map_or(false, |tp| {
        tp == "iTerm.app" || tp == "Hyper" || tp == "wezterm" || tp == "vscode"
    })
}

/// Check the locale for UTF-8 so arrows and emoji can be drawn
fn has_utf8_locale<F: Fn(&str) -> Option<String>>(var: &F) -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| var(*key))
        .find(|value| !value.is_empty())
        .map_or(true, |value| {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        })
}

/// Check if terminal supports basic ANSI codes
fn has_ansi_support<F: Fn(&str) -> Option<String>>(var: &F) -> bool {
    match var("TERM") {
        Some(term) => !term.is_empty() && term != "dumb",
        // If TERM is not set, assume basic ANSI
        None => true,
    }
}
