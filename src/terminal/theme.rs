use std::collections::HashMap;

use crate::core::style::{BackgroundToken, BadgeStyle, ForegroundToken, StyleResolver};
use crate::core::tile::TileType;
use crate::rgb;
use crate::terminal::color::Color;

/// A semantic color palette for themes
///
/// Colors are defined once per theme, then mapped to tile roles via
/// accessor methods.
#[derive(Clone, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub light: Color,
    pub dark: Color,
    pub red: Color,
    pub orange: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub purple: Color,
    pub gray_dark: Color,
    pub gray: Color,
    pub gray_light: Color,
}

impl Palette {
    /// Create a palette from raw RGB tuples
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bg: (u8, u8, u8),
        fg: (u8, u8, u8),
        light: (u8, u8, u8),
        dark: (u8, u8, u8),
        red: (u8, u8, u8),
        orange: (u8, u8, u8),
        yellow: (u8, u8, u8),
        green: (u8, u8, u8),
        blue: (u8, u8, u8),
        purple: (u8, u8, u8),
        gray_dark: (u8, u8, u8),
        gray: (u8, u8, u8),
        gray_light: (u8, u8, u8),
    ) -> Self {
        Self {
            bg: rgb!(bg.0, bg.1, bg.2),
            fg: rgb!(fg.0, fg.1, fg.2),
            light: rgb!(light.0, light.1, light.2),
            dark: rgb!(dark.0, dark.1, dark.2),
            red: rgb!(red.0, red.1, red.2),
            orange: rgb!(orange.0, orange.1, orange.2),
            yellow: rgb!(yellow.0, yellow.1, yellow.2),
            green: rgb!(green.0, green.1, green.2),
            blue: rgb!(blue.0, blue.1, blue.2),
            purple: rgb!(purple.0, purple.1, purple.2),
            gray_dark: rgb!(gray_dark.0, gray_dark.1, gray_dark.2),
            gray: rgb!(gray.0, gray.1, gray.2),
            gray_light: rgb!(gray_light.0, gray_light.1, gray_light.2),
        }
    }
}

/// Represents a color theme for the grid viewer
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

impl Theme {
    /// Create a new theme with the given name and palette
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }

    // =========================================================================
    // UI COLOR ACCESSORS
    // =========================================================================

    /// Screen background outside the grid
    pub fn bg(&self) -> Color {
        self.palette.bg
    }

    /// Screen foreground outside the grid
    pub fn fg(&self) -> Color {
        self.palette.fg
    }

    /// Status line background
    pub fn status_bg(&self) -> Color {
        self.palette.gray_dark
    }

    /// Status line foreground
    pub fn status_fg(&self) -> Color {
        self.palette.fg
    }

    /// Marker drawn on the focused tile
    pub fn focus(&self) -> Color {
        self.palette.yellow
    }

    // =========================================================================
    // TILE COLOR ACCESSORS
    // =========================================================================

    pub fn tile_bg(&self, tile_type: TileType) -> Color {
        match tile_type {
            TileType::Empty => self.palette.gray_light,
            TileType::Obstacle => self.palette.gray_dark,
            TileType::Reward => self.palette.green,
            TileType::Punishment => self.palette.red,
            TileType::Goal => self.palette.orange,
            TileType::Portal => self.palette.purple,
        }
    }

    pub fn agent_bg(&self) -> Color {
        self.palette.blue
    }

    pub fn goal_bg(&self) -> Color {
        self.palette.yellow
    }

    // =========================================================================
    // THEME DEFINITIONS
    // =========================================================================

    pub fn dracula() -> Self {
        Self::new(
            "dracula",
            Palette::new(
                (40, 42, 54),
                (248, 248, 242),
                (248, 248, 242),
                (40, 42, 54),
                (255, 85, 85),
                (255, 184, 108),
                (241, 250, 140),
                (80, 250, 123),
                (139, 233, 253),
                (189, 147, 249),
                (68, 71, 90),
                (98, 114, 164),
                (191, 194, 210),
            ),
        )
    }

    pub fn monokai() -> Self {
        Self::new(
            "monokai",
            Palette::new(
                (39, 40, 34),
                (248, 248, 242),
                (248, 248, 242),
                (39, 40, 34),
                (249, 38, 114),
                (253, 151, 31),
                (230, 219, 116),
                (166, 226, 46),
                (102, 217, 239),
                (174, 129, 255),
                (73, 72, 62),
                (117, 113, 94),
                (204, 202, 190),
            ),
        )
    }

    pub fn gruvbox() -> Self {
        Self::new(
            "gruvbox",
            Palette::new(
                (40, 40, 40),
                (235, 219, 178),
                (251, 241, 199),
                (40, 40, 40),
                (251, 73, 52),
                (254, 128, 25),
                (250, 189, 47),
                (184, 187, 38),
                (69, 133, 136),
                (211, 134, 155),
                (80, 73, 69),
                (146, 131, 116),
                (213, 196, 161),
            ),
        )
    }

    pub fn nord() -> Self {
        Self::new(
            "nord",
            Palette::new(
                (46, 52, 64),
                (216, 222, 233),
                (236, 239, 244),
                (46, 52, 64),
                (191, 97, 106),
                (208, 135, 112),
                (235, 203, 139),
                (163, 190, 140),
                (129, 161, 193),
                (180, 142, 173),
                (67, 76, 94),
                (76, 86, 106),
                (216, 222, 233),
            ),
        )
    }

    /// Solarized Light - The iconic light theme for reduced eye strain
    pub fn solarized_light() -> Self {
        Self::new(
            "solarized_light",
            Palette::new(
                (253, 246, 227),
                (101, 123, 131),
                (253, 246, 227),
                (7, 54, 66),
                (220, 50, 47),
                (203, 75, 22),
                (181, 137, 0),
                (133, 153, 0),
                (38, 139, 210),
                (108, 113, 196),
                (88, 110, 117),
                (147, 161, 161),
                (238, 232, 213),
            ),
        )
    }

    pub fn high_contrast_dark() -> Self {
        Self::new(
            "high_contrast_dark",
            Palette::new(
                (0, 0, 0),
                (255, 255, 255),
                (255, 255, 255),
                (0, 0, 0),
                (255, 0, 0),
                (255, 165, 0),
                (255, 255, 0),
                (0, 200, 0),
                (0, 128, 255),
                (255, 0, 255),
                (50, 50, 50),
                (180, 180, 180),
                (230, 230, 230),
            ),
        )
    }

    // =========================================================================
    // DEFAULT THEME
    // =========================================================================

    pub fn default() -> Self {
        Self::dracula()
    }
}

impl StyleResolver for Theme {
    type Color = Color;

    fn background(&self, token: BackgroundToken) -> Color {
        match token {
            BackgroundToken::Tile(tile_type) => self.tile_bg(tile_type),
            BackgroundToken::Agent => self.agent_bg(),
            BackgroundToken::Goal => self.goal_bg(),
        }
    }

    fn foreground(&self, token: ForegroundToken) -> Color {
        match token {
            ForegroundToken::Dark => self.palette.dark,
            ForegroundToken::Light | ForegroundToken::Agent => self.palette.light,
        }
    }

    fn heat(&self) -> Color {
        self.palette.red
    }

    fn badge(&self, style: BadgeStyle) -> (Color, Color) {
        match style {
            BadgeStyle::Default => (self.palette.gray_dark, self.palette.light),
            BadgeStyle::Light => (self.palette.light, self.palette.dark),
            BadgeStyle::Empty => (self.palette.gray, self.palette.dark),
        }
    }
}

// =========================================================================
// THEME MANAGER
// =========================================================================

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
        };

        // Dark themes
        manager.register(Theme::dracula());
        manager.register(Theme::monokai());
        manager.register(Theme::gruvbox());
        manager.register(Theme::nord());

        // Light themes
        manager.register(Theme::solarized_light());

        // High contrast / accessibility themes
        manager.register(Theme::high_contrast_dark());

        manager
    }

    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<Theme> {
        self.themes.get(name).cloned()
    }

    /// Registered theme names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::{AGENT_STYLE, GOAL_STYLE, type_style};

    #[test]
    fn test_manager_lookup() {
        let manager = ThemeManager::new();
        assert!(manager.get("dracula").is_some());
        assert!(manager.get("nope").is_none());
        assert_eq!(manager.names().first(), Some(&"dracula"));
    }

    #[test]
    fn test_every_token_resolves_distinctly() {
        for name in ThemeManager::new().names() {
            let theme = ThemeManager::new().get(name).unwrap();
            let mut seen = Vec::new();
            for t in TileType::ALL {
                seen.push(theme.pair(type_style(t)).0);
            }
            seen.push(theme.pair(AGENT_STYLE).0);
            seen.push(theme.pair(GOAL_STYLE).0);
            for (i, a) in seen.iter().enumerate() {
                for b in &seen[i + 1..] {
                    assert_ne!(a, b, "theme {} reuses a tile background", name);
                }
            }
        }
    }

    #[test]
    fn test_goal_pair_uses_dark_text() {
        let theme = Theme::default();
        let (bg, fg) = theme.pair(GOAL_STYLE);
        assert_eq!(bg, theme.goal_bg());
        assert_eq!(fg, theme.palette.dark);
    }
}
