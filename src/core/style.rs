//! Style tokens and resolution
//!
//! The renderer only decides *which* token a tile uses. Concrete colors
//! come from a `StyleResolver` supplied by the host (see
//! `terminal::theme::Theme`).

use crate::core::tile::{TileRenderState, TileType};

/// Background token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundToken {
    Tile(TileType),
    Agent,
    Goal,
}

/// Foreground (text) token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForegroundToken {
    /// Dark text for light backgrounds
    Dark,
    /// Light text for dark or saturated backgrounds
    Light,
    /// Text on the agent tile
    Agent,
}

/// Background/foreground token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StylePair {
    pub bg: BackgroundToken,
    pub fg: ForegroundToken,
}

/// Badge treatment behind the value text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeStyle {
    /// Used on agent tiles and on dark or saturated tile types
    Default,
    /// Used on lighter non-empty tiles
    Light,
    /// Used on plain empty tiles
    Empty,
}

pub const AGENT_STYLE: StylePair = StylePair {
    bg: BackgroundToken::Agent,
    fg: ForegroundToken::Agent,
};

pub const GOAL_STYLE: StylePair = StylePair {
    bg: BackgroundToken::Goal,
    fg: ForegroundToken::Dark,
};

/// Static type-to-style table
pub fn type_style(tile_type: TileType) -> StylePair {
    let fg = match tile_type {
        TileType::Empty => ForegroundToken::Dark,
        TileType::Obstacle
        | TileType::Reward
        | TileType::Punishment
        | TileType::Goal
        | TileType::Portal => ForegroundToken::Light,
    };
    StylePair {
        bg: BackgroundToken::Tile(tile_type),
        fg,
    }
}

/// Resolve the base colors of a tile; agent beats goal beats type
pub fn resolve_style(is_agent: bool, is_goal: bool, tile_type: TileType) -> StylePair {
    if is_agent {
        AGENT_STYLE
    } else if is_goal {
        GOAL_STYLE
    } else {
        type_style(tile_type)
    }
}

/// Pick the badge style for a tile
pub fn badge_style(is_agent: bool, is_goal: bool, tile_type: TileType) -> BadgeStyle {
    let dark_tile = matches!(
        tile_type,
        TileType::Obstacle | TileType::Punishment | TileType::Reward | TileType::Goal
    );
    if is_agent || dark_tile {
        BadgeStyle::Default
    } else if tile_type == TileType::Empty && !is_goal {
        BadgeStyle::Empty
    } else {
        BadgeStyle::Light
    }
}

/// Maps style tokens to concrete colors.
///
/// Implemented by the host's theme so the renderer stays free of color
/// values.
pub trait StyleResolver {
    type Color: Copy;

    fn background(&self, token: BackgroundToken) -> Self::Color;
    fn foreground(&self, token: ForegroundToken) -> Self::Color;

    /// Base color of the visit heatmap, blended at the overlay alpha
    fn heat(&self) -> Self::Color;

    /// (background, foreground) of a value badge
    fn badge(&self, style: BadgeStyle) -> (Self::Color, Self::Color);

    fn pair(&self, pair: StylePair) -> (Self::Color, Self::Color) {
        (self.background(pair.bg), self.foreground(pair.fg))
    }
}

impl TileRenderState {
    pub fn style(&self) -> StylePair {
        resolve_style(self.is_agent, self.is_goal, self.tile_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_table_covers_every_type() {
        for t in TileType::ALL {
            let pair = resolve_style(false, false, t);
            assert_eq!(pair, type_style(t));
            assert_eq!(pair.bg, BackgroundToken::Tile(t));
        }
        assert_eq!(type_style(TileType::Empty).fg, ForegroundToken::Dark);
        assert_eq!(type_style(TileType::Obstacle).fg, ForegroundToken::Light);
    }

    #[test]
    fn test_agent_overrides_goal_and_type() {
        for t in TileType::ALL {
            assert_eq!(resolve_style(true, false, t), AGENT_STYLE);
            assert_eq!(resolve_style(true, true, t), AGENT_STYLE);
        }
    }

    #[test]
    fn test_goal_overrides_type() {
        for t in TileType::ALL {
            let pair = resolve_style(false, true, t);
            assert_eq!(pair.bg, BackgroundToken::Goal);
            assert_eq!(pair.fg, ForegroundToken::Dark);
        }
    }

    #[test]
    fn test_badge_style_selection() {
        assert_eq!(badge_style(false, false, TileType::Empty), BadgeStyle::Empty);
        assert_eq!(badge_style(false, true, TileType::Empty), BadgeStyle::Light);
        assert_eq!(badge_style(true, false, TileType::Empty), BadgeStyle::Default);
        assert_eq!(badge_style(false, false, TileType::Portal), BadgeStyle::Light);
        for t in [
            TileType::Obstacle,
            TileType::Punishment,
            TileType::Reward,
            TileType::Goal,
        ] {
            assert_eq!(badge_style(false, false, t), BadgeStyle::Default);
        }
    }
}
