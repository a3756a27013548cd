//! Tile renderer
//!
//! Turns a `TileRenderState` into a `TileVisual`: a root square plus the
//! optional overlay layers stacked on it. The output names style tokens
//! and glyphs only; rasterizing it is the painter's job
//! (`terminal::renderers::TilePainter`).

use crate::core::format;
use crate::core::memo::DerivedCache;
use crate::core::style::{BadgeStyle, StylePair, badge_style};
use crate::core::tile::{Action, Icon, Position, RewardAnimation, TileRenderState, TileType};

/// Heatmap alpha at full intensity
pub const HEATMAP_MAX_ALPHA: f32 = 0.6;

/// Size tier chosen from the tile side length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub fn for_size(tile_size: f32) -> Self {
        if tile_size > 40.0 {
            SizeTier::Large
        } else if tile_size > 32.0 {
            SizeTier::Medium
        } else {
            SizeTier::Small
        }
    }
}

/// Geometry derived from the tile size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    pub side: f32,
    pub tier: SizeTier,
    pub corner_radius: f32,
    pub icon_font_size: f32,
    pub arrow_font_size: f32,
    pub pulse_font_size: f32,
}

impl TileGeometry {
    pub fn for_size(tile_size: f32) -> Self {
        let tier = SizeTier::for_size(tile_size);
        let (corner_radius, icon_font_size, arrow_font_size, pulse_font_size) = match tier {
            SizeTier::Large => (8.0, 24.0, 28.0, 32.0),
            SizeTier::Medium => (6.0, 20.0, 22.0, 26.0),
            SizeTier::Small => (4.0, 16.0, 18.0, 20.0),
        };
        Self {
            side: tile_size,
            tier,
            corner_radius,
            icon_font_size,
            arrow_font_size,
            pulse_font_size,
        }
    }
}

/// How assistive technology should treat the tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Presentation,
}

/// Visit-frequency overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapLayer {
    pub intensity: f32,
    pub alpha: f32,
}

/// Value text with its badge treatment
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBadge {
    pub text: String,
    pub style: BadgeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowLayer {
    pub action: Action,
    pub glyph: &'static str,
    pub font_size: f32,
}

/// Animation preset for the reward pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePreset {
    RewardBounce,
    PunishmentShake,
}

impl PulsePreset {
    pub fn class_name(&self) -> &'static str {
        match self {
            PulsePreset::RewardBounce => "reward-pulse",
            PulsePreset::PunishmentShake => "punishment-pulse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseLayer {
    pub kind: RewardAnimation,
    pub glyph: &'static str,
    pub preset: PulsePreset,
    pub font_size: f32,
}

/// Layers in paint order, bottom first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Base,
    Heatmap,
    Badge,
    Arrow,
    Pulse,
}

impl LayerKind {
    /// Only the root square receives pointer input
    pub fn intercepts_pointer(&self) -> bool {
        matches!(self, LayerKind::Base)
    }
}

/// Output of a tile render
#[derive(Debug, Clone)]
pub struct TileVisual {
    pub position: Position,
    pub style: StylePair,
    pub geometry: TileGeometry,
    pub icon: Option<Icon>,
    pub heatmap: Option<HeatmapLayer>,
    pub badge: Option<ValueBadge>,
    pub arrow: Option<ArrowLayer>,
    pub pulse: Option<PulseLayer>,
    pub role: Role,
    pub focusable: bool,
    /// Accessible label; `TileMemo` keeps it current across skipped renders
    pub label: String,
}

impl TileVisual {
    /// Layers actually present, bottom first
    pub fn layers(&self) -> Vec<LayerKind> {
        let mut layers = vec![LayerKind::Base];
        if self.heatmap.is_some() {
            layers.push(LayerKind::Heatmap);
        }
        if self.badge.is_some() {
            layers.push(LayerKind::Badge);
        }
        if self.arrow.is_some() {
            layers.push(LayerKind::Arrow);
        }
        if self.pulse.is_some() {
            layers.push(LayerKind::Pulse);
        }
        layers
    }
}

/// clamp(visits / max(max_visits, 1), 0, 1)
pub fn heatmap_intensity(visits: u32, max_visits: i64) -> f32 {
    let max = max_visits.max(1) as f64;
    (visits as f64 / max).clamp(0.0, 1.0) as f32
}

pub fn heatmap_layer(
    show_heatmap: bool,
    visits: u32,
    max_visits: i64,
    tile_type: TileType,
) -> Option<HeatmapLayer> {
    if !show_heatmap || visits == 0 || tile_type == TileType::Obstacle {
        return None;
    }
    let intensity = heatmap_intensity(visits, max_visits);
    Some(HeatmapLayer {
        intensity,
        alpha: intensity * HEATMAP_MAX_ALPHA,
    })
}

pub fn arrow_glyph(action: Action) -> &'static str {
    match action {
        Action::Up => "↑",
        Action::Down => "↓",
        Action::Left => "←",
        Action::Right => "→",
    }
}

/// Glyph for a loosely-typed action name; unknown names draw nothing
pub fn arrow_glyph_for_name(name: &str) -> Option<&'static str> {
    Action::parse(name).map(arrow_glyph)
}

fn shows_arrow(state: &TileRenderState) -> bool {
    state.show_actions
        && !state.is_agent
        && !matches!(
            state.tile_type,
            TileType::Obstacle | TileType::Portal | TileType::Goal
        )
}

pub fn pulse_layer(animation: RewardAnimation, geometry: &TileGeometry) -> PulseLayer {
    let (glyph, preset) = match animation {
        RewardAnimation::Reward => ("❤️", PulsePreset::RewardBounce),
        RewardAnimation::Punishment => ("💔", PulsePreset::PunishmentShake),
    };
    PulseLayer {
        kind: animation,
        glyph,
        preset,
        font_size: geometry.pulse_font_size,
    }
}

/// Stateless tile renderer
pub struct TileRenderer;

impl TileRenderer {
    /// Render with a throwaway derived-value cache
    pub fn render(state: &TileRenderState) -> TileVisual {
        let mut cache = DerivedCache::default();
        Self::render_with(state, &mut cache)
    }

    /// Render, reusing derived values whose inputs did not change
    pub fn render_with(state: &TileRenderState, cache: &mut DerivedCache) -> TileVisual {
        let geometry = TileGeometry::for_size(state.tile_size);

        let heatmap = cache.heatmap.get_or_compute(
            (state.show_heatmap, state.visits, state.max_visits, state.tile_type),
            || heatmap_layer(state.show_heatmap, state.visits, state.max_visits, state.tile_type),
        );

        let badge = if state.show_values {
            let rounded = format::round2(state.value);
            let text = cache
                .formatted
                .get_or_compute(rounded.to_bits(), || format::format_value(rounded));
            let style = cache.badge.get_or_compute(
                (state.is_agent, state.is_goal, state.tile_type),
                || badge_style(state.is_agent, state.is_goal, state.tile_type),
            );
            Some(ValueBadge { text, style })
        } else {
            None
        };

        let arrow = match state.best_action {
            Some(action) if shows_arrow(state) => Some(ArrowLayer {
                action,
                glyph: arrow_glyph(action),
                font_size: geometry.arrow_font_size,
            }),
            _ => None,
        };

        let pulse = state.reward_animation.map(|a| pulse_layer(a, &geometry));

        let interactive = state.handlers.on_activate.is_some();

        TileVisual {
            position: state.position,
            style: state.style(),
            geometry,
            icon: state.icon.clone(),
            heatmap,
            badge,
            arrow,
            pulse,
            role: if interactive {
                Role::Button
            } else {
                Role::Presentation
            },
            focusable: interactive,
            label: state.accessible_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::{AGENT_STYLE, GOAL_STYLE, type_style};
    use crate::core::tile::TileHandlers;
    use std::rc::Rc;

    fn tile(tile_type: TileType) -> TileRenderState {
        TileRenderState::new(Position::new(1, 2), tile_type, 48.0)
    }

    #[test]
    fn test_style_priority() {
        let mut state = tile(TileType::Reward);
        assert_eq!(TileRenderer::render(&state).style, type_style(TileType::Reward));
        state.is_goal = true;
        assert_eq!(TileRenderer::render(&state).style, GOAL_STYLE);
        state.is_agent = true;
        assert_eq!(TileRenderer::render(&state).style, AGENT_STYLE);
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(SizeTier::for_size(48.0), SizeTier::Large);
        assert_eq!(SizeTier::for_size(40.0), SizeTier::Medium);
        assert_eq!(SizeTier::for_size(33.0), SizeTier::Medium);
        assert_eq!(SizeTier::for_size(32.0), SizeTier::Small);

        let large = TileGeometry::for_size(48.0);
        let small = TileGeometry::for_size(24.0);
        assert!(large.corner_radius > small.corner_radius);
        assert!(large.icon_font_size > small.icon_font_size);
        assert!(small.arrow_font_size > small.icon_font_size);
        assert!(small.pulse_font_size > small.icon_font_size);
        assert_eq!(large.side, 48.0);
    }

    #[test]
    fn test_heatmap_presence() {
        assert!(heatmap_layer(false, 5, 10, TileType::Empty).is_none());
        assert!(heatmap_layer(true, 0, 10, TileType::Empty).is_none());
        assert!(heatmap_layer(true, 5, 10, TileType::Obstacle).is_none());
        assert!(heatmap_layer(true, 5, 10, TileType::Portal).is_some());
    }

    #[test]
    fn test_heatmap_alpha() {
        let layer = heatmap_layer(true, 5, 10, TileType::Empty).unwrap();
        assert!((layer.intensity - 0.5).abs() < 1e-6);
        assert!((layer.alpha - 0.3).abs() < 1e-6);

        let saturated = heatmap_layer(true, 50, 10, TileType::Empty).unwrap();
        assert!((saturated.alpha - HEATMAP_MAX_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn test_heatmap_clamps_max_visits() {
        assert_eq!(heatmap_intensity(3, 0), 1.0);
        assert_eq!(heatmap_intensity(3, -4), 1.0);
        assert_eq!(heatmap_intensity(0, 0), 0.0);
    }

    #[test]
    fn test_heatmap_monotonic_in_visits() {
        let mut last = 0.0;
        for visits in 1..=40 {
            let alpha = heatmap_layer(true, visits, 25, TileType::Empty)
                .unwrap()
                .alpha;
            assert!(alpha >= last);
            last = alpha;
        }
    }

    #[test]
    fn test_badge_only_when_values_shown() {
        let mut state = tile(TileType::Empty);
        state.value = 1234.567;
        assert!(TileRenderer::render(&state).badge.is_none());

        state.show_values = true;
        let badge = TileRenderer::render(&state).badge.unwrap();
        assert_eq!(badge.text, "1,234.57");
        assert_eq!(badge.style, BadgeStyle::Empty);
    }

    #[test]
    fn test_arrow_on_empty_tile() {
        let mut state = tile(TileType::Empty);
        state.show_actions = true;
        state.best_action = Some(Action::Up);
        let arrow = TileRenderer::render(&state).arrow.unwrap();
        assert_eq!(arrow.glyph, "↑");

        state.tile_type = TileType::Obstacle;
        assert!(TileRenderer::render(&state).arrow.is_none());
    }

    #[test]
    fn test_arrow_suppressed() {
        let mut state = tile(TileType::Reward);
        state.best_action = Some(Action::Left);
        assert!(TileRenderer::render(&state).arrow.is_none());

        state.show_actions = true;
        assert_eq!(TileRenderer::render(&state).arrow.unwrap().glyph, "←");

        state.is_agent = true;
        assert!(TileRenderer::render(&state).arrow.is_none());

        state.is_agent = false;
        for t in [TileType::Portal, TileType::Goal] {
            state.tile_type = t;
            assert!(TileRenderer::render(&state).arrow.is_none());
        }

        state.tile_type = TileType::Empty;
        state.best_action = None;
        assert!(TileRenderer::render(&state).arrow.is_none());
    }

    #[test]
    fn test_arrow_glyphs() {
        assert_eq!(arrow_glyph(Action::Down), "↓");
        assert_eq!(arrow_glyph(Action::Right), "→");
        assert_eq!(arrow_glyph_for_name("left"), Some("←"));
        assert_eq!(arrow_glyph_for_name("northwest"), None);
    }

    #[test]
    fn test_pulse() {
        let mut state = tile(TileType::Empty);
        assert!(TileRenderer::render(&state).pulse.is_none());

        state.reward_animation = Some(RewardAnimation::Reward);
        let pulse = TileRenderer::render(&state).pulse.unwrap();
        assert_eq!(pulse.glyph, "❤️");
        assert_eq!(pulse.preset.class_name(), "reward-pulse");

        state.reward_animation = Some(RewardAnimation::Punishment);
        let pulse = TileRenderer::render(&state).pulse.unwrap();
        assert_eq!(pulse.glyph, "💔");
        assert_eq!(pulse.preset, PulsePreset::PunishmentShake);
    }

    #[test]
    fn test_layer_order_and_pointer() {
        let mut state = tile(TileType::Empty);
        state.show_values = true;
        state.show_heatmap = true;
        state.show_actions = true;
        state.visits = 3;
        state.max_visits = 6;
        state.best_action = Some(Action::Right);
        state.reward_animation = Some(RewardAnimation::Reward);

        let visual = TileRenderer::render(&state);
        assert_eq!(
            visual.layers(),
            vec![
                LayerKind::Base,
                LayerKind::Heatmap,
                LayerKind::Badge,
                LayerKind::Arrow,
                LayerKind::Pulse
            ]
        );
        let pointer: Vec<_> = visual
            .layers()
            .into_iter()
            .filter(|l| l.intercepts_pointer())
            .collect();
        assert_eq!(pointer, vec![LayerKind::Base]);
    }

    #[test]
    fn test_role_follows_activate_handler() {
        let mut state = tile(TileType::Empty);
        let visual = TileRenderer::render(&state);
        assert_eq!(visual.role, Role::Presentation);
        assert!(!visual.focusable);

        state.handlers = TileHandlers {
            on_activate: Some(Rc::new(|_: Position| {})),
            ..TileHandlers::default()
        };
        let visual = TileRenderer::render(&state);
        assert_eq!(visual.role, Role::Button);
        assert!(visual.focusable);
    }

    #[test]
    fn test_render_does_not_touch_input() {
        let mut state = tile(TileType::Goal);
        state.value = 2.555;
        state.show_values = true;
        let before = format!("{:?}", state);
        let _ = TileRenderer::render(&state);
        assert_eq!(format!("{:?}", state), before);
    }
}
