//! Tile data model
//!
//! Everything the renderer consumes for a single grid cell. A
//! `TileRenderState` is rebuilt by the host on every tick and never
//! mutated by the renderer.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Semantic kind of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Empty,
    Obstacle,
    Reward,
    Punishment,
    Goal,
    Portal,
}

impl TileType {
    pub const ALL: [TileType; 6] = [
        TileType::Empty,
        TileType::Obstacle,
        TileType::Reward,
        TileType::Punishment,
        TileType::Goal,
        TileType::Portal,
    ];
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileType::Empty => "empty",
            TileType::Obstacle => "obstacle",
            TileType::Reward => "reward",
            TileType::Punishment => "punishment",
            TileType::Goal => "goal",
            TileType::Portal => "portal",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(TileType::Empty),
            "obstacle" => Ok(TileType::Obstacle),
            "reward" => Ok(TileType::Reward),
            "punishment" => Ok(TileType::Punishment),
            "goal" => Ok(TileType::Goal),
            "portal" => Ok(TileType::Portal),
            _ => Err(format!("Unknown tile type: {}", s)),
        }
    }
}

/// A policy's preferred move out of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Parse a loosely-typed action name.
    ///
    /// Anything unrecognized maps to `None`, which renders no arrow.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// Transient event marker shown as a pulse on top of the tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewardAnimation {
    Reward,
    Punishment,
}

impl FromStr for RewardAnimation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reward" => Ok(RewardAnimation::Reward),
            "punishment" => Ok(RewardAnimation::Punishment),
            _ => Err(format!("Unknown reward animation: {}", s)),
        }
    }
}

/// Grid coordinates of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Opaque icon content.
///
/// Two icons are the same only if they share the allocation; equal text in
/// separate allocations counts as a different icon.
#[derive(Debug, Clone)]
pub struct Icon(Rc<str>);

impl Icon {
    pub fn new(content: &str) -> Self {
        Self(Rc::from(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn same(&self, other: &Icon) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

pub type ActivateHandler = Rc<dyn Fn(Position)>;
pub type NotifyHandler = Rc<dyn Fn()>;

/// Optional interaction callbacks supplied by the host
#[derive(Clone, Default)]
pub struct TileHandlers {
    pub on_activate: Option<ActivateHandler>,
    pub on_press_start: Option<NotifyHandler>,
    pub on_hover_enter: Option<NotifyHandler>,
}

impl TileHandlers {
    /// Presence flags in (activate, press start, hover enter) order
    pub fn presence(&self) -> (bool, bool, bool) {
        (
            self.on_activate.is_some(),
            self.on_press_start.is_some(),
            self.on_hover_enter.is_some(),
        )
    }
}

impl fmt::Debug for TileHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileHandlers")
            .field("on_activate", &self.on_activate.is_some())
            .field("on_press_start", &self.on_press_start.is_some())
            .field("on_hover_enter", &self.on_hover_enter.is_some())
            .finish()
    }
}

/// Full render input for one tile
#[derive(Debug, Clone)]
pub struct TileRenderState {
    pub position: Position,
    pub tile_type: TileType,
    pub value: f64,
    pub show_values: bool,
    pub show_heatmap: bool,
    pub show_actions: bool,
    pub is_agent: bool,
    pub is_goal: bool,
    pub tile_size: f32,
    pub visits: u32,
    pub max_visits: i64,
    pub best_action: Option<Action>,
    pub reward_animation: Option<RewardAnimation>,
    pub accessible_label: String,
    pub handlers: TileHandlers,
    pub icon: Option<Icon>,
}

impl TileRenderState {
    /// A plain tile of the given type with every overlay off
    pub fn new(position: Position, tile_type: TileType, tile_size: f32) -> Self {
        Self {
            position,
            tile_type,
            value: 0.0,
            show_values: false,
            show_heatmap: false,
            show_actions: false,
            is_agent: false,
            is_goal: false,
            tile_size,
            visits: 0,
            max_visits: 1,
            best_action: None,
            reward_animation: None,
            accessible_label: format!("{} tile at {}", tile_type, position),
            handlers: TileHandlers::default(),
            icon: None,
        }
    }
}
