//! Demo grid world driving the viewer.
//!
//! A hand-authored map with synthetic values: every open tile's value
//! decays geometrically with its walking distance to the goal, and the
//! best action points downhill toward it. The agent follows the best
//! actions one step at a time.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::core::tile::{Action, Position, RewardAnimation, TileType};

const DEMO_MAP: [&str; 6] = [
    "A...#..+",
    ".##.#.#.",
    "-.-...#.",
    ".#.##.O.",
    "O..-+.+.",
    ".#....#G",
];

const DISCOUNT: f64 = 0.9;
const GOAL_VALUE: f64 = 10.0;

/// What happened on an agent step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    Moved(Position),
    Teleported(Position),
    ReachedGoal,
    Stuck,
}

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<TileType>,
    values: Vec<f64>,
    best: Vec<Option<Action>>,
    visits: Vec<u32>,
    start: Position,
    agent: Position,
    goal: Option<Position>,
    pulses: HashMap<Position, (RewardAnimation, Instant)>,
}

impl Board {
    pub fn demo() -> Self {
        // The demo map is well-formed
        match Self::parse(&DEMO_MAP) {
            Ok(board) => board,
            Err(_) => Self::empty(1, 1),
        }
    }

    fn empty(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            tiles: vec![TileType::Empty; cells],
            values: vec![0.0; cells],
            best: vec![None; cells],
            visits: vec![0; cells],
            start: Position::default(),
            agent: Position::default(),
            goal: None,
            pulses: HashMap::new(),
        }
    }

    /// Parse a map: `.` empty, `#` obstacle, `+` reward, `-` punishment,
    /// `G` goal, `O` portal, `A` agent start on an empty tile.
    pub fn parse(rows: &[&str]) -> Result<Self, Box<dyn std::error::Error>> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err("Map is empty".into());
        }

        let mut board = Self::empty(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(format!("Map row {} is not {} tiles wide", y, width).into());
            }
            for (x, ch) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let tile = match ch {
                    '.' => TileType::Empty,
                    '#' => TileType::Obstacle,
                    '+' => TileType::Reward,
                    '-' => TileType::Punishment,
                    'G' => {
                        board.goal = Some(position);
                        TileType::Goal
                    }
                    'O' => TileType::Portal,
                    'A' => {
                        board.start = position;
                        TileType::Empty
                    }
                    other => return Err(format!("Unknown map symbol: {:?}", other).into()),
                };
                board.tiles[y * width + x] = tile;
            }
        }
        board.agent = board.start;
        board.solve();
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn goal(&self) -> Option<Position> {
        self.goal
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let (x, y) = (position.x as usize, position.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    pub fn tile(&self, position: Position) -> Option<TileType> {
        self.index(position).map(|i| self.tiles[i])
    }

    pub fn value(&self, position: Position) -> f64 {
        self.index(position).map_or(0.0, |i| self.values[i])
    }

    pub fn best_action(&self, position: Position) -> Option<Action> {
        self.index(position).and_then(|i| self.best[i])
    }

    pub fn visits(&self, position: Position) -> u32 {
        self.index(position).map_or(0, |i| self.visits[i])
    }

    pub fn max_visits(&self) -> i64 {
        self.visits.iter().copied().max().unwrap_or(0) as i64
    }

    pub fn pulse(&self, position: Position) -> Option<RewardAnimation> {
        self.pulses.get(&position).map(|(kind, _)| *kind)
    }

    fn is_open(&self, position: Position) -> bool {
        matches!(self.tile(position), Some(t) if t != TileType::Obstacle)
    }

    fn neighbor(position: Position, action: Action) -> Position {
        let (dx, dy) = match action {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
        };
        Position::new(position.x + dx, position.y + dy)
    }

    /// Breadth-first distances from the goal, turned into discounted
    /// values; each open tile's best action steps to a neighbor one step
    /// closer, preferring the higher value.
    fn solve(&mut self) {
        self.values.fill(0.0);
        self.best.fill(None);
        let Some(goal) = self.goal else {
            return;
        };

        let mut distance: Vec<Option<u32>> = vec![None; self.tiles.len()];
        let mut queue = VecDeque::new();
        if let Some(i) = self.index(goal) {
            distance[i] = Some(0);
            queue.push_back(goal);
        }
        while let Some(position) = queue.pop_front() {
            let Some(d) = self.index(position).and_then(|i| distance[i]) else {
                continue;
            };
            for action in [Action::Up, Action::Down, Action::Left, Action::Right] {
                let next = Self::neighbor(position, action);
                if let Some(j) = self.index(next) {
                    if distance[j].is_none() && self.is_open(next) {
                        distance[j] = Some(d + 1);
                        queue.push_back(next);
                    }
                }
            }
        }

        for (i, d) in distance.iter().enumerate() {
            if let Some(d) = d {
                let bonus = match self.tiles[i] {
                    TileType::Reward => 1.0,
                    TileType::Punishment => -1.0,
                    _ => 0.0,
                };
                self.values[i] = GOAL_VALUE * DISCOUNT.powi(*d as i32) + bonus;
            }
        }

        let positions: Vec<Position> = self.positions().collect();
        for position in positions {
            let Some(i) = self.index(position) else {
                continue;
            };
            if !self.is_open(position) || Some(position) == self.goal || distance[i].is_none() {
                continue;
            }
            // Strictly downhill in distance, so walking always ends at the goal
            self.best[i] = [Action::Up, Action::Down, Action::Left, Action::Right]
                .into_iter()
                .filter_map(|a| {
                    let next = Self::neighbor(position, a);
                    let d = self.index(next).and_then(|j| distance[j])?;
                    Some((a, d, self.value(next)))
                })
                .min_by(|(_, da, va), (_, db, vb)| da.cmp(db).then(vb.total_cmp(va)))
                .map(|(a, _, _)| a);
        }
    }

    /// Move the agent one step along its best action
    pub fn step_agent(&mut self, now: Instant) -> StepEvent {
        let Some(action) = self.best_action(self.agent) else {
            return StepEvent::Stuck;
        };
        let next = Self::neighbor(self.agent, action);
        if !self.is_open(next) {
            return StepEvent::Stuck;
        }
        self.place_agent(next, now)
    }

    /// Put the agent on `position`, applying the tile's effect
    pub fn place_agent(&mut self, position: Position, now: Instant) -> StepEvent {
        if !self.is_open(position) {
            return StepEvent::Stuck;
        }
        let mut landed = position;
        let mut event = StepEvent::Moved(position);

        if self.tile(position) == Some(TileType::Portal) {
            if let Some(exit) = self
                .positions()
                .find(|p| *p != position && self.tile(*p) == Some(TileType::Portal))
            {
                landed = exit;
                event = StepEvent::Teleported(exit);
            }
        }

        if let Some(i) = self.index(landed) {
            self.visits[i] = self.visits[i].saturating_add(1);
        }
        match self.tile(landed) {
            Some(TileType::Reward) => {
                self.pulses.insert(landed, (RewardAnimation::Reward, now));
            }
            Some(TileType::Punishment) => {
                self.pulses.insert(landed, (RewardAnimation::Punishment, now));
            }
            _ => {}
        }

        if Some(landed) == self.goal {
            self.pulses.insert(landed, (RewardAnimation::Reward, now));
            self.agent = self.start;
            return StepEvent::ReachedGoal;
        }
        self.agent = landed;
        event
    }

    /// Drop pulses older than `duration`; returns true if any expired
    pub fn expire_pulses(&mut self, now: Instant, duration: Duration) -> bool {
        let before = self.pulses.len();
        self.pulses
            .retain(|_, (_, started)| now.saturating_duration_since(*started) < duration);
        self.pulses.len() != before
    }
}
