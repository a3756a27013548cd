//! Terminal (TUI) mode implementation.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::Config;
use crate::core::format::format_value;
use crate::core::input::{InputEvent, MouseEvent};
use crate::core::interaction::{self, PointerTracker};
use crate::core::layout::{GridLayout, Rect};
use crate::core::memo::{MemoArena, TileMemo};
use crate::core::tile::{Icon, Position, TileHandlers, TileRenderState, TileType};
use crate::run::board::{Board, StepEvent};
use crate::run::commands::{Command, Keymap};
use crate::terminal::capabilities::DisplayMode;
use crate::terminal::display::Display;
use crate::terminal::events::{AppEvent, EventReader};
use crate::terminal::raw::RawMode;
use crate::terminal::render::render_display_to_terminal;
use crate::terminal::renderers::{StatusRenderer, TilePainter};
use crate::terminal::theme::{Theme, ThemeManager};

/// Overlay and sizing settings, read from config at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub tile_size: f32,
    pub show_values: bool,
    pub show_heatmap: bool,
    pub show_actions: bool,
    pub pulse: Duration,
}

impl ViewSettings {
    pub fn from_config(config: &Config) -> Self {
        let tile_size = config.int_or("tile_size", 48);
        let tile_size = if tile_size > 0 {
            tile_size as f32
        } else {
            warn!(tile_size, "tile size must be positive, using 48");
            48.0
        };
        Self {
            tile_size,
            show_values: config.bool_or("show_values", true),
            show_heatmap: config.bool_or("show_heatmap", false),
            show_actions: config.bool_or("show_actions", true),
            pulse: Duration::from_millis(config.int_or("pulse_ms", 600).max(0) as u64),
        }
    }
}

/// Interaction reported by a tile handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileNotice {
    Activated(Position),
    Pressed(Position),
    Hovered(Position),
}

/// Icons are allocated once so their identity stays stable across frames
struct Icons {
    agent: Icon,
    goal: Icon,
    portal: Icon,
}

impl Icons {
    fn new() -> Self {
        Self {
            agent: Icon::new("@"),
            goal: Icon::new("★"),
            portal: Icon::new("◎"),
        }
    }
}

/// Viewer state: the board, the per-tile memos and input bookkeeping
pub struct App {
    board: Board,
    settings: ViewSettings,
    keymap: Keymap,
    themes: ThemeManager,
    memo: MemoArena,
    pointer: PointerTracker,
    focus: Position,
    status_label: String,
    notices: Rc<RefCell<Vec<TileNotice>>>,
    icons: Icons,
}

impl App {
    pub fn new(board: Board, config: &Config) -> Self {
        let focus = board.agent();
        Self {
            board,
            settings: ViewSettings::from_config(config),
            keymap: Keymap::from_config(config),
            themes: ThemeManager::new(),
            memo: MemoArena::new(),
            pointer: PointerTracker::new(),
            focus,
            status_label: String::new(),
            notices: Rc::new(RefCell::new(Vec::new())),
            icons: Icons::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn focus(&self) -> Position {
        self.focus
    }

    pub fn memo(&self) -> &MemoArena {
        &self.memo
    }

    pub fn status_label(&self) -> &str {
        &self.status_label
    }

    /// Grid placement inside everything but the status line
    pub fn layout(&self, display: &Display) -> GridLayout {
        let (cols, rows) = display.terminal_size;
        let area = Rect::new(0, 0, cols as usize, rows.saturating_sub(1) as usize);
        GridLayout::centered_in(
            self.settings.tile_size,
            self.board.width(),
            self.board.height(),
            area,
        )
    }

    fn handlers_for(&self, position: Position, tile_type: TileType) -> TileHandlers {
        let notify = |make: fn(Position) -> TileNotice| {
            let sink = Rc::clone(&self.notices);
            Rc::new(move || sink.borrow_mut().push(make(position))) as Rc<dyn Fn()>
        };
        let on_activate = (tile_type != TileType::Obstacle).then(|| {
            let sink = Rc::clone(&self.notices);
            Rc::new(move |p: Position| sink.borrow_mut().push(TileNotice::Activated(p)))
                as Rc<dyn Fn(Position)>
        });
        TileHandlers {
            on_activate,
            on_press_start: Some(notify(TileNotice::Pressed)),
            on_hover_enter: Some(notify(TileNotice::Hovered)),
        }
    }

    fn label_for(&self, position: Position, tile_type: TileType) -> String {
        let mut label = if position == self.board.agent() {
            format!("agent on {} tile at {}", tile_type, position)
        } else {
            format!("{} tile at {}", tile_type, position)
        };
        if tile_type != TileType::Obstacle {
            label.push_str(&format!(", value {}", format_value(self.board.value(position))));
        }
        if let Some(action) = self.board.best_action(position) {
            label.push_str(&format!(", best action {}", action));
        }
        let visits = self.board.visits(position);
        if visits > 0 {
            label.push_str(&format!(", visited {} times", visits));
        }
        label
    }

    /// Fresh render inputs for every tile on the board
    pub fn tile_states(&self) -> Vec<TileRenderState> {
        let max_visits = self.board.max_visits();
        self.board
            .positions()
            .filter_map(|position| {
                let tile_type = self.board.tile(position)?;
                let mut state = TileRenderState::new(position, tile_type, self.settings.tile_size);
                state.value = self.board.value(position);
                state.show_values = self.settings.show_values;
                state.show_heatmap = self.settings.show_heatmap;
                state.show_actions = self.settings.show_actions;
                state.is_agent = position == self.board.agent();
                state.is_goal = Some(position) == self.board.goal();
                state.visits = self.board.visits(position);
                state.max_visits = max_visits;
                state.best_action = self.board.best_action(position);
                state.reward_animation = self.board.pulse(position);
                state.icon = if state.is_agent {
                    Some(self.icons.agent.clone())
                } else if state.is_goal {
                    Some(self.icons.goal.clone())
                } else if tile_type == TileType::Portal {
                    Some(self.icons.portal.clone())
                } else {
                    None
                };
                state.accessible_label = self.label_for(position, tile_type);
                state.handlers = self.handlers_for(position, tile_type);
                Some(state)
            })
            .collect()
    }

    /// Advance one tick: expire pulses, feed the memos and mark the rows
    /// of recomputed tiles. Returns the recomputed positions.
    pub fn frame(&mut self, display: &mut Display, now: Instant) -> Vec<Position> {
        self.board.expire_pulses(now, self.settings.pulse);

        let layout = self.layout(display);
        let states = self.tile_states();
        let recomputed = self.memo.update_all(states);
        display.dirty_tracker.mark_tiles(&layout, &recomputed);
        if !recomputed.is_empty() {
            display.dirty = true;
        }

        let label = self
            .memo
            .get(self.focus)
            .and_then(TileMemo::state)
            .map(|state| state.accessible_label.clone())
            .unwrap_or_default();
        if label != self.status_label {
            self.status_label = label;
            display
                .dirty_tracker
                .mark_row(display.terminal_size.1.saturating_sub(1) as usize);
            display.dirty = true;
        }
        recomputed
    }

    /// Draw every tile from its memoized visual, then the status line
    pub fn paint(&self, display: &mut Display) {
        display.begin_frame();
        let layout = self.layout(display);
        for visual in self.memo.visuals() {
            if let Some(rect) = layout.tile_rect(visual.position) {
                TilePainter::paint(
                    visual,
                    &rect,
                    &display.theme,
                    display.display_mode,
                    &mut display.back_buffer,
                    visual.position == self.focus,
                );
            }
        }
        StatusRenderer::render(
            &mut display.back_buffer,
            &display.theme,
            &self.status_label,
            &display.message,
        );
    }

    /// Process one event; returns true when the viewer should exit
    pub fn handle_event(&mut self, event: AppEvent, display: &mut Display, now: Instant) -> bool {
        let quit = match event {
            AppEvent::Input(input) => self.handle_input(&input, display, now),
            AppEvent::Mouse(mouse) => {
                self.handle_mouse(&mouse, display);
                false
            }
            AppEvent::Resize(cols, rows) => {
                display.update_size(cols, rows);
                false
            }
            AppEvent::None => false,
        };
        self.drain_notices(display, now);
        quit
    }

    fn handle_input(&mut self, input: &InputEvent, display: &mut Display, now: Instant) -> bool {
        if let Some(command) = self.keymap.lookup(input) {
            debug!(%command, "command");
            return self.execute(command, display, now);
        }
        // Enter/Space go to the focused tile
        if let Some(state) = self.memo.get(self.focus).and_then(TileMemo::state) {
            interaction::handle_key(state, input);
        }
        false
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, display: &Display) {
        let target = self.layout(display).hit_test(mouse.column, mouse.row);
        let memo = &self.memo;
        self.pointer
            .handle(mouse.kind, target, |p| memo.get(p).and_then(TileMemo::state));
    }

    fn execute(&mut self, command: Command, display: &mut Display, now: Instant) -> bool {
        match command {
            Command::FocusUp => self.move_focus(0, -1, display),
            Command::FocusDown => self.move_focus(0, 1, display),
            Command::FocusLeft => self.move_focus(-1, 0, display),
            Command::FocusRight => self.move_focus(1, 0, display),
            Command::ToggleValues => {
                self.settings.show_values = !self.settings.show_values;
                display.set_message(on_off("values", self.settings.show_values));
            }
            Command::ToggleHeatmap => {
                self.settings.show_heatmap = !self.settings.show_heatmap;
                display.set_message(on_off("heatmap", self.settings.show_heatmap));
            }
            Command::ToggleActions => {
                self.settings.show_actions = !self.settings.show_actions;
                display.set_message(on_off("actions", self.settings.show_actions));
            }
            Command::StepAgent => {
                let event = self.board.step_agent(now);
                display.set_message(describe_step(event));
            }
            Command::NextTheme => self.next_theme(display),
            Command::Quit => return true,
        }
        false
    }

    /// Move focus one step, passing over tiles that cannot take focus
    fn move_focus(&mut self, dx: i32, dy: i32, display: &mut Display) {
        let layout = self.layout(display);
        let mut candidate = self.focus;
        loop {
            let next = layout.step(candidate, dx, dy);
            if next == candidate {
                return;
            }
            candidate = next;
            let focusable = self
                .memo
                .get(candidate)
                .and_then(TileMemo::state)
                .is_some_and(interaction::is_focusable);
            if focusable {
                break;
            }
        }
        self.set_focus(candidate, display);
    }

    fn set_focus(&mut self, position: Position, display: &mut Display) {
        if position == self.focus {
            return;
        }
        let layout = self.layout(display);
        display
            .dirty_tracker
            .mark_tiles(&layout, &[self.focus, position]);
        display.dirty = true;
        self.focus = position;
    }

    fn next_theme(&mut self, display: &mut Display) {
        let names = self.themes.names();
        let current = names.iter().position(|name| *name == display.theme.name);
        let next = current.map_or(0, |i| (i + 1) % names.len());
        if let Some(theme) = names.get(next).and_then(|name| self.themes.get(name)) {
            display.set_message(format!("theme {}", theme.name));
            display.theme = theme;
            display.needs_full_redraw = true;
            display.dirty = true;
        }
    }

    fn drain_notices(&mut self, display: &mut Display, now: Instant) {
        let notices: Vec<TileNotice> = self.notices.borrow_mut().drain(..).collect();
        for notice in notices {
            match notice {
                TileNotice::Activated(position) => {
                    self.set_focus(position, display);
                    let event = self.board.place_agent(position, now);
                    display.set_message(describe_step(event));
                }
                TileNotice::Pressed(position) => {
                    display.set_message(format!("press {}", position));
                }
                TileNotice::Hovered(position) => {
                    display.set_message(format!("hover {}", position));
                }
            }
        }
    }
}

fn on_off(what: &str, on: bool) -> String {
    format!("{} {}", what, if on { "on" } else { "off" })
}

fn describe_step(event: StepEvent) -> String {
    match event {
        StepEvent::Moved(position) => format!("agent moved to {}", position),
        StepEvent::Teleported(position) => format!("agent teleported to {}", position),
        StepEvent::ReachedGoal => "goal reached, agent reset".to_string(),
        StepEvent::Stuck => "agent cannot move".to_string(),
    }
}

/// Pick the configured theme, falling back to the default
pub fn theme_from_config(config: &Config) -> Theme {
    let name = config.string_or("theme", "dracula");
    match ThemeManager::new().get(name) {
        Some(theme) => theme,
        None => {
            warn!(theme = name, "unknown theme, using default");
            Theme::default()
        }
    }
}

/// Run in terminal (TUI) mode.
pub fn run_terminal_mode(
    config: &Config,
    display_mode: DisplayMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut display = Display::new_terminal(theme_from_config(config))?;
    display.display_mode = display_mode;
    display.set_message("s step  v/m/a overlays  t theme  q quit".to_string());

    let mut app = App::new(Board::demo(), config);
    let mut events = EventReader::new();
    let mut stdout = io::stdout();

    let _raw_mode = RawMode::enter()?;
    debug!(?display_mode, "terminal mode started");

    loop {
        app.frame(&mut display, Instant::now());

        if display.dirty
            || display.needs_full_redraw
            || display.dirty_tracker.dirty_row_count() > 0
        {
            app.paint(&mut display);
            display.validate_buffer_synchronization()?;
            render_display_to_terminal(&display, &mut stdout)?;
            display.swap_buffers();
        }

        // Short timeout so pulses expire on time while idle
        if events.poll(Duration::from_millis(50))? {
            let event = events.read()?;
            if app.handle_event(event, &mut display, Instant::now()) {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{Key, MouseButton, MouseEventKind};
    use crate::core::memo::RenderOutcome;
    use crate::user_config;

    fn setup() -> (App, Display) {
        let mut config = Config::default();
        user_config::configure(&mut config);
        let board = Board::parse(&["A.+G", ".#.."]).unwrap();
        let app = App::new(board, &config);
        // 4x2 tiles of 6x3 cells, plus the status line
        let display = Display::new(24, 7, Theme::default(), DisplayMode::TrueColor);
        (app, display)
    }

    fn key(app: &mut App, display: &mut Display, key: Key) -> bool {
        app.handle_event(AppEvent::Input(InputEvent::plain(key)), display, Instant::now())
    }

    fn mouse(app: &mut App, display: &mut Display, kind: MouseEventKind, column: u16, row: u16) {
        let event = AppEvent::Mouse(MouseEvent { column, row, kind });
        app.handle_event(event, display, Instant::now());
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        user_config::configure(&mut config);
        config.set("tile_size", -3);
        let settings = ViewSettings::from_config(&config);
        assert_eq!(settings.tile_size, 48.0);
        assert_eq!(settings.pulse, Duration::from_millis(600));
        assert!(settings.show_values);
    }

    #[test]
    fn test_second_frame_skips_everything() {
        let (mut app, mut display) = setup();
        let now = Instant::now();
        assert_eq!(app.frame(&mut display, now).len(), 8);
        display.swap_buffers();
        assert!(app.frame(&mut display, now).is_empty());
        assert_eq!(display.dirty_tracker.dirty_row_count(), 0);
    }

    #[test]
    fn test_obstacle_not_focusable() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        let obstacle = app.memo().get(Position::new(1, 1)).and_then(TileMemo::state).unwrap();
        assert!(!interaction::is_focusable(obstacle));

        key(&mut app, &mut display, Key::Down);
        assert_eq!(app.focus(), Position::new(0, 1));
        // Right from (0, 1) passes over the obstacle
        key(&mut app, &mut display, Key::Right);
        assert_eq!(app.focus(), Position::new(2, 1));
    }

    #[test]
    fn test_focus_move_marks_both_tiles() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        display.swap_buffers();
        key(&mut app, &mut display, Key::Down);
        let layout = app.layout(&display);
        for position in [Position::new(0, 0), Position::new(0, 1)] {
            let rect = layout.tile_rect(position).unwrap();
            assert!(display.dirty_tracker.is_row_dirty(rect.y));
        }
    }

    #[test]
    fn test_enter_activates_focused_tile() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        key(&mut app, &mut display, Key::Right);
        key(&mut app, &mut display, Key::Enter);
        assert_eq!(app.board().agent(), Position::new(1, 0));
        assert_eq!(display.message, "agent moved to (1, 0)");

        // The first visit raised max_visits, so every tile recomputed
        assert_eq!(app.frame(&mut display, Instant::now()).len(), 8);

        // Now only the old and new agent tiles change
        key(&mut app, &mut display, Key::Right);
        key(&mut app, &mut display, Key::Char(' '));
        assert_eq!(app.board().agent(), Position::new(2, 0));
        let recomputed = app.frame(&mut display, Instant::now());
        assert_eq!(recomputed.len(), 2);
        assert!(recomputed.contains(&Position::new(1, 0)));
        assert!(recomputed.contains(&Position::new(2, 0)));
    }

    #[test]
    fn test_click_activates_once() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        let layout = app.layout(&display);
        let rect = layout.tile_rect(Position::new(2, 1)).unwrap();
        let (col, row) = (rect.x as u16 + 1, rect.y as u16 + 1);

        mouse(&mut app, &mut display, MouseEventKind::Moved, col, row);
        assert_eq!(display.message, "hover (2, 1)");
        mouse(&mut app, &mut display, MouseEventKind::Down(MouseButton::Left), col, row);
        assert_eq!(display.message, "press (2, 1)");
        mouse(&mut app, &mut display, MouseEventKind::Up(MouseButton::Left), col, row);
        assert_eq!(app.board().agent(), Position::new(2, 1));
        assert_eq!(app.focus(), Position::new(2, 1));
        assert_eq!(app.board().visits(Position::new(2, 1)), 1);
    }

    #[test]
    fn test_toggle_recomputes_every_tile() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        key(&mut app, &mut display, Key::Char('v'));
        assert!(!app.settings().show_values);
        assert_eq!(display.message, "values off");
        assert_eq!(app.frame(&mut display, Instant::now()).len(), 8);
        let memo = app.memo().get(Position::new(1, 0)).unwrap();
        assert!(memo.visual().unwrap().badge.is_none());
    }

    #[test]
    fn test_pulse_expires_after_duration() {
        let (mut app, mut display) = setup();
        let start = Instant::now();
        app.frame(&mut display, start);
        app.handle_event(AppEvent::Input(InputEvent::plain(Key::Char('s'))), &mut display, start);
        app.handle_event(AppEvent::Input(InputEvent::plain(Key::Char('s'))), &mut display, start);
        assert_eq!(app.board().agent(), Position::new(2, 0));

        app.frame(&mut display, start);
        let pulse = |app: &App| {
            app.memo()
                .get(Position::new(2, 0))
                .and_then(TileMemo::visual)
                .and_then(|v| v.pulse.clone())
        };
        assert!(pulse(&app).is_some());

        app.frame(&mut display, start + Duration::from_secs(1));
        assert!(pulse(&app).is_none());
    }

    #[test]
    fn test_theme_cycles_and_redraws() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        display.swap_buffers();
        let before = display.theme.name.clone();
        key(&mut app, &mut display, Key::Char('t'));
        assert_ne!(display.theme.name, before);
        assert!(display.needs_full_redraw);
    }

    #[test]
    fn test_quit_and_status_label() {
        let (mut app, mut display) = setup();
        app.frame(&mut display, Instant::now());
        assert!(app.status_label().starts_with("agent on empty tile at (0, 0)"));
        app.paint(&mut display);
        let memo = app.memo().get(Position::new(0, 0)).unwrap();
        assert_eq!(memo.stats(), (1, 0));
        assert!(key(&mut app, &mut display, Key::Char('q')));
        assert!(!key(&mut app, &mut display, Key::Char('x')));
    }

    #[test]
    fn test_memo_keeps_latest_handlers_on_skip() {
        let (mut app, _display) = setup();
        let mut memo = TileMemo::new();
        let states = app.tile_states();
        assert_eq!(memo.update(states[1].clone()), RenderOutcome::Recomputed);
        let fresh = app.tile_states();
        assert_eq!(memo.update(fresh[1].clone()), RenderOutcome::Skipped);
        interaction::activate(memo.state().unwrap());
        app.drain_notices(&mut Display::new(24, 7, Theme::default(), DisplayMode::TrueColor), Instant::now());
        assert_eq!(app.board().agent(), Position::new(1, 0));
    }
}
