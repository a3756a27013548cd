//! Interaction dispatch
//!
//! Forwards activation, press-start and hover-enter to the handlers held in
//! a tile's current `TileRenderState`. A tile without an activation handler
//! cannot take focus and ignores activation keys.

use crate::core::input::{InputEvent, MouseButton, MouseEventKind};
use crate::core::tile::{Position, TileRenderState};

/// Whether keyboard focus may land on the tile
pub fn is_focusable(state: &TileRenderState) -> bool {
    state.handlers.on_activate.is_some()
}

/// Invoke `on_activate(x, y)` if supplied
pub fn activate(state: &TileRenderState) -> bool {
    match &state.handlers.on_activate {
        Some(handler) => {
            tracing::debug!(position = %state.position, "tile activated");
            handler(state.position);
            true
        }
        None => false,
    }
}

pub fn press_start(state: &TileRenderState) -> bool {
    match &state.handlers.on_press_start {
        Some(handler) => {
            handler();
            true
        }
        None => false,
    }
}

pub fn hover_enter(state: &TileRenderState) -> bool {
    match &state.handlers.on_hover_enter {
        Some(handler) => {
            handler();
            true
        }
        None => false,
    }
}

/// Key press on the focused tile; Enter and Space activate
pub fn handle_key(state: &TileRenderState, event: &InputEvent) -> bool {
    if !is_focusable(state) || event.ctrl || event.alt || !event.key.is_activation() {
        return false;
    }
    activate(state)
}

/// Pointer bookkeeping for a whole grid.
///
/// Hover-enter fires once when the pointer moves onto a tile, and a click is
/// a left press and release on the same tile.
#[derive(Debug, Default)]
pub struct PointerTracker {
    hovered: Option<Position>,
    pressed: Option<Position>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<Position> {
        self.hovered
    }

    /// Feed a pointer event already hit-tested to `target`.
    ///
    /// `lookup` returns the current state of a tile by position. Returns
    /// true if any handler ran.
    pub fn handle<'a, F>(&mut self, kind: MouseEventKind, target: Option<Position>, lookup: F) -> bool
    where
        F: Fn(Position) -> Option<&'a TileRenderState>,
    {
        let mut fired = false;

        if target != self.hovered {
            self.hovered = target;
            if let Some(state) = target.and_then(&lookup) {
                fired |= hover_enter(state);
            }
        }

        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = target;
                if let Some(state) = target.and_then(&lookup) {
                    fired |= press_start(state);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                if pressed.is_some() && pressed == target {
                    if let Some(state) = target.and_then(&lookup) {
                        fired |= activate(state);
                    }
                }
            }
            _ => {}
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crate::core::tile::{TileHandlers, TileType};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn tile_at(x: i32, y: i32) -> TileRenderState {
        TileRenderState::new(Position::new(x, y), TileType::Empty, 40.0)
    }

    fn recording(state: &mut TileRenderState) -> Rc<RefCell<Vec<Position>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        state.handlers.on_activate = Some(Rc::new(move |p: Position| sink.borrow_mut().push(p)));
        log
    }

    #[test]
    fn test_no_handler_not_focusable() {
        let state = tile_at(1, 1);
        assert!(!is_focusable(&state));
        assert!(!handle_key(&state, &InputEvent::plain(Key::Enter)));
        assert!(!handle_key(&state, &InputEvent::plain(Key::Char(' '))));
        assert!(!activate(&state));
    }

    #[test]
    fn test_enter_and_space_activate_once() {
        let mut state = tile_at(3, 4);
        let log = recording(&mut state);
        assert!(is_focusable(&state));

        assert!(handle_key(&state, &InputEvent::plain(Key::Enter)));
        assert_eq!(*log.borrow(), vec![Position::new(3, 4)]);

        assert!(handle_key(&state, &InputEvent::plain(Key::Char(' '))));
        assert_eq!(log.borrow().len(), 2);

        assert!(!handle_key(&state, &InputEvent::plain(Key::Char('x'))));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_modified_enter_ignored() {
        let mut state = tile_at(0, 0);
        let log = recording(&mut state);
        let mut event = InputEvent::plain(Key::Enter);
        event.ctrl = true;
        assert!(!handle_key(&state, &event));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_click_activates_once() {
        let mut state = tile_at(2, 5);
        let log = recording(&mut state);
        let mut tracker = PointerTracker::new();
        let here = Some(state.position);

        tracker.handle(MouseEventKind::Down(MouseButton::Left), here, |_| Some(&state));
        assert!(log.borrow().is_empty());
        tracker.handle(MouseEventKind::Up(MouseButton::Left), here, |_| Some(&state));
        assert_eq!(*log.borrow(), vec![Position::new(2, 5)]);

        // a stray release is not a click
        tracker.handle(MouseEventKind::Up(MouseButton::Left), here, |_| Some(&state));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_click_without_handler_is_silent() {
        let state = tile_at(0, 0);
        let mut tracker = PointerTracker::new();
        let here = Some(state.position);
        assert!(!tracker.handle(MouseEventKind::Down(MouseButton::Left), here, |_| Some(&state)));
        assert!(!tracker.handle(MouseEventKind::Up(MouseButton::Left), here, |_| Some(&state)));
    }

    #[test]
    fn test_release_elsewhere_cancels_click() {
        let mut a = tile_at(0, 0);
        let log = recording(&mut a);
        let b = tile_at(1, 0);
        let lookup = |p: Position| if p == a.position { Some(&a) } else { Some(&b) };
        let mut tracker = PointerTracker::new();

        tracker.handle(MouseEventKind::Down(MouseButton::Left), Some(a.position), lookup);
        tracker.handle(MouseEventKind::Up(MouseButton::Left), Some(b.position), lookup);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_press_and_hover_forwarded() {
        let presses = Rc::new(Cell::new(0));
        let hovers = Rc::new(Cell::new(0));
        let mut state = tile_at(0, 0);
        let (p, h) = (presses.clone(), hovers.clone());
        state.handlers = TileHandlers {
            on_activate: None,
            on_press_start: Some(Rc::new(move || p.set(p.get() + 1))),
            on_hover_enter: Some(Rc::new(move || h.set(h.get() + 1))),
        };
        let mut tracker = PointerTracker::new();
        let here = Some(state.position);

        tracker.handle(MouseEventKind::Moved, here, |_| Some(&state));
        tracker.handle(MouseEventKind::Moved, here, |_| Some(&state));
        assert_eq!(hovers.get(), 1);
        assert_eq!(tracker.hovered(), here);

        tracker.handle(MouseEventKind::Down(MouseButton::Left), here, |_| Some(&state));
        assert_eq!(presses.get(), 1);

        tracker.handle(MouseEventKind::Moved, None, |_| Some(&state));
        tracker.handle(MouseEventKind::Moved, here, |_| Some(&state));
        assert_eq!(hovers.get(), 2);
    }
}
