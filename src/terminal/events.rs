use crate::core::input::{InputEvent, Key, MouseButton, MouseEvent, MouseEventKind};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Terminal events, normalized away from crossterm
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Input(InputEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    None,
}

/// Reads crossterm events and converts them into `AppEvent`s
#[derive(Debug, Default)]
pub struct EventReader;

impl EventReader {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(event::poll(timeout)?)
    }

    /// Read the next event without blocking
    pub fn read(&mut self) -> Result<AppEvent, Box<dyn std::error::Error>> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(AppEvent::None);
        }
        Ok(convert_event(event::read()?))
    }
}

pub fn convert_event(event: Event) -> AppEvent {
    match event {
        // Release/repeat reports (kitty protocol) would double-activate
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            AppEvent::Input(convert_key(key_event))
        }
        Event::Mouse(mouse_event) => match convert_mouse(mouse_event) {
            Some(mouse) => AppEvent::Mouse(mouse),
            None => AppEvent::None,
        },
        Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
        _ => AppEvent::None,
    }
}

fn convert_button(btn: event::MouseButton) -> MouseButton {
    match btn {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_mouse(event: event::MouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        event::MouseEventKind::Down(btn) => MouseEventKind::Down(convert_button(btn)),
        event::MouseEventKind::Up(btn) => MouseEventKind::Up(convert_button(btn)),
        event::MouseEventKind::Drag(btn) => MouseEventKind::Drag(convert_button(btn)),
        event::MouseEventKind::Moved => MouseEventKind::Moved,
        event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        event::MouseEventKind::ScrollLeft | event::MouseEventKind::ScrollRight => return None,
    };
    Some(MouseEvent {
        column: event.column,
        row: event.row,
        kind,
    })
}

fn convert_key(key_event: event::KeyEvent) -> InputEvent {
    let modifiers = key_event.modifiers;
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key = match key_event.code {
        KeyCode::Char(c) if ctrl && !alt => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Null,
    };

    InputEvent {
        key,
        shift,
        alt,
        ctrl,
    }
}
