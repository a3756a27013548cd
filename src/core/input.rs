use std::fmt;
use std::str::FromStr;

/// Native key representation for gridtile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Esc,
    Enter,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Null,
}

impl Key {
    /// Keys that activate a focused control
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "SPC"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Tab => write!(f, "TAB"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Null => write!(f, "NUL"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ctrl notation: ^X or C-x
        if let Some(rest) = s.strip_prefix('^').or_else(|| s.strip_prefix("C-")) {
            let mut chars = rest.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(Key::Ctrl(c.to_ascii_lowercase()));
            }
        }

        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "ESC" => Ok(Key::Esc),
            "SPC" | "SPACE" => Ok(Key::Char(' ')),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            "NUL" | "NULL" => Ok(Key::Null),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Key::Char(c)),
                    _ => Err(format!("Unknown key: {}", s)),
                }
            }
        }
    }
}

/// Native input event representation for gridtile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
        }
    }
}

/// Mouse button types
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Type of mouse event
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollDown,
    ScrollUp,
}

/// Native mouse event representation for gridtile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseEvent {
    pub column: u16,
    pub row: u16,
    pub kind: MouseEventKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("^Q".parse::<Key>(), Ok(Key::Ctrl('q')));
        assert_eq!("C-c".parse::<Key>(), Ok(Key::Ctrl('c')));
        assert_eq!("enter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!("SPC".parse::<Key>(), Ok(Key::Char(' ')));
        assert_eq!("v".parse::<Key>(), Ok(Key::Char('v')));
        assert!("Hyper-x".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for key in [Key::Enter, Key::Tab, Key::Ctrl('x'), Key::Char(' '), Key::Char('h')] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn test_activation_keys() {
        assert!(Key::Enter.is_activation());
        assert!(Key::Char(' ').is_activation());
        assert!(!Key::Char('x').is_activation());
        assert!(!Key::Tab.is_activation());
    }
}
