//! Application execution for gridtile.
//!
//! The demo board, the key map and the terminal viewer loop live here.

mod board;
mod commands;
mod tui;

pub use board::{Board, StepEvent};
pub use commands::{Command, Keymap};
pub use tui::{App, TileNotice, ViewSettings, run_terminal_mode, theme_from_config};

use crate::terminal::capabilities::DisplayMode;

/// Make sure both ends of the viewer are attached to a terminal.
pub fn check_interactive(
    is_stdin_tty: bool,
    is_stdout_tty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !is_stdin_tty || !is_stdout_tty {
        return Err("gridtile needs an interactive terminal".into());
    }
    Ok(())
}

/// Resolve the display mode: explicit flags first, then detection.
pub fn resolve_display_mode(force_ascii: bool, force_ansi: bool, detected: DisplayMode) -> DisplayMode {
    if force_ascii {
        DisplayMode::Ascii
    } else if force_ansi {
        DisplayMode::Ansi
    } else {
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_interactive() {
        assert!(check_interactive(true, true).is_ok());
        assert!(check_interactive(false, true).is_err());
        assert!(check_interactive(true, false).is_err());
    }

    #[test]
    fn test_resolve_display_mode() {
        assert_eq!(resolve_display_mode(true, true, DisplayMode::TrueColor), DisplayMode::Ascii);
        assert_eq!(resolve_display_mode(false, true, DisplayMode::TrueColor), DisplayMode::Ansi);
        assert_eq!(resolve_display_mode(false, false, DisplayMode::TrueColor), DisplayMode::TrueColor);
    }
}
