//! Viewer commands and the key map that triggers them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::config::Config;
use crate::core::input::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    FocusUp,
    FocusDown,
    FocusLeft,
    FocusRight,
    ToggleValues,
    ToggleHeatmap,
    ToggleActions,
    StepAgent,
    NextTheme,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::FocusUp => "focus-up",
            Command::FocusDown => "focus-down",
            Command::FocusLeft => "focus-left",
            Command::FocusRight => "focus-right",
            Command::ToggleValues => "toggle-values",
            Command::ToggleHeatmap => "toggle-heatmap",
            Command::ToggleActions => "toggle-actions",
            Command::StepAgent => "step-agent",
            Command::NextTheme => "next-theme",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus-up" => Ok(Command::FocusUp),
            "focus-down" => Ok(Command::FocusDown),
            "focus-left" => Ok(Command::FocusLeft),
            "focus-right" => Ok(Command::FocusRight),
            "toggle-values" => Ok(Command::ToggleValues),
            "toggle-heatmap" => Ok(Command::ToggleHeatmap),
            "toggle-actions" => Ok(Command::ToggleActions),
            "step-agent" => Ok(Command::StepAgent),
            "next-theme" => Ok(Command::NextTheme),
            "quit" => Ok(Command::Quit),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// Key to command lookup built from the configured bindings
#[derive(Debug, Default)]
pub struct Keymap {
    bindings: HashMap<Key, Command>,
}

impl Keymap {
    /// Bindings with an unparsable key or an unknown command are skipped
    pub fn from_config(config: &Config) -> Self {
        let mut bindings = HashMap::new();
        for (key, command) in &config.keybindings {
            match (key.parse::<Key>(), command.parse::<Command>()) {
                (Ok(key), Ok(command)) => {
                    bindings.insert(key, command);
                }
                (Err(e), _) | (_, Err(e)) => warn!(binding = %key, "{}", e),
            }
        }
        Self { bindings }
    }

    pub fn lookup(&self, event: &InputEvent) -> Option<Command> {
        if event.alt {
            return None;
        }
        self.bindings.get(&event.key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
