// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::String(_) => "string",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keybindings: HashMap::new(),
            settings: HashMap::new(),
        }
    }
}

impl Config {
    /// Bind a key to a command name
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Boolean setting, or `default` when missing or of another type
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(ConfigValue::Bool(b)) => *b,
            Some(other) => {
                warn!(key, found = other.kind(), "expected bool setting, using default");
                default
            }
            None => default,
        }
    }

    /// Integer setting, or `default` when missing or of another type
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(ConfigValue::Int(i)) => *i,
            Some(other) => {
                warn!(key, found = other.kind(), "expected int setting, using default");
                default
            }
            None => default,
        }
    }

    /// String setting, or `default` when missing or of another type
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(ConfigValue::String(s)) => s.as_str(),
            Some(other) => {
                warn!(key, found = other.kind(), "expected string setting, using default");
                default
            }
            None => default,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
