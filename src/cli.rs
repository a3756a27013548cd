//! Command-line argument parsing for gridtile.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for parsing them.

use crate::config::{Config, ConfigValue};

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    /// Color theme override
    pub theme: Option<String>,

    /// Tile size override, in pixels
    pub tile_size: Option<i64>,

    /// Value badges on/off override
    pub values: Option<bool>,

    /// Visit heatmap on/off override
    pub heatmap: Option<bool>,

    /// Best-action arrows on/off override
    pub actions: Option<bool>,

    /// Force ASCII glyphs
    pub ascii: bool,

    /// Force 16-color ANSI output
    pub ansi: bool,

    /// Print usage and exit
    pub help: bool,
}

pub const USAGE: &str = "\
gridtile - grid world tile viewer

Usage: gridtile [OPTIONS]

Options:
  -h, --help            Show this help message
  -t, --theme NAME      Set color theme
  -z, --tile-size N     Tile size in pixels (8 px per column, 16 px per row)
  -v, --values          Show value badges
  -m, --heatmap         Show the visit heatmap
  -a, --actions         Show best-action arrows
      --no-values       Hide value badges
      --no-heatmap      Hide the visit heatmap
      --no-actions      Hide best-action arrows
      --ansi            Force 16-color ANSI mode
      --ascii           Force ASCII terminal mode";

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list (program name already stripped).
    ///
    /// Returns an error for unknown flags, missing values and
    /// non-numeric tile sizes.
    pub fn parse_from<I>(args: I) -> Result<Self, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-v" | "--values" => cli.values = Some(true),
                "-m" | "--heatmap" => cli.heatmap = Some(true),
                "-a" | "--actions" => cli.actions = Some(true),
                "--no-values" => cli.values = Some(false),
                "--no-heatmap" => cli.heatmap = Some(false),
                "--no-actions" => cli.actions = Some(false),
                "--ascii" => cli.ascii = true,
                "--ansi" => cli.ansi = true,
                "-h" | "--help" => cli.help = true,
                "-t" | "--theme" => {
                    if let Some(t) = args.next() {
                        cli.theme = Some(t);
                    } else {
                        return Err("--theme requires a value".into());
                    }
                }
                "-z" | "--tile-size" => {
                    let Some(size) = args.next() else {
                        return Err("--tile-size requires a value".into());
                    };
                    let size: i64 = size
                        .parse()
                        .map_err(|_| format!("Invalid tile size: {}", size))?;
                    if size <= 0 {
                        return Err(format!("Tile size must be positive: {}", size).into());
                    }
                    cli.tile_size = Some(size);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown flag: {}. Use --help for usage.", arg).into());
                }
                other => {
                    return Err(format!("Unexpected argument: {}", other).into());
                }
            }
        }

        Ok(cli)
    }

    /// Apply CLI overrides to a configuration object.
    ///
    /// Overlay flags override the config only when given; the last of a
    /// `--values`/`--no-values` pair wins.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.set("theme", ConfigValue::String(theme.clone()));
        }
        if let Some(size) = self.tile_size {
            config.set("tile_size", size);
        }
        let overlays = [
            ("show_values", self.values),
            ("show_heatmap", self.heatmap),
            ("show_actions", self.actions),
        ];
        for (key, value) in overlays {
            if let Some(on) = value {
                config.set(key, on);
            }
        }
    }
}
