// gridtile configuration
// Edit this file to customize the viewer, then rebuild.

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Focus movement
    config.bind("Up", "focus-up");
    config.bind("Down", "focus-down");
    config.bind("Left", "focus-left");
    config.bind("Right", "focus-right");
    config.bind("k", "focus-up");
    config.bind("j", "focus-down");
    config.bind("h", "focus-left");
    config.bind("l", "focus-right");

    // Overlays
    config.bind("v", "toggle-values");
    config.bind("m", "toggle-heatmap");
    config.bind("a", "toggle-actions");

    // Simulation
    config.bind("s", "step-agent");
    config.bind("t", "next-theme");

    config.bind("q", "quit");
    config.bind("^Q", "quit");
    config.bind("^C", "quit");

    // Settings
    config.set("theme", "dracula");
    config.set("tile_size", 48);
    config.set("show_values", true);
    config.set("show_heatmap", false);
    config.set("show_actions", true);
    config.set("pulse_ms", 600);
}
