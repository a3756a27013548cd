//! gridtile - grid world tile viewer
//!
//! This is the main entry point. It parses CLI arguments, builds the
//! configuration and hands over to the terminal viewer.

use std::io::IsTerminal;

use gridtile::{cli, config, run, terminal, user_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = cli::Cli::parse()?;
    if cli.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    // Load configuration
    let mut config = config::Config::default();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);

    run::check_interactive(std::io::stdin().is_terminal(), std::io::stdout().is_terminal())?;

    let display_mode = run::resolve_display_mode(
        cli.ascii,
        cli.ansi,
        terminal::capabilities::DisplayMode::detect(),
    );
    run::run_terminal_mode(&config, display_mode)
}
