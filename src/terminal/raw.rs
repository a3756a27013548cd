use std::sync::atomic::{AtomicBool, Ordering};

static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// RAII guard for raw mode, the alternate screen and mouse capture.
/// The terminal is restored on drop and before a panic message prints.
pub struct RawMode {
    original_hook: Option<PanicHook>,
}

impl RawMode {
    pub fn enter() -> Result<Self, Box<dyn std::error::Error>> {
        crossterm::terminal::enable_raw_mode()?;

        let mut stdout = std::io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::cursor::Hide,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{}", info);
        }));

        tracing::debug!("raw mode entered");
        Ok(Self {
            original_hook: Some(original_hook),
        })
    }

    pub fn is_active() -> bool {
        TERMINAL_ACTIVE.load(Ordering::SeqCst)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();
        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

fn restore_terminal() {
    if TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0),
            crossterm::cursor::Show,
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Entering raw mode would take over the test runner's terminal, so only
    // the inert paths are exercised here.
    #[test]
    fn test_guard_without_hook_drops_cleanly() {
        let guard = RawMode {
            original_hook: None,
        };
        drop(guard);
        assert!(!RawMode::is_active());
    }
}
