use std::{
    io::{self, stdout, Stdout},
    panic,
    sync::Once,
};

use crossterm as ct;
use ct::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Switch to the alternate screen in raw mode
pub fn init() -> io::Result<Tui> {
    PANIC_HOOK.call_once(init_panic_hook);
    ct::execute!(stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    ct::execute!(stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Restore the terminal before the default hook prints the panic
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
