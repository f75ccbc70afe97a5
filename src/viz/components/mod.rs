pub mod board;
pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::widgets::WidgetRef;

pub use board::Board;
pub use help::render_help;
pub use log::Logs;
pub use plot::Plots;

/// A tab body that reacts to key presses
pub trait Component: WidgetRef {
    /// Returns whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.kind != KeyEventKind::Press {
        return None;
    }

    Some(key.code)
}
