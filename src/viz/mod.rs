//! Terminal front end for watching training
//!
//! [`TerminalRenderer`] implements both [`Renderer`](crate::train::Renderer) and
//! [`InputSource`](crate::train::InputSource), so it can be handed straight to
//! [`Trainer::run`](crate::train::Trainer::run). Log records are captured by
//! [`init_logger`] and shown in the Logs tab.

mod app;
mod components;
mod tui;

use log::{LevelFilter, SetLoggerError};

pub use app::{App, Tab, TerminalRenderer};

/// Install the `tui-logger` backend for the `log` facade
///
/// Records at or above `level` are captured for the Logs tab.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(level);
    Ok(())
}
