use crossterm::event::{Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use super::{event_keycode, Component};

/// Scrollable view of captured `log` records
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new() -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(LevelFilter::Info),
        }
    }
}

impl Default for Logs {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerWidget::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Training log"),
            )
            .output_separator(' ')
            .output_timestamp(Some(String::from("%H:%M:%S")))
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .style(Style::default().white())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().light_green())
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let widget_event = match event_keycode(event) {
            Some(KeyCode::PageUp) => TuiWidgetEvent::PrevPageKey,
            Some(KeyCode::PageDown) => TuiWidgetEvent::NextPageKey,
            Some(KeyCode::Esc) => TuiWidgetEvent::EscapeKey,
            Some(KeyCode::Char('+')) | Some(KeyCode::Char('=')) => TuiWidgetEvent::PlusKey,
            Some(KeyCode::Char('-')) => TuiWidgetEvent::MinusKey,
            _ => return false,
        };

        self.state.transition(widget_event);
        true
    }
}
