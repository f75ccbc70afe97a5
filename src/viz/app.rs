use std::{io, time::Duration};

use crossterm::event::{self, Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::train::{EpisodeStats, Frame, InputSource, Renderer};

use super::{
    components::{event_keycode, render_help, Board, Component, Logs, Plots},
    tui::{self, Tui},
};

/// Top level tabs, in display order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Board,
    Plots,
    Logs,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Board, Tab::Plots, Tab::Logs];

    fn title(self) -> &'static str {
        match self {
            Tab::Board => "Board",
            Tab::Plots => "Plots",
            Tab::Logs => "Logs",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }
}

/// The root TUI component holding everything drawn on screen
#[derive(Default)]
pub struct App {
    tab: Tab,
    show_help: bool,
    quit: bool,
    board: Board,
    plots: Plots,
    logs: Logs,
    episodes: u32,
    best_score: f64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_episode(&mut self, stats: &EpisodeStats) {
        self.episodes = stats.episode + 1;
        if let Some(i) = stats.keys.iter().position(|&k| k == "score") {
            self.best_score = self.best_score.max(stats.data[i]);
        }
        self.plots.update(stats);
    }

    /// Route an event, returns whether the app should quit
    fn handle_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Char('q')) => self.quit = true,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.tab = self.tab.next(),
            Some(_) => {
                let _ = self.selected_mut().handle_ui_event(event);
            }
            None => {}
        }
        self.quit
    }

    fn selected_mut(&mut self) -> &mut dyn Component {
        match self.tab {
            Tab::Board => &mut self.board,
            Tab::Plots => &mut self.plots,
            Tab::Logs => &mut self.logs,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(Tab::ALL.map(Tab::title))
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.tab as usize)
            .render(menu_area, buf);

        match self.tab {
            Tab::Board => self.board.render_ref(main_area, buf),
            Tab::Plots => self.plots.render_ref(main_area, buf),
            Tab::Logs => self.logs.render_ref(main_area, buf),
        }

        Paragraph::new(format!(
            "Episodes: {}   Best score: {}   (h for help)",
            self.episodes, self.best_score
        ))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title("Training"),
        )
        .render(status_area, buf);

        if self.show_help {
            render_help(area, buf, self.tab);
        }
    }
}

/// Draws training in the terminal and reads the quit key
///
/// Restores the terminal when dropped.
pub struct TerminalRenderer {
    terminal: Tui,
    app: App,
}

impl TerminalRenderer {
    /// Enter the alternate screen
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: tui::init()?,
            app: App::new(),
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let app = &self.app;
        self.terminal
            .draw(|frame| frame.render_widget(app, frame.size()))?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = tui::restore();
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
        self.app.board.update(frame);
        self.draw()
    }

    fn episode_end(&mut self, stats: &EpisodeStats) -> io::Result<()> {
        self.app.record_episode(stats);
        Ok(())
    }
}

impl InputSource for TerminalRenderer {
    fn quit_requested(&mut self) -> io::Result<bool> {
        let mut redraw = false;
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if self.app.handle_event(&event) {
                return Ok(true);
            }
            redraw = true;
        }
        if redraw {
            self.draw()?;
        }
        Ok(false)
    }
}
