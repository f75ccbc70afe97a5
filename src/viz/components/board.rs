use std::collections::HashSet;

use crossterm::event::Event;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{block::Title, *},
};

use crate::{
    grid::{Cell, Grid},
    train::Frame,
};

use super::Component;

const FIELD: Color = Color::Rgb(50, 153, 213);
const SNAKE: Color = Color::Rgb(0, 255, 0);
const FOOD: Color = Color::Rgb(213, 50, 80);

// room for both titles
const MIN_WIDTH: u16 = 32;

/// Latest game frame, drawn two columns per cell
#[derive(Debug, Default)]
pub struct Board {
    grid: Option<Grid>,
    body: HashSet<Cell>,
    head: Option<Cell>,
    food: Cell,
    score: u32,
    deaths: u32,
}

impl Board {
    pub fn update(&mut self, frame: Frame<'_>) {
        self.grid = Some(*frame.grid);
        self.body.clear();
        self.body.extend(frame.body.iter().copied());
        self.head = frame.body.front().copied();
        self.food = frame.food;
        self.score = frame.score;
        self.deaths = frame.deaths;
    }

    fn cell_style(&self, cell: Cell) -> Style {
        if Some(cell) == self.head {
            Style::default().bg(SNAKE).fg(Color::Black)
        } else if self.body.contains(&cell) {
            Style::default().bg(SNAKE)
        } else if cell == self.food {
            Style::default().bg(FOOD)
        } else {
            Style::default().bg(FIELD)
        }
    }
}

impl WidgetRef for Board {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" Score: {} ", self.score).bold())
            .title(
                Title::from(format!(" Deaths: {} ", self.deaths).bold())
                    .alignment(Alignment::Right),
            );

        let Some(grid) = self.grid else {
            Paragraph::new("Waiting for the first tick")
                .block(block)
                .render(area, buf);
            return;
        };

        let rows = (0..grid.height())
            .map(|y| {
                let spans = (0..grid.width())
                    .map(|x| {
                        let cell = Cell::new(x, y);
                        let symbol = if Some(cell) == self.head { "()" } else { "  " };
                        Span::styled(symbol, self.cell_style(cell))
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect::<Vec<_>>();

        let width = (grid.width() as u16 * 2 + 2).max(MIN_WIDTH);
        let [board_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        Paragraph::new(rows).block(block).render(board_area, buf);
    }
}

impl Component for Board {
    fn handle_ui_event(&mut self, _event: &Event) -> bool {
        false
    }
}
