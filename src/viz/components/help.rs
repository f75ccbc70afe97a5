use ratatui::{prelude::*, widgets::*};

use crate::viz::app::Tab;

fn key_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(action),
    ])
}

/// Centered popup listing the keys of the selected tab
pub fn render_help(area: Rect, buf: &mut Buffer, tab: Tab) {
    let mut lines = vec![
        key_line("  q  ", "Stop training and exit"),
        key_line("  h  ", "Toggle help popup"),
        key_line(" Tab ", "Switch tabs"),
    ];

    match tab {
        Tab::Board => {}
        Tab::Plots => lines.push(key_line("⬅ / ➡", "Switch plots")),
        Tab::Logs => lines.extend([
            key_line("PgUp ", "Scroll back through the log history"),
            key_line("PgDn ", "Scroll forward, only in page mode"),
            key_line(" Esc ", "Leave page mode"),
            key_line("- / +", "Capture one level less/more"),
        ]),
    }

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
