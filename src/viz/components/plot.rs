use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::train::EpisodeStats;

use super::{event_keycode, Component};

/// Episodes averaged by the trend line
const TREND_WINDOW: usize = 50;

/// One episode metric as raw points plus a trailing mean
pub struct Plot {
    metric: &'static str,
    points: Vec<(f64, f64)>,
    trend: Vec<(f64, f64)>,
    window: VecDeque<f64>,
    window_sum: f64,
    y_range: Option<(f64, f64)>,
}

impl Plot {
    pub fn new(metric: &'static str) -> Self {
        Self {
            metric,
            points: Vec::new(),
            trend: Vec::new(),
            window: VecDeque::with_capacity(TREND_WINDOW + 1),
            window_sum: 0.0,
            y_range: None,
        }
    }

    pub fn push(&mut self, episode: f64, value: f64) {
        self.points.push((episode, value));

        self.window.push_back(value);
        self.window_sum += value;
        if self.window.len() > TREND_WINDOW {
            self.window_sum -= self.window.pop_front().unwrap_or_default();
        }
        self.trend
            .push((episode, self.window_sum / self.window.len() as f64));

        self.y_range = Some(match self.y_range {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }

    /// Latest trailing mean
    pub fn mean(&self) -> Option<f64> {
        self.trend.last().map(|&(_, mean)| mean)
    }

    fn x_bounds(&self) -> [f64; 2] {
        match (self.points.first(), self.points.last()) {
            (Some(&(first, _)), Some(&(last, _))) => [first, last.max(first + 1.0)],
            _ => [0.0, 1.0],
        }
    }

    fn y_bounds(&self) -> [f64; 2] {
        match self.y_range {
            Some((lo, hi)) if hi > lo => [lo, hi],
            Some((v, _)) => [v - 1.0, v + 1.0],
            None => [0.0, 1.0],
        }
    }
}

fn axis_labels([lo, hi]: [f64; 2]) -> Vec<Span<'static>> {
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|v| Span::from(format!("{v:.0}")).bold())
        .collect()
}

impl Widget for &Plot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.mean() {
            Some(mean) => format!(" {} (mean of last {TREND_WINDOW}: {mean:.2}) ", self.metric),
            None => format!(" {} ", self.metric),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .padding(Padding::horizontal(1));

        if self.points.is_empty() {
            Paragraph::new("Waiting for the first episode")
                .block(block)
                .render(area, buf);
            return;
        }

        let (x_bounds, y_bounds) = (self.x_bounds(), self.y_bounds());
        let datasets = vec![
            Dataset::default()
                .name(self.metric)
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .dark_gray()
                .data(&self.points),
            Dataset::default()
                .name("trend")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .light_green()
                .data(&self.trend),
        ];

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Episode")
                    .gray()
                    .labels(axis_labels(x_bounds))
                    .bounds(x_bounds),
            )
            .y_axis(
                Axis::default()
                    .gray()
                    .labels(axis_labels(y_bounds))
                    .bounds(y_bounds),
            )
            .render(area, buf);
    }
}

/// One chart per episode metric, created from the first report received
#[derive(Default)]
pub struct Plots {
    charts: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    fn cycle(&mut self, step: usize) {
        if !self.charts.is_empty() {
            self.selected = (self.selected + step) % self.charts.len();
        }
    }

    pub fn update(&mut self, stats: &EpisodeStats) {
        if self.charts.is_empty() {
            self.charts = stats.keys.iter().map(|&k| Plot::new(k)).collect();
        }
        let episode = f64::from(stats.episode);
        for (chart, &value) in self.charts.iter_mut().zip(&stats.data) {
            chart.push(episode, value);
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let [tabs_area, chart_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

        Tabs::new(self.charts.iter().map(|c| c.metric))
            .white()
            .highlight_style(Style::default().light_green())
            .select(self.selected)
            .render(tabs_area, buf);

        match self.charts.get(self.selected) {
            Some(chart) => chart.render(chart_area, buf),
            None => Paragraph::new("Waiting for the first episode")
                .block(Block::bordered().border_type(BorderType::Rounded))
                .render(chart_area, buf),
        }
    }
}

impl Component for Plots {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event) {
            Some(KeyCode::Left) => self.cycle(self.len().saturating_sub(1)),
            Some(KeyCode::Right) => self.cycle(1),
            _ => return false,
        }
        true
    }
}
