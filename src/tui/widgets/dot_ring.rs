use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::countdown::ring::fill_count;

const UNLIT: Color = Color::DarkGray;

/// Positions of `n` dots on the unit circle, starting at twelve o'clock and
/// running clockwise.
pub fn dot_positions(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = FRAC_PI_2 - TAU * i as f64 / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// A ring of dots with the first `round(ratio * dots)` lit, and the unit's
/// value printed underneath (`--` when there is none).
pub struct DotRingWidget<'a> {
    label: &'a str,
    value: Option<u64>,
    ratio: f64,
    dots: usize,
    accent: Color,
}

impl<'a> DotRingWidget<'a> {
    pub fn new(label: &'a str, value: Option<u64>, ratio: f64, dots: usize) -> Self {
        Self {
            label,
            value,
            ratio,
            dots,
            accent: Color::Green,
        }
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for DotRingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let [ring_area, value_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);

        let positions = dot_positions(self.dots);
        let lit = fill_count(self.ratio, self.dots);
        let (on, off) = positions.split_at(lit);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: off,
                    color: UNLIT,
                });
                ctx.draw(&Points {
                    coords: on,
                    color: self.accent,
                });
            })
            .render(ring_area, buf);

        Paragraph::new(Line::from(vec![Span::styled(
            self.value.map_or_else(|| "--".to_string(), |v| v.to_string()),
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center)
        .render(value_area, buf);
    }
}
