use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::countdown::ButtonState;

/// The register button, drawn as a bordered label.
pub struct ButtonWidget<'a> {
    state: &'a ButtonState,
    accent: Color,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(state: &'a ButtonState) -> Self {
        Self {
            state,
            accent: Color::Green,
        }
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.state.enabled {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        };

        let line = Line::from(vec![Span::styled(self.state.label, style)]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style.remove_modifier(Modifier::CROSSED_OUT)),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &ButtonState) -> Buffer {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        ButtonWidget::new(state).render(area, &mut buf);
        buf
    }

    #[test]
    fn enabled_button_uses_accent() {
        let state = ButtonState { enabled: true, label: "Register Now" };
        let buf = render(&state);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Register Now"));
        let cell = buf
            .content()
            .iter()
            .find(|c| c.symbol() == "R")
            .unwrap();
        assert_eq!(cell.fg, Color::Green);
    }

    #[test]
    fn disabled_button_is_grey() {
        let state = ButtonState { enabled: false, label: "Registration Closed" };
        let buf = render(&state);
        let cell = buf
            .content()
            .iter()
            .find(|c| c.symbol() == "R")
            .unwrap();
        assert_eq!(cell.fg, Color::DarkGray);
    }
}
