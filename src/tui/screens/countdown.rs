use std::str::FromStr;
use std::time::Instant;

use chrono::Utc;
use ratatui::crossterm::event::{KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::warn;

use crate::config::{AppConfig, RingConfig};
use crate::countdown::{
    Breakdown, ButtonState, PhaseCountdown, RenderPort, RingUnit, TickOutcome, Ticker,
};
use crate::error::RenderError;
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::widgets::button::ButtonWidget;
use crate::tui::widgets::dot_ring::DotRingWidget;
use crate::tui::Tui;

/// What the countdown screen currently shows.
///
/// Filled in by the countdown through [`RenderPort`]; fields it doesn't
/// touch keep their previous value.
#[derive(Debug, Default)]
pub struct CountdownView {
    pub title: String,
    pub breakdown: Option<Breakdown>,
    /// The active target can never be reached; there is no time to show.
    pub frozen: bool,
    pub button: Option<ButtonState>,
    pub rings: [f64; 4],
    pub live: bool,
}

impl RenderPort for CountdownView {
    fn set_title(&mut self, title: &str) -> Result<(), RenderError> {
        self.title = title.to_string();
        Ok(())
    }

    fn set_remaining(&mut self, breakdown: Option<&Breakdown>) -> Result<(), RenderError> {
        self.breakdown = breakdown.copied();
        self.frozen = breakdown.is_none();
        Ok(())
    }

    fn set_button_state(&mut self, button: &ButtonState) -> Result<(), RenderError> {
        self.button = Some(button.clone());
        Ok(())
    }

    fn set_ring_fill(&mut self, unit: RingUnit, ratio: f64) -> Result<(), RenderError> {
        self.rings[ring_index(unit)] = ratio;
        Ok(())
    }

    fn hide_countdown(&mut self) -> Result<(), RenderError> {
        self.live = true;
        Ok(())
    }
}

fn ring_index(unit: RingUnit) -> usize {
    match unit {
        RingUnit::Days => 0,
        RingUnit::Hours => 1,
        RingUnit::Minutes => 2,
        RingUnit::Seconds => 3,
    }
}

/// Parse the configured accent color, falling back to green.
pub fn accent_color(raw: &str) -> Color {
    Color::from_str(raw).unwrap_or_else(|_| {
        warn!(accent = raw, "unknown accent color, using green");
        Color::Green
    })
}

/// Run the countdown screen until the user quits.
///
/// Ticks stop on their own once the event is live; the screen stays up
/// showing the live banner.
pub fn run(terminal: &mut Tui, countdown: &mut PhaseCountdown, config: &AppConfig) -> anyhow::Result<()> {
    let period = std::time::Duration::from_millis(config.display.tick_ms);
    // The first tick is done by hand below, so the ticker starts one period out.
    let ticker = Ticker::new(period, Instant::now() + period);
    let cancel = ticker.handle();
    let events = EventHandler::new(ticker);

    let accent = accent_color(&config.display.accent);
    let mut view = CountdownView::default();

    // Draw straight away rather than waiting for the first tick.
    if countdown.tick(Utc::now(), &mut view) == TickOutcome::Stop {
        cancel.cancel();
    }

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_countdown(frame, area, &config.event.name, &view, &config.rings, accent);
        })?;

        match events.next()? {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ => {}
            },
            AppEvent::Tick => {
                if countdown.tick(Utc::now(), &mut view) == TickOutcome::Stop {
                    cancel.cancel();
                }
            }
            _ => {}
        }
    }
}

pub fn render_countdown(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    view: &CountdownView,
    rings: &RingConfig,
    accent: Color,
) {
    let outer = Block::default()
        .title(format!(" {name} "))
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([
        Constraint::Length(2), // title
        Constraint::Min(8),    // rings
        Constraint::Length(3), // button
        Constraint::Length(1), // key hint
    ])
    .split(inner);

    let title_style = if view.live {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut heading = vec![Line::from(Span::styled(view.title.as_str(), title_style))];
    if view.frozen && !view.live {
        heading.push(Line::from(Span::styled(
            "target time is not set or invalid",
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(heading).alignment(Alignment::Center), rows[0]);

    if !view.live {
        let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(rows[1]);
        for unit in RingUnit::ALL {
            let i = ring_index(unit);
            let widget = DotRingWidget::new(
                unit.label(),
                view.breakdown.as_ref().map(|b| unit.value(b)),
                view.rings[i],
                rings.dots(unit),
            )
            .with_accent(accent);
            frame.render_widget(widget, cols[i]);
        }

        if let Some(button) = &view.button {
            let [button_area] = Layout::horizontal([Constraint::Length(30)])
                .flex(ratatui::layout::Flex::Center)
                .areas(rows[2]);
            frame.render_widget(ButtonWidget::new(button).with_accent(accent), button_area);
        }
    }

    let hint = vec![
        Span::styled("  [q]", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ];
    frame.render_widget(Paragraph::new(Line::from(hint)), rows[3]);
}
