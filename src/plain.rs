use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use tracing::warn;

use crate::countdown::{
    Breakdown, ButtonState, PhaseCountdown, RenderPort, RenderState, Schedule, TickOutcome, Ticker,
};
use crate::error::RenderError;
use crate::util;

/// Shown by the single-target countdown once the target has passed.
pub const STARTED_MESSAGE: &str = "🎉 Event Started!";

/// Line-oriented rendering port.
///
/// Fields arrive one at a time during a tick and are written out together
/// by [`ConsolePort::flush_line`]. There are no rings on a console line.
pub struct ConsolePort<W: Write> {
    out: W,
    overwrite: bool,
    last_width: usize,
    title: String,
    remaining: Option<String>,
    button: Option<String>,
    live: bool,
}

impl<W: Write> ConsolePort<W> {
    /// With `overwrite`, each line replaces the previous one in place.
    pub fn new(out: W, overwrite: bool) -> Self {
        Self {
            out,
            overwrite,
            last_width: 0,
            title: String::new(),
            remaining: None,
            button: None,
            live: false,
        }
    }

    pub fn flush_line(&mut self) -> io::Result<()> {
        let mut line = style(&self.title).bold().to_string();
        if !self.live {
            if let Some(remaining) = &self.remaining {
                line.push(' ');
                line.push_str(&style(remaining).cyan().to_string());
            }
            if let Some(button) = &self.button {
                line.push_str("  ");
                line.push_str(button);
            }
        }

        let width = console::measure_text_width(&line);
        if self.overwrite {
            let pad = self.last_width.saturating_sub(width);
            write!(self.out, "\r{line}{}", " ".repeat(pad))?;
            if self.live {
                writeln!(self.out)?;
            }
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.last_width = width;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderPort for ConsolePort<W> {
    fn set_title(&mut self, title: &str) -> Result<(), RenderError> {
        self.title = title.to_string();
        Ok(())
    }

    fn set_remaining(&mut self, breakdown: Option<&Breakdown>) -> Result<(), RenderError> {
        self.remaining = breakdown.map(Breakdown::compact);
        Ok(())
    }

    fn set_button_state(&mut self, button: &ButtonState) -> Result<(), RenderError> {
        let label = format!("[{}]", button.label);
        self.button = Some(if button.enabled {
            style(label).green().bold().to_string()
        } else {
            style(label).dim().to_string()
        });
        Ok(())
    }

    fn hide_countdown(&mut self) -> Result<(), RenderError> {
        self.live = true;
        self.remaining = None;
        Ok(())
    }
}

/// Run the phased countdown on the console until the event goes live.
pub fn watch(countdown: &mut PhaseCountdown, tick: Duration) -> Result<()> {
    let term = console::Term::stdout();
    let overwrite = term.is_term();
    let mut port = ConsolePort::new(term, overwrite);

    Ticker::new(tick, Instant::now()).run(|| {
        let outcome = countdown.tick(Utc::now(), &mut port);
        if let Err(e) = port.flush_line() {
            warn!(error = %e, "stdout closed, stopping");
            return TickOutcome::Stop;
        }
        outcome
    });

    if !countdown.is_finished() {
        warn!("countdown stopped before the event went live");
    }
    Ok(())
}

/// One-shot summary of the countdown at `now`.
pub fn print_status(name: &str, schedule: &Schedule, state: &RenderState) {
    println!();
    println!("{}", style(format!("=== {name} ===")).bold());
    println!();

    print_boundary("Registration ends", schedule.registration_end.instant());
    print_boundary("Event starts", schedule.event_start.instant());
    print_boundary("Reveal", schedule.reveal_time.instant());
    println!();

    println!("  {}", style(state.title).bold());
    match &state.breakdown {
        Some(b) => println!("  {}", style(b.compact()).cyan()),
        None if state.is_frozen() => println!(
            "  {} target time is not set or invalid",
            style("WARNING").yellow().bold()
        ),
        None => {}
    }
    if let Some(button) = &state.button {
        let label = if button.enabled {
            style(button.label).green().bold()
        } else {
            style(button.label).dim()
        };
        println!("  Button: {label}");
    }
    println!();
}

fn print_boundary(label: &str, at: Option<DateTime<Utc>>) {
    let value = match at {
        Some(t) => util::local_display(t),
        None => style("unset").red().to_string(),
    };
    println!("  {:<20} {}", format!("{label}:"), value);
}

/// Text for the single-target countdown at `now`, plus whether to keep going.
pub fn until_line(now: DateTime<Utc>, target: DateTime<Utc>) -> (String, TickOutcome) {
    let ms = (target - now).num_milliseconds();
    if ms <= 0 {
        return (STARTED_MESSAGE.to_string(), TickOutcome::Stop);
    }
    (Breakdown::from_millis(ms as u64).compact(), TickOutcome::Continue)
}

/// Count down to a single instant, printing `Xd Xh Xm Xs` each tick.
pub fn until(target: DateTime<Utc>, tick: Duration) -> Result<()> {
    let mut term = console::Term::stdout();
    let overwrite = term.is_term();

    Ticker::new(tick, Instant::now()).run(|| {
        let (line, outcome) = until_line(Utc::now(), target);
        let written = if overwrite {
            term.clear_line().and_then(|_| write!(term, "{line}"))
        } else {
            writeln!(term, "{line}")
        };
        if let Err(e) = written {
            warn!(error = %e, "stdout closed, stopping");
            return TickOutcome::Stop;
        }
        outcome
    });

    if overwrite {
        writeln!(term)?;
    }
    Ok(())
}
