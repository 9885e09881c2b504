use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::breakdown::Breakdown;
use super::phase::Phase;
use super::ring::{RingRatios, RingScale, RingUnit};
use super::schedule::{Boundary, Schedule};
use super::ticker::TickOutcome;
use crate::error::RenderError;

/// Register button state for the phases that define one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub enabled: bool,
    pub label: &'static str,
}

impl ButtonState {
    pub fn for_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Registration => Some(Self {
                enabled: true,
                label: "Register Now",
            }),
            Phase::AwaitingEvent => Some(Self {
                enabled: false,
                label: "Registration Closed",
            }),
            // Nothing defined for the later phases: leave the button as is.
            Phase::AwaitingReveal | Phase::Live => None,
        }
    }
}

/// Everything a renderer needs for one tick. Built fresh and thrown away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub phase: Phase,
    pub title: &'static str,
    /// Boundary being counted down to. `None` when live or unreachable.
    pub target: Option<DateTime<Utc>>,
    /// Time left until `target`, never negative.
    #[serde(serialize_with = "serialize_millis")]
    pub remaining: Option<Duration>,
    pub breakdown: Option<Breakdown>,
    pub button: Option<ButtonState>,
    pub rings: RingRatios,
}

impl RenderState {
    /// Map `(now, schedule)` to what should be on screen.
    pub fn compute(now: DateTime<Utc>, schedule: &Schedule, scale: &RingScale) -> Self {
        let phase = Phase::at(now, schedule);
        let target = phase.target(schedule).and_then(|b| b.instant());

        let remaining = target.map(|t| {
            // The phase guard keeps this positive; clamp anyway.
            let ms = (t - now).num_milliseconds().max(0) as u64;
            Duration::from_millis(ms)
        });
        let breakdown = remaining.map(Breakdown::from_duration);
        let rings = breakdown
            .as_ref()
            .map(|b| RingRatios::from_breakdown(b, scale))
            .unwrap_or_default();

        Self {
            phase,
            title: phase.title(),
            target,
            remaining,
            breakdown,
            button: ButtonState::for_phase(phase),
            rings,
        }
    }

    /// True when the active target failed to parse and can never be reached.
    pub fn is_frozen(&self) -> bool {
        !self.phase.is_terminal() && self.target.is_none()
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => s.serialize_some(&(d.as_millis() as u64)),
        None => s.serialize_none(),
    }
}

/// Where the countdown writes its output.
///
/// Ports that lack an element return `RenderError::MissingElement`; the
/// countdown skips that field and carries on.
pub trait RenderPort {
    fn set_title(&mut self, title: &str) -> Result<(), RenderError>;

    /// `None` means the active target can never be reached; the port should
    /// drop whatever time it was showing.
    fn set_remaining(&mut self, breakdown: Option<&Breakdown>) -> Result<(), RenderError>;

    fn set_button_state(&mut self, _button: &ButtonState) -> Result<(), RenderError> {
        Err(RenderError::MissingElement("register-button"))
    }

    fn set_ring_fill(&mut self, _unit: RingUnit, _ratio: f64) -> Result<(), RenderError> {
        Err(RenderError::MissingElement("ring"))
    }

    /// Called once when the event goes live.
    fn hide_countdown(&mut self) -> Result<(), RenderError>;
}

/// Write one state to a port, field by field.
pub fn present<P: RenderPort + ?Sized>(state: &RenderState, port: &mut P) {
    skip_missing(port.set_title(state.title));

    if state.phase.is_terminal() {
        skip_missing(port.hide_countdown());
        return;
    }

    if let Some(button) = &state.button {
        skip_missing(port.set_button_state(button));
    }

    skip_missing(port.set_remaining(state.breakdown.as_ref()));

    for unit in RingUnit::ALL {
        if let Err(e) = port.set_ring_fill(unit, state.rings.get(unit)) {
            // One missing ring usually means all of them are.
            debug!(error = %e, "skipping ring output");
            break;
        }
    }
}

fn skip_missing(result: Result<(), RenderError>) {
    if let Err(e) = result {
        debug!(error = %e, "skipping output field");
    }
}

/// The phased event countdown.
///
/// Holds the schedule read at startup and remembers only whether it has
/// already gone live, so repeated ticks after that are no-ops.
pub struct PhaseCountdown {
    schedule: Schedule,
    scale: RingScale,
    last_phase: Option<Phase>,
    finished: bool,
}

impl PhaseCountdown {
    pub fn new(schedule: Schedule, scale: RingScale) -> Self {
        if let Boundary::Unreachable = schedule.reveal_time {
            info!("reveal time unreachable; countdown will not go live");
        }
        Self {
            schedule,
            scale,
            last_phase: None,
            finished: false,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Pure evaluation, no side effects.
    pub fn evaluate(&self, now: DateTime<Utc>) -> RenderState {
        RenderState::compute(now, &self.schedule, &self.scale)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One timer tick: compute, hand the result to the port, and tell the
    /// timer whether to keep going.
    pub fn tick<P: RenderPort + ?Sized>(&mut self, now: DateTime<Utc>, port: &mut P) -> TickOutcome {
        if self.finished {
            return TickOutcome::Stop;
        }

        let state = self.evaluate(now);
        if self.last_phase != Some(state.phase) {
            info!(phase = ?state.phase, target = ?state.target, "phase changed");
            self.last_phase = Some(state.phase);
        }
        debug!(remaining = ?state.remaining, "tick");

        present(&state, port);

        if state.phase.is_terminal() {
            self.finished = true;
            info!("event is live, stopping countdown");
            TickOutcome::Stop
        } else {
            TickOutcome::Continue
        }
    }
}
