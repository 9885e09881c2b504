use chrono::{DateTime, Utc};
use serde::Serialize;

use super::schedule::{Boundary, Schedule};

/// The four mutually exclusive windows of the event countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Registration,
    AwaitingEvent,
    AwaitingReveal,
    Live,
}

impl Phase {
    /// Pick the active phase. The first boundary still ahead of `now` wins.
    pub fn at(now: DateTime<Utc>, schedule: &Schedule) -> Self {
        if schedule.registration_end.is_ahead_of(now) {
            Phase::Registration
        } else if schedule.event_start.is_ahead_of(now) {
            Phase::AwaitingEvent
        } else if schedule.reveal_time.is_ahead_of(now) {
            Phase::AwaitingReveal
        } else {
            Phase::Live
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Phase::Registration => "Registration Closes In:",
            Phase::AwaitingEvent => "Event Starts In:",
            Phase::AwaitingReveal => "Problem Statements Reveal In:",
            Phase::Live => "The Event is Live!",
        }
    }

    /// The boundary this phase counts down to. Live has none.
    pub fn target(self, schedule: &Schedule) -> Option<Boundary> {
        match self {
            Phase::Registration => Some(schedule.registration_end),
            Phase::AwaitingEvent => Some(schedule.event_start),
            Phase::AwaitingReveal => Some(schedule.reveal_time),
            Phase::Live => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    fn schedule() -> Schedule {
        Schedule::new(
            t0() + Duration::days(1),
            t0() + Duration::days(2),
            t0() + Duration::days(3),
        )
    }

    #[test]
    fn before_registration_end() {
        let s = schedule();
        for hours in [0, 1, 12, 23] {
            assert_eq!(Phase::at(t0() + Duration::hours(hours), &s), Phase::Registration);
        }
        assert_eq!(
            Phase::at(t0() + Duration::days(1) - Duration::milliseconds(1), &s),
            Phase::Registration
        );
    }

    #[test]
    fn boundaries_are_inclusive_on_the_left() {
        let s = schedule();
        assert_eq!(Phase::at(t0() + Duration::days(1), &s), Phase::AwaitingEvent);
        assert_eq!(Phase::at(t0() + Duration::days(2), &s), Phase::AwaitingReveal);
        assert_eq!(Phase::at(t0() + Duration::days(3), &s), Phase::Live);
    }

    #[test]
    fn live_forever_after_reveal() {
        let s = schedule();
        assert_eq!(Phase::at(t0() + Duration::days(400), &s), Phase::Live);
    }

    #[test]
    fn collapsed_schedule_skips_phases() {
        let at = t0() + Duration::hours(1);
        let s = Schedule::new(at, at, at);
        assert_eq!(Phase::at(at - Duration::seconds(1), &s), Phase::Registration);
        assert_eq!(Phase::at(at, &s), Phase::Live);
    }

    #[test]
    fn unreachable_registration_end_freezes_first_phase() {
        let mut s = schedule();
        s.registration_end = Boundary::Unreachable;
        assert_eq!(Phase::at(t0() + Duration::days(10), &s), Phase::Registration);
    }

    #[test]
    fn unreachable_reveal_never_goes_live() {
        let mut s = schedule();
        s.reveal_time = Boundary::Unreachable;
        assert_eq!(Phase::at(t0() + Duration::days(10), &s), Phase::AwaitingReveal);
    }

    #[test]
    fn titles() {
        assert_eq!(Phase::Registration.title(), "Registration Closes In:");
        assert_eq!(Phase::AwaitingEvent.title(), "Event Starts In:");
        assert_eq!(Phase::AwaitingReveal.title(), "Problem Statements Reveal In:");
        assert_eq!(Phase::Live.title(), "The Event is Live!");
    }

    #[test]
    fn live_has_no_target() {
        assert!(Phase::Live.target(&schedule()).is_none());
        assert_eq!(
            Phase::AwaitingEvent.target(&schedule()),
            Some(Boundary::At(t0() + Duration::days(2)))
        );
    }
}
