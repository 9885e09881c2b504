use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

use crate::config::EventConfig;
use crate::error::CountdownError;

/// Formats accepted for timestamps without an explicit offset.
/// These are read in the host's local time zone.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One configured phase boundary.
///
/// `Unreachable` orders after every instant, so a boundary that failed to
/// parse is simply never crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    At(DateTime<Utc>),
    Unreachable,
}

impl Boundary {
    /// True while `now` has not yet reached this boundary.
    pub fn is_ahead_of(&self, now: DateTime<Utc>) -> bool {
        match self {
            Boundary::At(t) => now < *t,
            Boundary::Unreachable => true,
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Boundary::At(t) => Some(*t),
            Boundary::Unreachable => None,
        }
    }
}

/// The three boundaries that drive the event countdown.
///
/// registration_end <= event_start <= reveal_time is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub registration_end: Boundary,
    pub event_start: Boundary,
    pub reveal_time: Boundary,
}

impl Schedule {
    pub fn new(
        registration_end: DateTime<Utc>,
        event_start: DateTime<Utc>,
        reveal_time: DateTime<Utc>,
    ) -> Self {
        Self {
            registration_end: Boundary::At(registration_end),
            event_start: Boundary::At(event_start),
            reveal_time: Boundary::At(reveal_time),
        }
    }

    /// Build a schedule from the raw config strings.
    ///
    /// Never fails. Each unparseable field is logged and becomes
    /// `Boundary::Unreachable`.
    pub fn from_config(cfg: &EventConfig) -> Self {
        Self {
            registration_end: boundary_or_unreachable("registration_end", &cfg.registration_end),
            event_start: boundary_or_unreachable("event_start", &cfg.event_start),
            reveal_time: boundary_or_unreachable("reveal_time", &cfg.reveal_time),
        }
    }
}

fn boundary_or_unreachable(field: &'static str, raw: &str) -> Boundary {
    match parse_timestamp(field, raw) {
        Ok(t) => Boundary::At(t),
        Err(e) => {
            warn!(error = %e, "treating boundary as unreachable");
            Boundary::Unreachable
        }
    }
}

/// Parse a configured timestamp.
///
/// RFC 3339 strings carry their own offset. Date-times without an offset are
/// host local time. A bare date is midnight UTC.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, CountdownError> {
    let s = raw.trim();
    let err = || CountdownError::ConfigParse {
        field,
        value: raw.to_string(),
    };

    if s.is_empty() {
        return Err(err());
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }

    for fmt in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            // Ambiguous local times (DST fold) resolve to the earlier instant;
            // nonexistent ones (DST gap) are rejected.
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(err);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(err);
    }

    Err(err())
}
