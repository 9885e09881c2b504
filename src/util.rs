use chrono::{DateTime, Utc};

use crate::countdown::schedule::parse_timestamp;

/// Resolve an `--at` timestamp, defaulting to the host clock.
pub fn resolve_now(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        Some(s) => Ok(parse_timestamp("--at", s)?),
        None => Ok(Utc::now()),
    }
}

/// Render a UTC instant in the host's local time for display.
pub fn local_display(t: DateTime<Utc>) -> String {
    t.with_timezone(&chrono::Local)
        .format("%a %d %b %Y %H:%M:%S %Z")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolve_now_explicit() {
        let t = resolve_now(Some("2026-03-01T12:00:00Z")).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn resolve_now_defaults_to_clock() {
        let before = Utc::now();
        let t = resolve_now(None).unwrap();
        assert!(t >= before);
    }

    #[test]
    fn resolve_now_invalid() {
        let err = resolve_now(Some("not-a-time")).unwrap_err();
        assert!(err.to_string().contains("--at"));
    }

    #[test]
    fn local_display_includes_year() {
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(local_display(t).contains("2026"));
    }
}
