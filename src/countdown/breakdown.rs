use std::time::Duration;

use serde::Serialize;

pub const MS_PER_DAY: u64 = 86_400_000;
pub const MS_PER_HOUR: u64 = 3_600_000;
pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_SECOND: u64 = 1_000;

/// Remaining time split into whole calendar-free units.
///
/// Each stage is a floor division of what the previous stage left over, so
/// sub-second remainders are dropped rather than rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn from_duration(d: Duration) -> Self {
        // u64 milliseconds covers ~584 million years.
        Self::from_millis(d.as_millis().min(u64::MAX as u128) as u64)
    }

    /// Compact form used by the single-target countdown: `3d 4h 5m 6s`.
    pub fn compact(&self) -> String {
        format!("{}d {}h {}m {}s", self.days, self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_millis(b: &Breakdown) -> u64 {
        b.days * MS_PER_DAY + b.hours * MS_PER_HOUR + b.minutes * MS_PER_MINUTE + b.seconds * MS_PER_SECOND
    }

    #[test]
    fn twelve_hours() {
        let b = Breakdown::from_millis(12 * MS_PER_HOUR);
        assert_eq!(b, Breakdown { days: 0, hours: 12, minutes: 0, seconds: 0 });
    }

    #[test]
    fn mixed_units_floor() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        let b = Breakdown::from_millis(ms);
        assert_eq!(b, Breakdown { days: 2, hours: 3, minutes: 4, seconds: 5 });
    }

    #[test]
    fn zero() {
        assert_eq!(Breakdown::from_millis(0), Breakdown::default());
        assert_eq!(Breakdown::from_millis(999), Breakdown::default());
    }

    #[test]
    fn whole_units_cover_remaining_within_a_second() {
        // Walk a spread of values, including every unit edge, and check
        // total <= remaining < total + 1000.
        let edges = [MS_PER_SECOND, MS_PER_MINUTE, MS_PER_HOUR, MS_PER_DAY];
        let mut samples: Vec<u64> = (0..5_000).map(|i| i * 7_919_233).collect();
        for e in edges {
            samples.extend([e - 1, e, e + 1, 31 * e - 1]);
        }
        for ms in samples {
            let b = Breakdown::from_millis(ms);
            assert!(total_millis(&b) <= ms, "{ms}: {b:?}");
            assert!(ms < total_millis(&b) + 1000, "{ms}: {b:?}");
            assert!(b.hours < 24 && b.minutes < 60 && b.seconds < 60);
        }
    }

    #[test]
    fn from_duration_matches_millis() {
        let d = Duration::from_millis(90_061_000);
        assert_eq!(
            Breakdown::from_duration(d),
            Breakdown { days: 1, hours: 1, minutes: 1, seconds: 1 }
        );
    }

    #[test]
    fn compact_format() {
        let b = Breakdown { days: 3, hours: 4, minutes: 5, seconds: 6 };
        assert_eq!(b.compact(), "3d 4h 5m 6s");
    }
}
