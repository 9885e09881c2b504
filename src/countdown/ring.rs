use serde::Serialize;

use super::breakdown::Breakdown;
use crate::config::RingConfig;

/// Which of the four dot rings a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl RingUnit {
    pub const ALL: [RingUnit; 4] = [
        RingUnit::Days,
        RingUnit::Hours,
        RingUnit::Minutes,
        RingUnit::Seconds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RingUnit::Days => "Days",
            RingUnit::Hours => "Hours",
            RingUnit::Minutes => "Minutes",
            RingUnit::Seconds => "Seconds",
        }
    }

    pub fn value(self, b: &Breakdown) -> u64 {
        match self {
            RingUnit::Days => b.days,
            RingUnit::Hours => b.hours,
            RingUnit::Minutes => b.minutes,
            RingUnit::Seconds => b.seconds,
        }
    }
}

/// Fixed per-unit maxima. A ring is full when its unit reaches the maximum.
///
/// Days beyond `days` still show a full ring; the number under it carries
/// the real value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingScale {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Default for RingScale {
    fn default() -> Self {
        Self {
            days: 30,
            hours: 24,
            minutes: 60,
            seconds: 60,
        }
    }
}

impl From<&RingConfig> for RingScale {
    fn from(cfg: &RingConfig) -> Self {
        Self {
            days: cfg.days_max,
            hours: cfg.hours_max,
            minutes: cfg.minutes_max,
            seconds: cfg.seconds_max,
        }
    }
}

/// Fill ratio of each ring, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RingRatios {
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl RingRatios {
    pub fn from_breakdown(b: &Breakdown, scale: &RingScale) -> Self {
        Self {
            days: ratio(b.days, scale.days),
            hours: ratio(b.hours, scale.hours),
            minutes: ratio(b.minutes, scale.minutes),
            seconds: ratio(b.seconds, scale.seconds),
        }
    }

    pub fn get(&self, unit: RingUnit) -> f64 {
        match unit {
            RingUnit::Days => self.days,
            RingUnit::Hours => self.hours,
            RingUnit::Minutes => self.minutes,
            RingUnit::Seconds => self.seconds,
        }
    }
}

/// `value / max`, clamped to [0, 1]. A zero maximum never fills.
pub fn ratio(value: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (value as f64 / max as f64).clamp(0.0, 1.0)
}

/// Number of lit dots on a ring of `dots` dots.
pub fn fill_count(ratio: f64, dots: usize) -> usize {
    if !ratio.is_finite() {
        return 0;
    }
    ((ratio.clamp(0.0, 1.0) * dots as f64).round() as usize).min(dots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::breakdown::MS_PER_HOUR;

    #[test]
    fn default_scale() {
        let s = RingScale::default();
        assert_eq!((s.days, s.hours, s.minutes, s.seconds), (30, 24, 60, 60));
    }

    #[test]
    fn ratio_clamps() {
        assert_eq!(ratio(0, 30), 0.0);
        assert_eq!(ratio(15, 30), 0.5);
        assert_eq!(ratio(45, 30), 1.0);
        assert_eq!(ratio(5, 0), 0.0);
    }

    #[test]
    fn ratios_from_breakdown() {
        let b = Breakdown { days: 3, hours: 12, minutes: 30, seconds: 15 };
        let r = RingRatios::from_breakdown(&b, &RingScale::default());
        assert!((r.days - 0.1).abs() < 1e-9);
        assert!((r.hours - 0.5).abs() < 1e-9);
        assert!((r.minutes - 0.5).abs() < 1e-9);
        assert!((r.seconds - 0.25).abs() < 1e-9);
        assert_eq!(r.get(RingUnit::Seconds), r.seconds);
    }

    #[test]
    fn fill_count_one_dot_per_unit() {
        // With as many dots as the maximum, each unit lights exactly one dot.
        for value in 0..=60 {
            assert_eq!(fill_count(ratio(value, 60), 60), value as usize);
        }
    }

    #[test]
    fn fill_count_rounds() {
        assert_eq!(fill_count(0.5, 12), 6);
        assert_eq!(fill_count(0.04, 12), 0);
        assert_eq!(fill_count(0.05, 12), 1);
        assert_eq!(fill_count(1.5, 12), 12);
        assert_eq!(fill_count(f64::NAN, 12), 0);
    }

    #[test]
    fn days_ring_never_grows_toward_target() {
        let scale = RingScale::default();
        let mut last = f64::INFINITY;
        // Count down from 40 days to zero an hour at a time.
        for hours_left in (0..=40 * 24u64).rev() {
            let b = Breakdown::from_millis(hours_left * MS_PER_HOUR);
            let r = RingRatios::from_breakdown(&b, &scale).days;
            assert!(r <= last);
            last = r;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn all_rings_empty_at_zero() {
        let r = RingRatios::from_breakdown(&Breakdown::from_millis(0), &RingScale::default());
        assert_eq!(r, RingRatios::default());
    }
}
