//! Scheduler-agnostic animation clock.
//!
//! The engine never owns a timer. Every event carries a [`Timestamp`] and
//! hosts call `tick(now)` once per frame; a [`Tween`] turns the elapsed time
//! into an eased progress value.

/// Milliseconds on a monotonic host clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds elapsed since `earlier`, zero if the clock went backwards.
    pub const fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[must_use]
    pub const fn saturating_add(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A fixed-duration transition started at a known time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tween {
    start: Timestamp,
    duration_ms: u64,
}

impl Tween {
    pub const fn new(start: Timestamp, duration_ms: u64) -> Self {
        Self { start, duration_ms }
    }

    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub const fn end(&self) -> Timestamp {
        self.start.saturating_add(self.duration_ms)
    }

    pub fn is_finished(&self, now: Timestamp) -> bool {
        now >= self.end()
    }

    /// Linear progress in [0, 1].
    pub fn linear(&self, now: Timestamp) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_since(self.start) as f32;
        (elapsed / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Ease-out cubic progress in [0, 1]: fast start, gentle landing.
    pub fn eased(&self, now: Timestamp) -> f32 {
        let t = self.linear(now);
        1.0 - (1.0 - t).powi(3)
    }
}

/// Interpolates between `from` and `to` by `t` in [0, 1].
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_completes_immediately() {
        let tween = Tween::new(Timestamp(50), 0);
        assert_eq!(tween.linear(Timestamp(50)), 1.0);
        assert!(tween.is_finished(Timestamp(50)));
    }

    #[test]
    fn progress_is_clamped() {
        let tween = Tween::new(Timestamp(100), 200);
        assert_eq!(tween.linear(Timestamp(0)), 0.0);
        assert_eq!(tween.linear(Timestamp(200)), 0.5);
        assert_eq!(tween.linear(Timestamp(1_000)), 1.0);
        assert_eq!(tween.eased(Timestamp(300)), 1.0);
        assert!(tween.eased(Timestamp(200)) > 0.5);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(-40.0, 0.0, 0.0), -40.0);
        assert_eq!(lerp(-40.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }
}
