/// Blur intensity applied when a boost fires.
const BOOST_TRIGGER_AMOUNT: f32 = 2.5;

/// Intensity lost per second once triggered.
const BOOST_DECAY_PER_SECOND: f32 = 3.5;

/// Decaying boost intensity driving the blur shader.
///
/// Invariant: once triggered, the amount decreases monotonically at
/// `BOOST_DECAY_PER_SECOND` until it reaches zero and stays there. The pass
/// skips the capture path entirely while the meter is idle.
#[derive(Debug, Clone, Default)]
pub struct BoostMeter {
    amount: f32,
}

impl BoostMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires a boost, resetting the meter to full intensity.
    ///
    /// Re-triggering while a previous boost is still decaying starts over
    /// from full intensity rather than stacking.
    pub fn trigger(&mut self) {
        self.amount = BOOST_TRIGGER_AMOUNT;
    }

    /// Advances the decay by `dt` seconds.
    pub fn decay(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "BoostMeter::decay: negative dt ({dt})");
        if self.amount > 0.0 {
            self.amount = (self.amount - dt * BOOST_DECAY_PER_SECOND).max(0.0);
        }
    }

    /// Current intensity, `0.0` when idle.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── trigger ───────────────────────────────────────────────────────────

    #[test]
    fn trigger_sets_full_intensity() {
        let mut meter = BoostMeter::new();
        meter.trigger();
        assert_eq!(meter.amount(), BOOST_TRIGGER_AMOUNT);
        assert!(meter.is_active());
    }

    #[test]
    fn retrigger_restarts_instead_of_stacking() {
        let mut meter = BoostMeter::new();
        meter.trigger();
        meter.decay(0.5);
        meter.trigger();
        assert_eq!(meter.amount(), BOOST_TRIGGER_AMOUNT);
    }

    // ── decay ─────────────────────────────────────────────────────────────

    #[test]
    fn decay_is_monotonic_at_fixed_rate() {
        let mut meter = BoostMeter::new();
        meter.trigger();

        let mut previous = meter.amount();
        for _ in 0..10 {
            meter.decay(0.05);
            let current = meter.amount();
            assert!(current < previous);
            assert!((previous - current - 0.05 * BOOST_DECAY_PER_SECOND).abs() < 1e-5);
            previous = current;
        }
    }

    #[test]
    fn decay_clamps_at_zero() {
        let mut meter = BoostMeter::new();
        meter.trigger();
        meter.decay(10.0);
        assert_eq!(meter.amount(), 0.0);
        assert!(!meter.is_active());
    }

    #[test]
    fn idle_meter_stays_idle() {
        let mut meter = BoostMeter::new();
        meter.decay(1.0);
        assert_eq!(meter.amount(), 0.0);
    }

    #[test]
    fn full_decay_takes_expected_time() {
        // 2.5 intensity at 3.5/s drains in ~0.714s.
        let mut meter = BoostMeter::new();
        meter.trigger();

        let mut elapsed = 0.0;
        while meter.is_active() {
            meter.decay(1.0 / 60.0);
            elapsed += 1.0 / 60.0;
            assert!(elapsed < 2.0, "meter failed to drain");
        }
        let expected = BOOST_TRIGGER_AMOUNT / BOOST_DECAY_PER_SECOND;
        assert!((elapsed - expected).abs() < 0.05);
    }
}
