//! Player health, clamped to `[0, max]` on every mutation.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthState {
    value: f64,
    max: f64,
}

impl HealthState {
    /// Starts full
    pub fn new(max: f64) -> Self {
        let max = max.max(0.0);
        Self { value: max, max }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Out-of-range values are clamped, NaN is ignored.
    pub fn set(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.value = value.clamp(0.0, self.max);
    }

    pub fn delta(&mut self, amount: f64) {
        self.set(self.value + amount);
    }

    pub fn is_depleted(&self) -> bool {
        self.value <= 0.0
    }

    /// Fraction of max for the health bar
    pub fn fraction(&self) -> f64 {
        if self.max == 0.0 {
            0.0
        } else {
            self.value / self.max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let mut h = HealthState::new(100.0);
        h.delta(25.0);
        assert_eq!(h.get(), 100.0);
        h.set(-3.0);
        assert_eq!(h.get(), 0.0);
        assert!(h.is_depleted());
        h.set(f64::NAN);
        assert_eq!(h.get(), 0.0);
    }

    #[test]
    fn test_clamping_over_sequences() {
        let deltas = [-30.0, 55.5, -120.0, 7.25, 300.0, -0.5, -99.0, 42.0, -1e9, 1e9];
        let mut h = HealthState::new(100.0);
        for d in deltas {
            h.delta(d);
            assert!((0.0..=100.0).contains(&h.get()));
        }
        assert_eq!(h.get(), 100.0);
    }

    #[test]
    fn test_fraction() {
        let mut h = HealthState::new(80.0);
        h.set(20.0);
        assert_eq!(h.fraction(), 0.25);
    }
}
