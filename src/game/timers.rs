//! Timed Bookkeeping
//!
//! Two clocks advance every tick:
//! - `HungerClock`: whole-second ticks draining health on a fixed cadence,
//!   with an escalating drain that worsens every time it fires
//! - `FeedbackMap`: fading highlights on recently hit features

use std::collections::BTreeMap;
use super::arena::FeatureId;
use super::events::FeedbackEvent;
use super::health::HealthState;
use crate::config::HungerConfig;

/// What one `HungerClock::advance` call did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HungerReport {
    /// Whole-unit ticks crossed this call
    pub ticks: u32,
    /// Health removed (before clamping)
    pub drained: f64,
    /// Escalating branch firings this call
    pub escalations: u32,
}

#[derive(Debug, Clone)]
pub struct HungerClock {
    accumulator: f64,
    ticks: u64,
    escalating_drain: f64,
    escalate_every: u64,
    flat_every: u64,
    flat_drain: f64,
}

impl HungerClock {
    pub fn new(config: &HungerConfig) -> Self {
        Self {
            accumulator: 0.0,
            ticks: 0,
            escalating_drain: config.initial_escalating_drain,
            escalate_every: config.escalate_every.max(1),
            flat_every: config.flat_every.max(1),
            flat_drain: config.flat_drain,
        }
    }

    /// Total whole ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add `dt` and run one decay step per whole unit crossed.
    pub fn advance(&mut self, dt: f64, health: &mut HealthState) -> HungerReport {
        let mut report = HungerReport::default();
        self.accumulator += dt.max(0.0);

        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            self.ticks += 1;
            report.ticks += 1;

            if self.ticks % self.escalate_every == 0 {
                self.escalating_drain += 1.0;
                health.delta(-self.escalating_drain);
                report.drained += self.escalating_drain;
                report.escalations += 1;
            } else if self.ticks % self.flat_every == 0 {
                health.delta(-self.flat_drain);
                report.drained += self.flat_drain;
            }
        }

        report
    }
}

/// Decaying highlight timers keyed by feature handle.
#[derive(Debug, Clone, Default)]
pub struct FeedbackMap {
    entries: BTreeMap<FeatureId, f64>,
}

impl FeedbackMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or refresh a highlight
    pub fn set(&mut self, feature: FeatureId, duration: f64) {
        self.entries.insert(feature, duration);
    }

    pub fn remove(&mut self, feature: FeatureId) -> bool {
        self.entries.remove(&feature).is_some()
    }

    /// Drop entries for features that no longer exist
    pub fn purge(&mut self, features: &[FeatureId]) {
        for id in features {
            self.entries.remove(id);
        }
    }

    pub fn timer(&self, feature: FeatureId) -> Option<f64> {
        self.entries.get(&feature).copied()
    }

    pub fn contains(&self, feature: FeatureId) -> bool {
        self.entries.contains_key(&feature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decay every timer by `dt`, rebuilding the map from survivors.
    ///
    /// Entries at or below zero are dropped. Survivors under one unit
    /// are returned with their fade opacity.
    pub fn decay(&mut self, dt: f64) -> Vec<FeedbackEvent> {
        let mut fading = Vec::new();
        let mut next = BTreeMap::new();

        for (&feature, &timer) in &self.entries {
            let timer = timer - dt;
            if timer <= 0.0 {
                continue;
            }
            if timer < 1.0 {
                fading.push(FeedbackEvent { feature, opacity: timer });
            }
            next.insert(feature, timer);
        }

        self.entries = next;
        fading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunger() -> HungerClock {
        HungerClock::new(&HungerConfig::default())
    }

    #[test]
    fn test_no_tick_below_one_unit() {
        let mut clock = hunger();
        let mut health = HealthState::new(100.0);
        assert_eq!(clock.advance(0.75, &mut health).ticks, 0);
        assert_eq!(clock.advance(0.25, &mut health).ticks, 1);
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_decay_cadence_over_eighteen_ticks() {
        let mut clock = hunger();
        let mut health = HealthState::new(100.0);
        let mut escalation_drains = Vec::new();

        // 36 half-second frames = exactly 18 whole ticks
        for _ in 0..36 {
            let before = health.get();
            let report = clock.advance(0.5, &mut health);
            if report.escalations > 0 {
                escalation_drains.push(before - health.get());
            }
        }

        assert_eq!(clock.ticks(), 18);
        // Fires on ticks 9 and 18, worse the second time
        assert_eq!(escalation_drains.len(), 2);
        assert!(escalation_drains[1] > escalation_drains[0]);
        // 2 (tick 9) + 1 (tick 10) + 3 (tick 18)
        assert_eq!(health.get(), 94.0);
    }

    #[test]
    fn test_large_delta_runs_every_tick() {
        let mut clock = hunger();
        let mut health = HealthState::new(100.0);
        let report = clock.advance(10.0, &mut health);
        assert_eq!(report.ticks, 10);
        assert_eq!(report.escalations, 1);
        assert_eq!(report.drained, 3.0);
    }

    #[test]
    fn test_feedback_expiry() {
        let mut map = FeedbackMap::new();
        let id = FeatureId::new(0, 0);
        map.set(id, 3.5);

        assert!(map.decay(2.0).is_empty());
        assert_eq!(map.timer(id), Some(1.5));

        let fading = map.decay(1.0);
        assert_eq!(fading, vec![FeedbackEvent { feature: id, opacity: 0.5 }]);

        map.decay(1.0);
        assert!(!map.contains(id));
        assert!(map.is_empty());
    }

    #[test]
    fn test_feedback_refresh_and_purge() {
        let mut map = FeedbackMap::new();
        let a = FeatureId::new(0, 0);
        let b = FeatureId::new(1, 0);
        map.set(a, 3.5);
        map.set(b, 3.5);
        map.decay(3.0);
        map.set(a, 3.5);
        assert_eq!(map.timer(a), Some(3.5));

        map.purge(&[b]);
        assert!(!map.contains(b));
        assert_eq!(map.len(), 1);
    }
}
