//! Scheduled flash steps.
//!
//! Fire-and-forget timers for the thunder decay would let a decay callback
//! land between ticks and race a retriggered flash. Every delayed change
//! instead goes through a single due-ordered queue that is drained exactly
//! once per tick, so ordering is deterministic and a retrigger can cancel
//! whatever is still pending.

use bevy::prelude::*;

/// A single scheduled change to the thunder flash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashStep {
    /// Set light intensity and flash-plane opacity to the given values.
    Surge { intensity: f32, opacity: f32 },
    /// End of the flash: intensity and opacity back to zero.
    Extinguish,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledStep {
    due: f64,
    step: FlashStep,
}

/// Due-ordered queue of pending [`FlashStep`]s, keyed by absolute scene time
/// in seconds. Steps sharing a due time fire in insertion order.
#[derive(Resource, Default)]
pub struct FlashSchedule {
    entries: Vec<ScheduledStep>,
}

impl FlashSchedule {
    /// Insert a step, keeping the queue sorted by due time. Equal due times
    /// keep insertion order.
    pub fn schedule(&mut self, due: f64, step: FlashStep) {
        let index = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(index, ScheduledStep { due, step });
    }

    /// Remove and return every step due at or before `now`, in due order.
    pub fn drain_due(&mut self, now: f64) -> Vec<FlashStep> {
        let count = self.entries.partition_point(|e| e.due <= now);
        self.entries.drain(..count).map(|e| e.step).collect()
    }

    /// Drop all pending steps (a retriggered flash replaces its decay).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_due_order() {
        let mut q = FlashSchedule::default();
        q.schedule(
            3.0,
            FlashStep::Surge {
                intensity: 3.0,
                opacity: 0.3,
            },
        );
        q.schedule(1.0, FlashStep::Extinguish);
        q.schedule(
            2.0,
            FlashStep::Surge {
                intensity: 2.0,
                opacity: 0.2,
            },
        );

        let fired = q.drain_due(2.5);
        assert_eq!(
            fired,
            vec![
                FlashStep::Extinguish,
                FlashStep::Surge {
                    intensity: 2.0,
                    opacity: 0.2
                },
            ]
        );
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_nothing_due_yields_nothing() {
        let mut q = FlashSchedule::default();
        q.schedule(10.0, FlashStep::Extinguish);
        assert!(q.drain_due(9.999).is_empty());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_equal_due_times_fire_in_insertion_order() {
        let mut q = FlashSchedule::default();
        q.schedule(
            1.0,
            FlashStep::Surge {
                intensity: 1.0,
                opacity: 0.1,
            },
        );
        q.schedule(1.0, FlashStep::Extinguish);
        let fired = q.drain_due(1.0);
        assert_eq!(
            fired,
            vec![
                FlashStep::Surge {
                    intensity: 1.0,
                    opacity: 0.1
                },
                FlashStep::Extinguish,
            ]
        );
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut q = FlashSchedule::default();
        q.schedule(1.0, FlashStep::Extinguish);
        q.schedule(2.0, FlashStep::Extinguish);
        q.clear();
        assert!(q.is_empty());
        assert!(q.drain_due(f64::MAX).is_empty());
    }
}
