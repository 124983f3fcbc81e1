//! Thunder flash state machine.
//!
//! Idle → Flashing on a per-tick Bernoulli trial (or a manual trigger from
//! the control panel). Entering Flashing sets a randomized peak intensity and
//! flash-plane opacity and schedules the decay (a single extinguish, or a
//! surge to twice the peak followed by extinguish) through the
//! [`FlashSchedule`]. The final step returns the machine to Idle.
//!
//! Retriggering while a flash is in progress clears the pending decay steps
//! before scheduling new ones, so two strikes can never interleave their
//! decays.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{EffectsSettings, ThunderConfig};
use crate::rng::EffectsRng;
use crate::schedule::{FlashSchedule, FlashStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThunderPhase {
    #[default]
    Idle,
    Flashing,
}

/// Current flash outputs. The rendering layer copies `light_intensity` into
/// the sky light and `flash_opacity` into the flash-plane material.
#[derive(Resource, Debug, Default)]
pub struct ThunderState {
    pub phase: ThunderPhase,
    pub light_intensity: f32,
    pub flash_opacity: f32,
    /// Total strikes this session, for the control panel.
    pub strikes: u64,
}

/// Event: force a strike right now (control-panel button).
#[derive(Event, Debug, Default)]
pub struct ThunderTrigger;

/// Event: a strike just began. The audio layer plays a clap scaled by `peak`.
#[derive(Event, Debug, Clone, Copy)]
pub struct ThunderStrike {
    pub peak: f32,
}

/// Per-tick Bernoulli trial for a spontaneous strike. Zero probability never
/// fires, no matter what the RNG produces.
pub fn spontaneous_strike(cfg: &ThunderConfig, rng: &mut impl Rng) -> bool {
    cfg.trial_probability > 0.0 && rng.gen_bool(cfg.trial_probability)
}

/// Begin a strike: set peak outputs, schedule the decay, return the peak.
/// Pending steps from a previous strike are cancelled first.
pub fn begin_strike(
    state: &mut ThunderState,
    schedule: &mut FlashSchedule,
    cfg: &ThunderConfig,
    now: f64,
    rng: &mut impl Rng,
) -> f32 {
    schedule.clear();

    let peak = cfg.min_peak + rng.gen::<f32>() * cfg.peak_span;
    state.phase = ThunderPhase::Flashing;
    state.light_intensity = peak;
    state.flash_opacity = cfg.min_opacity + rng.gen::<f32>() * cfg.opacity_span;
    state.strikes += 1;

    if rng.gen::<f32>() < cfg.double_flash_chance {
        let surge_at = now + cfg.surge_delay_min + rng.gen::<f64>() * cfg.surge_delay_span;
        schedule.schedule(
            surge_at,
            FlashStep::Surge {
                intensity: peak * 2.0,
                opacity: cfg.surge_opacity_min + rng.gen::<f32>() * cfg.surge_opacity_span,
            },
        );
        let out_at = surge_at + cfg.surge_decay_min + rng.gen::<f64>() * cfg.surge_decay_span;
        schedule.schedule(out_at, FlashStep::Extinguish);
    } else {
        let out_at = now + cfg.single_decay_min + rng.gen::<f64>() * cfg.single_decay_span;
        schedule.schedule(out_at, FlashStep::Extinguish);
    }
    peak
}

/// System: run the per-tick trial and consume manual triggers.
pub fn update_thunder(
    time: Res<Time>,
    settings: Res<EffectsSettings>,
    mut rng: ResMut<EffectsRng>,
    mut schedule: ResMut<FlashSchedule>,
    mut state: ResMut<ThunderState>,
    mut triggers: EventReader<ThunderTrigger>,
    mut strikes: EventWriter<ThunderStrike>,
) {
    let cfg = settings.thunder;
    let manual = triggers.read().count() > 0;

    if manual || spontaneous_strike(&cfg, &mut rng.0) {
        let now = time.elapsed_secs_f64();
        let peak = begin_strike(&mut state, &mut schedule, &cfg, now, &mut rng.0);
        debug!("thunder strike: peak={peak:.1}");
        strikes.send(ThunderStrike { peak });
    }
}

/// System: apply every due decay step, in order.
pub fn apply_flash_schedule(
    time: Res<Time>,
    mut schedule: ResMut<FlashSchedule>,
    mut state: ResMut<ThunderState>,
) {
    for step in schedule.drain_due(time.elapsed_secs_f64()) {
        match step {
            FlashStep::Surge { intensity, opacity } => {
                state.light_intensity = intensity;
                state.flash_opacity = opacity;
            }
            FlashStep::Extinguish => {
                state.light_intensity = 0.0;
                state.flash_opacity = 0.0;
                state.phase = ThunderPhase::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn apply_due(state: &mut ThunderState, schedule: &mut FlashSchedule, now: f64) {
        for step in schedule.drain_due(now) {
            match step {
                FlashStep::Surge { intensity, opacity } => {
                    state.light_intensity = intensity;
                    state.flash_opacity = opacity;
                }
                FlashStep::Extinguish => {
                    state.light_intensity = 0.0;
                    state.flash_opacity = 0.0;
                    state.phase = ThunderPhase::Idle;
                }
            }
        }
    }

    #[test]
    fn test_zero_probability_never_flashes() {
        let cfg = ThunderConfig::default();
        assert_eq!(cfg.trial_probability, 0.0);

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut state = ThunderState::default();
        let mut schedule = FlashSchedule::default();
        for tick in 0..5_000 {
            let now = tick as f64 / 60.0;
            if spontaneous_strike(&cfg, &mut rng) {
                begin_strike(&mut state, &mut schedule, &cfg, now, &mut rng);
            }
            apply_due(&mut state, &mut schedule, now);
            assert_eq!(state.phase, ThunderPhase::Idle);
            assert_eq!(state.light_intensity, 0.0);
            assert_eq!(state.flash_opacity, 0.0);
        }
        assert_eq!(state.strikes, 0);
    }

    #[test]
    fn test_storm_probability_eventually_strikes() {
        // p = 0.0005 over 50k ticks: ~25 strikes expected.
        let cfg = ThunderConfig::storm();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut fired = 0;
        for _ in 0..50_000 {
            if spontaneous_strike(&cfg, &mut rng) {
                fired += 1;
            }
        }
        assert!(fired > 0);
    }

    #[test]
    fn test_strike_sets_peak_and_schedules_decay() {
        let cfg = ThunderConfig::storm();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut state = ThunderState::default();
        let mut schedule = FlashSchedule::default();

        let peak = begin_strike(&mut state, &mut schedule, &cfg, 10.0, &mut rng);
        assert_eq!(state.phase, ThunderPhase::Flashing);
        assert_eq!(state.light_intensity, peak);
        assert!(peak >= cfg.min_peak && peak <= cfg.min_peak + cfg.peak_span);
        assert!(state.flash_opacity >= cfg.min_opacity);
        assert!(!schedule.is_empty());
        assert_eq!(state.strikes, 1);
    }

    #[test]
    fn test_flash_extinguishes_back_to_idle() {
        let cfg = ThunderConfig::storm();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = ThunderState::default();
        let mut schedule = FlashSchedule::default();

        begin_strike(&mut state, &mut schedule, &cfg, 0.0, &mut rng);
        // The longest possible decay chain is well under a second.
        apply_due(&mut state, &mut schedule, 1.0);
        assert_eq!(state.phase, ThunderPhase::Idle);
        assert_eq!(state.light_intensity, 0.0);
        assert_eq!(state.flash_opacity, 0.0);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_retrigger_replaces_pending_decay() {
        let cfg = ThunderConfig::storm();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut state = ThunderState::default();
        let mut schedule = FlashSchedule::default();

        begin_strike(&mut state, &mut schedule, &cfg, 0.0, &mut rng);
        let pending_before = schedule.len();
        assert!(pending_before >= 1);

        // Strike again before the first decay fires: old steps are gone.
        begin_strike(&mut state, &mut schedule, &cfg, 0.01, &mut rng);
        assert_eq!(state.strikes, 2);
        assert!(schedule.len() <= 2);

        // Only the second strike's decay plays out.
        apply_due(&mut state, &mut schedule, 2.0);
        assert_eq!(state.phase, ThunderPhase::Idle);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_double_flash_surges_then_extinguishes() {
        let cfg = ThunderConfig {
            double_flash_chance: 1.0,
            ..ThunderConfig::storm()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut state = ThunderState::default();
        let mut schedule = FlashSchedule::default();

        let peak = begin_strike(&mut state, &mut schedule, &cfg, 0.0, &mut rng);
        assert_eq!(schedule.len(), 2);

        // Drain only the surge window.
        let surge_deadline = cfg.surge_delay_min + cfg.surge_delay_span;
        apply_due(&mut state, &mut schedule, surge_deadline);
        assert_eq!(state.phase, ThunderPhase::Flashing);
        assert_eq!(state.light_intensity, peak * 2.0);
        assert!(state.flash_opacity >= cfg.surge_opacity_min);
        assert!(state.flash_opacity <= cfg.surge_opacity_min + cfg.surge_opacity_span);

        apply_due(&mut state, &mut schedule, 1.0);
        assert_eq!(state.phase, ThunderPhase::Idle);
        assert_eq!(state.light_intensity, 0.0);
    }
}
