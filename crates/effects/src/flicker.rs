//! Neon flicker oscillator.
//!
//! Each neon sign carries a phase accumulator and its base light intensity /
//! material emissive strength. Every tick the phase advances by the elapsed
//! time and the intensity is recomputed as base ± a sinusoidal term with
//! per-tick randomized speed and amplitude, clamped to non-negative. The
//! emissive output is kept proportional to the light output so the sign's
//! glow and its cast light never diverge.

use bevy::prelude::*;
use rand::Rng;

use crate::config::EffectsSettings;
use crate::rng::EffectsRng;

/// Flicker state for one neon sign. The `current_*` fields are outputs:
/// the rendering layer copies them into the sign's `PointLight` and
/// material emissive each frame.
#[derive(Component, Debug, Clone)]
pub struct NeonFlicker {
    /// Steady-state light intensity the oscillation is centered on.
    pub base_intensity: f32,
    /// Steady-state material emissive strength.
    pub base_emissive: f32,
    /// Phase accumulator, seconds. Signs start at different phases so they
    /// don't flicker in lockstep.
    pub phase: f32,
    pub current_intensity: f32,
    pub current_emissive: f32,
}

impl NeonFlicker {
    pub fn new(base_intensity: f32, base_emissive: f32, phase_offset: f32) -> Self {
        Self {
            base_intensity,
            base_emissive,
            phase: phase_offset,
            current_intensity: base_intensity,
            current_emissive: base_emissive,
        }
    }
}

/// One flicker sample: `base + sin(phase * speed) * amplitude * dropout`,
/// clamped to non-negative.
pub fn flicker_intensity(
    base: f32,
    phase: f32,
    speed: f32,
    amplitude: f32,
    dropout: f32,
) -> f32 {
    (base + (phase * speed).sin() * amplitude * dropout).max(0.0)
}

/// System: advance every sign's phase and recompute its outputs.
pub fn update_neon_flicker(
    time: Res<Time>,
    settings: Res<EffectsSettings>,
    mut rng: ResMut<EffectsRng>,
    mut signs: Query<&mut NeonFlicker>,
) {
    let cfg = settings.flicker;
    for mut neon in &mut signs {
        neon.phase += time.delta_secs();

        let speed = cfg.min_speed + rng.0.gen::<f32>() * cfg.speed_span;
        let amplitude = neon.base_intensity * (cfg.amp_floor + rng.0.gen::<f32>() * cfg.amp_span);
        let dropout = if rng.0.gen::<f32>() > cfg.dropout_chance {
            1.0
        } else {
            cfg.dropout_scale
        };

        neon.current_intensity =
            flicker_intensity(neon.base_intensity, neon.phase, speed, amplitude, dropout);
        neon.current_emissive = if neon.base_intensity > 0.0 {
            neon.base_emissive * (neon.current_intensity / neon.base_intensity)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_never_negative() {
        // Amplitude far larger than base: the raw sinusoid goes deeply
        // negative, the clamp must hold it at zero.
        for i in 0..1000 {
            let phase = i as f32 * 0.013;
            let v = flicker_intensity(1.0, phase, 7.3, 50.0, 1.0);
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn test_base_ten_amp_five_stays_within_bounds() {
        for i in 0..10_000 {
            let phase = i as f32 * 0.0077;
            let v = flicker_intensity(10.0, phase, 6.0, 5.0, 1.0);
            assert!((0.0..=15.0).contains(&v));
        }
    }

    #[test]
    fn test_dropout_scales_oscillation_not_base() {
        // With dropout the sign hovers near its base level instead of going dark.
        let full = flicker_intensity(10.0, 0.25, 2.0 * std::f32::consts::PI, 8.0, 1.0);
        let dropped = flicker_intensity(10.0, 0.25, 2.0 * std::f32::consts::PI, 8.0, 0.2);
        assert!((dropped - 10.0).abs() < (full - 10.0).abs());
    }

    #[test]
    fn test_emissive_proportionality() {
        let neon = NeonFlicker::new(250.0, 10.0, 0.0);
        // At spawn the outputs equal the base values.
        assert_eq!(neon.current_intensity, neon.base_intensity);
        assert_eq!(neon.current_emissive, neon.base_emissive);
    }
}
