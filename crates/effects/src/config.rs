//! Tunable parameters for the frame-driven effects.
//!
//! Motion constants are expressed per frame at a 60 FPS baseline. Update
//! systems multiply them by `delta_secs * FRAME_RATE_BASELINE` so the same
//! numbers produce the same motion independently of the actual frame rate.

use bevy::prelude::*;

/// Frame rate the per-frame motion constants are normalized against.
pub const FRAME_RATE_BASELINE: f32 = 60.0;

/// Parameters for the rain particle pool.
#[derive(Debug, Clone, Copy)]
pub struct RainConfig {
    /// Number of drops in the pool. Fixed for the lifetime of the scene.
    pub count: usize,
    /// Drops respawn with x/z uniform in `[-half_extent, half_extent]`.
    pub half_extent: f32,
    /// Initial heights are uniform in `[0, spawn_height]`; respawned drops
    /// start at `spawn_height` or above.
    pub spawn_height: f32,
    /// Respawn height is `spawn_height + [0, respawn_band]`, so drops don't
    /// re-enter in a single visible sheet.
    pub respawn_band: f32,
    /// Vertical coordinate below which a drop is recycled.
    pub ground_y: f32,
    /// Fall speed range in units per baseline frame.
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            // One entity per drop. The drops share a single mesh and
            // material, so native handles the full-density shower; WebGL2
            // struggles past a few thousand draw calls.
            count: if cfg!(target_arch = "wasm32") {
                1500
            } else {
                10_000
            },
            half_extent: 60.0,
            spawn_height: 60.0,
            respawn_band: 20.0,
            ground_y: -5.0,
            min_fall_speed: 0.2,
            max_fall_speed: 0.4,
        }
    }
}

/// Parameters for the neon flicker oscillator.
///
/// Per-sign base intensity/emissive lives on the [`crate::flicker::NeonFlicker`]
/// component; this holds the shared jitter ranges.
#[derive(Debug, Clone, Copy)]
pub struct FlickerConfig {
    /// Phase speed is re-rolled each tick in `[min_speed, min_speed + speed_span]`.
    pub min_speed: f32,
    pub speed_span: f32,
    /// Amplitude each tick is `base * (amp_floor + [0, amp_span])`.
    pub amp_floor: f32,
    pub amp_span: f32,
    /// Chance per tick that the sign "drops out", scaling the oscillation down.
    pub dropout_chance: f32,
    pub dropout_scale: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            min_speed: 5.0,
            speed_span: 3.0,
            amp_floor: 0.3,
            amp_span: 0.4,
            dropout_chance: 0.1,
            dropout_scale: 0.2,
        }
    }
}

/// Parameters for the thunder flash state machine.
#[derive(Debug, Clone, Copy)]
pub struct ThunderConfig {
    /// Per-tick Bernoulli probability of a spontaneous strike.
    /// Zero disables spontaneous thunder entirely.
    pub trial_probability: f64,
    /// Peak light intensity on strike: `min_peak + [0, peak_span]`.
    pub min_peak: f32,
    pub peak_span: f32,
    /// Flash-plane opacity on strike: `min_opacity + [0, opacity_span]`.
    pub min_opacity: f32,
    pub opacity_span: f32,
    /// Chance that a strike is a double flash (surge to twice the peak
    /// before extinguishing).
    pub double_flash_chance: f32,
    /// Flash-plane opacity of the second surge:
    /// `surge_opacity_min + [0, surge_opacity_span]`.
    pub surge_opacity_min: f32,
    pub surge_opacity_span: f32,
    /// Delay before the second surge of a double flash, seconds.
    pub surge_delay_min: f64,
    pub surge_delay_span: f64,
    /// Time from the surge to extinguish, seconds.
    pub surge_decay_min: f64,
    pub surge_decay_span: f64,
    /// Time from a single flash to extinguish, seconds.
    pub single_decay_min: f64,
    pub single_decay_span: f64,
}

impl Default for ThunderConfig {
    /// Thunder is off by default; scenes that want a storm use
    /// [`ThunderConfig::storm`].
    fn default() -> Self {
        Self {
            trial_probability: 0.0,
            ..Self::storm()
        }
    }
}

impl ThunderConfig {
    /// Storm parameters matching the cyberpunk rain scene.
    pub fn storm() -> Self {
        Self {
            trial_probability: 0.0005,
            min_peak: 10.0,
            peak_span: 50.0,
            min_opacity: 0.5,
            opacity_span: 0.3,
            double_flash_chance: 0.4,
            surge_opacity_min: 0.3,
            surge_opacity_span: 0.2,
            surge_delay_min: 0.05,
            surge_delay_span: 0.05,
            surge_decay_min: 0.06,
            surge_decay_span: 0.06,
            single_decay_min: 0.08,
            single_decay_span: 0.10,
        }
    }
}

/// Active effect parameters for the running scene.
///
/// Scene plugins insert their own values; the defaults are a quiet scene
/// (rain pool unused until spawned, thunder disabled).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EffectsSettings {
    pub rain: RainConfig,
    pub flicker: FlickerConfig,
    pub thunder: ThunderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_rain_pool_is_full_density() {
        assert_eq!(RainConfig::default().count, 10_000);
    }

    #[test]
    fn test_default_thunder_is_disabled() {
        assert_eq!(ThunderConfig::default().trial_probability, 0.0);
        assert!(ThunderConfig::storm().trial_probability > 0.0);
    }

    #[test]
    fn test_storm_ranges_are_positive() {
        let cfg = ThunderConfig::storm();
        assert!(cfg.min_peak > 0.0 && cfg.peak_span > 0.0);
        assert!(cfg.surge_opacity_min > 0.0 && cfg.surge_opacity_span > 0.0);
        assert!(cfg.surge_delay_min > 0.0);
        assert!(cfg.single_decay_min > 0.0);
    }
}
