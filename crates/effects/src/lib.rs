use bevy::prelude::*;

pub mod concert;
pub mod config;
pub mod flicker;
pub mod rain;
pub mod rng;
pub mod schedule;
pub mod thunder;

/// All per-tick effect updates run in this set. Rendering systems that push
/// computed effect values into lights, materials, and transforms schedule
/// themselves `.after(EffectsSet)` so they always see this frame's values.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectsSet;

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<rng::EffectsRng>()
            .init_resource::<config::EffectsSettings>()
            .init_resource::<schedule::FlashSchedule>()
            .init_resource::<thunder::ThunderState>()
            .init_resource::<concert::ConcertState>()
            .add_event::<thunder::ThunderTrigger>()
            .add_event::<thunder::ThunderStrike>()
            .add_event::<concert::ConcertCommand>()
            .add_systems(
                Update,
                (
                    rain::update_rain,
                    flicker::update_neon_flicker,
                    // The trial must run before the queue drains so a step
                    // scheduled this tick never fires on the same tick.
                    (thunder::update_thunder, thunder::apply_flash_schedule).chain(),
                    concert::update_concert,
                )
                    .in_set(EffectsSet),
            );
    }
}
