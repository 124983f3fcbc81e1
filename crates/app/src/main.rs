use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use effects::config::EffectsSettings;
use effects::rng::{EffectsRng, SessionSeed};
use scenes::SceneKind;

mod settings;

/// Warnings gathered before the logger exists, flushed at startup.
#[derive(Resource)]
struct StartupNotes(Vec<String>);

fn main() {
    let (config, mut notes) = settings::load_or_default();

    // Scene selection: command line beats the environment beats the file.
    let requested = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("VIGNETTES_SCENE").ok())
        .unwrap_or_else(|| config.scene.clone());
    let scene = match SceneKind::from_name(&requested) {
        Some(kind) => kind,
        None => {
            let fallback = SceneKind::default();
            notes.push(format!(
                "unknown scene '{requested}', falling back to {}",
                fallback.name()
            ));
            fallback
        }
    };

    let seed = config.seed.unwrap_or_else(rand::random);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: format!("Vignettes: {}", scene.title()),
            resolution: (config.window_width, config.window_height).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .add_plugins((
        effects::EffectsPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    scenes::add_scene_plugin(&mut app, scene);

    // Seed and overrides go in after the plugins so they win over the
    // defaults the plugins register.
    app.insert_resource(EffectsRng::from_seed_u64(seed))
        .insert_resource(SessionSeed(seed));
    if let Some(count) = config.rain_count {
        app.world_mut().resource_mut::<EffectsSettings>().rain.count = count;
    }

    app.insert_resource(StartupNotes(notes))
        .add_systems(Startup, log_startup);

    app.run();
}

fn log_startup(notes: Res<StartupNotes>, scene: Res<scenes::ActiveScene>, seed: Res<SessionSeed>) {
    for note in &notes.0 {
        warn!("{note}");
    }
    info!("scene '{}', session seed {}", scene.0.name(), seed.0);
}
