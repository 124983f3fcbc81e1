//! The one egui window. Shows what the active scene is doing and exposes the
//! handful of knobs the demos respond to: a manual thunder strike, concert
//! start/stop, and camera presets.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use effects::concert::{ConcertCommand, ConcertPhase, ConcertState};
use effects::rain::RainState;
use effects::rng::SessionSeed;
use effects::thunder::{ThunderState, ThunderTrigger};
use rendering::camera::CameraTarget;
use scenes::ActiveScene;

/// Whether the control panel is visible. Starts open; F1 toggles.
#[derive(Resource)]
pub struct ControlPanelVisible(pub bool);

impl Default for ControlPanelVisible {
    fn default() -> Self {
        ControlPanelVisible(true)
    }
}

pub fn panel_keybinds(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<ControlPanelVisible>) {
    if keys.just_pressed(KeyCode::F1) {
        visible.0 = !visible.0;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<ControlPanelVisible>,
    scene: Res<ActiveScene>,
    seed: Res<SessionSeed>,
    rain: Option<Res<RainState>>,
    thunder: Res<ThunderState>,
    concert: Res<ConcertState>,
    mut thunder_triggers: EventWriter<ThunderTrigger>,
    mut concert_commands: EventWriter<ConcertCommand>,
    mut camera_target: ResMut<CameraTarget>,
) {
    if !visible.0 {
        return;
    }

    let mut open = true;
    egui::Window::new(scene.0.title())
        .open(&mut open)
        .resizable(false)
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            ui.label(format!("Seed: {}", seed.0));
            if let Some(rain) = &rain {
                ui.label(format!("Rain drops: {}", rain.len()));
            }
            ui.label(format!("Thunder strikes: {}", thunder.strikes));

            ui.separator();

            if ui.button("Strike thunder").clicked() {
                thunder_triggers.send(ThunderTrigger);
            }

            match concert.phase {
                ConcertPhase::Idle => {
                    if ui.button("Start concert").clicked() {
                        concert_commands.send(ConcertCommand::Start);
                    }
                }
                ConcertPhase::Playing => {
                    if ui.button("Stop concert").clicked() {
                        concert_commands.send(ConcertCommand::Stop);
                    }
                }
            }

            ui.separator();

            ui.label("Camera:");
            ui.horizontal(|ui| {
                if ui.button("Front").clicked() {
                    camera_target.set(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.25, 12.0);
                }
                if ui.button("Top").clicked() {
                    camera_target.set(Vec3::ZERO, 0.0, 1.4, 20.0);
                }
                if ui.button("Side").clicked() {
                    camera_target.set(
                        Vec3::new(0.0, 1.0, 0.0),
                        std::f32::consts::FRAC_PI_2,
                        0.25,
                        12.0,
                    );
                }
            });

            ui.separator();
            ui.small("Right drag: orbit. Scroll: zoom. WASD: pan. F1: hide.");
        });

    if !open {
        visible.0 = false;
    }
}
