use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod control_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<control_panel::ControlPanelVisible>()
            .add_systems(
                Update,
                (control_panel::panel_keybinds, control_panel::control_panel_ui),
            );
    }
}
