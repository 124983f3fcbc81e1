//! The demo scenes. Each scene is an independent plugin and exactly one is
//! added per run, selected by the app crate from settings or the command
//! line.

use bevy::prelude::*;

pub mod mirror_cube;
pub mod object_playground;
pub mod rain_city;
pub mod showcase;
pub mod spotlight_stage;

/// Which demo to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// Cyberpunk street in the rain: particle pool, neon flicker, thunder.
    #[default]
    RainCity,
    /// Concert stage with moving spotlights and music.
    SpotlightStage,
    /// Spinning primitive shapes over a floor.
    ObjectPlayground,
    /// Product pedestal with camera presets.
    Showcase,
    /// Transmissive sphere under bloom.
    MirrorCube,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::RainCity,
        SceneKind::SpotlightStage,
        SceneKind::ObjectPlayground,
        SceneKind::Showcase,
        SceneKind::MirrorCube,
    ];

    /// Parse a scene name as written in settings or on the command line.
    pub fn from_name(name: &str) -> Option<SceneKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rain-city" | "rain" => Some(SceneKind::RainCity),
            "spotlight-stage" | "stage" => Some(SceneKind::SpotlightStage),
            "object-playground" | "playground" => Some(SceneKind::ObjectPlayground),
            "showcase" => Some(SceneKind::Showcase),
            "mirror-cube" | "mirror" => Some(SceneKind::MirrorCube),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::RainCity => "rain-city",
            SceneKind::SpotlightStage => "spotlight-stage",
            SceneKind::ObjectPlayground => "object-playground",
            SceneKind::Showcase => "showcase",
            SceneKind::MirrorCube => "mirror-cube",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SceneKind::RainCity => "Rain City",
            SceneKind::SpotlightStage => "Spotlight Stage",
            SceneKind::ObjectPlayground => "Object Playground",
            SceneKind::Showcase => "Showcase",
            SceneKind::MirrorCube => "Mirror Cube",
        }
    }
}

/// The scene this run was started with, for the control panel.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ActiveScene(pub SceneKind);

/// Add the plugin for `kind` to the app.
pub fn add_scene_plugin(app: &mut App, kind: SceneKind) {
    app.insert_resource(ActiveScene(kind));
    match kind {
        SceneKind::RainCity => app.add_plugins(rain_city::RainCityPlugin),
        SceneKind::SpotlightStage => app.add_plugins(spotlight_stage::SpotlightStagePlugin),
        SceneKind::ObjectPlayground => app.add_plugins(object_playground::ObjectPlaygroundPlugin),
        SceneKind::Showcase => app.add_plugins(showcase::ShowcasePlugin),
        SceneKind::MirrorCube => app.add_plugins(mirror_cube::MirrorCubePlugin),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in SceneKind::ALL {
            assert_eq!(SceneKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(SceneKind::from_name("RAIN"), Some(SceneKind::RainCity));
        assert_eq!(SceneKind::from_name(" stage "), Some(SceneKind::SpotlightStage));
        assert_eq!(SceneKind::from_name("mirror"), Some(SceneKind::MirrorCube));
        assert_eq!(SceneKind::from_name("nope"), None);
    }
}
