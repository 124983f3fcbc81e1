//! Launch settings read from `vignettes.json` next to the binary. Every field
//! is optional; a missing or broken file falls back to defaults and the
//! problem is reported once the logger is up.

use serde::Deserialize;

pub const SETTINGS_PATH: &str = "vignettes.json";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// Scene name, as accepted by the command line.
    pub scene: String,
    /// Fixed seed for the session. `null` asks for a fresh one per run.
    pub seed: Option<u64>,
    pub window_width: f32,
    pub window_height: f32,
    /// Overrides the rain pool size in scenes that have rain.
    pub rain_count: Option<usize>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            scene: "rain-city".to_string(),
            seed: Some(effects::rng::DEFAULT_SEED),
            window_width: 1280.0,
            window_height: 720.0,
            rain_count: None,
        }
    }
}

/// Loads settings, never failing. Returned strings are warnings to log after
/// the app starts; logging is not available this early.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_or_default() -> (AppSettings, Vec<String>) {
    match std::fs::read_to_string(SETTINGS_PATH) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => (settings, Vec::new()),
            Err(err) => (
                AppSettings::default(),
                vec![format!(
                    "could not parse {SETTINGS_PATH} ({err}), using defaults"
                )],
            ),
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            (AppSettings::default(), Vec::new())
        }
        Err(err) => (
            AppSettings::default(),
            vec![format!(
                "could not read {SETTINGS_PATH} ({err}), using defaults"
            )],
        ),
    }
}

/// No filesystem on the web; defaults only.
#[cfg(target_arch = "wasm32")]
pub fn load_or_default() -> (AppSettings, Vec<String>) {
    (AppSettings::default(), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.scene, "rain-city");
        assert_eq!(settings.seed, Some(effects::rng::DEFAULT_SEED));
        assert!(settings.rain_count.is_none());
    }

    #[test]
    fn test_full_settings_parse() {
        let settings: AppSettings = serde_json::from_str(
            r#"{
                "scene": "mirror-cube",
                "seed": 7,
                "window_width": 1920.0,
                "window_height": 1080.0,
                "rain_count": 500
            }"#,
        )
        .unwrap();
        assert_eq!(settings.scene, "mirror-cube");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.rain_count, Some(500));
    }

    #[test]
    fn test_null_seed_requests_entropy() {
        let settings: AppSettings = serde_json::from_str(r#"{"seed": null}"#).unwrap();
        assert_eq!(settings.seed, None);
    }
}
