//! Controller options with TOML preset support.
//!
//! All tweakable settings (gesture toggles and speeds, damping and
//! momentum, orbit limits, keybindings, alternate-mode settings) are
//! consolidated here. Options serialize to/from TOML so hosts can ship
//! presets next to their scenes.

mod ar;
mod interaction;
mod keybindings;
mod limits;
mod motion;

use std::path::Path;

pub use ar::ArOptions;
pub use interaction::InteractionOptions;
pub use keybindings::KeybindingOptions;
pub use limits::Limits;
pub use motion::MotionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Gesture toggles and sensitivities.
    pub interaction: InteractionOptions,
    /// Damping, smoothing, momentum and animation timing.
    pub motion: MotionOptions,
    /// Orbit distance, zoom and angle constraints.
    pub limits: Limits,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Alternate (device-driven) mode settings.
    pub ar: ArOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`OrbitError::OptionsParse`] if the text is not valid TOML for
    /// these options.
    pub fn from_toml_str(content: &str) -> Result<Self, OrbitError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Parse options from JSON text, as sent by a settings UI.
    ///
    /// # Errors
    ///
    /// [`OrbitError::OptionsParse`] if the text is not valid JSON for
    /// these options.
    pub fn from_json_str(content: &str) -> Result<Self, OrbitError> {
        let mut options: Self = serde_json::from_str(content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`OrbitError::Io`] if the file cannot be read, or
    /// [`OrbitError::OptionsParse`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`OrbitError::OptionsParse`] if serialization fails, or
    /// [`OrbitError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
damping_factor = 0.1
enable_momentum = false
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.motion.damping_factor, 0.1);
        assert!(!opts.motion.enable_momentum);
        // Everything else should be default
        assert_eq!(opts.motion.smooth_time, 0.2);
        assert_eq!(opts.motion.animation_easing, EasingFunction::CubicOut);
        assert_eq!(opts.interaction.rotate_speed, 0.5);
        assert_eq!(opts.limits.max_distance, f32::INFINITY);
        assert_eq!(opts.ar.device_height, 1.5);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("ArrowUp"), Some(KeyAction::Up));
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::Right)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn loaded_keybindings_resolve() {
        let toml_str = r#"
[keybindings.bindings]
up = "KeyW"
down = "KeyS"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::Up));
        assert_eq!(opts.keybindings.lookup("ArrowUp"), None);
    }

    #[test]
    fn json_settings_override_sections() {
        let opts = Options::from_json_str(
            r#"{"interaction": {"enable_pan": false}, "ar": {"fovy": 60.0}}"#,
        )
        .unwrap();
        assert!(!opts.interaction.enable_pan);
        assert!(opts.interaction.enable_rotate);
        assert_eq!(opts.ar.fovy, 60.0);
        assert!(Options::from_json_str("{not json").is_err());
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("orbitcam-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.motion.auto_rotate = true;
        opts.save(&dir.join("spin.toml")).unwrap();
        Options::default().save(&dir.join("calm.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("spin.toml")).unwrap();
        assert!(loaded.motion.auto_rotate);
        assert_eq!(Options::list_presets(&dir), vec!["calm", "spin"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/nonexistent/orbitcam.toml"))
            .unwrap_err();
        assert!(matches!(err, OrbitError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("interaction"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("limits"));
        assert!(props.contains_key("ar"));

        // Skipped sections should be absent
        assert!(!props.contains_key("keybindings"));

        let motion = &props["motion"]["properties"];
        assert!(motion.get("damping_factor").is_some());
        assert!(motion.get("animation_easing").is_none());
        let limits = &props["limits"]["properties"];
        assert!(limits.get("min_polar_angle").is_some());
        assert!(limits.get("max_azimuth_angle").is_none());
    }
}
