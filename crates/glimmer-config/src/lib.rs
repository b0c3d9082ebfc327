//! Configuration for glimmer.
//!
//! Settings live in a TOML file in the platform configuration directory
//! (for example `~/.config/glimmer/config.toml` on Linux). A missing file is
//! not an error: every field has a default, and partial files only override
//! what they name.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glimmer_core::{AnimationSpeed, ColorTheme, EffectStyle, MotionPreference};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// File name inside the configuration directory.
const CONFIG_FILE: &str = "config.toml";

/// Upper limits applied by [`Config::validate`].
const MAX_PARTICLES: usize = 5000;
const MAX_NODES: usize = 256;
const FPS_RANGE: (u32, u32) = (1, 240);

/// Errors from loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How the reduced-motion preference is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionSetting {
    /// Follow the environment.
    #[default]
    Auto,
    Full,
    Reduced,
}

impl MotionSetting {
    /// Resolve against the preference detected from the environment.
    pub fn resolve(self, detected: MotionPreference) -> MotionPreference {
        match self {
            MotionSetting::Auto => detected,
            MotionSetting::Full => MotionPreference::Full,
            MotionSetting::Reduced => MotionPreference::Reduced,
        }
    }
}

/// Particle field tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub count: usize,
    /// Particles drawn over the network in the combined effect.
    pub overlay_count: usize,
    pub attraction_strength: f32,
    pub attraction_radius: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub depth_scaling: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 200,
            overlay_count: 15,
            attraction_strength: 0.8,
            attraction_radius: 200.0,
            friction: 0.96,
            max_speed: 6.0,
            depth_scaling: 1.0,
        }
    }
}

/// Node network tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub node_count: usize,
    pub threshold: f32,
    pub oscillation_rate: f32,
    pub modulation: f32,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            node_count: 12,
            threshold: 2.5,
            oscillation_rate: 2.0,
            modulation: 0.3,
        }
    }
}

/// Log file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub enabled: bool,
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub effect: EffectStyle,
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    pub motion: MotionSetting,
    /// Target frames per second.
    pub fps: u32,
    /// Fixed random seed for reproducible layouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub particles: ParticleSettings,
    pub network: NetworkSettings,
    pub logging: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: EffectStyle::default(),
            theme: ColorTheme::default(),
            speed: AnimationSpeed::default(),
            motion: MotionSetting::default(),
            fps: 60,
            seed: None,
            particles: ParticleSettings::default(),
            network: NetworkSettings::default(),
            logging: LogSettings::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "glimmer", "glimmer").ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Directory for log files.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join("logs"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    ///
    /// Values are not range-checked here; call [`Config::validate`] once any
    /// overrides have been applied.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Clamp out-of-range values. Returns the names of corrected fields.
    pub fn validate(&mut self) -> Vec<&'static str> {
        let mut fixed = Vec::new();
        let defaults_p = ParticleSettings::default();
        let defaults_n = NetworkSettings::default();

        let fps = self.fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        if fps != self.fps {
            self.fps = fps;
            fixed.push("fps");
        }

        let p = &mut self.particles;
        if p.count > MAX_PARTICLES {
            p.count = MAX_PARTICLES;
            fixed.push("particles.count");
        }
        if p.overlay_count > MAX_PARTICLES {
            p.overlay_count = MAX_PARTICLES;
            fixed.push("particles.overlay_count");
        }
        if !(p.friction > 0.0 && p.friction < 1.0) {
            p.friction = defaults_p.friction;
            fixed.push("particles.friction");
        }
        if !(p.attraction_radius.is_finite() && p.attraction_radius >= 0.0) {
            p.attraction_radius = defaults_p.attraction_radius;
            fixed.push("particles.attraction_radius");
        }
        if !p.attraction_strength.is_finite() {
            p.attraction_strength = defaults_p.attraction_strength;
            fixed.push("particles.attraction_strength");
        }
        if !(p.max_speed.is_finite() && p.max_speed > 0.0) {
            p.max_speed = defaults_p.max_speed;
            fixed.push("particles.max_speed");
        }
        if !(0.0..=1.0).contains(&p.depth_scaling) {
            p.depth_scaling = if p.depth_scaling.is_nan() {
                defaults_p.depth_scaling
            } else {
                p.depth_scaling.clamp(0.0, 1.0)
            };
            fixed.push("particles.depth_scaling");
        }

        let n = &mut self.network;
        if n.node_count > MAX_NODES {
            n.node_count = MAX_NODES;
            fixed.push("network.node_count");
        }
        if !(n.threshold.is_finite() && n.threshold > 0.0) {
            n.threshold = defaults_n.threshold;
            fixed.push("network.threshold");
        }
        if !n.oscillation_rate.is_finite() {
            n.oscillation_rate = defaults_n.oscillation_rate;
            fixed.push("network.oscillation_rate");
        }
        if !(0.0..=1.0).contains(&n.modulation) {
            n.modulation = defaults_n.modulation;
            fixed.push("network.modulation");
        }

        for field in &fixed {
            warn!(field = *field, "config value out of range, corrected");
        }
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = Config {
            effect: EffectStyle::Combined,
            theme: ColorTheme::Ember,
            motion: MotionSetting::Reduced,
            seed: Some(7),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("effect = \"combined\""));
        assert!(written.contains("[particles]"));

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "theme = \"ocean\"\n\n[particles]\ncount = 50\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, ColorTheme::Ocean);
        assert_eq!(config.particles.count, 50);
        assert_eq!(config.particles.friction, 0.96);
        assert_eq!(config.network, NetworkSettings::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "effect = \"sparkles\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_validate_clamps_out_of_range() {
        let mut config = Config {
            fps: 0,
            ..Config::default()
        };
        config.particles.friction = 1.5;
        config.particles.count = 1_000_000;
        config.particles.depth_scaling = 3.0;
        config.network.threshold = 0.0;

        let fixed = config.validate();
        assert_eq!(
            fixed,
            vec![
                "fps",
                "particles.count",
                "particles.friction",
                "particles.depth_scaling",
                "network.threshold",
            ]
        );
        assert_eq!(config.fps, 1);
        assert_eq!(config.particles.count, MAX_PARTICLES);
        assert_eq!(config.particles.friction, 0.96);
        assert_eq!(config.particles.depth_scaling, 1.0);
        assert_eq!(config.network.threshold, 2.5);

        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn test_enum_names_match_cli_names() {
        for effect in EffectStyle::ALL {
            let config: Config = toml::from_str(&format!("effect = \"{}\"", effect.name())).unwrap();
            assert_eq!(config.effect, effect);
        }
        for theme in ColorTheme::ALL {
            let config: Config = toml::from_str(&format!("theme = \"{}\"", theme.name())).unwrap();
            assert_eq!(config.theme, theme);
        }
        for speed in AnimationSpeed::ALL {
            let config: Config = toml::from_str(&format!("speed = \"{}\"", speed.name())).unwrap();
            assert_eq!(config.speed, speed);
        }

        let written = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(written.contains("effect = \"particles\""));
    }

    #[test]
    fn test_load_keeps_values_for_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[particles]\nfriction = 1.5\n").unwrap();

        let mut config = Config::load_from(&path).unwrap();
        assert_eq!(config.particles.friction, 1.5);
        assert_eq!(config.validate(), vec!["particles.friction"]);
    }

    #[test]
    fn test_motion_setting_resolve() {
        assert_eq!(
            MotionSetting::Auto.resolve(MotionPreference::Reduced),
            MotionPreference::Reduced
        );
        assert_eq!(
            MotionSetting::Full.resolve(MotionPreference::Reduced),
            MotionPreference::Full
        );
        assert_eq!(
            MotionSetting::Reduced.resolve(MotionPreference::Full),
            MotionPreference::Reduced
        );
    }
}
