//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use glimmer_config::{Config, MotionSetting};
use glimmer_core::{AnimationSpeed, ColorTheme, EffectStyle};

#[derive(Debug, Parser)]
#[command(name = "glimmer", version)]
#[command(about = "Pointer-reactive particle and neural network backgrounds for the terminal", long_about = None)]
pub struct Cli {
    /// Effect to draw: particles, network, combined or none
    #[arg(short, long)]
    pub effect: Option<EffectStyle>,

    /// Color theme: aurora, ocean, ember or mono
    #[arg(short, long)]
    pub theme: Option<ColorTheme>,

    /// Animation speed: slow, medium or fast
    #[arg(short, long)]
    pub speed: Option<AnimationSpeed>,

    /// Draw a single static frame
    #[arg(long)]
    pub reduced_motion: bool,

    /// Seed for reproducible layouts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Read settings from this file instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save the merged settings to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Override config values with the ones given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(effect) = self.effect {
            config.effect = effect;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.reduced_motion {
            config.motion = MotionSetting::Reduced;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
    }
}
