//! User-selectable animation settings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which effect is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectStyle {
    /// Pointer-attracted glowing particles.
    #[default]
    #[serde(rename = "particles")]
    ParticleField,
    /// Node graph lit by a wave that follows scroll progress.
    #[serde(rename = "network")]
    NeuralNetwork,
    /// The node network with a sparse particle field drifting over it.
    Combined,
    /// Nothing is drawn.
    None,
}

impl EffectStyle {
    pub const ALL: [EffectStyle; 4] = [
        EffectStyle::ParticleField,
        EffectStyle::NeuralNetwork,
        EffectStyle::Combined,
        EffectStyle::None,
    ];

    /// Cycle to the next style.
    pub fn next(self) -> Self {
        match self {
            EffectStyle::ParticleField => EffectStyle::NeuralNetwork,
            EffectStyle::NeuralNetwork => EffectStyle::Combined,
            EffectStyle::Combined => EffectStyle::None,
            EffectStyle::None => EffectStyle::ParticleField,
        }
    }

    /// Display name for the status bar.
    pub fn name(self) -> &'static str {
        match self {
            EffectStyle::ParticleField => "particles",
            EffectStyle::NeuralNetwork => "network",
            EffectStyle::Combined => "combined",
            EffectStyle::None => "none",
        }
    }

    pub fn uses_particles(self) -> bool {
        matches!(self, EffectStyle::ParticleField | EffectStyle::Combined)
    }

    pub fn uses_network(self) -> bool {
        matches!(self, EffectStyle::NeuralNetwork | EffectStyle::Combined)
    }
}

impl FromStr for EffectStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, |v| v.name())
    }
}

/// Global animation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 3] = [
        AnimationSpeed::Slow,
        AnimationSpeed::Medium,
        AnimationSpeed::Fast,
    ];

    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Factor applied to the frame time step.
    pub fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.75,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

impl FromStr for AnimationSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, |v| v.name())
    }
}

/// Match `s` case-insensitively against the names of `variants`.
pub(crate) fn parse_named<T: Copy>(
    s: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, String> {
    let wanted = s.trim();
    variants
        .iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let names: Vec<&str> = variants.iter().map(|v| name(*v)).collect();
            format!("unknown value '{wanted}', expected one of: {}", names.join(", "))
        })
}

/// Accessibility preference for motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionPreference {
    #[default]
    Full,
    /// Draw a single static frame and skip all per-frame work.
    Reduced,
}

/// Environment variables that request reduced motion.
const REDUCED_MOTION_VARS: [&str; 2] = ["GLIMMER_REDUCED_MOTION", "REDUCE_MOTION"];

impl MotionPreference {
    /// Read the preference from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the preference from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let requested = REDUCED_MOTION_VARS.iter().any(|key| {
            lookup(key).is_some_and(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on" | "reduce"
                )
            })
        });
        if requested {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            MotionPreference::Full => MotionPreference::Reduced,
            MotionPreference::Reduced => MotionPreference::Full,
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}
