//! Core types shared by the glimmer crates.
//!
//! Everything here is plain data: canvas bounds, colors and themes, the
//! user-facing style enums, and the [`Canvas`] drawing trait that the
//! effect renderers draw onto.

mod bounds;
mod canvas;
mod color;
mod progress;
mod style;
mod theme;

pub use bounds::Bounds;
pub use canvas::Canvas;
pub use color::Rgba;
pub use progress::ScrollProgress;
pub use style::{AnimationSpeed, EffectStyle, MotionPreference};
pub use theme::{ColorTheme, Palette};
