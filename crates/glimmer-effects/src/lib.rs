//! Canvas effects for glimmer.
//!
//! This crate provides the two animated effects, a pointer-attracted
//! particle field and a node network lit by scroll progress, together with
//! the software canvas they draw onto and the [`Animator`] that drives them
//! one frame at a time.

mod animator;
mod color;
pub mod network;
pub mod particles;
mod raster;

pub use animator::{Animator, AnimatorSettings, InputState};
pub use color::{hsl_to_rgb, to_terminal};
pub use network::{NetworkParams, Node};
pub use particles::{FieldParams, Particle};
pub use raster::PixelCanvas;
