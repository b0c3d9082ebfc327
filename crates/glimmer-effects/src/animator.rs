//! Frame-by-frame animation state.
//!
//! The [`Animator`] owns the particle and node collections, the latest
//! input values and the canvas. Input handlers write pointer and scroll
//! progress into it between frames; [`Animator::frame`] reads whatever is
//! current, advances the simulation and redraws.

use glimmer_core::{
    AnimationSpeed, Bounds, Canvas, ColorTheme, EffectStyle, MotionPreference, Palette, ScrollProgress,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::network::{self, NetworkParams, Node};
use crate::particles::{self, FieldParams, MAX_DT, Particle};
use crate::raster::PixelCanvas;

/// Milliseconds per frame at the reference rate of 60 Hz.
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Everything needed to build an [`Animator`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorSettings {
    pub style: EffectStyle,
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    pub motion: MotionPreference,
    /// Particles in the standalone particle field.
    pub particle_count: usize,
    /// Particles drifting over the network in the combined style.
    pub overlay_particle_count: usize,
    pub node_count: usize,
    pub field: FieldParams,
    pub network: NetworkParams,
    /// Fixed RNG seed, `None` for entropy.
    pub seed: Option<u64>,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            style: EffectStyle::default(),
            theme: ColorTheme::default(),
            speed: AnimationSpeed::default(),
            motion: MotionPreference::default(),
            particle_count: 200,
            overlay_particle_count: 15,
            node_count: 12,
            field: FieldParams::default(),
            network: NetworkParams::default(),
            seed: None,
        }
    }
}

/// Latest input values, overwritten by the input handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Pointer position in canvas pixels.
    pub pointer: Option<(f32, f32)>,
    pub progress: ScrollProgress,
}

/// Animation state for the active effect.
#[derive(Debug)]
pub struct Animator {
    settings: AnimatorSettings,
    palette: Palette,
    input: InputState,
    particles: Vec<Particle>,
    nodes: Vec<Node>,
    bounds: Option<Bounds>,
    canvas: PixelCanvas,
    rng: StdRng,
    /// Time of the previous frame.
    last_update_ms: Option<u64>,
    /// Simulation clock in seconds, scaled by speed.
    clock_secs: f32,
    /// Whether the canvas holds a frame matching the current settings.
    drawn: bool,
}

impl Animator {
    pub fn new(settings: AnimatorSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            palette: settings.theme.palette(),
            settings,
            input: InputState::default(),
            particles: Vec::new(),
            nodes: Vec::new(),
            bounds: None,
            canvas: PixelCanvas::new(Bounds::default()),
            rng,
            last_update_ms: None,
            clock_secs: 0.0,
            drawn: false,
        }
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Bounds used by the last frame.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Record the pointer position in canvas pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.pointer = Some((x, y));
    }

    /// Record the pointer from a terminal cell; each cell is two pixels tall.
    pub fn set_pointer_cell(&mut self, column: u16, row: u16) {
        self.set_pointer(column as f32 + 0.5, row as f32 * 2.0 + 1.0);
    }

    pub fn clear_pointer(&mut self) {
        self.input.pointer = None;
    }

    pub fn set_progress(&mut self, progress: ScrollProgress) {
        self.input.progress = progress;
    }

    pub fn set_style(&mut self, style: EffectStyle) {
        if style == self.settings.style {
            return;
        }
        debug!(from = self.settings.style.name(), to = style.name(), "effect changed");
        let old_count = self.particle_target();
        self.settings.style = style;
        if self.particle_target() != old_count {
            self.particles.clear();
        }
        self.drawn = false;
    }

    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.settings.theme = theme;
        self.palette = theme.palette();
        self.drawn = false;
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.settings.speed = speed;
    }

    pub fn set_motion(&mut self, motion: MotionPreference) {
        if motion != self.settings.motion {
            debug!(?motion, "motion preference changed");
        }
        self.settings.motion = motion;
        // Resume without a jump from the time spent frozen
        self.last_update_ms = None;
    }

    /// Drop all collections; they are rebuilt on the next frame.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.nodes.clear();
        self.clock_secs = 0.0;
        self.last_update_ms = None;
        self.drawn = false;
    }

    /// Produce the frame for `elapsed_ms` on a surface of `bounds`.
    ///
    /// Under reduced motion the simulation never advances and, once drawn,
    /// the same frame is returned until the surface or settings change.
    pub fn frame(&mut self, elapsed_ms: u64, bounds: Bounds) -> &PixelCanvas {
        let resized = self.apply_bounds(bounds);
        let reduced = self.settings.motion.is_reduced();

        if reduced && self.drawn && !resized {
            return &self.canvas;
        }

        self.ensure_initialized(bounds);

        let delta_ms = self
            .last_update_ms
            .map_or(0, |last| elapsed_ms.saturating_sub(last));
        self.last_update_ms = Some(elapsed_ms);

        if reduced {
            // Static frame: activation for the current progress, clock stopped
            self.update_network();
        } else {
            let dt = (delta_ms as f32 / FRAME_MS * self.settings.speed.multiplier()).min(MAX_DT);
            self.update(dt, bounds);
        }

        self.render();
        self.drawn = true;
        &self.canvas
    }

    fn particle_target(&self) -> usize {
        match self.settings.style {
            EffectStyle::ParticleField => self.settings.particle_count,
            EffectStyle::Combined => self.settings.overlay_particle_count,
            EffectStyle::NeuralNetwork | EffectStyle::None => 0,
        }
    }

    /// Track surface size changes; returns true when the bounds changed.
    fn apply_bounds(&mut self, bounds: Bounds) -> bool {
        match self.bounds {
            Some(old) if old == bounds => false,
            Some(old) => {
                debug!(width = bounds.width, height = bounds.height, "canvas resized");
                particles::rescale(&mut self.particles, old, bounds);
                network::relayout(&mut self.nodes, old, bounds);
                self.canvas.resize(bounds);
                self.bounds = Some(bounds);
                true
            }
            None => {
                self.canvas.resize(bounds);
                self.bounds = Some(bounds);
                true
            }
        }
    }

    fn ensure_initialized(&mut self, bounds: Bounds) {
        let style = self.settings.style;
        let target = self.particle_target();
        if style.uses_particles() && self.particles.len() != target {
            self.particles = particles::init_particles(target, bounds, &self.palette, &mut self.rng);
            debug!(count = target, "particles initialized");
        }
        if style.uses_network() && self.nodes.is_empty() && self.settings.node_count > 0 {
            self.nodes = network::init_nodes(self.settings.node_count, bounds, &mut self.rng);
            debug!(count = self.nodes.len(), "nodes initialized");
        }
    }

    fn update(&mut self, dt: f32, bounds: Bounds) {
        self.clock_secs += dt / 60.0;
        self.update_network();
        if self.settings.style.uses_particles() {
            particles::step(
                &mut self.particles,
                self.input.pointer,
                dt,
                &self.settings.field,
                bounds,
                &self.palette,
                &mut self.rng,
            );
        }
    }

    fn update_network(&mut self) {
        if self.settings.style.uses_network() {
            network::update_activation(
                &mut self.nodes,
                self.input.progress.percent(),
                self.clock_secs,
                &self.settings.network,
            );
        }
    }

    fn render(&mut self) {
        let style = self.settings.style;
        self.canvas.clear(self.palette.background);
        if style.uses_network() {
            network::render(&mut self.canvas, &self.nodes, &self.palette);
        }
        if style.uses_particles() {
            particles::render(
                &mut self.canvas,
                &self.particles,
                self.settings.field.depth_scaling,
                &self.palette,
            );
        }
    }
}
