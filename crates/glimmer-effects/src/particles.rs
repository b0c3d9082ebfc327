//! Pointer-attracted particle field (stateful).
//!
//! A fixed number of particles drift across the canvas, pulled towards the
//! pointer when it is within range and slowed by friction. Particles are
//! never removed: once a particle outlives its `max_life` it is recycled at
//! a random position, so the collection size stays constant for the life of
//! the field.

use std::f32::consts::TAU;

use glimmer_core::{Bounds, Canvas, Palette};
use rand::Rng;

use crate::color::hsl_to_rgb;

/// Distance floor used for the inverse-distance attraction.
const MIN_DISTANCE: f32 = 1.0;

/// Largest time step accepted by [`step`], in frames.
pub const MAX_DT: f32 = 4.0;

/// Frames over which a new particle fades in.
const FADE_IN_FRAMES: f32 = 30.0;

/// Frames before `max_life` over which a particle fades out.
const FADE_OUT_FRAMES: f32 = 60.0;

/// Glow radius relative to the particle size.
const GLOW_SCALE: f32 = 2.0;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Depth in `0.0..1.0`, 0 is nearest to the viewer.
    pub z: f32,
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
    /// Current size, oscillating around `base_size`.
    pub size: f32,
    pub base_size: f32,
    /// Current opacity, oscillating around `base_opacity`.
    pub opacity: f32,
    pub base_opacity: f32,
    /// Hue in degrees.
    pub hue: f32,
    /// Phase driving the size, opacity and hue drift.
    pub phase: f32,
    /// Phase advance per frame.
    pub phase_rate: f32,
    /// Frames lived since the last recycle.
    pub life: f32,
    pub max_life: f32,
}

/// Tunables for [`step`] and [`render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Scale of the inverse-distance pull towards the pointer.
    pub attraction_strength: f32,
    /// Beyond this distance the pointer exerts no force.
    pub attraction_radius: f32,
    /// Per-frame velocity multiplier, below 1.
    pub friction: f32,
    /// Velocity cap in pixels per frame.
    pub max_speed: f32,
    /// How strongly depth shrinks and dims far particles, `0.0..=1.0`.
    pub depth_scaling: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            attraction_strength: 0.8,
            attraction_radius: 200.0,
            friction: 0.96,
            max_speed: 6.0,
            depth_scaling: 1.0,
        }
    }
}

/// Create `count` particles scattered over `bounds`.
pub fn init_particles<R: Rng + ?Sized>(
    count: usize,
    bounds: Bounds,
    palette: &Palette,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let base_size = rng.gen_range(1.0..3.0);
            let base_opacity = rng.gen_range(0.3..1.0);
            let phase = rng.gen_range(0.0..TAU);
            let max_life = rng.gen_range(300.0..900.0);
            Particle {
                x: rng.gen_range(0.0..bounds.width),
                y: rng.gen_range(0.0..bounds.height),
                z: rng.gen_range(0.0..1.0),
                vx: rng.gen_range(-0.5..=0.5),
                vy: rng.gen_range(-0.5..=0.5),
                vz: rng.gen_range(-0.002..=0.002),
                size: base_size,
                base_size,
                opacity: base_opacity,
                base_opacity,
                hue: drifted_hue(palette, phase),
                phase,
                phase_rate: rng.gen_range(0.01..0.04),
                // Staggered so the field does not fade in and recycle in lockstep
                life: rng.gen_range(0.0..max_life / 2.0),
                max_life,
            }
        })
        .collect()
}

/// Advance every particle by `dt` frames.
///
/// `pointer` is the latest pointer position in canvas pixels, `None` when
/// the pointer is unknown. Positions are wrapped into `bounds`.
pub fn step<R: Rng + ?Sized>(
    particles: &mut [Particle],
    pointer: Option<(f32, f32)>,
    dt: f32,
    params: &FieldParams,
    bounds: Bounds,
    palette: &Palette,
    rng: &mut R,
) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
    let friction = params.friction.clamp(0.0, 1.0).powf(dt);

    for p in particles {
        if let Some((px, py)) = pointer {
            let dx = px - p.x;
            let dy = py - p.y;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            if dist <= params.attraction_radius {
                let force = params.attraction_strength / dist;
                p.vx += dx / dist * force * dt;
                p.vy += dy / dist * force * dt;
            }
        }

        p.vx *= friction;
        p.vy *= friction;

        let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
        if speed > params.max_speed {
            let k = params.max_speed / speed;
            p.vx *= k;
            p.vy *= k;
        }
        if !(p.vx.is_finite() && p.vy.is_finite()) {
            p.vx = 0.0;
            p.vy = 0.0;
        }

        (p.x, p.y) = bounds.wrap(p.x + p.vx * dt, p.y + p.vy * dt);
        p.z = wrap_depth(p.z + p.vz * dt);

        p.phase = (p.phase + p.phase_rate * dt) % TAU;
        p.size = p.base_size * (1.0 + 0.25 * p.phase.sin());
        p.opacity = (p.base_opacity * (0.8 + 0.2 * (p.phase * 2.0).cos())).clamp(0.0, 1.0);
        p.hue = drifted_hue(palette, p.phase);

        p.life += dt;
        if p.life > p.max_life {
            recycle(p, bounds, rng);
        }
    }
}

/// Draw every particle as a glowing disc.
pub fn render(canvas: &mut impl Canvas, particles: &[Particle], depth_scaling: f32, palette: &Palette) {
    let depth_scaling = depth_scaling.clamp(0.0, 1.0);
    for p in particles {
        let depth = 1.0 - p.z * depth_scaling * 0.6;
        let alpha = (p.opacity * depth * life_fade(p)).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            continue;
        }
        let radius = p.size * GLOW_SCALE * depth;
        let core = hsl_to_rgb(p.hue, palette.saturation, 0.65);
        canvas.fill_radial_gradient(p.x, p.y, radius, core.with_alpha(alpha), core.with_alpha(0.0));
    }
}

/// Map particle positions proportionally from `from` to `to` bounds.
pub fn rescale(particles: &mut [Particle], from: Bounds, to: Bounds) {
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    for p in particles {
        (p.x, p.y) = to.wrap(p.x * sx, p.y * sy);
    }
}

/// Opacity multiplier for the fade-in after spawn and fade-out before recycle.
fn life_fade(p: &Particle) -> f32 {
    let fade_in = (p.life / FADE_IN_FRAMES).min(1.0);
    let fade_out = ((p.max_life - p.life) / FADE_OUT_FRAMES).clamp(0.0, 1.0);
    fade_in * fade_out
}

fn recycle<R: Rng + ?Sized>(p: &mut Particle, bounds: Bounds, rng: &mut R) {
    p.life = 0.0;
    p.x = rng.gen_range(0.0..bounds.width);
    p.y = rng.gen_range(0.0..bounds.height);
    p.vx = rng.gen_range(-0.5..=0.5);
    p.vy = rng.gen_range(-0.5..=0.5);
}

fn drifted_hue(palette: &Palette, phase: f32) -> f32 {
    (palette.hue_base + palette.hue_spread * (phase + 1.0).sin()).rem_euclid(360.0)
}

fn wrap_depth(z: f32) -> f32 {
    if !z.is_finite() {
        return 0.5;
    }
    let z = z.rem_euclid(1.0);
    if z >= 1.0 { 0.0 } else { z }
}
