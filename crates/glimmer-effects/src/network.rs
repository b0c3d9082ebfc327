//! Node network lit by a wave that follows scroll progress (stateful).

use std::f32::consts::{FRAC_PI_2, TAU};

use glimmer_core::{Bounds, Canvas, Palette, Rgba, ScrollProgress};
use rand::{Rng, seq::index};

/// Fewest and most outgoing connections per node.
const MIN_CONNECTIONS: usize = 2;
const MAX_CONNECTIONS: usize = 4;

/// Ring radius as a fraction of each canvas side.
const RING_RADIUS: f32 = 0.38;

/// A node of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    /// Indices of nodes this node draws edges to.
    pub connections: Vec<usize>,
    /// Oscillation phase offset in radians.
    pub phase: f32,
    /// Current activation in `0.0..=1.0`.
    pub activation: f32,
}

/// Tunables for [`update_activation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkParams {
    /// Distance in node indices at which the wave stops activating a node.
    pub threshold: f32,
    /// Oscillation speed in radians per second.
    pub oscillation_rate: f32,
    /// Share of the activation modulated by the oscillation, `0.0..=1.0`.
    pub modulation: f32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            oscillation_rate: 2.0,
            modulation: 0.3,
        }
    }
}

/// Lay out `count` nodes on a jittered ring and wire them up.
pub fn init_nodes<R: Rng + ?Sized>(count: usize, bounds: Bounds, rng: &mut R) -> Vec<Node> {
    let (cx, cy) = bounds.center();
    let rx = bounds.width * RING_RADIUS;
    let ry = bounds.height * RING_RADIUS;

    let mut nodes: Vec<Node> = (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU - FRAC_PI_2 + rng.gen_range(-0.15..=0.15);
            let scale = rng.gen_range(0.85..=1.1);
            let (x, y) = bounds.wrap(cx + angle.cos() * rx * scale, cy + angle.sin() * ry * scale);
            Node {
                x,
                y,
                connections: Vec::new(),
                phase: rng.gen_range(0.0..TAU),
                activation: 0.0,
            }
        })
        .collect();

    if count < 2 {
        return nodes;
    }

    for (i, node) in nodes.iter_mut().enumerate() {
        let wanted = rng.gen_range(MIN_CONNECTIONS..=MAX_CONNECTIONS).min(count - 1);
        // Sample among the other nodes, then skip over our own index
        node.connections = index::sample(rng, count - 1, wanted)
            .into_iter()
            .map(|k| if k >= i { k + 1 } else { k })
            .collect();
    }

    nodes
}

/// Recompute every node's activation for the given progress and time.
///
/// The wave sits at `progress` mapped onto the node indices; activation
/// falls off linearly with index distance and is modulated by a per-node
/// oscillation. Results are always in `0.0..=1.0`.
pub fn update_activation(nodes: &mut [Node], progress: f32, elapsed_secs: f32, params: &NetworkParams) {
    let Some(last) = nodes.len().checked_sub(1) else {
        return;
    };
    let wave = ScrollProgress::new(progress).fraction() * last as f32;
    let threshold = params.threshold.max(f32::EPSILON);
    let modulation = params.modulation.clamp(0.0, 1.0);
    let t = if elapsed_secs.is_finite() { elapsed_secs } else { 0.0 };

    for (i, node) in nodes.iter_mut().enumerate() {
        let base = (1.0 - (i as f32 - wave).abs() / threshold).max(0.0);
        let osc = 0.5 + 0.5 * (t * params.oscillation_rate + node.phase).sin();
        let activation = base * (1.0 - modulation + modulation * osc);
        node.activation = if activation.is_nan() { 0.0 } else { activation.clamp(0.0, 1.0) };
    }
}

/// Draw edges, then nodes on top.
pub fn render(canvas: &mut impl Canvas, nodes: &[Node], palette: &Palette) {
    for node in nodes {
        for &j in &node.connections {
            let Some(other) = nodes.get(j) else {
                continue;
            };
            let avg = ((node.activation + other.activation) / 2.0).clamp(0.0, 1.0);
            let color = palette.accent.scale(0.5 + 0.5 * avg).with_alpha(0.15 + 0.6 * avg);
            canvas.stroke_line(node.x, node.y, other.x, other.y, 0.5 + 1.5 * avg, color);
        }
    }

    let white = Rgba::rgb(1.0, 1.0, 1.0);
    for node in nodes {
        let a = node.activation.clamp(0.0, 1.0);
        let core = palette.accent.lerp(white, a * 0.5).with_alpha(0.35 + 0.65 * a);
        canvas.fill_radial_gradient(node.x, node.y, 1.5 + 3.5 * a, core, core.with_alpha(0.0));
    }
}

/// Move nodes proportionally when the canvas changes size.
pub fn relayout(nodes: &mut [Node], from: Bounds, to: Bounds) {
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    for node in nodes {
        (node.x, node.y) = to.wrap(node.x * sx, node.y * sy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_core::ColorTheme;
    use rand::{SeedableRng, rngs::StdRng};

    use crate::raster::PixelCanvas;

    fn nodes(count: usize) -> Vec<Node> {
        let mut rng = StdRng::seed_from_u64(7);
        init_nodes(count, Bounds::new(160.0, 48.0), &mut rng)
    }

    fn assert_connections_valid(nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            assert!(!node.connections.is_empty());
            assert!(node.connections.len() <= MAX_CONNECTIONS);
            for &j in &node.connections {
                assert!(j < nodes.len(), "node {i} points to {j}");
                assert_ne!(i, j);
            }
        }
    }

    #[test]
    fn test_init_twice_is_structurally_valid() {
        let mut rng = StdRng::seed_from_u64(99);
        let bounds = Bounds::new(160.0, 48.0);
        for _ in 0..2 {
            let nodes = init_nodes(12, bounds, &mut rng);
            assert_eq!(nodes.len(), 12);
            assert_connections_valid(&nodes);
            assert!(nodes.iter().all(|n| bounds.contains(n.x, n.y)));
        }
    }

    #[test]
    fn test_tiny_networks() {
        assert!(nodes(0).is_empty());

        let single = nodes(1);
        assert_eq!(single.len(), 1);
        assert!(single[0].connections.is_empty());

        let pair = nodes(2);
        assert_eq!(pair[0].connections, vec![1]);
        assert_eq!(pair[1].connections, vec![0]);
    }

    #[test]
    fn test_activation_clamped_for_any_progress() {
        let mut nodes = nodes(15);
        let params = NetworkParams {
            modulation: 1.0,
            ..NetworkParams::default()
        };
        for progress in [-10.0, 0.0, 37.5, 100.0, 150.0, f32::NAN, f32::INFINITY] {
            for t in [0.0, 0.4, 3.0, 1e6, f32::NAN] {
                update_activation(&mut nodes, progress, t, &params);
                for n in &nodes {
                    assert!((0.0..=1.0).contains(&n.activation), "{progress} {t}");
                }
            }
        }
    }

    #[test]
    fn test_wave_follows_progress() {
        let mut nodes = nodes(12);
        let params = NetworkParams::default();
        let last = nodes.len() - 1;

        update_activation(&mut nodes, 0.0, 0.0, &params);
        let at_start = nodes[last].activation;
        let first_at_start = nodes[0].activation;

        update_activation(&mut nodes, 100.0, 0.0, &params);
        let at_end = nodes[last].activation;

        assert!(at_end > at_start);
        assert!(first_at_start > nodes[0].activation);
    }

    #[test]
    fn test_out_of_range_progress_matches_clamped() {
        let mut a = nodes(10);
        let mut b = a.clone();
        let params = NetworkParams::default();
        update_activation(&mut a, 150.0, 1.0, &params);
        update_activation(&mut b, 100.0, 1.0, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_relayout_scales_positions() {
        let from = Bounds::new(100.0, 100.0);
        let to = Bounds::new(50.0, 200.0);
        let mut nodes = nodes(3);
        nodes[0].x = 80.0;
        nodes[0].y = 10.0;
        relayout(&mut nodes, from, to);
        assert_eq!((nodes[0].x, nodes[0].y), (40.0, 20.0));
        assert!(nodes.iter().all(|n| to.contains(n.x, n.y)));
    }

    #[test]
    fn test_render_lights_active_nodes() {
        let bounds = Bounds::new(160.0, 48.0);
        let mut nodes = nodes(12);
        update_activation(&mut nodes, 100.0, 0.0, &NetworkParams::default());
        let palette = ColorTheme::Ocean.palette();

        let mut canvas = PixelCanvas::new(bounds);
        render(&mut canvas, &nodes, &palette);

        let last = &nodes[nodes.len() - 1];
        let lit = canvas.pixel(last.x as usize, last.y as usize).unwrap();
        assert!(lit.r + lit.g + lit.b > 0.5);
    }

    #[test]
    fn test_render_skips_dangling_connections() {
        let mut nodes = nodes(3);
        nodes[0].connections.push(42);
        let mut canvas = PixelCanvas::new(Bounds::new(160.0, 48.0));
        render(&mut canvas, &nodes, &ColorTheme::Mono.palette());

        // the valid edges and every node are still drawn
        for node in &nodes {
            let px = canvas.pixel(node.x as usize, node.y as usize).unwrap();
            assert_ne!(px, Rgba::BLACK);
        }
    }
}
