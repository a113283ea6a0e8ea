use crate::menu::RingLayout;
use orbit::{Point, TrailBuffer};
use serde::Serialize;

/// Animated state of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerState {
    pub radius: f64,
    pub draw_progress: f64,
    pub opacity: f64,
    pub selected: Option<usize>,
}

impl LayerState {
    pub fn collapsed(radius: f64) -> Self {
        Self {
            radius,
            draw_progress: 0.0,
            opacity: 1.0,
            selected: None,
        }
    }
}

/// Everything tweens write to. Owned by the ball, mutated only from its
/// event and tick handlers.
#[derive(Debug, Clone)]
pub struct Scene {
    pub layers: Vec<LayerState>,
    pub ball_scale: f64,
    pub rings_visible: bool,
    pub eye_openness: f64,
    pub jelly: Point,
    pub trail: TrailBuffer,
    pub trail_visibility: f64,
    pub window_origin: Point,
}

impl Scene {
    pub fn new(layout: &RingLayout, trail: TrailBuffer) -> Self {
        Self {
            layers: (0..layout.layer_count())
                .map(|l| LayerState::collapsed(layout.inner_edge(l)))
                .collect(),
            ball_scale: 1.0,
            rings_visible: false,
            eye_openness: 1.0,
            jelly: Point::ZERO,
            trail,
            trail_visibility: 0.0,
            window_origin: Point::ZERO,
        }
    }

    /// Snaps every ring back to its collapsed resting state.
    pub fn collapse_all(&mut self, layout: &RingLayout) {
        for (l, layer) in self.layers.iter_mut().enumerate() {
            *layer = LayerState::collapsed(layout.inner_edge(l));
        }
        self.rings_visible = false;
        self.ball_scale = 1.0;
    }

    pub fn radii(&self) -> Vec<f64> {
        self.layers.iter().map(|l| l.radius).collect()
    }

    pub fn selections(&self) -> Vec<Option<usize>> {
        self.layers.iter().map(|l| l.selected).collect()
    }

    /// Clears selections on ring `from` and every ring outside it.
    pub fn clear_selections_from(&mut self, from: usize) {
        for layer in self.layers.iter_mut().skip(from) {
            layer.selected = None;
        }
    }
}
