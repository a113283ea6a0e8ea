use super::DEAD_ZONE_RADIUS;
use orbit::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FULL_TURN: u32 = 360;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("At least one ring is required")]
    NoLayers,
    #[error("Inner radius must be finite and non-negative, got {radius}")]
    InnerRadius { radius: f64 },
    #[error("Ring {layer} needs at least one segment")]
    SegmentCount { layer: usize },
    #[error("Ring {layer} radius {radius} must exceed its inner edge {previous}")]
    NonIncreasingRadius {
        layer: usize,
        radius: f64,
        previous: f64,
    },
    #[error("Ring {layer} spacing must be finite and non-negative, got {spacing}")]
    NegativeSpacing { layer: usize, spacing: f64 },
    #[error("Ring {layer} gap leaves a span of {span} degrees per segment")]
    SpanAngle { layer: usize, span: i64 },
}

/// Static configuration of one ring. Ring 0 is the innermost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub target_radius: f64,
    pub segment_count: usize,
    pub gap_angle_deg: u32,
    pub spacing: f64,
}

impl LayerSpec {
    pub fn new(target_radius: f64, segment_count: usize, gap_angle_deg: u32, spacing: f64) -> Self {
        Self {
            target_radius,
            segment_count,
            gap_angle_deg,
            spacing,
        }
    }

    /// Angular pitch between consecutive sector starts.
    pub fn full_span(&self) -> u32 {
        FULL_TURN / self.segment_count.max(1) as u32
    }

    /// Visible angular width of one sector.
    pub fn span_angle(&self) -> u32 {
        self.full_span().saturating_sub(self.gap_angle_deg)
    }

    pub fn sector_start(&self, segment: usize) -> u32 {
        (segment as u32 * self.full_span()) % FULL_TURN
    }

    /// Sector owning `angle` (degrees, any range). Angles inside a gap
    /// belong to no sector.
    pub fn segment_at(&self, angle: f64) -> Option<usize> {
        let angle = normalize_angle(angle);
        let span = self.span_angle() as f64;

        (0..self.segment_count).find(|&i| {
            let start = self.sector_start(i) as f64;
            let end = start + span;
            // Validated layouts never end past 360; the second arm is defensive.
            (start <= angle && angle < end) || (end > FULL_TURN as f64 && angle < end - 360.0)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub layer: usize,
    pub segment: Option<usize>,
}

/// Annular wedge to paint, in degrees counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sector {
    pub index: usize,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Label position relative to the ring centre, y pointing down.
    pub label_anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    inner_radius: f64,
    layers: Vec<LayerSpec>,
}

impl RingLayout {
    pub fn new(inner_radius: f64, layers: Vec<LayerSpec>) -> Result<Self, LayoutError> {
        if layers.is_empty() {
            return Err(LayoutError::NoLayers);
        }
        if !inner_radius.is_finite() || inner_radius < 0.0 {
            return Err(LayoutError::InnerRadius {
                radius: inner_radius,
            });
        }

        let mut previous = inner_radius;
        for (layer, spec) in layers.iter().enumerate() {
            if spec.segment_count == 0 {
                return Err(LayoutError::SegmentCount { layer });
            }
            if !spec.target_radius.is_finite() || spec.target_radius <= previous {
                return Err(LayoutError::NonIncreasingRadius {
                    layer,
                    radius: spec.target_radius,
                    previous,
                });
            }
            if !spec.spacing.is_finite() || spec.spacing < 0.0 {
                return Err(LayoutError::NegativeSpacing {
                    layer,
                    spacing: spec.spacing,
                });
            }
            let span = (FULL_TURN as usize / spec.segment_count) as i64 - spec.gap_angle_deg as i64;
            if span <= 0 {
                return Err(LayoutError::SpanAngle { layer, span });
            }
            previous = spec.target_radius + spec.spacing;
        }

        Ok(Self {
            inner_radius,
            layers,
        })
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn layer(&self, layer: usize) -> Option<&LayerSpec> {
        self.layers.get(layer)
    }

    /// Radius a ring grows out from: the ball edge for ring 0, otherwise the
    /// previous ring's target plus its spacing.
    pub fn inner_edge(&self, layer: usize) -> f64 {
        match layer.checked_sub(1).and_then(|prev| self.layers.get(prev)) {
            Some(prev) => prev.target_radius + prev.spacing,
            None => self.inner_radius,
        }
    }

    pub fn target_radius(&self, layer: usize) -> Option<f64> {
        self.layers.get(layer).map(|l| l.target_radius)
    }

    /// Resolves a polar pointer sample against the current ring radii.
    /// Rings are tested innermost first; a ring with no width never matches.
    pub fn hit_test(&self, radii: &[f64], distance: f64, angle: f64) -> Option<Hit> {
        if distance < DEAD_ZONE_RADIUS {
            return None;
        }

        self.layers
            .iter()
            .zip(radii)
            .enumerate()
            .find(|&(layer, (_, &outer))| {
                let inner = self.inner_edge(layer);
                outer > inner && inner <= distance && distance <= outer
            })
            .map(|(layer, (spec, _))| Hit {
                layer,
                segment: spec.segment_at(angle),
            })
    }

    /// Wedges for one ring at `radius`, each sweeping open with `draw_progress`.
    pub fn sectors(&self, layer: usize, radius: f64, draw_progress: f64) -> Vec<Sector> {
        let Some(spec) = self.layers.get(layer) else {
            return Vec::new();
        };
        let inner = self.inner_edge(layer);
        let sweep = (spec.span_angle() as f64 * draw_progress.clamp(0.0, 1.0)).floor();
        if sweep <= 0.0 {
            return Vec::new();
        }

        let text_radius = (radius + inner) / 2.0;
        (0..spec.segment_count)
            .map(|index| {
                let start = spec.sector_start(index) as f64;
                let mid = (start + sweep / 2.0).to_radians();
                Sector {
                    index,
                    start_deg: start,
                    sweep_deg: sweep,
                    inner_radius: inner,
                    outer_radius: radius,
                    label_anchor: Point::new(text_radius * mid.cos(), -text_radius * mid.sin()),
                }
            })
            .collect()
    }
}

pub fn normalize_angle(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Direction of `delta` (screen coordinates, y down) in degrees
/// counter-clockwise from +x, in [0, 360).
pub fn pointer_angle(delta: Point) -> f64 {
    normalize_angle((-delta.y).atan2(delta.x).to_degrees())
}

/// Fraction of the way from `start` to `target`, clamped to [0, 1]. A
/// zero-length span counts as complete.
pub fn sweep_progress(current: f64, start: f64, target: f64) -> f64 {
    let span = target - start;
    if span.abs() < f64::EPSILON {
        return 1.0;
    }
    ((current - start) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> RingLayout {
        RingLayout::new(
            40.0,
            vec![
                LayerSpec::new(100.0, 5, 5, 10.0),
                LayerSpec::new(200.0, 6, 5, 10.0),
                LayerSpec::new(300.0, 4, 5, 10.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(RingLayout::new(40.0, vec![]), Err(LayoutError::NoLayers));
        assert_eq!(
            RingLayout::new(40.0, vec![LayerSpec::new(100.0, 0, 5, 10.0)]),
            Err(LayoutError::SegmentCount { layer: 0 })
        );
        assert!(matches!(
            RingLayout::new(
                40.0,
                vec![
                    LayerSpec::new(100.0, 4, 5, 10.0),
                    LayerSpec::new(100.0, 4, 5, 10.0)
                ]
            ),
            Err(LayoutError::NonIncreasingRadius { layer: 1, .. })
        ));
        // Inside the previous ring's spacing band.
        assert_eq!(
            RingLayout::new(
                40.0,
                vec![
                    LayerSpec::new(100.0, 4, 5, 10.0),
                    LayerSpec::new(105.0, 4, 5, 10.0)
                ]
            ),
            Err(LayoutError::NonIncreasingRadius {
                layer: 1,
                radius: 105.0,
                previous: 110.0
            })
        );
        assert_eq!(
            RingLayout::new(40.0, vec![LayerSpec::new(100.0, 8, 45, 10.0)]),
            Err(LayoutError::SpanAngle { layer: 0, span: 0 })
        );
        assert!(matches!(
            RingLayout::new(40.0, vec![LayerSpec::new(100.0, 4, 5, -1.0)]),
            Err(LayoutError::NegativeSpacing { layer: 0, .. })
        ));
        assert!(matches!(
            RingLayout::new(-1.0, vec![LayerSpec::new(100.0, 4, 5, 1.0)]),
            Err(LayoutError::InnerRadius { .. })
        ));
    }

    #[test]
    fn test_inner_edges() {
        let layout = layout();
        assert_eq!(layout.inner_edge(0), 40.0);
        assert_eq!(layout.inner_edge(1), 110.0);
        assert_eq!(layout.inner_edge(2), 210.0);
    }

    #[test]
    fn test_five_segments_with_gap() {
        let spec = LayerSpec::new(100.0, 5, 5, 10.0);
        assert_eq!(spec.span_angle(), 67);
        assert_eq!(spec.segment_at(0.0), Some(0));
        assert_eq!(spec.segment_at(66.9), Some(0));
        assert_eq!(spec.segment_at(70.0), None);
        assert_eq!(spec.segment_at(72.0), Some(1));
        assert_eq!(spec.segment_at(139.0), None);
        assert_eq!(spec.segment_at(300.0), Some(4));
        assert_eq!(spec.segment_at(359.0), None);
        // Angles are normalised before lookup.
        assert_eq!(spec.segment_at(432.0), Some(1));
    }

    #[test]
    fn test_rounding_remainder_is_unowned() {
        // pitch 51: the last sector ends at 356, leaving 4 degrees before 360
        let spec = LayerSpec::new(100.0, 7, 1, 0.0);
        assert_eq!(spec.segment_at(355.5), Some(6));
        assert_eq!(spec.segment_at(356.0), None);
        assert_eq!(spec.segment_at(359.9), None);
    }

    #[test]
    fn test_hit_test_rings() {
        let layout = layout();
        let expanded = [100.0, 200.0, 300.0];

        assert_eq!(layout.hit_test(&expanded, 2.0, 10.0), None);
        assert_eq!(layout.hit_test(&expanded, 20.0, 10.0), None);
        assert_eq!(
            layout.hit_test(&expanded, 70.0, 10.0),
            Some(Hit {
                layer: 0,
                segment: Some(0)
            })
        );
        assert_eq!(
            layout.hit_test(&expanded, 70.0, 70.0),
            Some(Hit {
                layer: 0,
                segment: None
            })
        );
        // Spacing band between rings belongs to neither.
        assert_eq!(layout.hit_test(&expanded, 105.0, 10.0), None);
        assert_eq!(
            layout.hit_test(&expanded, 150.0, 61.0),
            Some(Hit {
                layer: 1,
                segment: Some(1)
            })
        );
        assert_eq!(layout.hit_test(&expanded, 400.0, 10.0), None);
    }

    #[test]
    fn test_collapsed_rings_never_hit() {
        let layout = layout();
        let radii = [100.0, 110.0, 210.0];
        assert_eq!(layout.hit_test(&radii, 110.0, 10.0), None);
        assert_eq!(layout.hit_test(&radii, 210.0, 10.0), None);
        // Stale radius slice shorter than the ring list.
        assert_eq!(layout.hit_test(&[100.0], 150.0, 10.0), None);
    }

    #[test]
    fn test_hit_is_unique_across_distances() {
        let layout = layout();
        let radii = [100.0, 200.0, 300.0];
        for d in 0..400 {
            let d = d as f64;
            let owners = (0..3)
                .filter(|&l| layout.inner_edge(l) <= d && d <= radii[l])
                .count();
            assert!(owners <= 1, "distance {d}");
            assert_eq!(layout.hit_test(&radii, d, 5.0).is_some(), owners == 1 && d >= 5.0);
        }
    }

    #[test]
    fn test_sectors_sweep_with_progress() {
        let layout = layout();
        assert!(layout.sectors(0, 40.0, 0.0).is_empty());

        let half = layout.sectors(0, 70.0, 0.5);
        assert_eq!(half.len(), 5);
        assert_eq!(half[0].sweep_deg, 33.0);
        assert_eq!(half[1].start_deg, 72.0);

        let full = layout.sectors(1, 200.0, 1.0);
        assert_eq!(full[0].sweep_deg, 55.0);
        assert_eq!(full[0].inner_radius, 110.0);
        let anchor = full[0].label_anchor;
        assert!(anchor.x > 0.0 && anchor.y < 0.0);
        assert!((anchor.length() - 155.0).abs() < 1e-9);
        assert!(layout.sectors(9, 10.0, 1.0).is_empty());
    }

    #[test]
    fn test_pointer_angle_is_counter_clockwise() {
        assert_eq!(pointer_angle(Point::new(10.0, 0.0)), 0.0);
        assert!((pointer_angle(Point::new(0.0, -10.0)) - 90.0).abs() < 1e-9);
        assert!((pointer_angle(Point::new(0.0, 10.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_progress_guards() {
        assert_eq!(sweep_progress(50.0, 0.0, 100.0), 0.5);
        assert_eq!(sweep_progress(120.0, 0.0, 100.0), 1.0);
        assert_eq!(sweep_progress(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(sweep_progress(10.0, 10.0, 10.0), 1.0);
        assert!(!sweep_progress(10.0, 10.0, 10.0).is_nan());
    }
}
