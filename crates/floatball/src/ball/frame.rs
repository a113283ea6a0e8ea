//! Read-only snapshot of everything a painter needs for one frame.

use super::dock::DockDirection;
use super::theme::{SegmentState, ThemeColors, to_rgba8, with_opacity};
use crate::menu::{Hit, RingLayout, Sector};
use crate::scene::LayerState;
use orbit::{Point, TrailQuad};
use serde::Serialize;

/// Shown on sectors the menu tree has no entry for.
pub const PLACEHOLDER_LABEL: &str = "?";

#[derive(Debug, Clone, Serialize)]
pub struct SectorFrame<'a> {
    #[serde(flatten)]
    pub sector: Sector,
    pub label: &'a str,
    pub state: SegmentState,
    pub color: [u8; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerFrame<'a> {
    pub index: usize,
    pub radius: f64,
    pub draw_progress: f64,
    pub opacity: f64,
    pub segment_count: usize,
    pub gap_angle_deg: u32,
    pub labels: Vec<&'a str>,
    /// Hovered segment, if the pointer is over this ring.
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
    pub label_color: [u8; 4],
    pub sectors: Vec<SectorFrame<'a>>,
}

impl<'a> LayerFrame<'a> {
    pub fn build(
        layout: &RingLayout,
        index: usize,
        state: &LayerState,
        labels: &[&'a str],
        hover: Option<Hit>,
        theme: &ThemeColors,
    ) -> Option<Self> {
        let spec = layout.layer(index)?;
        let hovered = hover.filter(|h| h.layer == index).and_then(|h| h.segment);
        let labels: Vec<&'a str> = (0..spec.segment_count).map(|i| label(labels, i)).collect();

        let sectors = layout
            .sectors(index, state.radius, state.draw_progress)
            .into_iter()
            .map(|sector| {
                let segment = SegmentState::resolve(
                    hovered == Some(sector.index),
                    state.selected == Some(sector.index),
                );
                SectorFrame {
                    label: labels.get(sector.index).copied().unwrap_or(PLACEHOLDER_LABEL),
                    state: segment,
                    color: to_rgba8(segment.color(theme, state.opacity)),
                    sector,
                }
            })
            .collect();

        Some(Self {
            index,
            radius: state.radius,
            draw_progress: state.draw_progress,
            opacity: state.opacity,
            segment_count: spec.segment_count,
            gap_angle_deg: spec.gap_angle_deg,
            labels,
            hovered,
            selected: state.selected,
            label_color: to_rgba8(with_opacity(theme.label, state.opacity)),
            sectors,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameState<'a> {
    pub ball_scale: f64,
    pub eye_openness: f64,
    pub selected: bool,
    pub dock: DockDirection,
    pub window_origin: Point,
    /// Screen position of the ball and ring centre.
    pub center: Point,
    pub jelly: Point,
    pub ball_colors: [[u8; 4]; 2],
    /// Empty while the ball is showing.
    pub layers: Vec<LayerFrame<'a>>,
    pub trail: Vec<TrailQuad>,
    pub trail_visibility: f64,
}

/// Label `i` of a projected ring, or the placeholder.
pub fn label<'a>(labels: &[&'a str], i: usize) -> &'a str {
    labels.get(i).copied().unwrap_or(PLACEHOLDER_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::LayerSpec;

    fn layout() -> RingLayout {
        RingLayout::new(40.0, vec![LayerSpec::new(100.0, 4, 10, 10.0)]).unwrap()
    }

    #[test]
    fn test_label_placeholder() {
        let labels = ["A", "B"];
        assert_eq!(label(&labels, 1), "B");
        assert_eq!(label(&labels, 2), PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_layer_frame_marks_hover_and_selection() {
        let layout = layout();
        let state = LayerState {
            radius: 100.0,
            draw_progress: 1.0,
            opacity: 1.0,
            selected: Some(2),
        };
        let hover = Some(Hit {
            layer: 0,
            segment: Some(1),
        });
        let theme = ThemeColors::default();
        let frame = LayerFrame::build(&layout, 0, &state, &["A", "B", "C"], hover, &theme).unwrap();

        assert_eq!(frame.labels, vec!["A", "B", "C", "?"]);
        assert_eq!(frame.hovered, Some(1));
        let states: Vec<SegmentState> = frame.sectors.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                SegmentState::Idle,
                SegmentState::Hovered,
                SegmentState::Selected,
                SegmentState::Idle,
            ]
        );
        assert_eq!(frame.sectors[3].label, "?");
        assert_eq!(frame.sectors[1].color, [255, 0, 0, 180]);
    }

    #[test]
    fn test_hover_on_other_ring_ignored() {
        let layout = layout();
        let state = LayerState::collapsed(40.0);
        let hover = Some(Hit {
            layer: 1,
            segment: Some(0),
        });
        let frame =
            LayerFrame::build(&layout, 0, &state, &[], hover, &ThemeColors::default()).unwrap();
        assert_eq!(frame.hovered, None);
        assert!(frame.sectors.is_empty());
        assert!(LayerFrame::build(&layout, 3, &state, &[], None, &ThemeColors::default()).is_none());
    }
}
