use palette::Srgba;
use serde::Serialize;

pub struct ThemeColors {
    pub hovered: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub idle: Srgba<f64>,
    pub label: Srgba<f64>,
    pub ball_inner: Srgba<f64>,
    pub ball_outer: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            hovered: rgba(255, 0, 0, 180),
            selected: rgba(180, 180, 180, 140),
            idle: rgba(100, 100, 100, 140),
            label: rgba(255, 255, 255, 255),
            ball_inner: rgba(141, 196, 253, 200),
            ball_outer: rgba(141, 196, 253, 140),
        }
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Srgba<f64> {
    Srgba::new(r, g, b, a).into_format()
}

/// 8-bit RGBA for hosts that paint with integer colours.
pub fn to_rgba8(color: Srgba<f64>) -> [u8; 4] {
    let c: Srgba<u8> = color.into_format();
    [c.red, c.green, c.blue, c.alpha]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    Idle,
    Selected,
    Hovered,
}

impl SegmentState {
    /// Hover wins over selection.
    pub fn resolve(hovered: bool, selected: bool) -> Self {
        match (hovered, selected) {
            (true, _) => Self::Hovered,
            (false, true) => Self::Selected,
            (false, false) => Self::Idle,
        }
    }

    /// Fill colour with the ring's opacity folded into alpha.
    pub fn color(&self, theme: &ThemeColors, opacity: f64) -> Srgba<f64> {
        let base = match self {
            Self::Idle => theme.idle,
            Self::Selected => theme.selected,
            Self::Hovered => theme.hovered,
        };
        with_opacity(base, opacity)
    }
}

pub fn with_opacity(color: Srgba<f64>, opacity: f64) -> Srgba<f64> {
    Srgba::new(
        color.red,
        color.green,
        color.blue,
        color.alpha * opacity.clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_wins() {
        assert_eq!(SegmentState::resolve(true, true), SegmentState::Hovered);
        assert_eq!(SegmentState::resolve(false, true), SegmentState::Selected);
        assert_eq!(SegmentState::resolve(false, false), SegmentState::Idle);
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let theme = ThemeColors::default();
        assert_eq!(to_rgba8(SegmentState::Hovered.color(&theme, 1.0)), [255, 0, 0, 180]);
        assert_eq!(to_rgba8(SegmentState::Idle.color(&theme, 0.0))[3], 0);
        assert_eq!(with_opacity(theme.label, 0.5).alpha, 0.5);
    }
}
