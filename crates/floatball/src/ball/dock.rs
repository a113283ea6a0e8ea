use orbit::{Point, Rect};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DockDirection {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
}

impl DockDirection {
    /// Edge the ball is within `threshold` of, measured from the ball's rim.
    /// The closest edge wins; ties go left, right, top, bottom.
    pub fn detect(center: Point, screen: &Rect, ball_radius: f64, threshold: f64) -> Self {
        [
            (Self::Left, center.x - ball_radius - screen.left()),
            (Self::Right, screen.right() - (center.x + ball_radius)),
            (Self::Top, center.y - ball_radius - screen.top()),
            (Self::Bottom, screen.bottom() - (center.y + ball_radius)),
        ]
        .into_iter()
        .filter(|&(_, gap)| gap <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(Self::None, |(direction, _)| direction)
    }

    /// Ball centre after snapping flush against the edge.
    pub fn snap_center(&self, center: Point, screen: &Rect, ball_radius: f64) -> Point {
        match self {
            Self::None => center,
            Self::Left => Point::new(screen.left() + ball_radius, center.y),
            Self::Right => Point::new(screen.right() - ball_radius, center.y),
            Self::Top => Point::new(center.x, screen.top() + ball_radius),
            Self::Bottom => Point::new(center.x, screen.bottom() - ball_radius),
        }
    }
}
