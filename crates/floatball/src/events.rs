use serde::Serialize;

/// Notifications the ball sends to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BallEvent {
    MenuOpened,
    MenuClosed,
    SegmentChosen { layer: usize, segment: usize },
}
