use crate::events::BallEvent;
use orbit::{Point, Rect};

/// What the ball needs from the windowing side. All calls happen on the
/// thread that drives the ball.
pub trait Host {
    /// Monotonic clock in milliseconds.
    fn now_millis(&self) -> u64;

    fn request_repaint(&mut self);

    fn pointer_screen_pos(&self) -> Point;

    /// Usable screen area, excluding panels.
    fn screen_available_rect(&self) -> Rect;

    fn emit(&mut self, event: BallEvent);
}
