//! Headless host with a hand-cranked clock, used by the driver and tests.

use super::Host;
use crate::ball::FloatingBall;
use crate::command::Command;
use crate::events::BallEvent;
use orbit::{Point, Rect};

/// Virtual frame interval.
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone)]
pub struct SimHost {
    now: u64,
    pointer: Point,
    screen: Rect,
    repaints: usize,
    events: Vec<BallEvent>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 1920.0, 1080.0))
    }
}

impl SimHost {
    pub fn new(screen: Rect) -> Self {
        Self {
            now: 0,
            pointer: screen.center(),
            screen,
            repaints: 0,
            events: Vec::new(),
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn set_pointer(&mut self, pos: Point) {
        self.pointer = pos;
    }

    pub fn repaints(&self) -> usize {
        self.repaints
    }

    pub fn take_events(&mut self) -> Vec<BallEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Host for SimHost {
    fn now_millis(&self) -> u64 {
        self.now
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }

    fn pointer_screen_pos(&self) -> Point {
        self.pointer
    }

    fn screen_available_rect(&self) -> Rect {
        self.screen
    }

    fn emit(&mut self, event: BallEvent) {
        log::debug!("Event {:?}", event);
        self.events.push(event);
    }
}

impl FloatingBall<SimHost> {
    /// Runs the frame timer over `ms` of virtual time.
    pub fn run_for(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(FRAME_MS);
            self.host_mut().advance(step);
            self.tick();
            remaining -= step;
        }
    }

    /// Feeds one scripted command, keeping the simulated pointer in sync.
    pub fn run(&mut self, command: Command) {
        if let Some(pos) = command.position() {
            self.host_mut().set_pointer(pos);
        }
        match command {
            Command::Wait { ms } => self.run_for(ms),
            other => self.apply(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BallConfig;

    #[test]
    fn test_run_for_steps_in_frames() {
        let mut ball = FloatingBall::new(&BallConfig::default(), SimHost::default()).unwrap();
        ball.run(Command::Wait { ms: 40 });
        assert_eq!(ball.host().now_millis(), 40);
        ball.run_for(0);
        assert_eq!(ball.host().now_millis(), 40);
    }

    #[test]
    fn test_pointer_follows_commands() {
        let mut ball = FloatingBall::new(&BallConfig::default(), SimHost::default()).unwrap();
        assert_eq!(ball.host().pointer_screen_pos(), Point::new(960.0, 540.0));
        ball.run(Command::Move {
            primary: false,
            x: 12.0,
            y: 34.0,
        });
        assert_eq!(ball.host().pointer_screen_pos(), Point::new(12.0, 34.0));
    }
}
