//! Bounded pointer history rendered as a ribbon of quads.

use crate::math::{Lerp, curve};
use crate::point::Point;
use serde::Serialize;
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 100;

/// Movement (in units) over which a segment ramps from invisible to full width.
const SPEED_RAMP: f64 = 0.5;
/// Offsets shorter than this are treated as zero.
const DEGENERATE_OFFSET: f64 = 0.01;
const MIN_SCALE: f64 = 0.001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrailError {
    #[error("Trail capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: Point,
    pub scale: f64,
}

impl TrailPoint {
    pub fn new(position: Point, scale: f64) -> Self {
        Self { position, scale }
    }

    fn lerp(a: &TrailPoint, b: &TrailPoint, t: f64) -> Self {
        Self {
            position: Point::lerp(a.position, b.position, t),
            scale: f64::lerp(a.scale, b.scale, t),
        }
    }
}

/// One ribbon quad. Corners run prev-left, prev-right, next-right, next-left;
/// `progress` is the position of each end along the visible trail in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailQuad {
    pub index: usize,
    pub corners: [Point; 4],
    pub progress: [f64; 2],
}

#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self {
            points: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Result<Self, TrailError> {
        if capacity == 0 {
            return Err(TrailError::ZeroCapacity);
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Appends a sample, evicting the oldest once full.
    pub fn add_point(&mut self, position: Point, scale: f64) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint::new(position, scale));
    }

    /// Multiplies every scale by `factor` and drops the faded tail.
    pub fn decay(&mut self, factor: f64) {
        for point in self.points.iter_mut() {
            point.scale *= factor;
        }
        while self.points.front().is_some_and(|p| p.scale <= MIN_SCALE) {
            self.points.pop_front();
        }
    }

    pub fn quads(&self, radius: f64, percent: f64) -> Vec<TrailQuad> {
        let mut quads = Vec::new();
        self.each(radius, percent, |quad| quads.push(quad));
        quads
    }

    /// Resamples the history into quads, showing the newest `percent` of it.
    /// The first visible sample is interpolated between buffer entries so the
    /// tail shrinks smoothly, and emitted indices count from that sample.
    pub fn each(&self, radius: f64, percent: f64, mut consumer: impl FnMut(TrailQuad)) {
        let len = self.points.len();
        if len < 2 {
            return;
        }

        let percent = percent.clamp(0.0, 1.0);
        let cap_size = (len - 1) as f64 * percent;
        if cap_size <= 0.0 {
            return;
        }

        let pos = (1.0 - percent) * len as f64;
        let ceil = pos.floor() + 1.0;
        let initial = ceil as usize;
        if initial >= len {
            return;
        }
        let initial_floor = initial - 1;
        let prog = ceil - pos;

        let mut emit = |index: usize,
                        prev: &TrailPoint,
                        next: &TrailPoint,
                        prev_prog: f64,
                        next_prog: f64,
                        last_angle: f64|
         -> f64 {
            let delta = next.position - prev.position;
            let width = curve(delta.length(), 0.0, SPEED_RAMP) * radius * prev.scale / cap_size;
            let exit_angle = (-delta.y).atan2(-delta.x);

            let c = Point::from_polar(FRAC_PI_2 - last_angle, width * prev_prog);
            let n = Point::from_polar(FRAC_PI_2 - exit_angle, width * next_prog);

            if c.approx_eq(Point::ZERO, DEGENERATE_OFFSET) && n.approx_eq(Point::ZERO, DEGENERATE_OFFSET)
            {
                return exit_angle;
            }

            consumer(TrailQuad {
                index,
                corners: [
                    prev.position - c,
                    prev.position + c,
                    next.position + n,
                    next.position - n,
                ],
                progress: [prev_prog / cap_size, next_prog / cap_size],
            });
            exit_angle
        };

        let first_next = self.points[initial];
        let first = TrailPoint::lerp(&first_next, &self.points[initial_floor], prog);
        let mut last_angle = emit(0, &first, &first_next, 0.0, prog, 0.0);

        for index in initial..len - 1 {
            let (current, next) = (&self.points[index], &self.points[index + 1]);
            if current.scale <= MIN_SCALE && next.scale <= MIN_SCALE {
                continue;
            }

            let cur = (index - initial) as f64 + prog;
            last_angle = emit(
                index - initial_floor,
                current,
                next,
                cur,
                cur + 1.0,
                last_angle,
            );
        }
    }
}
