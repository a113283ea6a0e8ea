use derive_more::{Add, Sub};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg};

#[derive(Debug, Clone, Copy, PartialEq, Default, Add, Sub, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector of `length` pointing at `angle` radians.
    pub fn from_polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other - *self).length()
    }

    /// True when `other` lies strictly closer than `tolerance`.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        dx * dx + dy * dy < tolerance * tolerance
    }

    pub fn clamp(&self, min: f64, max: f64) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Point::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_ops() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_eq!(-b, Point::new(-1.0, -1.0));
        assert_eq!(a.length(), 5.0);
    }

    #[test]
    fn test_approx_eq_is_strict() {
        let origin = Point::ZERO;
        assert!(origin.approx_eq(Point::new(0.005, 0.0), 0.01));
        assert!(!origin.approx_eq(Point::new(0.01, 0.0), 0.01));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }
}
