use crate::point::Point;

/// Linear ramp: 0 below `from`, 1 above `to`, proportional in between.
pub fn curve(f: f64, from: f64, to: f64) -> f64 {
    if f < from {
        0.0
    } else if f > to {
        1.0
    } else {
        (f - from) / (to - from)
    }
}

/// Values a tween can interpolate.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t as f32
    }
}

impl Lerp for Point {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Point::new(f64::lerp(a.x, b.x, t), f64::lerp(a.y, b.y, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_bounds() {
        assert_eq!(curve(-1.0, 0.0, 0.5), 0.0);
        assert_eq!(curve(0.25, 0.0, 0.5), 0.5);
        assert_eq!(curve(3.0, 0.0, 0.5), 1.0);
    }

    #[test]
    fn test_point_lerp() {
        let p = Point::lerp(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 0.25);
        assert_eq!(p, Point::new(2.5, 7.5));
    }
}
