pub mod easing;
pub mod math;
pub mod point;
pub mod trail;
pub mod tween;

pub use easing::Easing;
pub use math::Lerp;
pub use point::{Point, Rect};
pub use trail::{TrailBuffer, TrailPoint, TrailQuad};
pub use tween::{Animator, Tween, TweenHandle};
