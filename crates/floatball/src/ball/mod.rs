pub mod controller;
pub mod dock;
pub mod frame;
pub mod theme;

pub use controller::FloatingBall;
pub use dock::DockDirection;
pub use frame::{FrameState, LayerFrame, SectorFrame};
pub use theme::{SegmentState, ThemeColors};
