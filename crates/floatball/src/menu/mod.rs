pub mod layout;
pub mod orchestrator;
pub mod tree;

pub use layout::{Hit, LayerSpec, LayoutError, RingLayout, Sector};
pub use orchestrator::{Orchestrator, Signal, Step};
pub use tree::{Label, MenuNode, MenuTree};

pub const DEAD_ZONE_RADIUS: f64 = 5.0; // pointer this close to the centre hovers nothing
pub const HOVER_POLL_MS: u64 = 16;

// Ring transitions
pub const EXPAND_MS: u64 = 350;
pub const COLLAPSE_MS: u64 = 350;
pub const COLLAPSE_RANGE_MS: u64 = 250;
pub const FADE_MS: u64 = 200;

// Ball transitions
pub const BALL_SHRINK_MS: u64 = 300;
pub const BALL_GROW_MS: u64 = 300;
pub const EYE_MS: u64 = 500;
pub const EYE_HOVERED: f64 = -0.25;
pub const EYE_RESTING: f64 = 1.25;
pub const JELLY_RESTORE_MS: u64 = 600;
pub const JELLY_LIMIT: f64 = 100.0;
pub const TRAIL_FADE_MS: u64 = 300;
pub const DOCK_MS: u64 = 300;
