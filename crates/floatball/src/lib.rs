pub mod ball;
pub mod command;
pub mod config;
pub mod events;
pub mod menu;
pub mod scene;
pub mod sys;

pub use ball::FloatingBall;
pub use command::Command;
pub use config::BallConfig;
pub use events::BallEvent;
