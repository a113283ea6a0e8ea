pub mod host;
pub mod sim;

pub use host::Host;
pub use sim::SimHost;
