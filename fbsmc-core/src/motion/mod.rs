//! Motion commands and the global motion state

pub mod command;
pub mod state;

pub use command::RunCommand;
pub use state::MotionState;
