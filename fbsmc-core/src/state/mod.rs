//! Shared machine state
//!
//! Everything the tick handler and the command dispatcher both touch lives
//! in one [`Machine`], handed by `&mut` to whichever of them runs.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Machine, Mode};
