//! Safety inputs
//!
//! Limit switches are sampled once per tick. Any engaged switch latches the
//! machine into a stopped state until an override move completes or the
//! board is reset.

pub mod switches;

pub use switches::SwitchPattern;
