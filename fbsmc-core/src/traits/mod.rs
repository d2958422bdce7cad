//! Hardware seams driven by the scheduler
//!
//! The scheduler only sees these traits. Pin-backed implementations live
//! here too so the firmware only has to hand over chip pins.

pub mod outputs;
pub mod switches;

pub use outputs::{AxisOutputs, PinOutputs};
pub use switches::{LimitSwitchInput, PinSwitches};
