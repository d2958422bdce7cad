//! Embassy async tasks
//!
//! Two triggers drive the machine: the step tick and the I2C target bus.

pub mod bus;
pub mod tick;

pub use bus::{bus_task, BusPeripherals};
pub use tick::{tick_task, BoardOutputs, BoardSwitches};
