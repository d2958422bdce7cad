//! Board-agnostic core logic for the stepper controller firmware
//!
//! This crate contains everything that does not touch a specific chip:
//!
//! - Per-axis command queue with slot barriers
//! - Motion state (pause, limit switch latch, override move)
//! - Tick-driven step scheduler
//! - Command dispatcher and status report
//! - Output/input traits the scheduler drives
//! - Board configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod motion;
pub mod queue;
pub mod safety;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use fbsmc_protocol::{Axis, Direction, AXIS_COUNT};
