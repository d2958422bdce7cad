//! Tick-driven step scheduler
//!
//! Called once per hardware tick. Each call does at most one pulse-unit of
//! work per axis and never fails.

pub mod tick;

pub use tick::{tick, TickEvents};
