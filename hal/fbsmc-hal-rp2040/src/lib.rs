//! RP2040-specific HAL for the stepper controller firmware
//!
//! This crate provides RP2040 implementations of the shared `fbsmc-hal`
//! traits:
//!
//! - GPIO newtypes for step/dir outputs and limit switch inputs
//! - Dynamic pin allocation for config-driven setup
//! - Flash storage driver (implements `fbsmc_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod pins;

// Re-export shared traits from fbsmc-hal for convenience
pub use fbsmc_hal::{FlashStorage as FlashStorageTrait, StorageKey};
