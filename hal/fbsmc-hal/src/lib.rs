//! FBSMC Hardware Abstraction Layer
//!
//! Board-independent traits between the motion core and the chip HAL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fbsmc-firmware (tasks, bring-up)       │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐   ┌───────────────────┐
//! │   fbsmc-core    │──▶│ fbsmc-hal (traits)│
//! └─────────────────┘   └───────────────────┘
//!                                 ▲
//!                       ┌───────────────────┐
//!                       │ fbsmc-hal-rp2040  │
//!                       └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - step/dir outputs, limit switch inputs
//! - [`flash::FlashStorage`] - persistent key-value storage
//! - [`i2c::BusAddress`] - validated I2C target address

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin};
pub use i2c::BusAddress;
