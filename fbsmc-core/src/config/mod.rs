//! Board configuration
//!
//! Pin assignment and timing for one board, read from `board.toml` at boot
//! and validated before any pin is claimed.

pub mod board;
pub mod toml;

pub use board::{AxisPinConfig, BoardConfig, ConfigError, PinConfig, BUS_PINS, MAX_GPIO};
pub use toml::{parse_board, ParseError};
