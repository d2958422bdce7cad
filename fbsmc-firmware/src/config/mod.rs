//! Configuration loading
//!
//! The board layout is compiled in from `board.toml`; the bus address is
//! persisted in flash.

pub mod address;

pub use address::AddressStore;

use defmt::*;
use fbsmc_core::config::{parse_board, BoardConfig};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../board.toml");

/// Parse the embedded board file, falling back to built-in defaults
pub fn load_board_config() -> BoardConfig {
    match parse_board(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Board config: tick={}us, default address={:#x}",
                config.tick_period_us, config.default_address
            );
            config
        }
        Err(e) => {
            error!("board.toml rejected ({:?}), using built-in defaults", e);
            BoardConfig::default()
        }
    }
}
