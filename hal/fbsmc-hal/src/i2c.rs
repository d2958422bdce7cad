//! I2C target (slave) addressing
//!
//! The board answers on a single 7-bit address that the host can change
//! at runtime with `setaddr`. Addresses at or below 2 and at or above 120
//! are refused so the board never lands on a reserved or broadcast slot.

/// Address used when nothing valid has been persisted
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Validated 7-bit I2C target address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    /// Factory default address (0x50)
    pub const DEFAULT: Self = Self(DEFAULT_ADDRESS);

    /// Validate an address; accepted range is `2 < value < 120`
    pub const fn new(value: u8) -> Option<Self> {
        if value > 2 && value < 120 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Validate a wider integer (e.g. straight from the text protocol)
    pub fn from_u16(value: u16) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::new)
    }

    /// Raw 7-bit address
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for BusAddress {
    fn default() -> Self {
        Self::DEFAULT
    }
}
