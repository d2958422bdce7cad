//! Limit switch pattern decoding

/// Raw 4-bit limit switch sample
///
/// Inputs are pulled up, so a released switch reads 1. Bits above the low
/// nibble are always masked off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchPattern(u8);

impl SwitchPattern {
    /// Every switch released
    pub const RELEASED: Self = Self(0b1111);

    const MASK: u8 = 0b1111;

    /// Wrap a raw port read
    pub const fn new(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }

    /// Build a pattern from per-switch levels (`true` = input high)
    pub fn from_levels(levels: [bool; 4]) -> Self {
        let raw = levels
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, &high)| acc | ((high as u8) << bit));
        Self::new(raw)
    }

    /// Raw masked value
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if no switch is engaged
    pub const fn is_released(&self) -> bool {
        self.0 == Self::RELEASED.0
    }

    /// Check if at least one switch is engaged
    pub const fn is_engaged(&self) -> bool {
        !self.is_released()
    }

    /// Label used in the status report
    pub const fn label(&self) -> &'static str {
        match self.0 {
            15 => "NONE",
            14 => "SW0",
            6 => "SW1",
            10 => "SW2",
            2 => "SW3",
            12 => "SW4",
            4 => "SW5",
            8 => "SW6",
            _ => "UNDF",
        }
    }
}

impl Default for SwitchPattern {
    fn default() -> Self {
        Self::RELEASED
    }
}
