//! Board configuration types

use fbsmc_hal::BusAddress;
use fbsmc_protocol::AXIS_COUNT;

/// Highest usable GPIO number (RP2040 bank 0)
pub const MAX_GPIO: u8 = 29;

/// GPIOs wired to the I2C target bus (SDA, SCL)
pub const BUS_PINS: [u8; 2] = [0, 1];

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Step and direction pins of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisPinConfig {
    pub step: PinConfig,
    /// Inverted swaps which level means `Forward`
    pub dir: PinConfig,
}

impl AxisPinConfig {
    pub const fn new(step: u8, dir: u8) -> Self {
        Self {
            step: PinConfig::new(step),
            dir: PinConfig::new(dir),
        }
    }
}

/// Validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period must be non-zero
    InvalidTickPeriod,
    /// Default bus address outside `2 < n < 120`
    InvalidAddress(u8),
    /// GPIO number above [`MAX_GPIO`]
    PinOutOfRange(u8),
    /// GPIO belongs to the I2C bus
    ReservedPin(u8),
    /// Same GPIO assigned twice
    DuplicatePin(u8),
}

/// Everything the firmware needs to bring up one board
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Scheduler tick period in microseconds
    pub tick_period_us: u32,
    /// Bus address used until one is persisted
    pub default_address: u8,
    pub axes: [AxisPinConfig; AXIS_COUNT],
    /// Limit switch inputs, bit 0 first
    pub switches: [PinConfig; 4],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tick_period_us: 250,
            default_address: BusAddress::DEFAULT.get(),
            axes: [
                AxisPinConfig::new(10, 11),
                AxisPinConfig::new(12, 13),
                AxisPinConfig::new(14, 15),
                AxisPinConfig::new(16, 17),
            ],
            switches: [
                PinConfig::with_pullup(18),
                PinConfig::with_pullup(19),
                PinConfig::with_pullup(20),
                PinConfig::with_pullup(21),
            ],
        }
    }
}

impl BoardConfig {
    /// Default address as a validated [`BusAddress`]
    pub fn bus_address(&self) -> Option<BusAddress> {
        BusAddress::new(self.default_address)
    }

    /// Step inversion per axis
    pub fn step_inverted(&self) -> [bool; AXIS_COUNT] {
        self.axes.map(|a| a.step.inverted)
    }

    /// Direction inversion per axis
    pub fn dir_inverted(&self) -> [bool; AXIS_COUNT] {
        self.axes.map(|a| a.dir.inverted)
    }

    /// Switch inversion, bit 0 first
    pub fn switch_inverted(&self) -> [bool; 4] {
        self.switches.map(|s| s.inverted)
    }

    /// Every pin in claim order: step/dir per axis, then switches
    pub fn pins(&self) -> impl Iterator<Item = &PinConfig> {
        self.axes
            .iter()
            .flat_map(|a| [&a.step, &a.dir])
            .chain(self.switches.iter())
    }

    /// Check timing, address and pin assignment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_us == 0 {
            return Err(ConfigError::InvalidTickPeriod);
        }
        if self.bus_address().is_none() {
            return Err(ConfigError::InvalidAddress(self.default_address));
        }

        let mut seen: u32 = 0;
        for pin in self.pins() {
            if pin.pin > MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(pin.pin));
            }
            if BUS_PINS.contains(&pin.pin) {
                return Err(ConfigError::ReservedPin(pin.pin));
            }
            let bit = 1u32 << pin.pin;
            if seen & bit != 0 {
                return Err(ConfigError::DuplicatePin(pin.pin));
            }
            seen |= bit;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bus_address(), Some(BusAddress::DEFAULT));
        assert_eq!(config.pins().count(), 12);
    }

    #[test]
    fn test_duplicate_pin() {
        let mut config = BoardConfig::default();
        config.switches[3].pin = 10;
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(10)));
    }

    #[test]
    fn test_out_of_range() {
        let mut config = BoardConfig::default();
        config.axes[1].dir.pin = 30;
        assert_eq!(config.validate(), Err(ConfigError::PinOutOfRange(30)));
    }

    #[test]
    fn test_bus_pins_reserved() {
        let mut config = BoardConfig::default();
        config.axes[0].step.pin = 1;
        assert_eq!(config.validate(), Err(ConfigError::ReservedPin(1)));
    }

    #[test]
    fn test_address_and_tick() {
        let mut config = BoardConfig::default();
        config.default_address = 120;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(120)));

        let mut config = BoardConfig::default();
        config.tick_period_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickPeriod));
    }

    #[test]
    fn test_dir_inverted() {
        let mut config = BoardConfig::default();
        config.axes[2].dir = PinConfig::inverted(15);
        assert_eq!(config.dir_inverted(), [false, false, true, false]);
        assert_eq!(config.step_inverted(), [false; 4]);
    }

    #[test]
    fn test_step_and_switch_inverted() {
        let mut config = BoardConfig::default();
        config.axes[0].step = PinConfig::inverted(10);
        config.switches[3].inverted = true;
        assert_eq!(config.step_inverted(), [true, false, false, false]);
        assert_eq!(config.switch_inverted(), [false, false, false, true]);
        assert_eq!(config.dir_inverted(), [false; 4]);
    }
}
