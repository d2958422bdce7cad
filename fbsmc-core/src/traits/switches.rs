//! Limit switch inputs

use fbsmc_hal::InputPin;

use crate::safety::SwitchPattern;

/// Source of limit switch samples
pub trait LimitSwitchInput {
    /// Read all switches at once
    fn sample(&mut self) -> SwitchPattern;
}

/// [`LimitSwitchInput`] over four pulled-up GPIO inputs, bit 0 first
///
/// An inverted input reads as released when the pin is low.
pub struct PinSwitches<P> {
    pins: [P; 4],
    inverted: [bool; 4],
}

impl<P: InputPin> PinSwitches<P> {
    pub fn new(pins: [P; 4], inverted: [bool; 4]) -> Self {
        Self { pins, inverted }
    }
}

impl<P: InputPin> LimitSwitchInput for PinSwitches<P> {
    fn sample(&mut self) -> SwitchPattern {
        let mut levels = [true; 4];
        for (i, pin) in self.pins.iter().enumerate() {
            levels[i] = pin.is_high() != self.inverted[i];
        }
        SwitchPattern::from_levels(levels)
    }
}
