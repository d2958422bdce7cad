//! Strict unsigned integer text conversion
//!
//! The protocol only carries unsigned decimal numbers. A sign, if any, is
//! handled by the caller before the digits reach this module.

use core::fmt::Write;

use heapless::String;

/// Longest decimal rendering of a `u32`
pub const MAX_DIGITS: usize = 10;

/// Formatted number buffer
pub type NumberText = String<MAX_DIGITS>;

/// Errors from [`parse_uint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// No digits at all
    Empty,
    /// A character other than `0`-`9`
    InvalidDigit,
    /// Value does not fit the target type
    Overflow,
}

/// Parse a decimal string into an unsigned integer
///
/// Every character must be an ASCII digit; no sign, whitespace or prefix is
/// accepted, and values too large for `T` are rejected instead of wrapped.
pub fn parse_uint<T: TryFrom<u32>>(text: &str) -> Result<T, ConversionError> {
    if text.is_empty() {
        return Err(ConversionError::Empty);
    }

    let mut value: u32 = 0;
    for byte in text.bytes() {
        if !byte.is_ascii_digit() {
            return Err(ConversionError::InvalidDigit);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or(ConversionError::Overflow)?;
    }

    T::try_from(value).map_err(|_| ConversionError::Overflow)
}

/// Render an unsigned integer as decimal text
pub fn format_uint(value: u32) -> NumberText {
    let mut text = NumberText::new();
    // u32::MAX is exactly MAX_DIGITS long, so this cannot run out of room
    let _ = write!(text, "{}", value);
    text
}
