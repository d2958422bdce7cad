//! Minimal TOML reader for `board.toml`
//!
//! Handles only the subset the board file uses. It does NOT support the
//! full TOML spec.
//!
//! Supported:
//! - `[board]`, `[axis.<letter>]` and `[limit_switches]` sections
//! - Key = value pairs (integers and quoted strings)
//! - Comments (# ...)
//!
//! Pin values are strings like `"gpio11"`; a leading `!` marks the pin
//! inverted and `^` enables the pull-up.

use fbsmc_protocol::Axis;

use super::board::{BoardConfig, ConfigError, PinConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Key not known in its section
    UnknownKey,
    /// Line is neither a section header nor `key = value`
    InvalidLine,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Parsed but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Board,
    Axis(Axis),
    LimitSwitches,
}

/// Parse and validate a board file
///
/// Keys that are absent keep their [`BoardConfig::default`] value.
pub fn parse_board(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();
    match header {
        "board" => return Ok(Section::Board),
        "limit_switches" => return Ok(Section::LimitSwitches),
        _ => {}
    }

    let letter = header
        .strip_prefix("axis.")
        .ok_or(ParseError::InvalidSection)?;
    let mut chars = letter.chars();
    match (chars.next().and_then(Axis::from_letter), chars.next()) {
        (Some(axis), None) => Ok(Section::Axis(axis)),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Board, "tick_period_us") => config.tick_period_us = parse_int(value)?,
        (Section::Board, "default_address") => config.default_address = parse_int(value)?,
        (Section::Axis(axis), "step_pin") => config.axes[axis.index()].step = parse_pin(value)?,
        (Section::Axis(axis), "dir_pin") => config.axes[axis.index()].dir = parse_pin(value)?,
        (Section::LimitSwitches, key) => {
            let index: usize = key
                .strip_prefix("sw")
                .and_then(|n| n.parse().ok())
                .filter(|&n| n < config.switches.len())
                .ok_or(ParseError::UnknownKey)?;
            config.switches[index] = parse_pin(value)?;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Split `key = value`, dropping an inline comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Decimal or `0x` hex integer
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut pin = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    pin.pin = s
        .strip_prefix("gpio")
        .and_then(|n| n.parse().ok())
        .ok_or(ParseError::InvalidPin)?;
    Ok(pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap();
        assert_eq!(pin, PinConfig::new(11));

        let pin = parse_pin("!gpio12").unwrap();
        assert_eq!(pin, PinConfig::inverted(12));

        let pin = parse_pin("^gpio4").unwrap();
        assert_eq!(pin, PinConfig::with_pullup(4));

        let pin = parse_pin("\"^!gpio5\"").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("pin5"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("board"), Ok(Section::Board));
        assert_eq!(parse_section_header("axis.c"), Ok(Section::Axis(Axis::C)));
        assert_eq!(parse_section_header("axis.D"), Ok(Section::Axis(Axis::D)));
        assert_eq!(
            parse_section_header("axis.e"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("axis.ab"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_section_header("stepper"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u8>("0x50"), Ok(0x50));
        assert_eq!(parse_int::<u32>("250"), Ok(250));
        assert_eq!(parse_int::<u8>("300"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_board_file() {
        let input = r#"
# Test board
[board]
tick_period_us = 100
default_address = 0x42   # hex is fine

[axis.a]
step_pin = "gpio2"
dir_pin = "!gpio3"

[limit_switches]
sw2 = "^gpio26"
"#;
        let config = parse_board(input).unwrap();
        assert_eq!(config.tick_period_us, 100);
        assert_eq!(config.default_address, 0x42);
        assert_eq!(config.axes[0].step, PinConfig::new(2));
        assert_eq!(config.axes[0].dir, PinConfig::inverted(3));
        assert_eq!(config.switches[2], PinConfig::with_pullup(26));
        // Untouched entries keep their defaults
        assert_eq!(config.axes[1], BoardConfig::default().axes[1]);
    }

    #[test]
    fn test_embedded_board_file() {
        let input = include_str!("../../../fbsmc-firmware/board.toml");
        assert!(parse_board(input).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_pin() {
        let input = "[axis.b]\nstep_pin = \"gpio10\"\n";
        assert_eq!(
            parse_board(input),
            Err(ParseError::Invalid(ConfigError::DuplicatePin(10)))
        );
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert_eq!(
            parse_board("[board]\nspeed = 3\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_board("[limit_switches]\nsw4 = \"gpio1\"\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_board("tick_period_us = 5\n"), Err(ParseError::UnknownKey));
        assert_eq!(parse_board("[board]\njunk\n"), Err(ParseError::InvalidLine));
    }
}
