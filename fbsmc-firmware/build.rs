//! Build script for fbsmc-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time

use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs taken by the I2C target bus
const BUS_PINS: [i64; 2] = [0, 1];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        fail("board.toml not found", &["The firmware embeds board.toml; create one next to Cargo.toml.".into()]);
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_board(&config, &mut errors);
    let pins = collect_pins(&config, &mut errors);
    validate_pins(&pins, &mut errors);

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Validate the [board] section
fn validate_board(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(board) = config.get("board").and_then(|b| b.as_table()) else {
        return;
    };

    if let Some(tick) = board.get("tick_period_us") {
        match tick.as_integer() {
            Some(t) if t > 0 && t <= u32::MAX as i64 => {}
            _ => errors.push("[board] tick_period_us must be a positive integer".into()),
        }
    }

    if let Some(addr) = board.get("default_address") {
        match addr.as_integer() {
            Some(a) if a > 2 && a < 120 => {}
            _ => errors.push("[board] default_address must be 3..=119".into()),
        }
    }

    for key in board.keys() {
        if !["tick_period_us", "default_address"].contains(&key.as_str()) {
            errors.push(format!("[board] unknown key '{}'", key));
        }
    }
}

/// Gather every pin assignment as (location, gpio)
fn collect_pins(config: &toml::Value, errors: &mut Vec<String>) -> Vec<(String, i64)> {
    let mut pins = Vec::new();

    if let Some(axes) = config.get("axis").and_then(|a| a.as_table()) {
        for (name, axis) in axes {
            if !["a", "b", "c", "d"].contains(&name.to_ascii_lowercase().as_str()) {
                errors.push(format!("[axis.{}] axis must be a, b, c or d", name));
                continue;
            }
            for key in ["step_pin", "dir_pin"] {
                if let Some(value) = axis.get(key) {
                    push_pin(&mut pins, errors, format!("[axis.{}] {}", name, key), value);
                }
            }
        }
    }

    if let Some(switches) = config.get("limit_switches").and_then(|s| s.as_table()) {
        for (key, value) in switches {
            if !["sw0", "sw1", "sw2", "sw3"].contains(&key.as_str()) {
                errors.push(format!("[limit_switches] unknown key '{}'", key));
                continue;
            }
            push_pin(&mut pins, errors, format!("[limit_switches] {}", key), value);
        }
    }

    pins
}

fn push_pin(pins: &mut Vec<(String, i64)>, errors: &mut Vec<String>, at: String, value: &toml::Value) {
    match value.as_str().and_then(parse_pin) {
        Some(gpio) => pins.push((at, gpio)),
        None => errors.push(format!("{} must look like \"gpioNN\"", at)),
    }
}

/// Parse "gpioNN" with optional "!" / "^" prefixes
fn parse_pin(value: &str) -> Option<i64> {
    value
        .trim_start_matches(['!', '^'])
        .strip_prefix("gpio")?
        .parse()
        .ok()
}

/// Range, reserved and duplicate checks
fn validate_pins(pins: &[(String, i64)], errors: &mut Vec<String>) {
    let mut seen: HashMap<i64, &str> = HashMap::new();
    for (at, gpio) in pins {
        if !(0..=29).contains(gpio) {
            errors.push(format!("{} gpio{} does not exist", at, gpio));
        } else if BUS_PINS.contains(gpio) {
            errors.push(format!("{} gpio{} is reserved for I2C", at, gpio));
        } else if let Some(other) = seen.insert(*gpio, at) {
            errors.push(format!("gpio{} used by both {} and {}", gpio, other, at));
        }
    }
}
