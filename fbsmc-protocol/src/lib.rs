//! FBSMC bus command protocol
//!
//! The host writes a null-terminated text line to the board's I2C target
//! address, then reads back a null-padded text response.
//!
//! ```text
//! host  ──▶  "run:A100,5:B-50,3\0"
//! host  ◀──  "OK\0\0\0..."
//! ```
//!
//! Tokens are separated by any of `:` `,` `;`. The first token selects the
//! command; the remaining tokens are its arguments.
//!
//! This crate holds the wire vocabulary only: numbers, axis letters,
//! command words, response strings, and the byte-level transport state.
//! Applying a command to the motion state lives in `fbsmc-core`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod axis;
pub mod command;
pub mod number;
pub mod response;
pub mod transport;

pub use axis::{Axis, Direction, AXIS_COUNT};
pub use command::{ArgError, AxisMove, Command, MoveArgs, Tokens, DELIMITERS};
pub use number::{format_uint, parse_uint, ConversionError, NumberText};
pub use response::{Response, VERSION};
pub use transport::{Message, Transport, TransportError, BUFFER_SIZE, MAX_MESSAGE_LEN};
