//! Byte-level transport state for the I2C target
//!
//! Receive side: bytes are collected until a `0x00` terminator, at which
//! point the collected line is handed out exactly once.
//!
//! Transmit side: the current response is served one byte per master read,
//! padded with zeros up to [`BUFFER_SIZE`], after which the transaction is
//! complete.
//!
//! A stop condition resets both cursors.

use heapless::Vec;

/// Size of the receive and transmit buffers, terminator included
pub const BUFFER_SIZE: usize = 150;

/// Longest command line that fits alongside its terminator
pub const MAX_MESSAGE_LEN: usize = BUFFER_SIZE - 1;

/// A complete received line, terminator stripped
pub type Message = Vec<u8, MAX_MESSAGE_LEN>;

/// Errors raised while receiving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Line exceeded the receive buffer; it is dropped up to its terminator
    Overflow,
}

/// Receive assembler and transmit cursor
#[derive(Debug, Clone)]
pub struct Transport {
    rx: Message,
    discarding: bool,
    tx: Vec<u8, MAX_MESSAGE_LEN>,
    tx_pos: usize,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Create an idle transport with an empty response
    pub const fn new() -> Self {
        Self {
            rx: Vec::new(),
            discarding: false,
            tx: Vec::new(),
            tx_pos: 0,
        }
    }

    /// Feed one received byte
    ///
    /// Returns `Ok(Some(message))` when a terminator completes a line,
    /// `Ok(None)` while more bytes are needed.
    pub fn receive(&mut self, byte: u8) -> Result<Option<Message>, TransportError> {
        if byte == 0x00 {
            if self.discarding {
                self.discarding = false;
                return Ok(None);
            }
            return Ok(Some(core::mem::take(&mut self.rx)));
        }

        if self.discarding {
            return Ok(None);
        }

        if self.rx.push(byte).is_err() {
            self.rx.clear();
            self.discarding = true;
            return Err(TransportError::Overflow);
        }

        Ok(None)
    }

    /// Next byte for a master read, or `None` once the buffer is exhausted
    pub fn transmit(&mut self) -> Option<u8> {
        if self.tx_pos >= BUFFER_SIZE {
            return None;
        }
        let byte = self.tx.get(self.tx_pos).copied().unwrap_or(0x00);
        self.tx_pos += 1;
        Some(byte)
    }

    /// End of transaction: drop partial input and rewind the response
    pub fn stop(&mut self) {
        self.rx.clear();
        self.discarding = false;
        self.tx_pos = 0;
    }

    /// Replace the response; text beyond the buffer is truncated
    pub fn set_response(&mut self, text: &str) {
        self.tx.clear();
        let bytes = text.as_bytes();
        let len = bytes.len().min(MAX_MESSAGE_LEN);
        // len is bounded by capacity
        let _ = self.tx.extend_from_slice(&bytes[..len]);
        self.tx_pos = 0;
    }

    /// Empty the response buffer
    pub fn clear_response(&mut self) {
        self.tx.clear();
        self.tx_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(transport: &mut Transport, bytes: &[u8]) -> Vec<Message, 4> {
        let mut out = Vec::new();
        for &b in bytes {
            if let Ok(Some(msg)) = transport.receive(b) {
                out.push(msg).unwrap();
            }
        }
        out
    }

    fn drain(transport: &mut Transport) -> std::vec::Vec<u8> {
        core::iter::from_fn(|| transport.transmit()).collect()
    }

    #[test]
    fn test_message_per_terminator() {
        let mut t = Transport::new();
        let msgs = feed(&mut t, b"status\0pause\0");
        assert_eq!(msgs.len(), 2);
        assert_eq!(&msgs[0][..], b"status");
        assert_eq!(&msgs[1][..], b"pause");
    }

    #[test]
    fn test_partial_line_waits() {
        let mut t = Transport::new();
        assert!(feed(&mut t, b"stat").is_empty());
        let msgs = feed(&mut t, b"us\0");
        assert_eq!(&msgs[0][..], b"status");
    }

    #[test]
    fn test_stop_discards_partial() {
        let mut t = Transport::new();
        feed(&mut t, b"garbage");
        t.stop();
        let msgs = feed(&mut t, b"reset\0");
        assert_eq!(&msgs[0][..], b"reset");
    }

    #[test]
    fn test_overflow_drops_line() {
        let mut t = Transport::new();
        let mut overflowed = false;
        for _ in 0..BUFFER_SIZE {
            if t.receive(b'x') == Err(TransportError::Overflow) {
                overflowed = true;
            }
        }
        assert!(overflowed);
        // Terminator of the oversized line yields nothing
        assert_eq!(t.receive(0), Ok(None));
        let msgs = feed(&mut t, b"version\0");
        assert_eq!(&msgs[0][..], b"version");
    }

    #[test]
    fn test_longest_line_fits() {
        let mut t = Transport::new();
        let line = [b'x'; MAX_MESSAGE_LEN];
        assert!(feed(&mut t, &line).is_empty());
        let msgs = feed(&mut t, b"\0");
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].len(), MAX_MESSAGE_LEN);

        // One byte more no longer fits
        for _ in 0..MAX_MESSAGE_LEN {
            assert_eq!(t.receive(b'x'), Ok(None));
        }
        assert_eq!(t.receive(b'x'), Err(TransportError::Overflow));
        assert_eq!(t.receive(0), Ok(None));
    }

    #[test]
    fn test_transmit_pads_and_completes() {
        let mut t = Transport::new();
        t.set_response("OK");
        assert_eq!(t.transmit(), Some(b'O'));
        assert_eq!(t.transmit(), Some(b'K'));
        for _ in 2..BUFFER_SIZE {
            assert_eq!(t.transmit(), Some(0));
        }
        assert_eq!(t.transmit(), None);

        t.stop();
        assert_eq!(t.transmit(), Some(b'O'));
    }

    #[test]
    fn test_response_stable_until_replaced() {
        let mut t = Transport::new();
        t.set_response("BUFFER FULL");
        feed(&mut t, b"sta");
        let frame = drain(&mut t);
        assert_eq!(&frame[..11], b"BUFFER FULL");

        t.stop();
        t.clear_response();
        let frame = drain(&mut t);
        assert_eq!(frame.len(), BUFFER_SIZE);
        assert!(frame.iter().all(|&b| b == 0));
    }
}
