//! Byte transports the codec runs on top of.
//!
//! The codec only needs two primitives:
//! - [`ByteSource`] polls for at most one byte and never blocks
//! - [`ByteSink`] writes a short byte sequence
//!
//! Implementations:
//! - [`MidirTransport`] for OS MIDI ports
//! - [`MockTransport`] for tests
//! - [`ReaderSource`] for raw byte dumps read from a file or pipe

mod midir_transport;
mod mock;
mod reader;

use crate::error::Result;
use std::collections::VecDeque;

pub use midir_transport::MidirTransport;
pub use mock::MockTransport;
pub use reader::ReaderSource;

/// Non-blocking input side of a transport
pub trait ByteSource {
    /// Returns the next received byte, or `None` if nothing is available yet.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Output side of a transport
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }
}

impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}
