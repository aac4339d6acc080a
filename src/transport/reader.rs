use crate::transport::ByteSource;
use log::{debug, error};
use std::io::{ErrorKind, Read};

/// Reads a raw MIDI byte stream from any [`Read`] implementation.
///
/// End of input and read errors both look like "no byte available"; once
/// either happens the source stays exhausted.
pub struct ReaderSource<R> {
    reader: R,
    exhausted: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            exhausted: false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.exhausted {
            return None;
        }

        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    debug!("End of MIDI byte stream");
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("Failed to read MIDI byte stream: {}", e);
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}
