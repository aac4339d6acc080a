use crate::error::{Error, Result};
use crate::transport::{ByteSink, ByteSource};
use std::collections::VecDeque;

/// In-memory transport: bytes queued with [`push_input`](Self::push_input)
/// are handed out one per poll, and every write call is recorded separately.
#[derive(Debug, Default)]
pub struct MockTransport {
    input: VecDeque<u8>,
    writes: Vec<Vec<u8>>,
    fail_writes: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose writes always fail, for exercising error paths.
    pub fn with_failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Byte sequences in the order they were written, one entry per write call
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// All written bytes, concatenated
    pub fn written(&self) -> Vec<u8> {
        self.writes.concat()
    }

    /// Drains the recorded writes
    pub fn take_writes(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.writes)
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Moves everything written so far into the input queue.
    pub fn loop_back(&mut self) {
        for write in self.writes.drain(..) {
            self.input.extend(write);
        }
    }
}

impl ByteSource for MockTransport {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

impl ByteSink for MockTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Send("mock transport rejects writes".to_string()));
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}
